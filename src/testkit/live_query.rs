//! In-memory stand-in for the reactive live-query data layer.
//!
//! A [`LiveCollection`] owns the rows; a [`LiveQuery`] is a chain of
//! filter / sort / limit steps that is re-run against the collection's
//! current contents every time it is read, so a query built before an
//! insert still sees the new row.

use std::cmp::Ordering;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

type Predicate<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;
type Comparator<T> = Box<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

enum Step<T> {
    Filter(Predicate<T>),
    Sort(Comparator<T>),
    Reverse,
    Limit(usize),
}

/// Shared, mutable list of rows that queries read from
#[derive(Debug)]
pub struct LiveCollection<T> {
    rows: Arc<RwLock<Vec<T>>>,
}

impl<T> Clone for LiveCollection<T> {
    fn clone(&self) -> Self {
        Self {
            rows: Arc::clone(&self.rows),
        }
    }
}

impl<T: Clone> Default for LiveCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> LiveCollection<T> {
    pub fn new() -> Self {
        Self::from_items(Vec::new())
    }

    pub fn from_items(items: Vec<T>) -> Self {
        Self {
            rows: Arc::new(RwLock::new(items)),
        }
    }

    pub fn insert(&self, item: T) {
        self.write().push(item);
    }

    /// Removes every row matching `predicate`, returning how many were removed
    pub fn remove_where(&self, predicate: impl Fn(&T) -> bool) -> usize {
        let mut rows = self.write();
        let before = rows.len();
        rows.retain(|row| !predicate(row));
        before - rows.len()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Starts a query over every row
    pub fn query(&self) -> LiveQuery<T> {
        LiveQuery {
            source: Arc::clone(&self.rows),
            steps: Vec::new(),
        }
    }

    // Poisoning is ignored: rows are plain values.
    fn read(&self) -> RwLockReadGuard<'_, Vec<T>> {
        self.rows.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<T>> {
        self.rows.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Lazily evaluated query over a [`LiveCollection`]
pub struct LiveQuery<T> {
    source: Arc<RwLock<Vec<T>>>,
    steps: Vec<Step<T>>,
}

impl<T: Clone + 'static> LiveQuery<T> {
    pub fn filter(mut self, predicate: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        self.steps.push(Step::Filter(Box::new(predicate)));
        self
    }

    /// Stable sort on the key returned by `key`
    pub fn sort_by_key<K: Ord + 'static>(mut self, key: impl Fn(&T) -> K + Send + Sync + 'static) -> Self {
        self.steps
            .push(Step::Sort(Box::new(move |a, b| key(a).cmp(&key(b)))));
        self
    }

    pub fn reverse(mut self) -> Self {
        self.steps.push(Step::Reverse);
        self
    }

    pub fn limit(mut self, n: usize) -> Self {
        self.steps.push(Step::Limit(n));
        self
    }

    /// Runs the query against the current rows
    pub fn to_vec(&self) -> Vec<T> {
        let mut rows = self
            .source
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone();

        for step in &self.steps {
            match step {
                Step::Filter(predicate) => rows.retain(|row| predicate(row)),
                Step::Sort(compare) => rows.sort_by(|a, b| compare(a, b)),
                Step::Reverse => rows.reverse(),
                Step::Limit(n) => rows.truncate(*n),
            }
        }
        rows
    }

    pub fn first(&self) -> Option<T> {
        self.to_vec().into_iter().next()
    }

    pub fn count(&self) -> usize {
        self.to_vec().len()
    }
}
