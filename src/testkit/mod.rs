//! Test doubles for collaborators that live outside this crate.

pub mod live_query;
