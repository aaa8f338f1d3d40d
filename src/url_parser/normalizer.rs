use url::Url;

/// Scheme prepended to input that does not already carry http(s)
const DEFAULT_SCHEME_PREFIX: &str = "https://";

/// Schemes accepted as already present, compared ASCII case-insensitively
const HTTP_SCHEME_PREFIXES: [&str; 2] = ["http://", "https://"];

/// Result of normalizing a piece of user supplied URL text
///
/// `as_str()` always yields exactly what [`normalize_url`] returns for the
/// same input; the variant only records which path produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalized {
    /// Input was empty or whitespace only
    Empty,
    /// The URL parser accepted the input; holds its canonical form
    Canonical(Url),
    /// The URL parser rejected the input; holds the scheme-prefixed text unchanged
    Fallback(String),
}

impl Normalized {
    pub fn as_str(&self) -> &str {
        match self {
            Normalized::Empty => "",
            Normalized::Canonical(url) => url.as_str(),
            Normalized::Fallback(raw) => raw,
        }
    }

    /// Whether the URL parser accepted the input
    pub fn is_canonical(&self) -> bool {
        matches!(self, Normalized::Canonical(_))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Normalized::Empty)
    }

    pub fn into_string(self) -> String {
        match self {
            Normalized::Empty => String::new(),
            Normalized::Canonical(url) => url.into(),
            Normalized::Fallback(raw) => raw,
        }
    }
}

/// Returns true if `s` starts with `http://` or `https://`, ignoring ASCII case
pub(crate) fn has_http_scheme(s: &str) -> bool {
    HTTP_SCHEME_PREFIXES.iter().any(|prefix| {
        s.get(..prefix.len())
            .map_or(false, |head| head.eq_ignore_ascii_case(prefix))
    })
}

/// Normalizes user input into an absolute http(s) URL, reporting which path was taken
///
/// # Arguments
/// * `input` - Arbitrary text, e.g. the contents of an "add feed" field
///
/// # Returns
/// * `Normalized` - Empty, the canonical URL, or the best-effort fallback text
pub fn normalize_url_detailed(input: &str) -> Normalized {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Normalized::Empty;
    }

    let candidate = if has_http_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("{}{}", DEFAULT_SCHEME_PREFIX, trimmed)
    };

    match Url::parse(&candidate) {
        Ok(url) => Normalized::Canonical(url),
        Err(_) => Normalized::Fallback(candidate),
    }
}

/// Normalizes user input into an absolute http(s) URL string
///
/// Never fails. Returns an empty string for empty or whitespace-only input,
/// the parser's canonical serialization when the (scheme-prefixed) text is a
/// valid URL, and the scheme-prefixed text verbatim otherwise. Applying it
/// twice gives the same result as applying it once.
///
/// # Examples
///
/// - `normalize_url("example.com")` → `"https://example.com/"`
/// - `normalize_url("HTTP://Example.com")` → `"http://example.com/"`
/// - `normalize_url("a b c")` → `"https://a b c"`
pub fn normalize_url(input: &str) -> String {
    normalize_url_detailed(input).into_string()
}
