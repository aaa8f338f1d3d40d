use proptest::prelude::*;

use crate::testkit::live_query::LiveCollection;
use crate::url_parser::{normalize_url, normalize_url_detailed, validate_fetch_target};

fn starts_with_http_scheme(s: &str) -> bool {
    let lower = s.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

// URL-ish text: optional scheme in random case, a host-like body, optional port and path.
fn url_like() -> impl Strategy<Value = String> {
    let scheme = prop::sample::select(vec!["", "http://", "https://", "HTTP://", "Https://", "ftp://"]);
    let host = "[a-zA-Z0-9.-]{0,24}";
    let port = prop::option::of(0u32..70000);
    let path = "(/[a-zA-Z0-9 %._~?#&=-]{0,16}){0,3}";
    let padding = "[ \t]{0,2}";

    (padding, scheme, host, port, path, padding).prop_map(|(lead, scheme, host, port, path, tail)| {
        let port = port.map(|p| format!(":{}", p)).unwrap_or_default();
        format!("{}{}{}{}{}{}", lead, scheme, host, port, path, tail)
    })
}

proptest! {
    #[test]
    fn normalize_is_idempotent(input in any::<String>()) {
        let once = normalize_url(&input);
        prop_assert_eq!(normalize_url(&once), once);
    }

    #[test]
    fn normalize_is_idempotent_for_url_like_input(input in url_like()) {
        let once = normalize_url(&input);
        prop_assert_eq!(normalize_url(&once), once);
    }

    #[test]
    fn non_empty_output_has_http_scheme(input in any::<String>()) {
        let out = normalize_url(&input);
        prop_assert!(out.is_empty() || starts_with_http_scheme(&out), "bad output {:?}", out);
    }

    #[test]
    fn url_like_output_has_http_scheme(input in url_like()) {
        let out = normalize_url(&input);
        prop_assert!(out.is_empty() || starts_with_http_scheme(&out), "bad output {:?}", out);
    }

    #[test]
    fn output_is_empty_only_for_blank_input(input in any::<String>()) {
        prop_assert_eq!(normalize_url(&input).is_empty(), input.trim().is_empty());
    }

    #[test]
    fn canonical_results_pass_validation(input in url_like()) {
        let normalized = normalize_url_detailed(&input);
        if normalized.is_canonical() {
            prop_assert!(validate_fetch_target(normalized.as_str()).is_ok());
        }
    }
}

#[test]
fn control_and_oversized_input_do_not_panic() {
    let long = "a".repeat(100_000);
    let out = normalize_url(&long);
    assert!(out.starts_with("https://"));

    for input in ["\u{0}", "\u{1}\u{2}", "\u{7f}", "exa\tmple.com", "[::1", "http://[::1]:99999"] {
        let out = normalize_url(input);
        assert_eq!(normalize_url(&out), out);
    }
}

#[test]
fn whitespace_inside_scheme_is_cleaned_by_parser() {
    assert_eq!(normalize_url("exa\tmple.com"), "https://example.com/");
}

#[derive(Debug, Clone)]
struct Subscription {
    url: String,
    title: &'static str,
}

#[test]
fn subscriptions_dedupe_on_normalized_url() {
    let subscriptions = LiveCollection::new();
    let feeds = subscriptions
        .query()
        .sort_by_key(|s: &Subscription| s.title)
        .limit(10);

    for (raw, title) in [
        ("example.com/feed", "Example"),
        ("blog.example.org", "Blog"),
    ] {
        subscriptions.insert(Subscription {
            url: normalize_url(raw),
            title,
        });
    }

    let already_subscribed = |raw: &str| {
        let wanted = normalize_url(raw);
        subscriptions
            .query()
            .filter(move |s: &Subscription| s.url == wanted)
            .count()
            > 0
    };

    assert!(already_subscribed("  HTTPS://Example.com/feed "));
    assert!(already_subscribed("https://blog.example.org/"));
    assert!(!already_subscribed("http://example.com/feed"));

    let titles: Vec<_> = feeds.to_vec().into_iter().map(|s| s.title).collect();
    assert_eq!(titles, vec!["Blog", "Example"]);
}
