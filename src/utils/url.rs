// src/utils/url.rs

//! URL manipulation utilities.

use url::Url;

/// Resolve a potentially relative URL against a base URL.
pub fn resolve_url(base: &Url, href: &str) -> String {
    base.join(href)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| href.to_string())
}

/// Resolve a URL string against a base URL string.
pub fn resolve(base_url: &str, href: &str) -> Option<String> {
    Url::parse(base_url)
        .ok()
        .map(|base| resolve_url(&base, href))
}

/// Build the page URL for a given offset by substituting `p{offset}` at
/// the marker segment. The prefix before the first marker occurrence is
/// kept; a URL without the marker gets the page suffix appended.
pub fn paginate(url: &str, marker: &str, offset: usize) -> String {
    match url.split_once(marker) {
        Some((prefix, _)) => format!("{prefix}p{offset}{marker}"),
        None => format!("{url}p{offset}{marker}"),
    }
}
