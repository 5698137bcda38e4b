//! Address string helpers.
//!
//! Provides consistent address handling across the codebase:
//! - Link type detection (external vs build-owned)
//! - Query/fragment splitting

/// Check if a link is external (has a URL scheme like http:, data:, etc.)
///
/// A valid scheme must:
/// - Have at least 1 character before the colon
/// - Only contain ASCII alphanumeric or `+`, `-`, `.`
///
/// Protocol-relative links (`//cdn.example.com/a.js`) are external as well.
///
/// # Examples
/// ```
/// use tplc::utils::path::route::is_external_link;
/// assert!(is_external_link("https://example.com/a.js"));
/// assert!(is_external_link("//cdn.example.com/a.js"));
/// assert!(is_external_link("data:image/png;base64,AAAA"));
/// assert!(!is_external_link("./a.js"));
/// ```
#[inline]
pub fn is_external_link(link: &str) -> bool {
    if link.starts_with("//") {
        return true;
    }
    link.find(':').is_some_and(|pos| {
        pos > 0
            && link[..pos]
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    })
}

/// Split an address into its path and the raw query string.
///
/// The fragment is dropped. The query is `None` when there is no `?`.
///
/// # Examples
/// ```
/// use tplc::utils::path::route::split_query;
/// assert_eq!(split_query("a.js?__inline#top"), ("a.js", Some("__inline")));
/// assert_eq!(split_query("a.js#top"), ("a.js", None));
/// assert_eq!(split_query("a.js"), ("a.js", None));
/// ```
#[inline]
pub fn split_query(address: &str) -> (&str, Option<&str>) {
    let without_fragment = address.split_once('#').map_or(address, |(head, _)| head);
    match without_fragment.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (without_fragment, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_external_link() {
        assert!(is_external_link("https://example.com"));
        assert!(is_external_link("http://example.com/a.css"));
        assert!(is_external_link("mailto:user@example.com"));
        assert!(is_external_link("//cdn.example.com/lib.js"));
        assert!(!is_external_link("/static/a.js"));
        assert!(!is_external_link("./file.js"));
        assert!(!is_external_link("../lib/a.js?v=1:2"));
        assert!(!is_external_link(":nothing"));
    }

    #[test]
    fn test_split_query() {
        assert_eq!(split_query("a.png?__inline"), ("a.png", Some("__inline")));
        assert_eq!(split_query("a.png?x=1&__inline"), ("a.png", Some("x=1&__inline")));
        assert_eq!(split_query("a.png#frag?no"), ("a.png", None));
        assert_eq!(split_query(""), ("", None));
    }
}
