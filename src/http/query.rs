//! Query string splitting
//!
//! Parameters are kept in request order because the dynamic pages interpret
//! some of them by position.

/// Split a raw query string into `(key, value)` pairs
///
/// Empty segments are skipped; a segment without `=` has an empty value.
/// No percent-decoding is applied.
pub fn parse_query(query: &str) -> Vec<(&str, &str)> {
    query
        .split('&')
        .filter(|segment| !segment.is_empty())
        .map(|segment| segment.split_once('=').unwrap_or((segment, "")))
        .collect()
}

/// Split a request target into path and optional query
pub fn split_target(target: &str) -> (&str, Option<&str>) {
    match target.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (target, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_query_keeps_order() {
        assert_eq!(parse_query("ps=1&id=4"), vec![("ps", "1"), ("id", "4")]);
        assert_eq!(parse_query("TYPE=Fire"), vec![("TYPE", "Fire")]);
    }

    #[test]
    fn test_parse_query_edge_cases() {
        assert!(parse_query("").is_empty());
        assert_eq!(parse_query("a&&b=2"), vec![("a", ""), ("b", "2")]);
        assert_eq!(parse_query("k=v=w"), vec![("k", "v=w")]);
    }

    #[test]
    fn test_split_target() {
        assert_eq!(split_target("/pokemon.html?id=4"), ("/pokemon.html", Some("id=4")));
        assert_eq!(split_target("/index.html"), ("/index.html", None));
        assert_eq!(split_target("/x?"), ("/x", Some("")));
    }
}
