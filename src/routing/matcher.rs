//! Route pattern matching.
//!
//! # Responsibilities
//! - Normalize navigation paths before matching
//! - Match a path against a single pattern in full or prefix mode
//!
//! # Design Decisions
//! - Paths are case-sensitive
//! - Prefix matching only at segment boundaries (`admin` does not match
//!   `administrators`)
//! - No regex to guarantee O(n) matching
//! - Query string and fragment never participate in matching

use crate::routing::entry::{MatchMode, RoutePattern};

/// Normalize a raw navigation path for matching.
///
/// Strips the query string and fragment, then leading and trailing
/// slashes. The empty string denotes the application root.
pub fn normalize(path: &str) -> &str {
    let end = path
        .find(|c| c == '?' || c == '#')
        .unwrap_or(path.len());
    path[..end].trim_matches('/')
}

/// True when `path` (already normalized) matches `pattern` under `mode`.
pub fn pattern_matches(pattern: &RoutePattern, mode: MatchMode, path: &str) -> bool {
    match pattern {
        // Root only ever matches the empty path; a prefix-matching root
        // would shadow the entire table.
        RoutePattern::Root => path.is_empty(),
        RoutePattern::Wildcard => true,
        RoutePattern::Literal(literal) => match mode {
            MatchMode::Full => path == literal,
            MatchMode::Prefix => {
                path == literal
                    || (path.starts_with(literal.as_str())
                        && path[literal.len()..].starts_with('/'))
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("/all/"), "all");
        assert_eq!(normalize("all"), "all");
        assert_eq!(normalize("/"), "");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("all?page=2"), "all");
        assert_eq!(normalize("/create#form"), "create");
        assert_eq!(normalize("a/b/c"), "a/b/c");
    }

    #[test]
    fn test_full_match() {
        let pattern = RoutePattern::parse("all");

        assert!(pattern_matches(&pattern, MatchMode::Full, "all"));
        assert!(!pattern_matches(&pattern, MatchMode::Full, "all/1"));
        assert!(!pattern_matches(&pattern, MatchMode::Full, "allx"));
        assert!(!pattern_matches(&pattern, MatchMode::Full, ""));
    }

    #[test]
    fn test_prefix_match() {
        let pattern = RoutePattern::parse("admin");

        assert!(pattern_matches(&pattern, MatchMode::Prefix, "admin"));
        assert!(pattern_matches(&pattern, MatchMode::Prefix, "admin/users"));
        assert!(!pattern_matches(&pattern, MatchMode::Prefix, "administrators"));
        assert!(!pattern_matches(&pattern, MatchMode::Prefix, "other"));
    }

    #[test]
    fn test_root_never_matches_subpaths() {
        let pattern = RoutePattern::Root;

        assert!(pattern_matches(&pattern, MatchMode::Full, ""));
        assert!(!pattern_matches(&pattern, MatchMode::Full, "all"));
        // Root is pinned to the empty path regardless of mode.
        assert!(!pattern_matches(&pattern, MatchMode::Prefix, "all"));
    }

    #[test]
    fn test_wildcard_matches_everything() {
        let pattern = RoutePattern::Wildcard;

        assert!(pattern_matches(&pattern, MatchMode::Full, ""));
        assert!(pattern_matches(&pattern, MatchMode::Full, "unknown/x"));
        assert!(pattern_matches(&pattern, MatchMode::Prefix, "a/b/c"));
    }
}
