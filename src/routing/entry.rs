//! Route entry types.
//!
//! A route table is an ordered list of entries, each binding a pattern to
//! either a handler capability or a redirect target.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::registry::HandlerId;
use crate::routing::matcher;

/// Pattern matched against a normalized navigation path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RoutePattern {
    /// The empty path (application root).
    Root,
    /// A literal path without leading slash, e.g. `all` or `admin/users`.
    Literal(String),
    /// The catch-all `**`, matching any path.
    Wildcard,
}

impl RoutePattern {
    /// Parse a raw pattern string. Leading/trailing slashes are stripped,
    /// so `/all/` and `all` name the same pattern.
    pub fn parse(raw: &str) -> Self {
        let normalized = matcher::normalize(raw);
        match normalized {
            "" => RoutePattern::Root,
            "**" => RoutePattern::Wildcard,
            literal => RoutePattern::Literal(literal.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RoutePattern::Root => "",
            RoutePattern::Literal(s) => s,
            RoutePattern::Wildcard => "**",
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, RoutePattern::Wildcard)
    }

    pub fn is_root(&self) -> bool {
        matches!(self, RoutePattern::Root)
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How much of the path a pattern must account for.
///
/// `Full` requires the whole path to equal the pattern. `Prefix` accepts
/// any path extending the pattern at a segment boundary, e.g. `admin`
/// matches `admin/users` but not `administrators`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    #[default]
    Full,
    Prefix,
}

/// What a matched entry resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteTarget {
    /// Hand the navigation off to a view-handler capability.
    Handler(HandlerId),
    /// Resolve again with another path from the same table.
    Redirect { to: String },
}

/// One ordered binding in the route table.
#[derive(Debug, Clone)]
pub struct RouteEntry {
    pub pattern: RoutePattern,
    pub target: RouteTarget,
    pub mode: MatchMode,
}

impl RouteEntry {
    /// Entry resolving to a handler capability, full match.
    pub fn to_handler(pattern: &str, handler: impl Into<HandlerId>) -> Self {
        Self {
            pattern: RoutePattern::parse(pattern),
            target: RouteTarget::Handler(handler.into()),
            mode: MatchMode::Full,
        }
    }

    /// Entry redirecting to another path in the table, full match.
    pub fn redirect(pattern: &str, to: &str) -> Self {
        Self {
            pattern: RoutePattern::parse(pattern),
            target: RouteTarget::Redirect {
                to: matcher::normalize(to).to_string(),
            },
            mode: MatchMode::Full,
        }
    }

    /// Switch the entry to prefix matching.
    pub fn with_prefix_match(mut self) -> Self {
        self.mode = MatchMode::Prefix;
        self
    }

    /// True when a normalized path matches this entry.
    pub fn matches(&self, path: &str) -> bool {
        matcher::pattern_matches(&self.pattern, self.mode, path)
    }
}
