//! The immutable route table.
//!
//! # Responsibilities
//! - Hold the ordered pattern → target bindings
//! - Enforce table invariants at construction time
//! - Expose the ordered entries as a pure accessor
//!
//! # Design Decisions
//! - Construction validates; an invalid table is never observable
//! - Validation reports all violations, not just the first
//! - Immutable after construction (thread-safe without locks); reload
//!   replaces the whole table

use thiserror::Error;

use crate::routing::entry::{MatchMode, RouteEntry, RouteTarget};
use crate::routing::matcher;

/// Redirect chains longer than this are treated as cycles.
const MAX_REDIRECT_HOPS: usize = 8;

/// A table invariant violation detected during construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RouteTableError {
    /// Two entries share a pattern; the second can never match.
    #[error("duplicate route pattern {pattern:?}")]
    DuplicatePattern { pattern: String },

    /// A wildcard anywhere but last shadows every later entry.
    #[error("wildcard route at position {index} must be the last entry")]
    WildcardNotLast { index: usize },

    /// A prefix-matching root would shadow the entire table.
    #[error("root route must use full matching")]
    RootNotFull,

    /// A redirect whose target no entry matches can never resolve.
    #[error("redirect from {from:?} targets {to:?}, which matches no route")]
    DanglingRedirect { from: String, to: String },

    /// Redirects that eventually revisit an entry never terminate.
    #[error("redirect from {from:?} forms a cycle through {chain:?}")]
    RedirectCycle { from: String, chain: Vec<String> },
}

/// Static, ordered sequence of route entries.
///
/// Matching is sequential and first-match-wins, so insertion order is
/// significant.
#[derive(Debug, Clone)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder {
            entries: Vec::new(),
        }
    }

    /// The ordered entries. Pure accessor, no side effects; repeated
    /// calls observe the identical sequence.
    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn has_wildcard(&self) -> bool {
        self.entries.iter().any(|e| e.pattern.is_wildcard())
    }

    /// First entry matching the normalized path, in table order.
    pub fn find(&self, path: &str) -> Option<&RouteEntry> {
        self.entries.iter().find(|e| e.matches(path))
    }
}

/// Builder collecting entries before validation freezes the table.
pub struct RouteTableBuilder {
    entries: Vec<RouteEntry>,
}

impl RouteTableBuilder {
    pub fn entry(mut self, entry: RouteEntry) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn entries(mut self, entries: impl IntoIterator<Item = RouteEntry>) -> Self {
        self.entries.extend(entries);
        self
    }

    /// Validate and freeze the table, reporting every violation.
    pub fn build(self) -> Result<RouteTable, Vec<RouteTableError>> {
        let errors = validate_entries(&self.entries);
        if errors.is_empty() {
            Ok(RouteTable {
                entries: self.entries,
            })
        } else {
            Err(errors)
        }
    }
}

/// Pure validation pass over an ordered entry list.
pub fn validate_entries(entries: &[RouteEntry]) -> Vec<RouteTableError> {
    let mut errors = Vec::new();

    for (index, entry) in entries.iter().enumerate() {
        if entries[..index]
            .iter()
            .any(|earlier| earlier.pattern == entry.pattern)
        {
            errors.push(RouteTableError::DuplicatePattern {
                pattern: entry.pattern.as_str().to_string(),
            });
        }

        if entry.pattern.is_wildcard() && index + 1 != entries.len() {
            errors.push(RouteTableError::WildcardNotLast { index });
        }

        if entry.pattern.is_root() && entry.mode != MatchMode::Full {
            errors.push(RouteTableError::RootNotFull);
        }
    }

    for entry in entries {
        if let RouteTarget::Redirect { to } = &entry.target {
            check_redirect_chain(entries, entry, to, &mut errors);
        }
    }

    errors
}

/// Walk a redirect chain, flagging dangling targets and cycles.
fn check_redirect_chain(
    entries: &[RouteEntry],
    origin: &RouteEntry,
    first_target: &str,
    errors: &mut Vec<RouteTableError>,
) {
    let from = origin.pattern.as_str().to_string();
    let mut chain = vec![first_target.to_string()];
    let mut target = first_target.to_string();

    for _ in 0..MAX_REDIRECT_HOPS {
        let normalized = matcher::normalize(&target).to_string();
        let next = entries.iter().find(|e| e.matches(&normalized));

        match next {
            None => {
                errors.push(RouteTableError::DanglingRedirect {
                    from,
                    to: target,
                });
                return;
            }
            Some(entry) => match &entry.target {
                RouteTarget::Handler(_) => return,
                RouteTarget::Redirect { to } => {
                    if entry.pattern == origin.pattern || chain.contains(to) {
                        chain.push(to.clone());
                        errors.push(RouteTableError::RedirectCycle { from, chain });
                        return;
                    }
                    chain.push(to.clone());
                    target = to.clone();
                }
            },
        }
    }

    errors.push(RouteTableError::RedirectCycle { from, chain });
}
