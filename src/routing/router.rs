//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Register a validated table against a handler registry
//! - Look up the matching route for a navigation path
//! - Follow redirects and report the wildcard fallback
//! - Swap in a replacement table without blocking readers
//!
//! # Design Decisions
//! - Handler resolvability is checked at registration time, so resolution
//!   never discovers a missing capability under normal operation
//! - Table is shared through `ArcSwap`: reads are lock-free, reload is a
//!   single pointer store
//! - First match wins, in table order
//! - Explicit `NotFound` rather than silent default

use std::sync::Arc;

use arc_swap::ArcSwap;
use thiserror::Error;

use crate::observability::metrics;
use crate::registry::{HandlerId, HandlerRegistry, ViewHandler};
use crate::routing::entry::{RoutePattern, RouteTarget};
use crate::routing::matcher;
use crate::routing::table::RouteTable;

/// Resolution walks at most this many redirect hops. Table validation
/// rejects cycles, so this bound is never hit for a registered table.
const MAX_REDIRECT_HOPS: usize = 8;

/// Registration failure: the table references unknown capabilities.
#[derive(Debug, Error)]
pub enum RegisterError {
    #[error("unresolved handlers: {}", join_ids(.0))]
    UnresolvedHandlers(Vec<HandlerId>),
}

fn join_ids(ids: &[HandlerId]) -> String {
    ids.iter()
        .map(HandlerId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Resolution failure surfaced to the caller.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("no route matches path {path:?}")]
    NotFound { path: String },

    #[error("redirect loop resolving {path:?} through {chain:?}")]
    RedirectLoop { path: String, chain: Vec<String> },
}

/// Outcome of a successful resolution.
pub struct Resolved {
    /// Identifier of the handler the navigation lands on.
    pub handler_id: HandlerId,
    /// The handler capability itself.
    pub handler: Arc<dyn ViewHandler>,
    /// Pattern of the entry that finally resolved.
    pub matched: RoutePattern,
    /// Pattern of the first entry matched, when a redirect was followed.
    pub redirected_from: Option<RoutePattern>,
    /// True when the wildcard entry caught the path.
    pub fallback: bool,
}

impl std::fmt::Debug for Resolved {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolved")
            .field("handler_id", &self.handler_id)
            .field("matched", &self.matched)
            .field("redirected_from", &self.redirected_from)
            .field("fallback", &self.fallback)
            .finish()
    }
}

/// Navigation router: a registered route table plus its handler registry.
#[derive(Debug)]
pub struct Router {
    table: ArcSwap<RouteTable>,
    registry: Arc<HandlerRegistry>,
}

impl Router {
    /// Register a table against a registry.
    ///
    /// Every handler the table references must be resolvable now; the
    /// complete list of unresolved identifiers is returned otherwise.
    pub fn register(
        table: RouteTable,
        registry: Arc<HandlerRegistry>,
    ) -> Result<Self, RegisterError> {
        check_resolvable(&table, &registry)?;

        tracing::info!(routes = table.len(), "Route table registered");
        Ok(Self {
            table: ArcSwap::from_pointee(table),
            registry,
        })
    }

    /// Replace the whole table. The replacement is checked against the
    /// registry first; on failure the current table stays in place.
    pub fn swap(&self, table: RouteTable) -> Result<(), RegisterError> {
        check_resolvable(&table, &self.registry)?;

        let routes = table.len();
        self.table.store(Arc::new(table));
        metrics::record_table_swap();
        tracing::info!(routes, "Route table swapped");
        Ok(())
    }

    /// Snapshot of the currently registered table.
    pub fn table(&self) -> Arc<RouteTable> {
        self.table.load_full()
    }

    /// Resolve a navigation path to a view handler.
    ///
    /// The path is normalized, then entries are scanned in order and the
    /// first match wins. Redirect entries re-enter matching with their
    /// target path.
    pub fn resolve(&self, raw_path: &str) -> Result<Resolved, ResolveError> {
        let table = self.table.load();
        let original = matcher::normalize(raw_path).to_string();

        let mut path = original.clone();
        let mut redirected_from: Option<RoutePattern> = None;
        let mut chain: Vec<String> = Vec::new();

        for _ in 0..=MAX_REDIRECT_HOPS {
            let entry = match table.find(&path) {
                Some(entry) => entry,
                None => {
                    metrics::record_resolution("not_found");
                    tracing::debug!(path = %original, "No route matched");
                    return Err(ResolveError::NotFound { path: original });
                }
            };

            match &entry.target {
                RouteTarget::Handler(id) => {
                    let handler = self.registry.get(id).ok_or_else(|| {
                        // Unreachable for a registered table; reported as
                        // NotFound rather than panicking.
                        metrics::record_resolution("not_found");
                        ResolveError::NotFound {
                            path: original.clone(),
                        }
                    })?;

                    let fallback = entry.pattern.is_wildcard();
                    if fallback {
                        metrics::record_fallback();
                    }
                    metrics::record_resolution("matched");
                    tracing::debug!(
                        path = %original,
                        matched = %entry.pattern,
                        handler = %id,
                        fallback,
                        "Route resolved"
                    );

                    return Ok(Resolved {
                        handler_id: id.clone(),
                        handler,
                        matched: entry.pattern.clone(),
                        redirected_from,
                        fallback,
                    });
                }
                RouteTarget::Redirect { to } => {
                    if chain.contains(to) {
                        chain.push(to.clone());
                        metrics::record_resolution("redirect_loop");
                        return Err(ResolveError::RedirectLoop {
                            path: original,
                            chain,
                        });
                    }

                    metrics::record_redirect();
                    tracing::debug!(
                        path = %original,
                        from = %entry.pattern,
                        to = %to,
                        "Following redirect"
                    );

                    redirected_from.get_or_insert_with(|| entry.pattern.clone());
                    chain.push(to.clone());
                    path = matcher::normalize(to).to_string();
                }
            }
        }

        metrics::record_resolution("redirect_loop");
        Err(ResolveError::RedirectLoop {
            path: original,
            chain,
        })
    }
}

fn check_resolvable(
    table: &RouteTable,
    registry: &HandlerRegistry,
) -> Result<(), RegisterError> {
    let mut unresolved: Vec<HandlerId> = Vec::new();

    for entry in table.entries() {
        if let RouteTarget::Handler(id) = &entry.target {
            if !registry.contains(id) && !unresolved.contains(id) {
                unresolved.push(id.clone());
            }
        }
    }

    if unresolved.is_empty() {
        Ok(())
    } else {
        tracing::warn!(
            handlers = %join_ids(&unresolved),
            "Route table references unresolved handlers"
        );
        Err(RegisterError::UnresolvedHandlers(unresolved))
    }
}
