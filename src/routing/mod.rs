//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Navigation path
//!     → router.rs (route lookup, redirects, fallback)
//!     → matcher.rs (evaluate one pattern against the path)
//!     → Return: resolved handler capability or explicit error
//!
//! Table Construction (at startup or reload):
//!     RouteEntry[]
//!     → table.rs (validate invariants, freeze as immutable RouteTable)
//!     → router.rs (check handler resolvability, publish via ArcSwap)
//! ```
//!
//! # Design Decisions
//! - Table validated at construction, immutable at runtime
//! - No regex in the match path (literal and wildcard patterns only)
//! - Deterministic: same path always resolves to the same route
//! - First match wins, in table order

pub mod entry;
pub mod matcher;
pub mod router;
pub mod table;

pub use entry::{MatchMode, RouteEntry, RoutePattern, RouteTarget};
pub use router::{RegisterError, Resolved, ResolveError, Router};
pub use table::{RouteTable, RouteTableError};
