//! Navigation Route Table Library
//!
//! An ordered path-pattern → view-handler table with first-match-wins
//! resolution, a root redirect, and a wildcard fallback. Handlers are
//! opaque capabilities resolved by identifier through a registry.

pub mod config;
pub mod observability;
pub mod registry;
pub mod routing;

pub use config::schema::RoutesConfig;
pub use registry::{HandlerId, HandlerRegistry, ViewHandler};
pub use routing::router::{Resolved, Router};
pub use routing::table::RouteTable;
