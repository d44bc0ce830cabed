//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RoutesConfig (validated, immutable)
//!     → route table + handler registry built from it
//!
//! On reload signal:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → router swaps the table whole
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require full reload
//! - All fields have defaults to allow minimal configs; the built-in
//!   default is the canonical table
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, ConfigError};
pub use schema::HandlerSpec;
pub use schema::ObservabilityConfig;
pub use schema::RouteSpec;
pub use schema::RoutesConfig;
