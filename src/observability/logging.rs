//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once at startup
//! - Honor `RUST_LOG` first, the configured level otherwise

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global subscriber.
///
/// `default_level` is used when `RUST_LOG` is unset, e.g. `"info"` or
/// `"nav_router=debug"`. Must be called at most once.
pub fn init(default_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
