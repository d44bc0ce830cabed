//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! navigation router. All types derive Serde traits for deserialization
//! from config files.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::validation::ValidationError;
use crate::registry::{HandlerId, HandlerRegistry, StaticViewHandler};
use crate::routing::entry::{MatchMode, RouteEntry, RoutePattern, RouteTarget};
use crate::routing::matcher;
use crate::routing::table::RouteTable;

/// Root configuration for the navigation router.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RoutesConfig {
    /// Ordered route definitions; order is the match order.
    pub routes: Vec<RouteSpec>,

    /// View-handler capabilities the routes may reference.
    pub handlers: Vec<HandlerSpec>,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            routes: vec![
                RouteSpec::handler("all", "list-view"),
                RouteSpec::handler("create", "add-view"),
                RouteSpec::redirect("", "all"),
                RouteSpec::handler("**", "list-view"),
            ],
            handlers: vec![
                HandlerSpec::new("list-view", "Record listing view"),
                HandlerSpec::new("add-view", "Record creation view"),
            ],
            observability: ObservabilityConfig::default(),
        }
    }
}

impl RoutesConfig {
    /// Build the immutable route table from the route definitions.
    pub fn build_table(&self) -> Result<RouteTable, Vec<ValidationError>> {
        let mut errors = Vec::new();
        let mut entries = Vec::new();

        for route in &self.routes {
            match route.to_entry() {
                Ok(entry) => entries.push(entry),
                Err(e) => errors.push(e),
            }
        }

        match RouteTable::builder().entries(entries).build() {
            Ok(table) if errors.is_empty() => Ok(table),
            Ok(_) => Err(errors),
            Err(table_errors) => {
                errors.extend(table_errors.into_iter().map(ValidationError::from));
                Err(errors)
            }
        }
    }

    /// Build the handler registry from the declared capabilities.
    pub fn build_registry(&self) -> Arc<HandlerRegistry> {
        let mut builder = HandlerRegistry::builder();
        for decl in &self.handlers {
            builder = builder.register(Arc::new(StaticViewHandler::new(
                decl.name.clone(),
                decl.description.clone(),
            )));
        }
        Arc::new(builder.build())
    }
}

/// One route definition, bound to a handler or a redirect target.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteSpec {
    /// Route pattern: a literal path, the empty string (root), or `**`.
    pub path: String,

    /// Handler capability to resolve to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handler: Option<String>,

    /// Path to resolve again with instead of a handler.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_to: Option<String>,

    /// Match mode; full unless stated otherwise.
    #[serde(rename = "match", default)]
    pub mode: MatchMode,
}

impl RouteSpec {
    pub fn handler(path: &str, handler: &str) -> Self {
        Self {
            path: path.to_string(),
            handler: Some(handler.to_string()),
            redirect_to: None,
            mode: MatchMode::Full,
        }
    }

    pub fn redirect(path: &str, to: &str) -> Self {
        Self {
            path: path.to_string(),
            handler: None,
            redirect_to: Some(to.to_string()),
            mode: MatchMode::Full,
        }
    }

    /// Convert to a table entry; exactly one target must be declared.
    pub fn to_entry(&self) -> Result<RouteEntry, ValidationError> {
        let target = match (&self.handler, &self.redirect_to) {
            (Some(handler), None) => RouteTarget::Handler(HandlerId::from(handler.clone())),
            (None, Some(to)) => RouteTarget::Redirect {
                to: matcher::normalize(to).to_string(),
            },
            (Some(_), Some(_)) => {
                return Err(ValidationError::AmbiguousTarget {
                    path: self.path.clone(),
                })
            }
            (None, None) => {
                return Err(ValidationError::MissingTarget {
                    path: self.path.clone(),
                })
            }
        };

        Ok(RouteEntry {
            pattern: RoutePattern::parse(&self.path),
            target,
            mode: self.mode,
        })
    }
}

/// Declaration of a view-handler capability.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HandlerSpec {
    /// Unique handler identifier.
    pub name: String,

    /// Human-readable description, for the console output.
    #[serde(default)]
    pub description: String,
}

impl HandlerSpec {
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the metrics endpoint (watch mode only).
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_builds_canonical_table() {
        let config = RoutesConfig::default();
        let table = config.build_table().unwrap();

        assert_eq!(table.len(), 4);
        let patterns: Vec<&str> = table
            .entries()
            .iter()
            .map(|e| e.pattern.as_str())
            .collect();
        assert_eq!(patterns, vec!["all", "create", "", "**"]);
    }

    #[test]
    fn test_default_config_registry() {
        let config = RoutesConfig::default();
        let registry = config.build_registry();

        assert_eq!(registry.len(), 2);
        assert!(registry.contains(&HandlerId::from("list-view")));
        assert!(registry.contains(&HandlerId::from("add-view")));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = RoutesConfig::default();
        let rendered = toml::to_string(&config).unwrap();
        let parsed: RoutesConfig = toml::from_str(&rendered).unwrap();

        assert_eq!(parsed.routes.len(), config.routes.len());
        assert_eq!(parsed.handlers.len(), config.handlers.len());
    }

    #[test]
    fn test_minimal_toml() {
        let parsed: RoutesConfig = toml::from_str(
            r#"
            [[routes]]
            path = "all"
            handler = "list-view"

            [[handlers]]
            name = "list-view"
            "#,
        )
        .unwrap();

        assert_eq!(parsed.routes.len(), 1);
        assert_eq!(parsed.routes[0].mode, MatchMode::Full);
        assert_eq!(parsed.handlers[0].description, "");
        assert_eq!(parsed.observability.log_level, "info");
    }

    #[test]
    fn test_route_spec_requires_one_target() {
        let neither = RouteSpec {
            path: "all".to_string(),
            handler: None,
            redirect_to: None,
            mode: MatchMode::Full,
        };
        assert!(matches!(
            neither.to_entry(),
            Err(ValidationError::MissingTarget { .. })
        ));

        let both = RouteSpec {
            path: "all".to_string(),
            handler: Some("list-view".to_string()),
            redirect_to: Some("create".to_string()),
            mode: MatchMode::Full,
        };
        assert!(matches!(
            both.to_entry(),
            Err(ValidationError::AmbiguousTarget { .. })
        ));
    }
}
