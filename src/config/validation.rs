//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check referential integrity (routes reference declared handlers)
//! - Enforce route table invariants (duplicates, wildcard order,
//!   redirect targets)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is a pure function: RoutesConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;

use crate::config::schema::RoutesConfig;
use crate::routing::table::RouteTableError;

/// A semantic violation in the configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A route declares both a handler and a redirect target.
    #[error("route {path:?} must declare exactly one of handler or redirect_to")]
    AmbiguousTarget { path: String },

    /// A route declares neither a handler nor a redirect target.
    #[error("route {path:?} declares neither handler nor redirect_to")]
    MissingTarget { path: String },

    /// A route references a handler absent from the declarations.
    #[error("route {path:?} references undeclared handler {handler:?}")]
    UndeclaredHandler { path: String, handler: String },

    /// The same handler name is declared twice.
    #[error("duplicate handler declaration {name:?}")]
    DuplicateHandler { name: String },

    /// A handler declaration with a blank name can never be referenced.
    #[error("handler declaration with empty name")]
    EmptyHandlerName,

    /// A route table invariant violation.
    #[error(transparent)]
    Table(#[from] RouteTableError),
}

/// Validate a parsed configuration, collecting every violation.
pub fn validate_config(config: &RoutesConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for (index, handler) in config.handlers.iter().enumerate() {
        if handler.name.trim().is_empty() {
            errors.push(ValidationError::EmptyHandlerName);
        } else if config.handlers[..index]
            .iter()
            .any(|earlier| earlier.name == handler.name)
        {
            errors.push(ValidationError::DuplicateHandler {
                name: handler.name.clone(),
            });
        }
    }

    for route in &config.routes {
        if let Some(handler) = &route.handler {
            if !config.handlers.iter().any(|decl| decl.name == *handler) {
                errors.push(ValidationError::UndeclaredHandler {
                    path: route.path.clone(),
                    handler: handler.clone(),
                });
            }
        }
    }

    // Target-shape and table invariants share the construction code path.
    if let Err(table_errors) = config.build_table() {
        errors.extend(table_errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{HandlerSpec, RouteSpec};

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&RoutesConfig::default()).is_ok());
    }

    #[test]
    fn test_undeclared_handler_rejected() {
        let mut config = RoutesConfig::default();
        config.routes.insert(0, RouteSpec::handler("extra", "ghost-view"));

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::UndeclaredHandler {
                path: "extra".to_string(),
                handler: "ghost-view".to_string(),
            }]
        );
    }

    #[test]
    fn test_duplicate_handler_rejected() {
        let mut config = RoutesConfig::default();
        config
            .handlers
            .push(HandlerSpec::new("list-view", "again"));

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::DuplicateHandler {
                name: "list-view".to_string()
            }]
        );
    }

    #[test]
    fn test_wildcard_order_rejected() {
        let mut config = RoutesConfig::default();
        // Move the wildcard to the front; it now shadows everything.
        let wildcard = config.routes.pop().unwrap();
        config.routes.insert(0, wildcard);

        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::Table(RouteTableError::WildcardNotLast { index: 0 }))));
    }

    #[test]
    fn test_all_errors_collected() {
        let mut config = RoutesConfig::default();
        config.routes.insert(0, RouteSpec::handler("extra", "ghost-view"));
        config.routes.insert(
            1,
            RouteSpec {
                path: "broken".to_string(),
                handler: None,
                redirect_to: None,
                mode: Default::default(),
            },
        );

        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::UndeclaredHandler { .. })));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::MissingTarget { .. })));
    }
}
