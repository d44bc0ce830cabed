//! View-handler capability registry.
//!
//! # Responsibilities
//! - Name view handlers with stable, opaque identifiers
//! - Resolve identifiers to handler capabilities at registration time
//! - Share the resolved set across threads without locks
//!
//! # Design Decisions
//! - Handlers are opaque capabilities; rendering lives entirely outside
//!   this crate
//! - Registry is immutable after construction (thread-safe without locks)
//! - Lookup is by identifier only, no pattern logic here

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Opaque identifier for a view-handler capability.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HandlerId(String);

impl HandlerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for HandlerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for HandlerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Capability invoked by the host when a route resolves to it.
///
/// Implementations are external collaborators; the router only needs a
/// stable name for lookup and logging.
pub trait ViewHandler: Send + Sync {
    /// Stable name, matching the identifier the route table references.
    fn name(&self) -> &str;
}

/// Minimal handler implementation used by the console binary and tests.
#[derive(Debug, Clone)]
pub struct StaticViewHandler {
    name: String,
    description: String,
}

impl StaticViewHandler {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl ViewHandler for StaticViewHandler {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Immutable identifier → handler map.
pub struct HandlerRegistry {
    handlers: HashMap<HandlerId, Arc<dyn ViewHandler>>,
}

impl HandlerRegistry {
    pub fn builder() -> HandlerRegistryBuilder {
        HandlerRegistryBuilder {
            handlers: HashMap::new(),
        }
    }

    /// Look up a handler capability by identifier.
    pub fn get(&self, id: &HandlerId) -> Option<Arc<dyn ViewHandler>> {
        self.handlers.get(id).cloned()
    }

    pub fn contains(&self, id: &HandlerId) -> bool {
        self.handlers.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Registered identifiers, in no particular order.
    pub fn ids(&self) -> impl Iterator<Item = &HandlerId> {
        self.handlers.keys()
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("handlers", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Builder collecting handlers before the registry is frozen.
pub struct HandlerRegistryBuilder {
    handlers: HashMap<HandlerId, Arc<dyn ViewHandler>>,
}

impl HandlerRegistryBuilder {
    /// Register a handler under its own name. A later registration with
    /// the same name replaces the earlier one.
    pub fn register(mut self, handler: Arc<dyn ViewHandler>) -> Self {
        let id = HandlerId::new(handler.name());
        self.handlers.insert(id, handler);
        self
    }

    pub fn build(self) -> HandlerRegistry {
        HandlerRegistry {
            handlers: self.handlers,
        }
    }
}
