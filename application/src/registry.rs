//! Tool factory registry.
//!
//! Maps a tool-set identifier (a topic, a task, a scenario) to a factory
//! producing a fresh [`ToolImplementation`]. The registry is built once at
//! startup and passed explicitly to whoever starts loops; every
//! instantiation returns a new value so loop calls never share tool state.

use crate::ports::tool_implementation::ToolImplementation;
use agentic_domain::DomainError;
use std::collections::HashMap;
use std::fmt;

type ToolFactory = Box<dyn Fn() -> Box<dyn ToolImplementation> + Send + Sync>;

#[derive(Default)]
pub struct ToolFactoryRegistry {
    factories: HashMap<String, ToolFactory>,
}

impl ToolFactoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory, replacing any previous one under the same id.
    pub fn register<F, T>(&mut self, id: impl Into<String>, factory: F)
    where
        F: Fn() -> T + Send + Sync + 'static,
        T: ToolImplementation + 'static,
    {
        self.factories.insert(
            id.into(),
            Box::new(move || Box::new(factory()) as Box<dyn ToolImplementation>),
        );
    }

    pub fn with<F, T>(mut self, id: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
        T: ToolImplementation + 'static,
    {
        self.register(id, factory);
        self
    }

    /// Construct a fresh tool implementation for `id`.
    pub fn instantiate(&self, id: &str) -> Result<Box<dyn ToolImplementation>, DomainError> {
        self.factories
            .get(id)
            .map(|factory| factory())
            .ok_or_else(|| DomainError::UnknownToolSet(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.factories.contains_key(id)
    }

    /// Registered ids, sorted.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl fmt::Debug for ToolFactoryRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolFactoryRegistry")
            .field("ids", &self.ids())
            .finish()
    }
}
