//! Signature catalog: what each tool actually accepts.
//!
//! Built once per loop call from the tool implementation's declarations and
//! immutable afterwards. The catalog never invokes a tool.

use super::entities::ToolDefinition;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Names starting with this prefix are implementation-private and never
/// catalogued.
pub const PRIVATE_PREFIX: char = '_';

/// Accepted parameters of one tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolSignature {
    pub name: String,
    /// Parameter names in declaration order
    pub params: Vec<String>,
    /// Parameters with no default value
    pub required: Vec<String>,
    /// Whether arbitrary additional named arguments are accepted
    pub accepts_arbitrary: bool,
}

impl ToolSignature {
    /// Classify a declaration, or `None` when its parameter list is not
    /// well-formed (blank names or duplicates).
    pub fn from_definition(definition: &ToolDefinition) -> Option<Self> {
        Self::try_from_definition(definition).ok()
    }

    /// Like [`from_definition`](Self::from_definition), but says what is wrong.
    pub fn try_from_definition(definition: &ToolDefinition) -> Result<Self, DomainError> {
        let invalid = |reason: String| DomainError::InvalidToolDefinition {
            tool: definition.name.clone(),
            reason,
        };

        if definition.name.trim().is_empty() {
            return Err(invalid("blank tool name".to_string()));
        }

        let mut seen = HashSet::new();
        let mut params = Vec::with_capacity(definition.parameters.len());
        let mut required = Vec::new();
        for param in &definition.parameters {
            if param.name.trim().is_empty() {
                return Err(invalid("blank parameter name".to_string()));
            }
            if !seen.insert(param.name.as_str()) {
                return Err(invalid(format!("duplicate parameter '{}'", param.name)));
            }
            params.push(param.name.clone());
            if param.required && param.default.is_none() {
                required.push(param.name.clone());
            }
        }

        Ok(Self {
            name: definition.name.clone(),
            params,
            required,
            accepts_arbitrary: definition.accepts_arbitrary,
        })
    }

    /// Signature assumed for a tool that exists but was never catalogued:
    /// no declared parameters, accepts anything.
    pub fn permissive(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            required: Vec::new(),
            accepts_arbitrary: true,
        }
    }

    pub fn accepts(&self, param: &str) -> bool {
        self.params.iter().any(|p| p == param)
    }
}

pub fn is_private_name(name: &str) -> bool {
    name.starts_with(PRIVATE_PREFIX)
}

/// Per-tool signatures keyed by tool name.
#[derive(Debug, Clone, Default)]
pub struct SignatureCatalog {
    entries: HashMap<String, ToolSignature>,
}

impl SignatureCatalog {
    /// Build from declarations, skipping private names and declarations
    /// whose parameter list cannot be classified.
    pub fn from_definitions<'a>(definitions: impl IntoIterator<Item = &'a ToolDefinition>) -> Self {
        let entries = definitions
            .into_iter()
            .filter(|def| !is_private_name(&def.name))
            .filter_map(ToolSignature::from_definition)
            .map(|sig| (sig.name.clone(), sig))
            .collect();
        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<&ToolSignature> {
        self.entries.get(name)
    }

    /// The catalogued signature, or [`ToolSignature::permissive`] when the
    /// tool was not discovered at catalog construction.
    pub fn get_or_permissive(&self, name: &str) -> ToolSignature {
        self.get(name)
            .cloned()
            .unwrap_or_else(|| ToolSignature::permissive(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|s| s.as_str())
    }
}
