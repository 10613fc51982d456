use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of the distinguished environment every store starts with.
pub const DEFAULT_ENVIRONMENT: &str = "default";

/// Opaque identifier assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariableId(String);

impl VariableId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VariableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    pub id: VariableId,
    pub name: String,
    pub value: String,
    pub enabled: bool,
}

impl Variable {
    pub fn new(id: VariableId, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            value: value.into(),
            enabled: true,
        }
    }
}

/// A variable that has not been persisted yet and so has no id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewVariable {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: String,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

fn enabled_by_default() -> bool {
    true
}

impl Default for NewVariable {
    fn default() -> Self {
        Self {
            name: String::new(),
            value: String::new(),
            enabled: true,
        }
    }
}

impl NewVariable {
    pub fn into_variable(self, id: VariableId) -> Variable {
        Variable {
            id,
            name: self.name,
            value: self.value,
            enabled: self.enabled,
        }
    }
}

/// Field touched by an `update-variable-state` change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableField {
    Name,
    Value,
    Enabled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

impl Variable {
    /// Applies a field change in place. Mismatched field/value pairs are ignored.
    pub fn apply(&mut self, field: VariableField, value: &FieldValue) -> bool {
        match (field, value) {
            (VariableField::Name, FieldValue::Text(name)) => self.name = name.clone(),
            (VariableField::Value, FieldValue::Text(text)) => self.value = text.clone(),
            (VariableField::Enabled, FieldValue::Flag(flag)) => self.enabled = *flag,
            _ => return false,
        }
        true
    }
}
