use crate::variables_model::{FieldValue, Variable, VariableField, VariableId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateVariableRequest {
    pub environment: String,
}

/// Payload of `update-variable-state`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableStateChange {
    pub id: VariableId,
    pub field: VariableField,
    pub new_value: FieldValue,
}

impl VariableStateChange {
    pub fn name(id: VariableId, name: String) -> Self {
        Self {
            id,
            field: VariableField::Name,
            new_value: FieldValue::Text(name),
        }
    }

    pub fn value(id: VariableId, value: String) -> Self {
        Self {
            id,
            field: VariableField::Value,
            new_value: FieldValue::Text(value),
        }
    }

    pub fn enabled(id: VariableId, enabled: bool) -> Self {
        Self {
            id,
            field: VariableField::Enabled,
            new_value: FieldValue::Flag(enabled),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteVariableRequest {
    pub id: VariableId,
}

/// Every notification the widgets send to the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum OutboundEvent {
    CreateVariableRequest(CreateVariableRequest),
    UpdateVariableState(VariableStateChange),
    DeleteVariableRequest(DeleteVariableRequest),
}

impl OutboundEvent {
    pub fn name(&self) -> &'static str {
        match self {
            OutboundEvent::CreateVariableRequest(_) => "create-variable-request",
            OutboundEvent::UpdateVariableState(_) => "update-variable-state",
            OutboundEvent::DeleteVariableRequest(_) => "delete-variable-request",
        }
    }
}

/// Inbound notice: the authoritative collection of an environment changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionChanged {
    pub environment: String,
    pub variables: Vec<Variable>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_wire_names() {
        let create = OutboundEvent::CreateVariableRequest(CreateVariableRequest {
            environment: "default".to_string(),
        });
        assert_eq!(
            serde_json::to_value(&create).unwrap(),
            json!({"type": "create-variable-request", "environment": "default"})
        );

        let delete = OutboundEvent::DeleteVariableRequest(DeleteVariableRequest {
            id: VariableId::new("v1"),
        });
        assert_eq!(
            serde_json::to_value(&delete).unwrap(),
            json!({"type": "delete-variable-request", "id": "v1"})
        );
        assert_eq!(delete.name(), "delete-variable-request");
    }

    #[test]
    fn test_update_payload_shape() {
        let update = OutboundEvent::UpdateVariableState(VariableStateChange::enabled(
            VariableId::new("v2"),
            false,
        ));
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({"type": "update-variable-state", "id": "v2", "field": "enabled", "newValue": false})
        );

        let rename = VariableStateChange::name(VariableId::new("v2"), "TOKEN".to_string());
        assert_eq!(
            serde_json::to_value(&rename).unwrap(),
            json!({"id": "v2", "field": "name", "newValue": "TOKEN"})
        );
    }
}
