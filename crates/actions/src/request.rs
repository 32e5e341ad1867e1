use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const PROGRAM_ENTITY: &str = "filiere";
pub const RANK_ENTITY: &str = "rang";

/// Body of an action call. Unknown fields are ignored and missing ones
/// default, so partial trackers from older dialogue engines still parse.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionRequest {
    pub next_action: String,
    pub sender_id: Option<String>,
    pub tracker: Tracker,
    pub domain: Value,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tracker {
    pub sender_id: Option<String>,
    pub slots: BTreeMap<String, Value>,
    pub latest_message: LatestMessage,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatestMessage {
    pub text: Option<String>,
    pub intent: Option<Intent>,
    pub entities: Vec<Entity>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Intent {
    pub name: Option<String>,
    pub confidence: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Entity {
    pub entity: String,
    pub value: Value,
}

impl ActionRequest {
    pub fn new(next_action: impl Into<String>) -> Self {
        Self { next_action: next_action.into(), ..Self::default() }
    }

    pub fn with_sender(mut self, sender_id: impl Into<String>) -> Self {
        let sender_id = sender_id.into();
        self.tracker.sender_id = Some(sender_id.clone());
        self.sender_id = Some(sender_id);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.tracker.latest_message.text = Some(text.into());
        self
    }

    pub fn with_entity(mut self, entity: impl Into<String>, value: impl Into<Value>) -> Self {
        self.tracker
            .latest_message
            .entities
            .push(Entity { entity: entity.into(), value: value.into() });
        self
    }

    pub fn with_slot(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.tracker.slots.insert(name.into(), value.into());
        self
    }

    /// Conversation id used to correlate log lines.
    pub fn correlation_id(&self) -> &str {
        self.sender_id
            .as_deref()
            .or(self.tracker.sender_id.as_deref())
            .unwrap_or("unknown-sender")
    }

    /// Value of the first entity named `name` in the latest message. Only the
    /// first occurrence counts, and a blank value is treated as absent.
    pub fn latest_entity_value(&self, name: &str) -> Option<String> {
        self.tracker
            .latest_message
            .entities
            .iter()
            .find(|entity| entity.entity == name)
            .and_then(|entity| scalar_text(&entity.value))
    }

    /// True when the first entity named `name` is the JSON number zero. The
    /// admission handler treats that as a missing rank.
    pub fn latest_entity_is_zero(&self, name: &str) -> bool {
        self.tracker
            .latest_message
            .entities
            .iter()
            .find(|entity| entity.entity == name)
            .and_then(|entity| entity.value.as_f64())
            .is_some_and(|value| value == 0.0)
    }

    pub fn slot_text(&self, name: &str) -> Option<String> {
        self.tracker.slots.get(name).and_then(scalar_text)
    }

    pub fn message_text(&self) -> &str {
        self.tracker.latest_message.text.as_deref().unwrap_or_default()
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(text) => text.trim().to_owned(),
        Value::Number(number) => number.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}
