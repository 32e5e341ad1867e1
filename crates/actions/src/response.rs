use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Reply to one action call, in the shape the dialogue engine expects.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionResponse {
    pub events: Vec<TrackerEvent>,
    pub responses: Vec<OutboundMessage>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum TrackerEvent {
    #[serde(rename = "slot")]
    SlotSet { name: String, value: Value },
}

/// Either composed text or a reference to a response template declared in
/// the dialogue domain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
}

impl OutboundMessage {
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: Some(text.into()), response: None }
    }

    pub fn template(name: impl Into<String>) -> Self {
        Self { text: None, response: Some(name.into()) }
    }
}

impl ActionResponse {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn message(text: impl Into<String>) -> Self {
        Self { events: Vec::new(), responses: vec![OutboundMessage::text(text)] }
    }

    pub fn template(name: impl Into<String>) -> Self {
        Self { events: Vec::new(), responses: vec![OutboundMessage::template(name)] }
    }

    pub fn with_slot(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.events.push(TrackerEvent::SlotSet { name: name.into(), value: value.into() });
        self
    }

    /// Text of every composed message, in order. Template references are skipped.
    pub fn texts(&self) -> Vec<&str> {
        self.responses.iter().filter_map(|message| message.text.as_deref()).collect()
    }

    pub fn slot_value(&self, name: &str) -> Option<&Value> {
        self.events.iter().find_map(|event| match event {
            TrackerEvent::SlotSet { name: slot, value } if slot == name => Some(value),
            _ => None,
        })
    }
}
