use super::{CustomFields, Event};

/// Extra information the homeserver attaches to room events. None of it is
/// covered by the event's signatures.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UnsignedData {
    /// Milliseconds since the event was sent, at the time it was delivered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i64>,
    /// Filled in by the decoder, with its own registry.
    #[serde(skip_serializing_if = "Option::is_none", skip_deserializing)]
    pub redacted_because: Option<Box<Event>>,
    /// Set on events the receiving client sent itself.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(flatten)]
    pub custom: CustomFields,
}

impl UnsignedData {
    pub fn is_redacted(&self) -> bool {
        self.redacted_because.is_some()
    }
}
