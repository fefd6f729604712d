use std::fmt;

use log::trace;
use serde_json::{Map, Value};

use crate::error::DecodeError;

/// The outer shape of an event, chosen purely from which keys are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnvelopeKind {
    Account,
    Ephemeral,
    Message,
    State,
}

impl EnvelopeKind {
    /// Picks the envelope for a raw event.
    ///
    /// The checks run in a fixed order: no `sender` means account data, no
    /// `room_id` means an ephemeral event, and a `state_key` (even an empty
    /// or `null` one) makes a room event a state event. Keys ruled out by an
    /// earlier check are not looked at again.
    pub fn resolve(raw: &Value) -> Result<EnvelopeKind, DecodeError> {
        match raw {
            Value::Object(object) => Ok(EnvelopeKind::resolve_object(object)),
            _ => Err(DecodeError::MalformedEnvelope),
        }
    }

    pub fn resolve_object(object: &Map<String, Value>) -> EnvelopeKind {
        let kind = if !object.contains_key("sender") {
            EnvelopeKind::Account
        } else if !object.contains_key("room_id") {
            EnvelopeKind::Ephemeral
        } else if object.contains_key("state_key") {
            EnvelopeKind::State
        } else {
            EnvelopeKind::Message
        };

        trace!("Resolved event envelope as {}", kind);

        kind
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EnvelopeKind::Account => "account",
            EnvelopeKind::Ephemeral => "ephemeral",
            EnvelopeKind::Message => "message",
            EnvelopeKind::State => "state",
        }
    }

    pub fn is_room_event(self) -> bool {
        match self {
            EnvelopeKind::Message | EnvelopeKind::State => true,
            EnvelopeKind::Account | EnvelopeKind::Ephemeral => false,
        }
    }
}

impl fmt::Display for EnvelopeKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
