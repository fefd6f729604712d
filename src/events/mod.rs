//! The event envelopes and their decoding.
//!
//! Decoding happens in two stages. [`EnvelopeKind::resolve`] looks at which
//! keys an object has to pick one of the four envelope shapes, then
//! [`Content::decode`] uses a [`ContentRegistry`] to pick the schema for the
//! event's `type`. [`EventDecoder`] runs both and assembles the [`Event`].

use serde::de::{Deserialize, Deserializer, Error as _};
use serde::ser::{Serialize, Serializer};

pub mod content;
pub mod decoder;
pub mod envelope;
pub mod registry;
pub mod types;
pub mod unsigned;

pub use self::content::{Content, ContentKind, CustomFields};
pub use self::decoder::EventDecoder;
pub use self::envelope::EnvelopeKind;
pub use self::registry::ContentRegistry;
pub use self::unsigned::UnsignedData;

/// Global data not tied to a room, such as `m.direct`, or per-room account
/// data such as `m.tag`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub content: Content,
}

/// Room scoped data that is never persisted: typing notifications,
/// receipts, presence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EphemeralEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub content: Content,
    pub sender: String,
}

/// A timeline event with no state semantics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub content: Content,
    pub event_id: String,
    pub sender: String,
    pub origin_server_ts: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unsigned: Option<UnsignedData>,
    pub room_id: String,
    /// The event an `m.room.redaction` removes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redacts: Option<String>,
}

/// A room event that sets a piece of room state, keyed on
/// `(event_type, state_key)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub content: Content,
    pub event_id: String,
    pub sender: String,
    pub origin_server_ts: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unsigned: Option<UnsignedData>,
    pub room_id: String,
    /// Often the empty string. Keys starting with `@` name a user.
    pub state_key: String,
    /// The content this event replaced. Absent when there was none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_content: Option<Content>,
}

/// Fields shared by events that live in a room's timeline.
pub trait RoomEvent {
    fn event_type(&self) -> &str;
    fn content(&self) -> &Content;
    fn event_id(&self) -> &str;
    fn sender(&self) -> &str;
    fn origin_server_ts(&self) -> u64;
    fn unsigned(&self) -> Option<&UnsignedData>;
    fn room_id(&self) -> &str;
    fn state_key(&self) -> Option<&str>;
}

impl RoomEvent for MessageEvent {
    fn event_type(&self) -> &str {
        &self.event_type
    }

    fn content(&self) -> &Content {
        &self.content
    }

    fn event_id(&self) -> &str {
        &self.event_id
    }

    fn sender(&self) -> &str {
        &self.sender
    }

    fn origin_server_ts(&self) -> u64 {
        self.origin_server_ts
    }

    fn unsigned(&self) -> Option<&UnsignedData> {
        self.unsigned.as_ref()
    }

    fn room_id(&self) -> &str {
        &self.room_id
    }

    fn state_key(&self) -> Option<&str> {
        None
    }
}

impl RoomEvent for StateEvent {
    fn event_type(&self) -> &str {
        &self.event_type
    }

    fn content(&self) -> &Content {
        &self.content
    }

    fn event_id(&self) -> &str {
        &self.event_id
    }

    fn sender(&self) -> &str {
        &self.sender
    }

    fn origin_server_ts(&self) -> u64 {
        self.origin_server_ts
    }

    fn unsigned(&self) -> Option<&UnsignedData> {
        self.unsigned.as_ref()
    }

    fn room_id(&self) -> &str {
        &self.room_id
    }

    fn state_key(&self) -> Option<&str> {
        Some(&self.state_key)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Account(AccountEvent),
    Ephemeral(EphemeralEvent),
    Message(MessageEvent),
    State(StateEvent),
}

impl Event {
    pub fn kind(&self) -> EnvelopeKind {
        match self {
            Event::Account(_) => EnvelopeKind::Account,
            Event::Ephemeral(_) => EnvelopeKind::Ephemeral,
            Event::Message(_) => EnvelopeKind::Message,
            Event::State(_) => EnvelopeKind::State,
        }
    }

    pub fn event_type(&self) -> &str {
        match self {
            Event::Account(e) => &e.event_type,
            Event::Ephemeral(e) => &e.event_type,
            Event::Message(e) => &e.event_type,
            Event::State(e) => &e.event_type,
        }
    }

    pub fn content(&self) -> &Content {
        match self {
            Event::Account(e) => &e.content,
            Event::Ephemeral(e) => &e.content,
            Event::Message(e) => &e.content,
            Event::State(e) => &e.content,
        }
    }

    pub fn sender(&self) -> Option<&str> {
        match self {
            Event::Account(_) => None,
            Event::Ephemeral(e) => Some(&e.sender),
            Event::Message(e) => Some(&e.sender),
            Event::State(e) => Some(&e.sender),
        }
    }

    pub fn as_room_event(&self) -> Option<&dyn RoomEvent> {
        match self {
            Event::Account(_) | Event::Ephemeral(_) => None,
            Event::Message(e) => Some(e),
            Event::State(e) => Some(e),
        }
    }

    pub fn event_id(&self) -> Option<&str> {
        self.as_room_event().map(|e| e.event_id())
    }

    pub fn room_id(&self) -> Option<&str> {
        self.as_room_event().map(|e| e.room_id())
    }

    pub fn origin_server_ts(&self) -> Option<u64> {
        self.as_room_event().map(|e| e.origin_server_ts())
    }

    pub fn unsigned(&self) -> Option<&UnsignedData> {
        self.as_room_event().and_then(|e| e.unsigned())
    }

    pub fn state_key(&self) -> Option<&str> {
        self.as_room_event().and_then(|e| e.state_key())
    }
}

impl From<AccountEvent> for Event {
    fn from(event: AccountEvent) -> Event {
        Event::Account(event)
    }
}

impl From<EphemeralEvent> for Event {
    fn from(event: EphemeralEvent) -> Event {
        Event::Ephemeral(event)
    }
}

impl From<MessageEvent> for Event {
    fn from(event: MessageEvent) -> Event {
        Event::Message(event)
    }
}

impl From<StateEvent> for Event {
    fn from(event: StateEvent) -> Event {
        Event::State(event)
    }
}

impl Serialize for Event {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Event::Account(e) => e.serialize(serializer),
            Event::Ephemeral(e) => e.serialize(serializer),
            Event::Message(e) => e.serialize(serializer),
            Event::State(e) => e.serialize(serializer),
        }
    }
}

/// Decodes with the standard registry. Use an [`EventDecoder`] directly to
/// decode with a different one.
impl<'de> Deserialize<'de> for Event {
    fn deserialize<D>(deserializer: D) -> Result<Event, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;

        EventDecoder::default()
            .decode(value)
            .map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::content::room::Membership;
    use super::*;
    use crate::error::DecodeError;
    use serde_json::json;

    #[test]
    fn accessors() {
        let event: Event = serde_json::from_value(json!({
            "type": "m.room.member",
            "state_key": "@alice:example.org",
            "content": { "membership": "join", "displayname": "Alice" },
            "event_id": "$143273582443PhrSn:example.org",
            "sender": "@alice:example.org",
            "origin_server_ts": 1432735824653u64,
            "room_id": "!jEsUZKDJdhlrceRyVU:example.org",
            "unsigned": { "age": 1234 },
        }))
        .unwrap();

        assert_eq!(event.kind(), EnvelopeKind::State);
        assert_eq!(event.event_type(), "m.room.member");
        assert_eq!(event.sender(), Some("@alice:example.org"));
        assert_eq!(event.state_key(), Some("@alice:example.org"));
        assert_eq!(event.room_id(), Some("!jEsUZKDJdhlrceRyVU:example.org"));
        assert_eq!(event.origin_server_ts(), Some(1432735824653));
        assert_eq!(event.unsigned().and_then(|u| u.age), Some(1234));

        match event.content() {
            Content::Member(member) => {
                assert_eq!(member.membership, Membership::Join)
            }
            other => panic!("unexpected content {:?}", other),
        }
    }

    #[test]
    fn account_events_have_no_room_fields() {
        let event: Event = serde_json::from_value(json!({
            "type": "m.direct",
            "content": { "@bob:example.com": ["!abc:example.com"] },
        }))
        .unwrap();

        assert_eq!(event.kind(), EnvelopeKind::Account);
        assert_eq!(event.sender(), None);
        assert_eq!(event.event_id(), None);
        assert_eq!(event.state_key(), None);
        assert!(event.as_room_event().is_none());
    }

    #[test]
    fn deserialize_reports_decode_error() {
        let err = serde_json::from_value::<Event>(json!({
            "content": {},
        }))
        .unwrap_err();

        assert_eq!(err.to_string(), DecodeError::MissingEventType.to_string());
    }

    #[test]
    fn redacted_because_is_an_event() {
        let event: Result<Event, _> = serde_json::from_value(json!({
            "type": "m.room.message",
            "content": {},
            "event_id": "$redacted:example.org",
            "sender": "@alice:example.org",
            "origin_server_ts": 1,
            "room_id": "!room:example.org",
            "unsigned": {
                "redacted_because": {
                    "type": "m.room.redaction",
                    "content": { "reason": "spam" },
                    "redacts": "$redacted:example.org",
                    "event_id": "$redaction:example.org",
                    "sender": "@mod:example.org",
                    "origin_server_ts": 2,
                    "room_id": "!room:example.org",
                }
            }
        }));

        // A redacted message no longer has a body, so its content doesn't
        // fit the `m.room.message` schema.
        assert!(event.is_err());

        let registry = ContentRegistry::standard().without(types::ROOM_MESSAGE);
        let decoder = EventDecoder::new(std::sync::Arc::new(registry));
        let event = decoder
            .decode(json!({
                "type": "m.room.message",
                "content": {},
                "event_id": "$redacted:example.org",
                "sender": "@alice:example.org",
                "origin_server_ts": 1,
                "room_id": "!room:example.org",
                "unsigned": {
                    "redacted_because": {
                        "type": "m.room.redaction",
                        "content": { "reason": "spam" },
                        "redacts": "$redacted:example.org",
                        "event_id": "$redaction:example.org",
                        "sender": "@mod:example.org",
                        "origin_server_ts": 2,
                        "room_id": "!room:example.org",
                    }
                }
            }))
            .unwrap();

        let unsigned = event.unsigned().unwrap();
        assert!(unsigned.is_redacted());

        match unsigned.redacted_because.as_deref() {
            Some(Event::Message(redaction)) => {
                assert_eq!(
                    redaction.redacts.as_deref(),
                    Some("$redacted:example.org")
                );
            }
            other => panic!("unexpected redacted_because {:?}", other),
        }
    }
}
