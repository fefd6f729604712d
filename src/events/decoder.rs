use std::sync::Arc;

use log::warn;
use serde_json::value::RawValue;
use serde_json::{Map, Value};

use crate::error::DecodeError;
use crate::events::{
    AccountEvent, Content, ContentRegistry, EnvelopeKind, EphemeralEvent,
    Event, MessageEvent, StateEvent, UnsignedData,
};
use crate::json::raw::Raw;

/// Turns raw JSON events into [`Event`]s and back.
///
/// Cloning is cheap: clones share the same registry.
#[derive(Debug, Clone)]
pub struct EventDecoder {
    registry: Arc<ContentRegistry>,
}

impl EventDecoder {
    pub fn new(registry: Arc<ContentRegistry>) -> EventDecoder {
        EventDecoder { registry }
    }

    pub fn registry(&self) -> &ContentRegistry {
        &self.registry
    }

    /// Decodes a single event. Either the whole event decodes or an error
    /// is returned.
    #[tracing::instrument(skip(self, raw))]
    pub fn decode(&self, raw: Value) -> Result<Event, DecodeError> {
        let kind = EnvelopeKind::resolve(&raw)?;

        let mut object = match raw {
            Value::Object(object) => object,
            _ => return Err(DecodeError::MalformedEnvelope),
        };

        let event_type = match object.remove("type") {
            Some(Value::String(event_type)) => event_type,
            _ => return Err(DecodeError::MissingEventType),
        };

        let event = match kind {
            EnvelopeKind::Account => {
                let raw_content = take_object(&mut object, "content")?;

                Event::Account(AccountEvent {
                    content: self.decode_content(&event_type, raw_content)?,
                    event_type,
                })
            }
            EnvelopeKind::Ephemeral => {
                let sender = take_string(&mut object, "sender")?;
                let raw_content = take_object(&mut object, "content")?;

                Event::Ephemeral(EphemeralEvent {
                    content: self.decode_content(&event_type, raw_content)?,
                    event_type,
                    sender,
                })
            }
            EnvelopeKind::Message => {
                let fields = self.take_room_fields(&mut object)?;
                let redacts = take_optional_string(&mut object, "redacts")?;
                let raw_content = take_object(&mut object, "content")?;

                Event::Message(MessageEvent {
                    content: self.decode_content(&event_type, raw_content)?,
                    event_type,
                    event_id: fields.event_id,
                    sender: fields.sender,
                    origin_server_ts: fields.origin_server_ts,
                    unsigned: fields.unsigned,
                    room_id: fields.room_id,
                    redacts,
                })
            }
            EnvelopeKind::State => {
                let fields = self.take_room_fields(&mut object)?;
                let state_key = take_string(&mut object, "state_key")?;
                let raw_content = take_object(&mut object, "content")?;

                let content = self.decode_content(&event_type, raw_content)?;

                // Same schema as `content`. Never filled in when absent.
                let prev_content =
                    match take_present(&mut object, "prev_content") {
                        Some(Value::Object(raw)) => {
                            Some(self.decode_content(&event_type, raw)?)
                        }
                        Some(_) => {
                            return Err(DecodeError::MissingField(
                                "prev_content",
                            ))
                        }
                        None => None,
                    };

                Event::State(StateEvent {
                    event_type,
                    content,
                    event_id: fields.event_id,
                    sender: fields.sender,
                    origin_server_ts: fields.origin_server_ts,
                    unsigned: fields.unsigned,
                    room_id: fields.room_id,
                    state_key,
                    prev_content,
                })
            }
        };

        Ok(event)
    }

    /// Decodes a batch of events, such as a `/sync` timeline. Each event
    /// succeeds or fails on its own.
    #[tracing::instrument(skip(self, values))]
    pub fn decode_all(
        &self,
        values: impl IntoIterator<Item = Value>,
    ) -> Vec<Result<Event, DecodeError>> {
        values
            .into_iter()
            .enumerate()
            .map(|(idx, value)| {
                let result = self.decode(value);
                if let Err(err) = &result {
                    warn!("Failed to decode event {} in batch: {}", idx, err);
                }
                result
            })
            .collect()
    }

    /// Decodes an event while keeping the exact JSON it came from.
    pub fn decode_raw(
        &self,
        raw: Box<RawValue>,
    ) -> Result<Raw<Event>, DecodeError> {
        let value: Value = serde_json::from_str(raw.get())
            .map_err(|_| DecodeError::MalformedEnvelope)?;

        let event = self.decode(value)?;

        Ok(Raw::from_parts(event, raw))
    }

    /// Writes an event back out as a single JSON object. Absent optional
    /// fields are left out rather than written as `null`.
    pub fn encode(&self, event: &Event) -> Result<Value, serde_json::Error> {
        serde_json::to_value(event)
    }

    fn take_room_fields(
        &self,
        object: &mut Map<String, Value>,
    ) -> Result<RoomFields, DecodeError> {
        let event_id = take_string(object, "event_id")?;
        let sender = take_string(object, "sender")?;
        let origin_server_ts = take_u64(object, "origin_server_ts")?;
        let room_id = take_string(object, "room_id")?;
        let unsigned = self.take_unsigned(object)?;

        Ok(RoomFields {
            event_id,
            sender,
            origin_server_ts,
            unsigned,
            room_id,
        })
    }

    fn take_unsigned(
        &self,
        object: &mut Map<String, Value>,
    ) -> Result<Option<UnsignedData>, DecodeError> {
        let mut raw = match take_present(object, "unsigned") {
            Some(Value::Object(raw)) => raw,
            Some(_) => return Err(DecodeError::MissingField("unsigned")),
            None => return Ok(None),
        };

        // Nested events use this decoder's registry too.
        let redacted_because = match take_present(&mut raw, "redacted_because")
        {
            Some(nested) => Some(Box::new(self.decode(nested)?)),
            None => None,
        };

        let mut unsigned: UnsignedData =
            serde_json::from_value(Value::Object(raw))
                .map_err(|_| DecodeError::MissingField("unsigned"))?;
        unsigned.redacted_because = redacted_because;

        Ok(Some(unsigned))
    }

    fn decode_content(
        &self,
        event_type: &str,
        raw: Map<String, Value>,
    ) -> Result<Content, DecodeError> {
        Content::decode(&self.registry, event_type, Value::Object(raw))
    }
}

impl Default for EventDecoder {
    fn default() -> Self {
        EventDecoder::new(ContentRegistry::global())
    }
}

/// Envelope fields common to message and state events.
struct RoomFields {
    event_id: String,
    sender: String,
    origin_server_ts: u64,
    unsigned: Option<UnsignedData>,
    room_id: String,
}

/// Removes a key, treating an explicit `null` the same as a missing key.
fn take_present(object: &mut Map<String, Value>, key: &str) -> Option<Value> {
    match object.remove(key) {
        Some(Value::Null) | None => None,
        Some(value) => Some(value),
    }
}

fn take_string(
    object: &mut Map<String, Value>,
    key: &'static str,
) -> Result<String, DecodeError> {
    match object.remove(key) {
        Some(Value::String(s)) => Ok(s),
        _ => Err(DecodeError::MissingField(key)),
    }
}

fn take_optional_string(
    object: &mut Map<String, Value>,
    key: &'static str,
) -> Result<Option<String>, DecodeError> {
    match take_present(object, key) {
        Some(Value::String(s)) => Ok(Some(s)),
        Some(_) => Err(DecodeError::MissingField(key)),
        None => Ok(None),
    }
}

fn take_u64(
    object: &mut Map<String, Value>,
    key: &'static str,
) -> Result<u64, DecodeError> {
    object
        .remove(key)
        .and_then(|v| v.as_u64())
        .ok_or(DecodeError::MissingField(key))
}

fn take_object(
    object: &mut Map<String, Value>,
    key: &'static str,
) -> Result<Map<String, Value>, DecodeError> {
    match object.remove(key) {
        Some(Value::Object(o)) => Ok(o),
        _ => Err(DecodeError::MissingField(key)),
    }
}
