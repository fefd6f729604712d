/// Reasons a JSON value could not be decoded into an [`Event`].
///
/// Unrecognised event types are not errors: they decode into
/// [`Content::Unknown`].
///
/// [`Event`]: crate::events::Event
/// [`Content::Unknown`]: crate::events::Content::Unknown
#[derive(Debug, Clone, PartialEq, Eq, Fail)]
pub enum DecodeError {
    #[fail(display = "event is not a JSON object")]
    MalformedEnvelope,

    #[fail(display = "event has no string 'type' field")]
    MissingEventType,

    #[fail(display = "event field '{}' is missing or has the wrong type", _0)]
    MissingField(&'static str),

    #[fail(
        display = "content does not match the schema for '{}': {}",
        event_type, reason
    )]
    ContentSchemaMismatch { event_type: String, reason: String },
}

impl DecodeError {
    pub(crate) fn schema_mismatch(
        event_type: &str,
        reason: impl ToString,
    ) -> DecodeError {
        DecodeError::ContentSchemaMismatch {
            event_type: event_type.to_string(),
            reason: reason.to_string(),
        }
    }
}
