//! Typed event content and the second stage of event decoding.

use std::fmt;
use std::str::FromStr;

use log::debug;
use serde::ser::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::DecodeError;
use crate::events::registry::ContentRegistry;
use crate::events::types;

pub mod account;
pub mod call;
pub mod ephemeral;
pub mod keys;
pub mod message;
pub mod room;
pub mod verification;

use self::account::*;
use self::call::*;
use self::ephemeral::*;
use self::keys::*;
use self::message::MessageContent;
use self::room::*;
use self::verification::{
    AcceptContent, CancelContent, KeyContent, MacContent, RequestContent,
    StartContent,
};

/// Keys a content object carries beyond the ones its schema names. The
/// protocol lets senders add their own, so they are kept and written back
/// out rather than rejected.
pub type CustomFields = Map<String, Value>;

macro_rules! content_kinds {
    ($($kind:ident($content:ty) => $event_type:path,)*) => {
        /// Identifies the schema an event's content is decoded with.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum ContentKind {
            $($kind,)*
        }

        impl ContentKind {
            pub const ALL: &'static [ContentKind] = &[$(ContentKind::$kind,)*];

            /// The event type this schema is registered under by default.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(ContentKind::$kind => $event_type,)*
                }
            }
        }

        /// The decoded `content` of an event.
        #[derive(Debug, Clone, PartialEq)]
        pub enum Content {
            $($kind($content),)*
            /// Content of an event type with no registered schema, exactly
            /// as it was received.
            Unknown(Map<String, Value>),
        }

        impl Content {
            pub fn kind(&self) -> Option<ContentKind> {
                match self {
                    $(Content::$kind(_) => Some(ContentKind::$kind),)*
                    Content::Unknown(_) => None,
                }
            }

            fn from_kind(
                kind: ContentKind,
                raw: Value,
            ) -> Result<Content, serde_json::Error> {
                let content = match kind {
                    $(ContentKind::$kind => {
                        Content::$kind(serde_json::from_value(raw)?)
                    })*
                };

                Ok(content)
            }
        }

        impl Serialize for Content {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                match self {
                    $(Content::$kind(content) => content.serialize(serializer),)*
                    Content::Unknown(content) => content.serialize(serializer),
                }
            }
        }

        $(
            impl From<$content> for Content {
                fn from(content: $content) -> Content {
                    Content::$kind(content)
                }
            }
        )*
    };
}

content_kinds! {
    Aliases(AliasesContent) => types::ROOM_ALIASES,
    CanonicalAlias(CanonicalAliasContent) => types::ROOM_CANONICAL_ALIAS,
    Create(CreateContent) => types::ROOM_CREATE,
    JoinRules(JoinRulesContent) => types::ROOM_JOIN_RULES,
    Member(MemberContent) => types::ROOM_MEMBER,
    PowerLevels(PowerLevelsContent) => types::ROOM_POWER_LEVELS,
    Redaction(RedactionContent) => types::ROOM_REDACTION,
    HistoryVisibility(HistoryVisibilityContent) => types::ROOM_HISTORY_VISIBILITY,
    Message(MessageContent) => types::ROOM_MESSAGE,
    Name(NameContent) => types::ROOM_NAME,
    Topic(TopicContent) => types::ROOM_TOPIC,
    Avatar(AvatarContent) => types::ROOM_AVATAR,
    PinnedEvents(PinnedEventsContent) => types::ROOM_PINNED_EVENTS,
    GuestAccess(GuestAccessContent) => types::ROOM_GUEST_ACCESS,
    Encryption(EncryptionContent) => types::ROOM_ENCRYPTION,
    Encrypted(EncryptedContent) => types::ROOM_ENCRYPTED,
    CallInvite(CallInviteContent) => types::CALL_INVITE,
    CallCandidates(CallCandidatesContent) => types::CALL_CANDIDATES,
    CallAnswer(CallAnswerContent) => types::CALL_ANSWER,
    CallHangup(CallHangupContent) => types::CALL_HANGUP,
    Typing(TypingContent) => types::TYPING,
    Receipt(ReceiptContent) => types::RECEIPT,
    FullyRead(FullyReadContent) => types::FULLY_READ,
    Presence(PresenceContent) => types::PRESENCE,
    RoomKey(RoomKeyContent) => types::ROOM_KEY,
    RoomKeyRequest(RoomKeyRequestContent) => types::ROOM_KEY_REQUEST,
    ForwardedRoomKey(ForwardedRoomKeyContent) => types::FORWARDED_ROOM_KEY,
    Dummy(DummyContent) => types::DUMMY,
    Tag(TagContent) => types::TAG,
    Direct(DirectContent) => types::DIRECT,
    AcceptedTerms(AcceptedTermsContent) => types::ACCEPTED_TERMS,
    KeyVerificationRequest(RequestContent) => types::KEY_VERIFICATION_REQUEST,
    KeyVerificationStart(StartContent) => types::KEY_VERIFICATION_START,
    KeyVerificationCancel(CancelContent) => types::KEY_VERIFICATION_CANCEL,
    KeyVerificationAccept(AcceptContent) => types::KEY_VERIFICATION_ACCEPT,
    KeyVerificationKey(KeyContent) => types::KEY_VERIFICATION_KEY,
    KeyVerificationMac(MacContent) => types::KEY_VERIFICATION_MAC,
}

impl FromStr for ContentKind {
    type Err = failure::Error;

    fn from_str(event_type: &str) -> Result<Self, failure::Error> {
        ContentKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == event_type)
            .ok_or_else(|| format_err!("No content schema for '{}'", event_type))
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Content {
    /// Decodes `raw` with the schema `registry` has for `event_type`.
    ///
    /// Types the registry doesn't know become [`Content::Unknown`]; a known
    /// type whose content doesn't fit its schema is an error.
    pub fn decode(
        registry: &ContentRegistry,
        event_type: &str,
        raw: Value,
    ) -> Result<Content, DecodeError> {
        let object = match raw {
            Value::Object(object) => object,
            _ => {
                return Err(DecodeError::schema_mismatch(
                    event_type,
                    "content is not a JSON object",
                ))
            }
        };

        match registry.resolve(event_type) {
            Some(kind) => Content::from_kind(kind, Value::Object(object))
                .map_err(|e| DecodeError::schema_mismatch(event_type, e)),
            None => {
                debug!(
                    "No content schema for '{}', keeping it untyped",
                    event_type
                );
                Ok(Content::Unknown(object))
            }
        }
    }

    /// The event type this content is normally sent as. `None` for
    /// [`Content::Unknown`], which doesn't know its own type.
    pub fn event_type(&self) -> Option<&'static str> {
        self.kind().map(ContentKind::as_str)
    }

    pub fn is_unknown(&self) -> bool {
        self.kind().is_none()
    }

    pub fn as_unknown(&self) -> Option<&Map<String, Value>> {
        match self {
            Content::Unknown(object) => Some(object),
            _ => None,
        }
    }

    pub fn to_json(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn known_type() {
        let registry = ContentRegistry::standard();
        let content = Content::decode(
            &registry,
            "m.room.name",
            json!({ "name": "The Grand Duke Pub" }),
        )
        .unwrap();

        match &content {
            Content::Name(name) => assert_eq!(name.name, "The Grand Duke Pub"),
            other => panic!("unexpected content {:?}", other),
        }
        assert_eq!(content.event_type(), Some("m.room.name"));
    }

    #[test]
    fn unknown_type_is_kept_verbatim() {
        let registry = ContentRegistry::standard();
        let raw = json!({ "anything": [1, 2, 3], "nested": { "a": null } });

        let content =
            Content::decode(&registry, "org.example.custom", raw.clone())
                .unwrap();

        assert!(content.is_unknown());
        assert_eq!(content.as_unknown().unwrap()["anything"], json!([1, 2, 3]));
        assert_eq!(content.to_json().unwrap(), raw);
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let registry = ContentRegistry::standard();

        let content =
            Content::decode(&registry, "M.ROOM.NAME", json!({})).unwrap();

        assert!(content.is_unknown());
    }

    #[test]
    fn custom_keys_survive() {
        let registry = ContentRegistry::standard();
        let raw = json!({
            "topic": "Weekly sync",
            "org.example.colour": "teal",
        });

        let content =
            Content::decode(&registry, "m.room.topic", raw.clone()).unwrap();

        match &content {
            Content::Topic(topic) => {
                assert_eq!(topic.topic, "Weekly sync");
                assert_eq!(topic.custom["org.example.colour"], json!("teal"));
            }
            other => panic!("unexpected content {:?}", other),
        }
        assert_eq!(content.to_json().unwrap(), raw);
    }

    #[test]
    fn schema_mismatch() {
        let registry = ContentRegistry::standard();

        let err = Content::decode(&registry, "m.room.topic", json!({}))
            .unwrap_err();
        match err {
            DecodeError::ContentSchemaMismatch { event_type, reason } => {
                assert_eq!(event_type, "m.room.topic");
                assert!(reason.contains("topic"), "{}", reason);
            }
            other => panic!("unexpected error {:?}", other),
        }

        assert!(Content::decode(
            &registry,
            "m.room.topic",
            json!({ "topic": 5 })
        )
        .is_err());
    }

    #[test]
    fn content_must_be_an_object() {
        let registry = ContentRegistry::standard();

        for event_type in &["m.room.topic", "org.example.custom"] {
            assert!(matches!(
                Content::decode(&registry, event_type, json!(["x"])),
                Err(DecodeError::ContentSchemaMismatch { .. })
            ));
        }
    }

    #[test]
    fn registry_decides_schema() {
        let registry = ContentRegistry::empty()
            .with("org.example.topic", ContentKind::Topic);

        let content = Content::decode(
            &registry,
            "org.example.topic",
            json!({ "topic": "hi" }),
        )
        .unwrap();
        assert_eq!(content.kind(), Some(ContentKind::Topic));

        let content =
            Content::decode(&registry, "m.room.topic", json!({ "topic": "hi" }))
                .unwrap();
        assert!(content.is_unknown());
    }

    #[test]
    fn kind_from_str() {
        assert_eq!(
            "m.call.hangup".parse::<ContentKind>().unwrap(),
            ContentKind::CallHangup
        );
        assert!("m.call.dropped".parse::<ContentKind>().is_err());
    }

    #[test]
    fn every_kind_has_its_own_type() {
        let mut seen = std::collections::HashSet::new();
        for kind in ContentKind::ALL {
            assert!(seen.insert(kind.as_str()), "{} twice", kind.as_str());
        }
        assert_eq!(seen.len(), 37);
    }
}
