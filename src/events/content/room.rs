//! Content of the `m.room.*` state and timeline events.

use std::collections::BTreeMap;

use super::message::MediaInfo;
use super::CustomFields;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AliasesContent {
    pub aliases: Vec<String>,
    #[serde(flatten)]
    pub custom: CustomFields,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CanonicalAliasContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_aliases: Option<Vec<String>>,
    #[serde(flatten)]
    pub custom: CustomFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateContent {
    pub creator: String,
    /// Whether users on other servers can join. Absent means `true`.
    #[serde(rename = "m.federate", skip_serializing_if = "Option::is_none")]
    pub federate: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predecessor: Option<PreviousRoom>,
    #[serde(flatten)]
    pub custom: CustomFields,
}

impl CreateContent {
    pub fn federate(&self) -> bool {
        self.federate.unwrap_or(true)
    }

    /// Rooms created without a version are version "1".
    pub fn room_version(&self) -> &str {
        self.room_version.as_deref().unwrap_or("1")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviousRoom {
    pub room_id: String,
    pub event_id: String,
    #[serde(flatten)]
    pub custom: CustomFields,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinRule {
    Public,
    Knock,
    Invite,
    Private,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinRulesContent {
    pub join_rule: JoinRule,
    #[serde(flatten)]
    pub custom: CustomFields,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Membership {
    Invite,
    Join,
    Knock,
    Leave,
    Ban,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub displayname: Option<String>,
    pub membership: Membership,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_direct: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub third_party_invite: Option<ThirdPartyInvite>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(flatten)]
    pub custom: CustomFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThirdPartyInvite {
    pub display_name: String,
    pub signed: SignedInvite,
    #[serde(flatten)]
    pub custom: CustomFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedInvite {
    pub mxid: String,
    pub signatures: BTreeMap<String, BTreeMap<String, String>>,
    pub token: String,
    #[serde(flatten)]
    pub custom: CustomFields,
}

/// `m.room.power_levels`. Every key is optional on the wire; the accessor
/// methods apply the protocol defaults.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PowerLevelsContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ban: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<BTreeMap<String, i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events_default: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invite: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kick: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redact: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_default: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users: Option<BTreeMap<String, i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users_default: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notifications: Option<NotificationPowerLevels>,
    #[serde(flatten)]
    pub custom: CustomFields,
}

impl PowerLevelsContent {
    pub fn ban_level(&self) -> i64 {
        self.ban.unwrap_or(50)
    }

    pub fn invite_level(&self) -> i64 {
        self.invite.unwrap_or(50)
    }

    pub fn kick_level(&self) -> i64 {
        self.kick.unwrap_or(50)
    }

    pub fn redact_level(&self) -> i64 {
        self.redact.unwrap_or(50)
    }

    pub fn user_level(&self, user_id: &str) -> i64 {
        self.users
            .as_ref()
            .and_then(|users| users.get(user_id))
            .copied()
            .unwrap_or_else(|| self.users_default.unwrap_or(0))
    }

    /// Level needed to send an event of the given type.
    pub fn event_level(&self, event_type: &str, is_state: bool) -> i64 {
        if let Some(level) =
            self.events.as_ref().and_then(|events| events.get(event_type))
        {
            return *level;
        }

        if is_state {
            self.state_default.unwrap_or(50)
        } else {
            self.events_default.unwrap_or(0)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NotificationPowerLevels {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<i64>,
    #[serde(flatten)]
    pub custom: CustomFields,
}

/// `m.room.redaction`. The id of the redacted event lives in the top-level
/// `redacts` key of the event, not in the content.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RedactionContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(flatten)]
    pub custom: CustomFields,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryVisibility {
    Invited,
    Joined,
    Shared,
    WorldReadable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryVisibilityContent {
    pub history_visibility: HistoryVisibility,
    #[serde(flatten)]
    pub custom: CustomFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameContent {
    pub name: String,
    #[serde(flatten)]
    pub custom: CustomFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicContent {
    pub topic: String,
    #[serde(flatten)]
    pub custom: CustomFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvatarContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<MediaInfo>,
    pub url: String,
    #[serde(flatten)]
    pub custom: CustomFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PinnedEventsContent {
    pub pinned: Vec<String>,
    #[serde(flatten)]
    pub custom: CustomFields,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuestAccess {
    CanJoin,
    Forbidden,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuestAccessContent {
    pub guest_access: GuestAccess,
    #[serde(flatten)]
    pub custom: CustomFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncryptionContent {
    pub algorithm: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation_period_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation_period_msgs: Option<u64>,
    #[serde(flatten)]
    pub custom: CustomFields,
}

/// `m.room.encrypted`. Olm sends one ciphertext per recipient device key,
/// Megolm a single string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncryptedContent {
    pub algorithm: String,
    pub ciphertext: Ciphertext,
    pub sender_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(flatten)]
    pub custom: CustomFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Ciphertext {
    Megolm(String),
    Olm(BTreeMap<String, OlmCiphertext>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OlmCiphertext {
    pub body: String,
    #[serde(rename = "type")]
    pub message_type: u8,
    #[serde(flatten)]
    pub custom: CustomFields,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn power_levels_defaults() {
        let content: PowerLevelsContent = serde_json::from_value(json!({
            "users": { "@alice:example.com": 100 },
            "events": { "m.room.name": 75 },
        }))
        .unwrap();

        assert_eq!(content.ban_level(), 50);
        assert_eq!(content.user_level("@alice:example.com"), 100);
        assert_eq!(content.user_level("@bob:example.com"), 0);
        assert_eq!(content.event_level("m.room.name", true), 75);
        assert_eq!(content.event_level("m.room.topic", true), 50);
        assert_eq!(content.event_level("m.room.message", false), 0);
    }

    #[test]
    fn power_levels_absent_keys_stay_absent() {
        let content: PowerLevelsContent =
            serde_json::from_value(json!({ "kick": 10 })).unwrap();

        assert_eq!(serde_json::to_value(&content).unwrap(), json!({ "kick": 10 }));
    }

    #[test]
    fn create_keeps_dotted_key() {
        let raw = json!({
            "creator": "@alice:example.com",
            "m.federate": false,
            "room_version": "5",
        });
        let content: CreateContent = serde_json::from_value(raw.clone()).unwrap();

        assert!(!content.federate());
        assert_eq!(content.room_version(), "5");
        assert!(content.custom.is_empty());
        assert_eq!(serde_json::to_value(&content).unwrap(), raw);
    }

    #[test]
    fn predecessor_keeps_extra_keys() {
        let raw = json!({
            "creator": "@alice:example.com",
            "predecessor": {
                "room_id": "!old:example.com",
                "event_id": "$tombstone",
                "org.example.note": "moved",
            },
        });
        let content: CreateContent = serde_json::from_value(raw.clone()).unwrap();

        let predecessor = content.predecessor.as_ref().unwrap();
        assert_eq!(predecessor.room_id, "!old:example.com");
        assert_eq!(predecessor.custom["org.example.note"], json!("moved"));
        assert_eq!(serde_json::to_value(&content).unwrap(), raw);
    }

    #[test]
    fn third_party_invite_keeps_extra_keys() {
        let raw = json!({
            "membership": "invite",
            "third_party_invite": {
                "display_name": "alice",
                "org.example.via": "email",
                "signed": {
                    "mxid": "@alice:example.org",
                    "token": "abc123",
                    "signatures": { "example.org": { "ed25519:0": "sig" } },
                    "org.example.extra": 1,
                },
            },
        });
        let content: MemberContent = serde_json::from_value(raw.clone()).unwrap();

        let invite = content.third_party_invite.as_ref().unwrap();
        assert_eq!(invite.custom["org.example.via"], json!("email"));
        assert_eq!(invite.signed.custom["org.example.extra"], json!(1));
        assert_eq!(serde_json::to_value(&content).unwrap(), raw);
    }

    #[test]
    fn member_requires_known_membership() {
        let content: MemberContent = serde_json::from_value(json!({
            "membership": "join",
            "displayname": "Alice",
        }))
        .unwrap();
        assert_eq!(content.membership, Membership::Join);

        assert!(serde_json::from_value::<MemberContent>(json!({
            "membership": "lurking",
        }))
        .is_err());
    }

    #[test]
    fn encrypted_ciphertext_forms() {
        let megolm: EncryptedContent = serde_json::from_value(json!({
            "algorithm": "m.megolm.v1.aes-sha2",
            "ciphertext": "AwgAEnACgAkLmt6qF84IK++J7UDH2Za1YVchHyprqTqsg",
            "device_id": "RJYKSTBOIE",
            "sender_key": "IlRMeOPX2e0MurIyfWEucYBRVOEEUMrOHqn/8mLqMjA",
            "session_id": "X3lUlvLELLYxeTx4yOVu6UDpasGEVO0Jbu+QFnm0cKQ",
        }))
        .unwrap();
        assert!(matches!(megolm.ciphertext, Ciphertext::Megolm(_)));

        let olm: EncryptedContent = serde_json::from_value(json!({
            "algorithm": "m.olm.v1.curve25519-aes-sha2",
            "ciphertext": {
                "7qZcfnBmbEGzxxaWfBjElJuvn7BZx+lSz/SvFrDF/z8": {
                    "body": "AwogGJJzMhf/S3GQFXAOrCZ3iKyGU5ZScVtjI0KypTYrW",
                    "type": 0
                }
            },
            "sender_key": "Szl29ksW/L8yZGWAX+8dY1XyFi+i5wm+DRhTGkbMiwU",
        }))
        .unwrap();
        match olm.ciphertext {
            Ciphertext::Olm(map) => assert_eq!(map.len(), 1),
            other => panic!("unexpected ciphertext {:?}", other),
        }
    }
}
