//! To-device key sharing content. Keys are carried as opaque strings.

use super::CustomFields;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomKeyContent {
    pub algorithm: String,
    pub room_id: String,
    pub session_id: String,
    pub session_key: String,
    #[serde(flatten)]
    pub custom: CustomFields,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyRequestAction {
    Request,
    RequestCancellation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestedKeyInfo {
    pub algorithm: String,
    pub room_id: String,
    pub sender_key: String,
    pub session_id: String,
    #[serde(flatten)]
    pub custom: CustomFields,
}

/// `m.room_key_request`. `body` is only sent with
/// [`KeyRequestAction::Request`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomKeyRequestContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<RequestedKeyInfo>,
    pub action: KeyRequestAction,
    pub requesting_device_id: String,
    pub request_id: String,
    #[serde(flatten)]
    pub custom: CustomFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForwardedRoomKeyContent {
    pub algorithm: String,
    pub room_id: String,
    pub sender_key: String,
    pub session_id: String,
    pub session_key: String,
    pub sender_claimed_ed25519_key: String,
    pub forwarding_curve25519_key_chain: Vec<String>,
    #[serde(flatten)]
    pub custom: CustomFields,
}

/// `m.dummy` has no defined keys.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DummyContent {
    #[serde(flatten)]
    pub custom: CustomFields,
}
