//! Content of typing notifications, receipts and presence.

use std::collections::BTreeMap;

use super::CustomFields;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypingContent {
    pub user_ids: Vec<String>,
    #[serde(flatten)]
    pub custom: CustomFields,
}

/// `m.receipt`, keyed by the id of the event being acknowledged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReceiptContent(pub BTreeMap<String, Receipts>);

impl ReceiptContent {
    /// Users that have read up to `event_id`.
    pub fn readers<'a>(
        &'a self,
        event_id: &str,
    ) -> impl Iterator<Item = &'a str> + 'a {
        self.0
            .get(event_id)
            .and_then(|receipts| receipts.read.as_ref())
            .into_iter()
            .flat_map(|users| users.keys().map(String::as_str))
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Receipts {
    #[serde(rename = "m.read", skip_serializing_if = "Option::is_none")]
    pub read: Option<BTreeMap<String, ReceiptInfo>>,
    #[serde(flatten)]
    pub custom: CustomFields,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReceiptInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ts: Option<u64>,
    #[serde(flatten)]
    pub custom: CustomFields,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresenceState {
    Online,
    Offline,
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresenceContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub displayname: Option<String>,
    /// Milliseconds since the user last did something.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_active_ago: Option<u64>,
    pub presence: PresenceState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currently_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_msg: Option<String>,
    #[serde(flatten)]
    pub custom: CustomFields,
}
