//! Account data content: tags, direct chats, read markers and terms.

use std::collections::BTreeMap;

use super::CustomFields;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TagContent {
    pub tags: BTreeMap<String, TagInfo>,
    #[serde(flatten)]
    pub custom: CustomFields,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TagInfo {
    /// Position of the room within the tag, between 0 and 1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<f64>,
    #[serde(flatten)]
    pub custom: CustomFields,
}

/// `m.direct`: user id to the rooms that are direct chats with that user.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DirectContent(pub BTreeMap<String, Vec<String>>);

impl DirectContent {
    pub fn is_direct(&self, room_id: &str) -> bool {
        self.0
            .values()
            .any(|rooms| rooms.iter().any(|r| r == room_id))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FullyReadContent {
    pub event_id: String,
    #[serde(flatten)]
    pub custom: CustomFields,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AcceptedTermsContent {
    /// URLs of the terms documents the user agreed to.
    pub accepted: Vec<String>,
    #[serde(flatten)]
    pub custom: CustomFields,
}
