//! VoIP signalling content (`m.call.*`).

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

use super::CustomFields;

/// The VoIP protocol version. Version 0 clients send an integer, later
/// ones send a string such as `"1"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CallVersion {
    Number(u64),
    Name(String),
}

/// An SDP offer or answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionDescription {
    #[serde(rename = "type")]
    pub session_type: String,
    pub sdp: String,
    #[serde(flatten)]
    pub custom: CustomFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallInviteContent {
    pub call_id: String,
    pub offer: SessionDescription,
    pub version: CallVersion,
    /// Milliseconds the invite stays valid for.
    pub lifetime: u64,
    #[serde(flatten)]
    pub custom: CustomFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(rename = "sdpMid")]
    pub sdp_mid: String,
    #[serde(rename = "sdpMLineIndex")]
    pub sdp_m_line_index: u64,
    pub candidate: String,
    #[serde(flatten)]
    pub custom: CustomFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallCandidatesContent {
    pub call_id: String,
    pub candidates: Vec<Candidate>,
    pub version: CallVersion,
    #[serde(flatten)]
    pub custom: CustomFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallAnswerContent {
    pub call_id: String,
    pub answer: SessionDescription,
    pub version: CallVersion,
    #[serde(flatten)]
    pub custom: CustomFields,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HangupReason {
    IceFailed,
    InviteTimeout,
    UserHangup,
    /// A reason this crate doesn't name, kept as sent.
    Other(String),
}

impl HangupReason {
    pub fn as_str(&self) -> &str {
        match self {
            HangupReason::IceFailed => "ice_failed",
            HangupReason::InviteTimeout => "invite_timeout",
            HangupReason::UserHangup => "user_hangup",
            HangupReason::Other(reason) => reason,
        }
    }
}

impl From<String> for HangupReason {
    fn from(reason: String) -> HangupReason {
        match reason.as_str() {
            "ice_failed" => HangupReason::IceFailed,
            "invite_timeout" => HangupReason::InviteTimeout,
            "user_hangup" => HangupReason::UserHangup,
            _ => HangupReason::Other(reason),
        }
    }
}

impl Serialize for HangupReason {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for HangupReason {
    fn deserialize<D>(deserializer: D) -> Result<HangupReason, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(HangupReason::from)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallHangupContent {
    pub call_id: String,
    pub version: CallVersion,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<HangupReason>,
    #[serde(flatten)]
    pub custom: CustomFields,
}
