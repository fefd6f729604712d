//! Interactive key verification (`m.key.verification.*`).
//!
//! These are only the messages exchanged between devices; computing the
//! short authentication strings and MACs is left to the caller.

use std::collections::BTreeMap;

use super::CustomFields;

pub const METHOD_SAS_V1: &str = "m.sas.v1";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestContent {
    pub from_device: String,
    pub transaction_id: String,
    pub methods: Vec<String>,
    /// Milliseconds since the epoch when the request was made.
    pub timestamp: u64,
    #[serde(flatten)]
    pub custom: CustomFields,
}

/// `m.key.verification.start`. The SAS-specific lists are only present
/// when `method` is [`METHOD_SAS_V1`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartContent {
    pub from_device: String,
    pub transaction_id: String,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_agreement_protocols: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hashes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_authentication_codes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_authentication_string: Option<Vec<String>>,
    #[serde(flatten)]
    pub custom: CustomFields,
}

impl StartContent {
    pub fn is_sas(&self) -> bool {
        self.method == METHOD_SAS_V1
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancelContent {
    pub transaction_id: String,
    pub reason: String,
    pub code: String,
    #[serde(flatten)]
    pub custom: CustomFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcceptContent {
    pub transaction_id: String,
    pub method: String,
    pub key_agreement_protocol: String,
    pub hash: String,
    pub message_authentication_code: String,
    pub short_authentication_string: Vec<String>,
    pub commitment: String,
    #[serde(flatten)]
    pub custom: CustomFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyContent {
    pub transaction_id: String,
    pub key: String,
    #[serde(flatten)]
    pub custom: CustomFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacContent {
    pub transaction_id: String,
    /// Key id to MAC of that key.
    pub mac: BTreeMap<String, String>,
    /// MAC of the sorted, comma separated key ids in `mac`.
    pub keys: String,
    #[serde(flatten)]
    pub custom: CustomFields,
}
