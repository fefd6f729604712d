//! `m.room.message` content, dispatched a second time on `msgtype`.

use std::collections::BTreeMap;

use serde::de::{Deserialize, Deserializer, Error as _};
use serde::ser::{Error as _, Serialize, Serializer};
use serde_json::{Map, Value};

use super::CustomFields;

const MSGTYPE_TEXT: &str = "m.text";
const MSGTYPE_EMOTE: &str = "m.emote";
const MSGTYPE_NOTICE: &str = "m.notice";
const MSGTYPE_IMAGE: &str = "m.image";
const MSGTYPE_FILE: &str = "m.file";
const MSGTYPE_AUDIO: &str = "m.audio";
const MSGTYPE_VIDEO: &str = "m.video";
const MSGTYPE_LOCATION: &str = "m.location";

#[derive(Debug, Clone, PartialEq)]
pub enum MessageContent {
    Text(TextContent),
    Emote(TextContent),
    Notice(TextContent),
    Image(MediaContent),
    File(FileContent),
    Audio(MediaContent),
    Video(MediaContent),
    Location(LocationContent),
    /// A `msgtype` this crate has no schema for. Only `body` is required.
    Other(OtherMessageContent),
}

impl MessageContent {
    pub fn text(body: impl Into<String>) -> MessageContent {
        MessageContent::Text(TextContent::plain(body))
    }

    pub fn notice(body: impl Into<String>) -> MessageContent {
        MessageContent::Notice(TextContent::plain(body))
    }

    pub fn msgtype(&self) -> &str {
        match self {
            MessageContent::Text(_) => MSGTYPE_TEXT,
            MessageContent::Emote(_) => MSGTYPE_EMOTE,
            MessageContent::Notice(_) => MSGTYPE_NOTICE,
            MessageContent::Image(_) => MSGTYPE_IMAGE,
            MessageContent::File(_) => MSGTYPE_FILE,
            MessageContent::Audio(_) => MSGTYPE_AUDIO,
            MessageContent::Video(_) => MSGTYPE_VIDEO,
            MessageContent::Location(_) => MSGTYPE_LOCATION,
            MessageContent::Other(c) => &c.msgtype,
        }
    }

    pub fn body(&self) -> &str {
        match self {
            MessageContent::Text(c)
            | MessageContent::Emote(c)
            | MessageContent::Notice(c) => &c.body,
            MessageContent::Image(c)
            | MessageContent::Audio(c)
            | MessageContent::Video(c) => &c.body,
            MessageContent::File(c) => &c.body,
            MessageContent::Location(c) => &c.body,
            MessageContent::Other(c) => &c.body,
        }
    }
}

impl<'de> Deserialize<'de> for MessageContent {
    fn deserialize<D>(deserializer: D) -> Result<MessageContent, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut map = Map::<String, Value>::deserialize(deserializer)?;

        let msgtype = match map.remove("msgtype") {
            Some(Value::String(msgtype)) => msgtype,
            Some(_) => return Err(D::Error::custom("`msgtype` must be a string")),
            None => return Err(D::Error::missing_field("msgtype")),
        };

        let value = Value::Object(map);

        let content = match &msgtype[..] {
            MSGTYPE_TEXT => serde_json::from_value(value).map(MessageContent::Text),
            MSGTYPE_EMOTE => {
                serde_json::from_value(value).map(MessageContent::Emote)
            }
            MSGTYPE_NOTICE => {
                serde_json::from_value(value).map(MessageContent::Notice)
            }
            MSGTYPE_IMAGE => {
                serde_json::from_value(value).map(MessageContent::Image)
            }
            MSGTYPE_FILE => serde_json::from_value(value).map(MessageContent::File),
            MSGTYPE_AUDIO => {
                serde_json::from_value(value).map(MessageContent::Audio)
            }
            MSGTYPE_VIDEO => {
                serde_json::from_value(value).map(MessageContent::Video)
            }
            MSGTYPE_LOCATION => {
                serde_json::from_value(value).map(MessageContent::Location)
            }
            _ => serde_json::from_value(value).map(|other| {
                MessageContent::Other(OtherMessageContent {
                    msgtype: msgtype.clone(),
                    ..other
                })
            }),
        };

        content.map_err(D::Error::custom)
    }
}

impl Serialize for MessageContent {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let v = match self {
            MessageContent::Text(c)
            | MessageContent::Emote(c)
            | MessageContent::Notice(c) => serde_json::to_value(c),
            MessageContent::Image(c)
            | MessageContent::Audio(c)
            | MessageContent::Video(c) => serde_json::to_value(c),
            MessageContent::File(c) => serde_json::to_value(c),
            MessageContent::Location(c) => serde_json::to_value(c),
            MessageContent::Other(c) => serde_json::to_value(c),
        };

        let mut v = v.map_err(S::Error::custom)?;

        match v.as_object_mut() {
            Some(object) => {
                object.insert(
                    "msgtype".to_string(),
                    Value::String(self.msgtype().to_string()),
                );
            }
            None => return Err(S::Error::custom("message content is not an object")),
        }

        v.serialize(serializer)
    }
}

/// Body of `m.text`, `m.emote` and `m.notice` messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextContent {
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted_body: Option<String>,
    #[serde(flatten)]
    pub custom: CustomFields,
}

impl TextContent {
    pub fn plain(body: impl Into<String>) -> TextContent {
        TextContent {
            body: body.into(),
            format: None,
            formatted_body: None,
            custom: CustomFields::new(),
        }
    }

    pub fn html(
        body: impl Into<String>,
        formatted_body: impl Into<String>,
    ) -> TextContent {
        TextContent {
            body: body.into(),
            format: Some("org.matrix.custom.html".to_string()),
            formatted_body: Some(formatted_body.into()),
            custom: CustomFields::new(),
        }
    }
}

/// Body of `m.image`, `m.audio` and `m.video` messages. Unencrypted media
/// has a `url`, encrypted media a `file`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaContent {
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<MediaInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<EncryptedFile>,
    #[serde(flatten)]
    pub custom: CustomFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileContent {
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<MediaInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<EncryptedFile>,
    #[serde(flatten)]
    pub custom: CustomFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationContent {
    pub body: String,
    pub geo_uri: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<MediaInfo>,
    #[serde(flatten)]
    pub custom: CustomFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OtherMessageContent {
    #[serde(skip)]
    pub msgtype: String,
    pub body: String,
    #[serde(flatten)]
    pub custom: CustomFields,
}

/// The `info` object shared by media messages and room avatars. Which keys
/// appear depends on the kind of media.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MediaInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mimetype: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub w: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub h: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_file: Option<EncryptedFile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_info: Option<Box<MediaInfo>>,
    #[serde(flatten)]
    pub custom: CustomFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncryptedFile {
    pub url: String,
    pub key: JsonWebKey,
    pub iv: String,
    pub hashes: BTreeMap<String, String>,
    pub v: String,
    #[serde(flatten)]
    pub custom: CustomFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonWebKey {
    pub kty: String,
    pub key_ops: Vec<String>,
    pub alg: String,
    pub k: String,
    pub ext: bool,
    #[serde(flatten)]
    pub custom: CustomFields,
}
