//! Event type strings with a registered content schema.

pub const ROOM_ALIASES: &str = "m.room.aliases";
pub const ROOM_CANONICAL_ALIAS: &str = "m.room.canonical_alias";
pub const ROOM_CREATE: &str = "m.room.create";
pub const ROOM_JOIN_RULES: &str = "m.room.join_rules";
pub const ROOM_MEMBER: &str = "m.room.member";
pub const ROOM_POWER_LEVELS: &str = "m.room.power_levels";
pub const ROOM_REDACTION: &str = "m.room.redaction";
pub const ROOM_HISTORY_VISIBILITY: &str = "m.room.history_visibility";
pub const ROOM_MESSAGE: &str = "m.room.message";
pub const ROOM_NAME: &str = "m.room.name";
pub const ROOM_TOPIC: &str = "m.room.topic";
pub const ROOM_AVATAR: &str = "m.room.avatar";
pub const ROOM_PINNED_EVENTS: &str = "m.room.pinned_events";
pub const ROOM_GUEST_ACCESS: &str = "m.room.guest_access";
pub const ROOM_ENCRYPTION: &str = "m.room.encryption";
pub const ROOM_ENCRYPTED: &str = "m.room.encrypted";

pub const CALL_INVITE: &str = "m.call.invite";
pub const CALL_CANDIDATES: &str = "m.call.candidates";
pub const CALL_ANSWER: &str = "m.call.answer";
pub const CALL_HANGUP: &str = "m.call.hangup";

pub const TYPING: &str = "m.typing";
pub const RECEIPT: &str = "m.receipt";
pub const FULLY_READ: &str = "m.fully_read";
pub const PRESENCE: &str = "m.presence";

pub const ROOM_KEY: &str = "m.room_key";
pub const ROOM_KEY_REQUEST: &str = "m.room_key_request";
pub const FORWARDED_ROOM_KEY: &str = "m.forwarded_room_key";
pub const DUMMY: &str = "m.dummy";

pub const TAG: &str = "m.tag";
pub const DIRECT: &str = "m.direct";
pub const ACCEPTED_TERMS: &str = "m.accepted_terms";

pub const KEY_VERIFICATION_REQUEST: &str = "m.key.verification.request";
pub const KEY_VERIFICATION_START: &str = "m.key.verification.start";
pub const KEY_VERIFICATION_CANCEL: &str = "m.key.verification.cancel";
pub const KEY_VERIFICATION_ACCEPT: &str = "m.key.verification.accept";
pub const KEY_VERIFICATION_KEY: &str = "m.key.verification.key";
pub const KEY_VERIFICATION_MAC: &str = "m.key.verification.mac";
