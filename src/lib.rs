//! Typed Matrix client events.
//!
//! Events arrive from the homeserver as plain JSON objects. The
//! [`EventDecoder`](events::EventDecoder) works out which envelope shape an
//! object has from the keys it carries, then decodes its `content` against
//! the schema registered for its `type`.

#![allow(clippy::large_enum_variant)]

#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate failure;

pub mod config;
pub mod error;
pub mod events;
pub mod json;

pub use crate::error::DecodeError;
pub use crate::events::{
    Content, ContentKind, ContentRegistry, EnvelopeKind, Event, EventDecoder,
};
