//! JSON helpers that aren't specific to events.

pub mod raw;
