//! Core data models for the video catalogue.
//!
//! `Video` is what the store holds and what the API returns; `VideoInput`
//! is the raw body clients send. Both serialize as camelCase JSON via `serde`.

pub mod input;
pub mod timestamp;
pub mod video;
