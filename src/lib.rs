//! In-memory video catalogue served over HTTP.
//!
//! The crate is split the usual way for a small axum service:
//! - `models` — the `Video` record, its resolution labels and request input
//! - `services` — the validation engine and the `VideoStore` that owns the collection
//! - `handlers` / `routes` — the HTTP adapter around the store
//! - `config` / `errors` — ambient plumbing shared by the binary and tests

pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
