//! HTTP client for the upstream game API.
//!
//! Wraps the character search, profile/info and equipment endpoints using
//! [`reqwest`]. Section payloads are kept as opaque JSON; only the scalar
//! fields the cache pipeline reads are typed.

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod source;

pub use client::GameApiClient;
pub use config::GameApiConfig;
pub use error::GameApiError;
pub use source::CharacterSource;
