//! Services over the character store and the upstream game API.
//!
//! Every service takes the pool and a `&dyn CharacterSource` explicitly so
//! the API server, the worker binary, and tests can share them.

pub mod character;
pub mod collector;
pub mod error;
pub mod maintenance;
pub mod search;
pub mod sync;
pub mod transform;

pub use error::PipelineError;
