//! Domain logic for the character cache and collector.
//!
//! Pure functions and constants only; no database or network access.

pub mod backfill;
pub mod class_table;
pub mod duplicates;
pub mod error;
pub mod freshness;
pub mod maintenance;
pub mod race;
pub mod sampling;
pub mod sanitize;
pub mod search;
pub mod servers;
pub mod sync;
pub mod types;
