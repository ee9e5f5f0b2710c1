pub mod character;
pub mod collector;
pub mod maintenance;
pub mod search;
pub mod sync;
