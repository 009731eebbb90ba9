//! Command implementations.

pub mod users;
pub mod weather;
