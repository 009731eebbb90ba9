//! Seams between the controller and its collaborators.

mod cache;
mod source;
mod store;

pub use cache::UserCache;
pub use source::{UserSource, WeatherSource};
pub use store::KeyValueStore;
