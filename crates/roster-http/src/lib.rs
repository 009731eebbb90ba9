//! roster-http - HTTP-backed user and weather sources.
//!
//! [`RandomUserSource`] fetches user batches from a randomuser.me-compatible
//! API; [`OpenWeatherSource`] reads current conditions and reverse-geocoded
//! city names from an OpenWeatherMap-compatible API.

mod client;
mod random_user;
mod weather;

pub use client::HttpClient;
pub use random_user::{DEFAULT_BATCH_SIZE, DEFAULT_USER_API, RandomUserSource};
pub use weather::{DEFAULT_WEATHER_API, OpenWeatherSource};
