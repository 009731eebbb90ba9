//! Core directory types.
//!
//! Identifiers, URLs and coordinates are validated at construction time so
//! that caches and clients never see malformed values.

mod coordinates;
mod header;
mod service_url;
mod user;
mod user_id;
mod weather;

pub use coordinates::Coordinates;
pub use header::HeaderState;
pub use service_url::ServiceUrl;
pub use user::{Address, Contact, Name, Pictures, UserRecord};
pub use user_id::UserId;
pub use weather::{CurrentConditions, WeatherIcon, WeatherSnapshot};

#[cfg(test)]
pub(crate) use user::fixtures;
