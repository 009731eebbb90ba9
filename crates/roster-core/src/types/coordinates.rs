//! Geographic coordinates.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, InvalidInputError};

/// A latitude/longitude pair in decimal degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinates", into = "RawCoordinates")]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    /// Create validated coordinates.
    ///
    /// # Errors
    ///
    /// Returns an error if either value is not finite or out of range.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, Error> {
        let reason = if !latitude.is_finite() || !longitude.is_finite() {
            Some("must be finite")
        } else if !(-90.0..=90.0).contains(&latitude) {
            Some("latitude must be within [-90, 90]")
        } else if !(-180.0..=180.0).contains(&longitude) {
            Some("longitude must be within [-180, 180]")
        } else {
            None
        };

        if let Some(reason) = reason {
            return Err(InvalidInputError::Coordinates {
                latitude,
                longitude,
                reason: reason.to_string(),
            }
            .into());
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

#[derive(Serialize, Deserialize)]
struct RawCoordinates {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinates> for Coordinates {
    type Error = Error;

    fn try_from(raw: RawCoordinates) -> Result<Self, Self::Error> {
        Self::new(raw.latitude, raw.longitude)
    }
}

impl From<Coordinates> for RawCoordinates {
    fn from(c: Coordinates) -> Self {
        Self {
            latitude: c.latitude,
            longitude: c.longitude,
        }
    }
}
