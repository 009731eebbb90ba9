//! Weather types shown in the header.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CacheError, Error};

/// Field separator of the flattened snapshot.
const FLAT_SEPARATOR: &str = "~~~";

/// Current conditions at a location, as reported by a weather source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Whole degrees Celsius.
    pub temperature_celsius: i32,
    /// Human-readable description, e.g. "scattered clouds".
    pub condition: String,
    /// Provider icon id, e.g. "03d".
    pub icon_id: String,
}

impl CurrentConditions {
    pub fn icon(&self) -> WeatherIcon {
        WeatherIcon::from_icon_id(&self.icon_id)
    }
}

/// Current conditions plus the city they were observed for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub temperature_celsius: i32,
    pub condition: String,
    pub icon_id: String,
    pub city_name: String,
}

impl WeatherSnapshot {
    pub fn new(conditions: CurrentConditions, city_name: impl Into<String>) -> Self {
        Self {
            temperature_celsius: conditions.temperature_celsius,
            condition: conditions.condition,
            icon_id: conditions.icon_id,
            city_name: city_name.into(),
        }
    }

    pub fn icon(&self) -> WeatherIcon {
        WeatherIcon::from_icon_id(&self.icon_id)
    }

    /// Serialize as `temperature~~~condition~~~icon~~~city`.
    pub fn to_flattened(&self) -> String {
        [
            self.temperature_celsius.to_string().as_str(),
            &self.condition,
            &self.icon_id,
            &self.city_name,
        ]
        .join(FLAT_SEPARATOR)
    }

    /// Parse the form written by [`WeatherSnapshot::to_flattened`].
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Corrupt`] if the value does not have exactly four
    /// fields or the temperature is not an integer.
    pub fn from_flattened(value: &str) -> Result<Self, Error> {
        let corrupt = |message: String| -> Error {
            CacheError::Corrupt {
                path: "weather snapshot".to_string(),
                message,
            }
            .into()
        };

        let fields: Vec<&str> = value.split(FLAT_SEPARATOR).collect();
        let [temperature, condition, icon_id, city_name] = fields.as_slice() else {
            return Err(corrupt(format!("expected 4 fields, found {}", fields.len())));
        };

        let temperature_celsius = temperature
            .parse::<i32>()
            .map_err(|e| corrupt(format!("temperature '{}': {}", temperature, e)))?;

        Ok(Self {
            temperature_celsius,
            condition: condition.to_string(),
            icon_id: icon_id.to_string(),
            city_name: city_name.to_string(),
        })
    }
}

impl fmt::Display for WeatherSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}°C {} ({})",
            self.temperature_celsius, self.condition, self.city_name
        )
    }
}

/// Illustration family for a provider icon id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherIcon {
    ClearDay,
    ClearNight,
    Clouds,
    Storm,
    Overcast,
}

impl WeatherIcon {
    pub fn from_icon_id(id: &str) -> Self {
        match id {
            "01d" => Self::ClearDay,
            "01n" => Self::ClearNight,
            "02d" | "03d" | "04d" | "02n" | "03n" | "04n" => Self::Clouds,
            "09d" | "10d" | "11d" | "09n" | "10n" | "11n" => Self::Storm,
            _ => Self::Overcast,
        }
    }

    /// A single-glyph rendering for terminals.
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::ClearDay => "☀",
            Self::ClearNight => "☾",
            Self::Clouds => "☁",
            Self::Storm => "⛈",
            Self::Overcast => "☁",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> WeatherSnapshot {
        WeatherSnapshot {
            temperature_celsius: -3,
            condition: "light snow".to_string(),
            icon_id: "13n".to_string(),
            city_name: "Tromsø".to_string(),
        }
    }

    #[test]
    fn flattened_layout() {
        assert_eq!(snapshot().to_flattened(), "-3~~~light snow~~~13n~~~Tromsø");
    }

    #[test]
    fn parses_flattened() {
        let parsed = WeatherSnapshot::from_flattened("21~~~clear sky~~~01d~~~Lyon").unwrap();
        assert_eq!(parsed.temperature_celsius, 21);
        assert_eq!(parsed.city_name, "Lyon");
        assert_eq!(parsed.icon(), WeatherIcon::ClearDay);
        assert_eq!(
            WeatherSnapshot::from_flattened(&snapshot().to_flattened()).unwrap(),
            snapshot()
        );
    }

    #[test]
    fn rejects_wrong_field_count() {
        assert!(WeatherSnapshot::from_flattened("").is_err());
        assert!(WeatherSnapshot::from_flattened("21~~~clear sky~~~01d").is_err());
    }

    #[test]
    fn rejects_non_integer_temperature() {
        let err = WeatherSnapshot::from_flattened("warm~~~clear~~~01d~~~Lyon").unwrap_err();
        assert!(matches!(err, Error::Cache(CacheError::Corrupt { .. })));
    }

    #[test]
    fn icon_classification() {
        assert_eq!(WeatherIcon::from_icon_id("01n"), WeatherIcon::ClearNight);
        assert_eq!(WeatherIcon::from_icon_id("04d"), WeatherIcon::Clouds);
        assert_eq!(WeatherIcon::from_icon_id("10n"), WeatherIcon::Storm);
        assert_eq!(WeatherIcon::from_icon_id("50d"), WeatherIcon::Overcast);
    }
}
