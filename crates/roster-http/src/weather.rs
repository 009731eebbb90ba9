//! OpenWeatherMap-backed weather source.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

use roster_core::Result;
use roster_core::error::ParseError;
use roster_core::traits::WeatherSource;
use roster_core::types::{Coordinates, CurrentConditions, ServiceUrl};

use crate::client::HttpClient;

/// Public OpenWeatherMap endpoint.
pub const DEFAULT_WEATHER_API: &str = "https://api.openweathermap.org";

const CURRENT_WEATHER: &str = "data/2.5/weather";
const REVERSE_GEOCODE: &str = "geo/1.0/reverse";

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    main: MainBlock,
    weather: Vec<ConditionBlock>,
}

#[derive(Debug, Deserialize)]
struct MainBlock {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct ConditionBlock {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct Place {
    name: String,
}

impl TryFrom<CurrentResponse> for CurrentConditions {
    type Error = roster_core::Error;

    fn try_from(response: CurrentResponse) -> Result<Self> {
        const WHAT: &str = "current weather";

        let temp = response.main.temp;
        if !temp.is_finite() || temp.abs() > f64::from(i32::MAX) {
            return Err(ParseError::InvalidValue {
                what: WHAT,
                field: "main.temp",
                value: temp.to_string(),
            }
            .into());
        }

        let condition = response
            .weather
            .into_iter()
            .next()
            .ok_or(ParseError::MissingField {
                what: WHAT,
                field: "weather[0]",
            })?;

        Ok(CurrentConditions {
            // Whole degrees, truncated toward zero.
            temperature_celsius: temp.trunc() as i32,
            condition: condition.description,
            icon_id: condition.icon,
        })
    }
}

/// A [`WeatherSource`] for an OpenWeatherMap-compatible API.
#[derive(Clone)]
pub struct OpenWeatherSource {
    client: HttpClient,
    base: ServiceUrl,
    api_key: String,
}

impl std::fmt::Debug for OpenWeatherSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherSource")
            .field("base", &self.base)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl OpenWeatherSource {
    pub fn new(client: HttpClient, base: ServiceUrl, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base,
            api_key: api_key.into(),
        }
    }

    fn location_query(&self, at: Coordinates) -> Vec<(&'static str, String)> {
        vec![
            ("lat", at.latitude().to_string()),
            ("lon", at.longitude().to_string()),
        ]
    }
}

#[async_trait]
impl WeatherSource for OpenWeatherSource {
    #[instrument(skip(self), fields(base = %self.base))]
    async fn current(&self, at: Coordinates) -> Result<CurrentConditions> {
        let mut query = self.location_query(at);
        query.push(("units", "metric".to_string()));
        query.push(("appid", self.api_key.clone()));

        let response: CurrentResponse = self
            .client
            .get_json(&self.base.endpoint(CURRENT_WEATHER), &query, "current weather")
            .await?;

        let conditions = CurrentConditions::try_from(response)?;
        debug!(
            temperature = conditions.temperature_celsius,
            icon = %conditions.icon_id,
            "Fetched current weather"
        );
        Ok(conditions)
    }

    #[instrument(skip(self), fields(base = %self.base))]
    async fn city_name(&self, at: Coordinates) -> Result<String> {
        let mut query = self.location_query(at);
        query.push(("limit", "1".to_string()));
        query.push(("appid", self.api_key.clone()));

        let places: Vec<Place> = self
            .client
            .get_json(&self.base.endpoint(REVERSE_GEOCODE), &query, "reverse geocode")
            .await?;

        let place = places.into_iter().next().ok_or(ParseError::MissingField {
            what: "reverse geocode",
            field: "[0].name",
        })?;

        debug!(city = %place.name, "Reverse geocoded");
        Ok(place.name)
    }
}
