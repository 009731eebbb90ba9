//! Header bar state.

use serde::{Deserialize, Serialize};

use super::WeatherSnapshot;

/// What the header bar shows.
///
/// Back navigation and weather are independent: a detail screen has a back
/// affordance, the list screen may carry weather, and either may be absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderState {
    pub title: String,
    pub back: bool,
    pub weather: Option<WeatherSnapshot>,
}

impl HeaderState {
    pub fn title_only(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            back: false,
            weather: None,
        }
    }

    pub fn with_back(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            back: true,
            weather: None,
        }
    }

    pub fn with_weather(title: impl Into<String>, weather: WeatherSnapshot) -> Self {
        Self {
            title: title.into(),
            back: false,
            weather: Some(weather),
        }
    }

    pub fn has_weather(&self) -> bool {
        self.weather.is_some()
    }
}
