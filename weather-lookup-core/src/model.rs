use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::FetchError;

/// Base URL of the icon CDN used for forecast day cards.
pub const ICON_BASE_URL: &str = "http://openweathermap.org/img/wn";

/// Current conditions at a location.
///
/// Temperatures are requested from the API in metric units and converted here;
/// `temperature_f` is derived from Celsius, never requested in Fahrenheit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    /// Display form, "City, CountryCode".
    pub location: String,
    pub description: String,
    pub temperature_f: f64,
    pub humidity_pct: u8,
    pub wind_speed: f64,
    pub observed_at: i64,
}

impl CurrentWeather {
    pub fn observed_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.observed_at, 0)
    }
}

/// One daily point of the forecast (the local-noon sample of that day).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub at: i64,
    pub icon_code: String,
    pub temperature_f: f64,
}

impl ForecastEntry {
    pub fn at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.at, 0)
    }

    pub fn icon_url(&self) -> String {
        format!("{ICON_BASE_URL}/{}.png", self.icon_code)
    }
}

/// Result of one lookup. The two halves are fetched independently, so either
/// may fail without affecting the other.
#[derive(Debug)]
pub struct WeatherLookup {
    pub current: Result<CurrentWeather, FetchError>,
    pub forecast: Result<Vec<ForecastEntry>, FetchError>,
}

impl WeatherLookup {
    pub fn is_complete(&self) -> bool {
        self.current.is_ok() && self.forecast.is_ok()
    }
}

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}
