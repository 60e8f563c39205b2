use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    config::DEFAULT_BASE_URL,
    error::{Endpoint, FetchError},
    model::{CurrentWeather, ForecastEntry, celsius_to_fahrenheit},
};

use super::WeatherProvider;

const CURRENT_PATH: &str = "/data/2.5/weather";
const FORECAST_PATH: &str = "/data/2.5/forecast";

/// `dt_txt` suffix of the 3-hourly sample taken at local noon.
pub const NOON_MARKER: &str = "12:00:00";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            api_key,
            base_url,
            http: Client::new(),
        }
    }

    /// Units are always metric on the wire; callers convert.
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        path: &str,
        location: &str,
    ) -> Result<T, FetchError> {
        let url = format!("{}{}", self.base_url, path);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", location),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(|source| FetchError::Network { endpoint, source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| FetchError::Network { endpoint, source })?;

        if !status.is_success() {
            tracing::debug!(
                %endpoint,
                status = status.as_u16(),
                body = %truncate_body(&body),
                "OpenWeather returned an error response"
            );
            return Err(FetchError::Http {
                endpoint,
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("Unknown Status").to_string(),
            });
        }

        serde_json::from_str(&body).map_err(|e| FetchError::MalformedResponse {
            endpoint,
            reason: e.to_string(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwTemp {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: i64,
    sys: OwSys,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    dt_txt: String,
    main: OwTemp,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

impl OwCurrentResponse {
    fn into_current(self) -> Result<CurrentWeather, FetchError> {
        let weather = self
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| malformed(Endpoint::Current, "response contained no weather entries"))?;

        Ok(CurrentWeather {
            location: format!("{}, {}", self.name, self.sys.country),
            description: weather.description,
            temperature_f: celsius_to_fahrenheit(self.main.temp),
            humidity_pct: self.main.humidity,
            wind_speed: self.wind.speed,
            observed_at: self.dt,
        })
    }
}

impl OwForecastEntry {
    fn into_entry(self) -> Result<ForecastEntry, FetchError> {
        let weather = self.weather.into_iter().next().ok_or_else(|| {
            malformed(
                Endpoint::Forecast,
                format!("entry at {} contained no weather entries", self.dt_txt),
            )
        })?;

        Ok(ForecastEntry {
            at: self.dt,
            icon_code: weather.icon,
            temperature_f: celsius_to_fahrenheit(self.main.temp),
        })
    }
}

/// Keep one sample per day: the one whose `dt_txt` marks local noon.
fn daily_noon_entries(list: Vec<OwForecastEntry>) -> impl Iterator<Item = OwForecastEntry> {
    list.into_iter().filter(|e| e.dt_txt.contains(NOON_MARKER))
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self, location: &str) -> Result<CurrentWeather, FetchError> {
        let parsed: OwCurrentResponse =
            self.get_json(Endpoint::Current, CURRENT_PATH, location).await?;
        parsed.into_current()
    }

    async fn forecast(&self, location: &str) -> Result<Vec<ForecastEntry>, FetchError> {
        let parsed: OwForecastResponse =
            self.get_json(Endpoint::Forecast, FORECAST_PATH, location).await?;

        let total = parsed.list.len();
        let daily = daily_noon_entries(parsed.list)
            .map(OwForecastEntry::into_entry)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(location, total, daily = daily.len(), "Normalized forecast");
        Ok(daily)
    }
}

fn malformed(endpoint: Endpoint, reason: impl Into<String>) -> FetchError {
    FetchError::MalformedResponse { endpoint, reason: reason.into() }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
