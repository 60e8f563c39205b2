use crate::{
    Config,
    error::FetchError,
    model::{CurrentWeather, ForecastEntry, WeatherLookup},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// A source of current conditions and daily forecasts for a free-text location.
///
/// Implementations make one request per call: no retries, no caching.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current(&self, location: &str) -> Result<CurrentWeather, FetchError>;

    async fn forecast(&self, location: &str) -> Result<Vec<ForecastEntry>, FetchError>;
}

/// Fetch both halves of a lookup. Current conditions are requested first; a
/// failure there does not stop the forecast request.
pub async fn fetch_weather(provider: &dyn WeatherProvider, location: &str) -> WeatherLookup {
    let current = provider.current(location).await;
    if let Err(err) = &current {
        tracing::warn!(location, error = %err, "Error fetching weather data");
    }

    let forecast = provider.forecast(location).await;
    if let Err(err) = &forecast {
        tracing::warn!(location, error = %err, "Error fetching forecast data");
    }

    WeatherLookup { current, forecast }
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.require_api_key()?;
    Ok(Box::new(OpenWeatherProvider::with_base_url(api_key.to_owned(), config.base_url())))
}
