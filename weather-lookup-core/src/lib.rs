//! Core library for the `weather-lookup` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather client and forecast normalization
//! - The persisted recent-searches list
//! - The search session that ties them together
//!
//! It is used by `weather-lookup-cli`, but can also be reused by other front ends.

pub mod config;
pub mod error;
pub mod history;
pub mod model;
pub mod provider;
pub mod session;

pub use config::Config;
pub use error::{Endpoint, FetchError};
pub use history::{MAX_RECENT_SEARCHES, RecentSearchStore};
pub use model::{CurrentWeather, ForecastEntry, WeatherLookup};
pub use provider::{WeatherProvider, fetch_weather, openweather::OpenWeatherProvider};
pub use session::{SearchOutcome, SearchSession, SearchTicket, WeatherState};
