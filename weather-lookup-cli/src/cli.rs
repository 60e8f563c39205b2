use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use inquire::Password;
use weather_lookup_core::{
    Config, RecentSearchStore, SearchOutcome, SearchSession, provider::provider_from_config,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-lookup", version, about = "Current weather and 5-day forecast")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key.
    Configure,

    /// Show current weather and the daily forecast for a location.
    Search {
        /// City name, optionally with country code, e.g. "Paris,FR".
        location: String,
    },

    /// List recent searches.
    Recent,

    /// Search again for the N-th entry of the recent list (1 = oldest).
    Again {
        index: usize,
    },

    /// Forget all recent searches.
    Clear,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Search { location } => search(&location).await,
            Command::Recent => {
                let store = open_store(&Config::load()?)?;
                print!("{}", render::recent_list(&store.load()));
                Ok(())
            }
            Command::Again { index } => {
                let store = open_store(&Config::load()?)?;
                let recent = store.load();
                let Some(location) = index.checked_sub(1).and_then(|i| recent.get(i)) else {
                    bail!(
                        "No recent search #{index}. Run `weather-lookup recent` to list {} saved location(s).",
                        recent.len()
                    );
                };
                search(location).await
            }
            Command::Clear => {
                let store = open_store(&Config::load()?)?;
                store.clear()?;
                println!("Recent searches cleared.");
                Ok(())
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    if api_key.trim().is_empty() {
        bail!("API key must not be empty");
    }

    config.set_api_key(api_key.trim().to_string());
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn search(location: &str) -> anyhow::Result<()> {
    let config = Config::load()?;
    let provider = provider_from_config(&config)?;
    let store = open_store(&config)?;
    tracing::debug!(base_url = config.base_url(), history = %store.path().display(), "Opened session");
    let mut session = SearchSession::new(provider, store);

    let outcome = session.search(location).await;
    let state = session.snapshot();

    if let SearchOutcome::Applied { failures } = &outcome {
        for err in failures {
            eprintln!("{} unavailable: {}", capitalize(err.endpoint().as_str()), err.user_message());
        }
    }

    print!("{}", render::weather_state(&state));
    Ok(())
}

fn open_store(config: &Config) -> anyhow::Result<RecentSearchStore> {
    Ok(RecentSearchStore::in_dir(&config.history_dir()?))
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
