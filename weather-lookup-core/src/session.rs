//! Search flow: owns the displayed state and applies lookups to it.

use serde::Serialize;

use crate::{
    error::FetchError,
    history::{RecentSearchStore, append_recent},
    model::{CurrentWeather, ForecastEntry, WeatherLookup},
    provider::{WeatherProvider, fetch_weather},
};

/// Everything the presentation layer renders.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WeatherState {
    pub current: Option<CurrentWeather>,
    pub forecast: Vec<ForecastEntry>,
    pub recent: Vec<String>,
}

/// Handle for one in-flight search. Only the most recently issued ticket may
/// update state; older ones are stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    seq: u64,
    location: String,
}

impl SearchTicket {
    pub fn location(&self) -> &str {
        &self.location
    }
}

#[derive(Debug)]
pub enum SearchOutcome {
    /// State was updated. `failures` lists the halves that could not be fetched.
    Applied { failures: Vec<FetchError> },
    /// A newer search was started before this one finished; result discarded.
    Stale,
}

impl SearchOutcome {
    pub fn is_stale(&self) -> bool {
        matches!(self, Self::Stale)
    }
}

#[derive(Debug)]
pub struct SearchSession {
    provider: Box<dyn WeatherProvider>,
    store: RecentSearchStore,
    state: WeatherState,
    issued: u64,
}

impl SearchSession {
    pub fn new(provider: Box<dyn WeatherProvider>, store: RecentSearchStore) -> Self {
        let recent = store.load();
        Self {
            provider,
            store,
            state: WeatherState { recent, ..WeatherState::default() },
            issued: 0,
        }
    }

    pub fn state(&self) -> &WeatherState {
        &self.state
    }

    pub fn snapshot(&self) -> WeatherState {
        self.state.clone()
    }

    pub fn recent(&self) -> &[String] {
        &self.state.recent
    }

    pub fn begin(&mut self, location: &str) -> SearchTicket {
        self.issued += 1;
        SearchTicket { seq: self.issued, location: location.to_string() }
    }

    pub fn complete(&mut self, ticket: SearchTicket, lookup: WeatherLookup) -> SearchOutcome {
        if ticket.seq != self.issued {
            tracing::debug!(
                location = %ticket.location,
                seq = ticket.seq,
                latest = self.issued,
                "Discarding stale search result"
            );
            return SearchOutcome::Stale;
        }

        let mut failures = Vec::new();

        match lookup.current {
            Ok(current) => {
                self.remember(&current.location);
                self.state.current = Some(current);
            }
            Err(err) => {
                self.state.current = None;
                failures.push(err);
            }
        }

        match lookup.forecast {
            Ok(forecast) => self.state.forecast = forecast,
            Err(err) => {
                self.state.forecast.clear();
                failures.push(err);
            }
        }

        SearchOutcome::Applied { failures }
    }

    pub async fn search(&mut self, location: &str) -> SearchOutcome {
        let ticket = self.begin(location);
        tracing::info!(location, "Searching");
        let lookup = fetch_weather(self.provider.as_ref(), location).await;
        self.complete(ticket, lookup)
    }

    pub fn clear_recent(&mut self) {
        self.state.recent = self.store.clear().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to clear persisted recent searches");
            Vec::new()
        });
    }

    /// Record `location` in the store. If the write fails, the in-memory list
    /// is still updated.
    fn remember(&mut self, location: &str) {
        match self.store.record(location, &self.state.recent) {
            Ok(updated) => self.state.recent = updated,
            Err(e) => {
                tracing::warn!(location, error = %e, "Failed to persist recent search");
                if let Some(updated) = append_recent(&self.state.recent, location) {
                    self.state.recent = updated;
                }
            }
        }
    }
}
