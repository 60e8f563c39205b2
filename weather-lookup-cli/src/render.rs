//! Plain-text cards for the terminal.

use chrono::{DateTime, Datelike, Local, NaiveDate, Utc};
use weather_lookup_core::{CurrentWeather, ForecastEntry, WeatherState};

pub fn weather_state(state: &WeatherState) -> String {
    let mut out = String::new();
    if let Some(current) = &state.current {
        out.push_str(&current_card(current));
    }
    if !state.forecast.is_empty() {
        out.push('\n');
        out.push_str(&forecast_cards(&state.forecast));
    }
    out
}

pub fn current_card(current: &CurrentWeather) -> String {
    let mut lines = vec![current.location.clone()];
    if let Some(at) = current.observed_at_utc() {
        lines.push(format!("  {}", at.with_timezone(&Local).format("%a, %b %-d %H:%M")));
    }
    lines.push(format!("  {}", current.description));
    lines.push(format!("  Temperature: {} °F", fahrenheit(current.temperature_f)));
    lines.push(format!("  Humidity:    {}%", current.humidity_pct));
    lines.push(format!("  Wind:        {} m/s", current.wind_speed));

    lines.iter().map(|line| format!("{line}\n")).collect()
}

pub fn forecast_cards(forecast: &[ForecastEntry]) -> String {
    forecast
        .iter()
        .map(|entry| {
            let label = entry
                .at_utc()
                .map(|at| day_label(local_date(at)))
                .unwrap_or_else(|| "?".to_string());
            format!(
                "{label:<10} {:>4} °F  {}\n",
                fahrenheit(entry.temperature_f),
                entry.icon_url()
            )
        })
        .collect()
}

pub fn recent_list(recent: &[String]) -> String {
    if recent.is_empty() {
        return "No recent searches.\n".to_string();
    }
    recent
        .iter()
        .enumerate()
        .map(|(i, location)| format!("{:>2}. {location}\n", i + 1))
        .collect()
}

/// `Oct 18th` style label.
pub fn day_label(date: NaiveDate) -> String {
    let day = date.day();
    let suffix = match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{} {day}{suffix}", date.format("%b"))
}

fn local_date(at: DateTime<Utc>) -> NaiveDate {
    at.with_timezone(&Local).date_naive()
}

fn fahrenheit(temp: f64) -> i64 {
    temp.round() as i64
}
