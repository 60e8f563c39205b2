//! Errors produced while talking to the remote weather API.

use std::fmt;

use thiserror::Error;

/// Which of the two remote endpoints a request went to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Current,
    Forecast,
}

impl Endpoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::Current => "current weather",
            Endpoint::Forecast => "forecast",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum FetchError {
    /// The endpoint answered with a non-2xx status.
    #[error("{endpoint} request failed with status {status} {status_text}")]
    Http {
        endpoint: Endpoint,
        status: u16,
        status_text: String,
    },

    /// The endpoint answered 2xx but the body did not match the expected schema.
    #[error("{endpoint} response was malformed: {reason}")]
    MalformedResponse { endpoint: Endpoint, reason: String },

    #[error("failed to reach {endpoint} endpoint: {source}")]
    Network {
        endpoint: Endpoint,
        #[source]
        source: reqwest::Error,
    },
}

impl FetchError {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            Self::Http { endpoint, .. }
            | Self::MalformedResponse { endpoint, .. }
            | Self::Network { endpoint, .. } => *endpoint,
        }
    }

    /// Short message suitable for showing in place of a missing card.
    pub fn user_message(&self) -> String {
        match self {
            Self::Http { status: 404, .. } => "Location not found".to_string(),
            Self::Http { status: 401, .. } => {
                "API key rejected. Run `weather-lookup configure` to update it.".to_string()
            }
            Self::Http { status_text, .. } => format!("Weather service error: {status_text}"),
            Self::MalformedResponse { .. } => {
                "Weather service returned unexpected data".to_string()
            }
            Self::Network { .. } => "Network error. Check your connection.".to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Http { status: 404, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_display_carries_status_text() {
        let err = FetchError::Http {
            endpoint: Endpoint::Forecast,
            status: 404,
            status_text: "Not Found".into(),
        };

        assert_eq!(err.to_string(), "forecast request failed with status 404 Not Found");
        assert_eq!(err.endpoint(), Endpoint::Forecast);
        assert!(err.is_not_found());
    }

    #[test]
    fn user_messages() {
        let err = FetchError::Http {
            endpoint: Endpoint::Current,
            status: 401,
            status_text: "Unauthorized".into(),
        };
        assert!(err.user_message().contains("configure"));

        let err = FetchError::Http {
            endpoint: Endpoint::Current,
            status: 503,
            status_text: "Service Unavailable".into(),
        };
        assert!(err.user_message().contains("Service Unavailable"));

        let err = FetchError::MalformedResponse {
            endpoint: Endpoint::Current,
            reason: "no weather entries".into(),
        };
        assert!(!err.is_not_found());
        assert!(err.user_message().contains("unexpected"));
    }
}
