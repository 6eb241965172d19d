use reqwest::StatusCode;

/// Why a single city could not be turned into a [`crate::WeatherRecord`].
///
/// Every variant is recoverable: the orchestrator logs it and moves on to the
/// next city.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Failed to reach weather API for {city}: {source}")]
    Transport {
        city: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to fetch data for {city}. Error: {}", .message.as_deref().unwrap_or("None"))]
    Api {
        city: String,
        status: StatusCode,
        message: Option<String>,
    },

    #[error("Malformed weather response for {city}: {reason}")]
    Malformed { city: String, reason: String },
}

impl FetchError {
    pub fn city(&self) -> &str {
        match self {
            FetchError::Transport { city, .. }
            | FetchError::Api { city, .. }
            | FetchError::Malformed { city, .. } => city,
        }
    }

    /// HTTP status of a non-200 reply; `None` when no usable reply arrived.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            FetchError::Api { status, .. } => Some(*status),
            FetchError::Transport { .. } | FetchError::Malformed { .. } => None,
        }
    }

    pub(crate) fn malformed(city: &str, reason: impl Into<String>) -> Self {
        FetchError::Malformed {
            city: city.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_mentions_city_and_message() {
        let err = FetchError::Api {
            city: "BadCity".into(),
            status: StatusCode::NOT_FOUND,
            message: Some("city not found".into()),
        };

        let msg = err.to_string();
        assert_eq!(msg, "Failed to fetch data for BadCity. Error: city not found");
        assert_eq!(err.city(), "BadCity");
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    }

    #[test]
    fn api_error_without_message_prints_none() {
        let err = FetchError::Api {
            city: "Nowhere".into(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: None,
        };

        assert!(err.to_string().ends_with("Error: None"));
    }

    #[test]
    fn malformed_error_carries_reason() {
        let err = FetchError::malformed("Lima", "missing field `main`");
        assert_eq!(err.status(), None);
        assert!(err.to_string().contains("Lima"));
        assert!(err.to_string().contains("missing field `main`"));
    }
}
