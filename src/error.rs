//! Lookup failures and the messages shown for them.

use thiserror::Error;

/// Why a city lookup produced no display.
#[derive(Debug, Error)]
pub enum LookupError {
    /// Provider answered with a non-"200" code for the current-conditions query.
    #[error("city not found: {city} ({message})")]
    CityNotFound { city: String, message: String },

    /// Timeout, DNS, refused connection, or an HTTP error status.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// Body did not have the expected shape.
    #[error("malformed {what} response: {source}")]
    Parse {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Provider answered, but not with usable data.
    #[error("unexpected {what} response: {message}")]
    Provider { what: &'static str, message: String },

    #[error("rendering failed: {0}")]
    Render(#[from] tera::Error),

    /// HTTP client could not be built.
    #[error("http client: {0}")]
    Client(String),
}

impl LookupError {
    pub fn parse(what: &'static str, source: serde_json::Error) -> Self {
        Self::Parse { what, source }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::CityNotFound { .. })
    }

    /// Text shown to the user in place of the weather display.
    pub fn user_message(&self) -> String {
        match self {
            Self::CityNotFound { city, message } => {
                format!("City not found: {city} — API message: {message}")
            }
            other => format!("⚠️ Error fetching weather data.\n{}", chain_text(other)),
        }
    }
}

/// Raw error text including the source chain. A link is left out when the
/// one before it already ends with its text (`"{0}"` / `"...: {source}"`).
fn chain_text(err: &dyn std::error::Error) -> String {
    let mut out = err.to_string();
    let mut prev = out.clone();
    let mut cur = err.source();
    while let Some(e) = cur {
        let s = e.to_string();
        if !prev.ends_with(&s) {
            out.push_str(": ");
            out.push_str(&s);
        }
        prev = s;
        cur = e.source();
    }
    out
}
