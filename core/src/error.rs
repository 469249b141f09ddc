//! Error types for the character service client.
//!
//! # Design
//! The `Display` string of every variant is the message a screen shows
//! inline, so screens convert errors with `to_string()` and nothing else.
//! Each client operation owns its failure wording: the listing reports the
//! service's own message, the single lookup always reads
//! `Character not found`, and the episode batch always reads
//! `Failed to fetch episodes`.

/// Errors returned by `RickMortyClient` parse methods and reported by hosts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The listing endpoint failed. `message` is the service's `error` field,
    /// or the HTTP status text when the body carried none.
    #[error("{message}")]
    Service { status: u16, message: String },

    /// Any non-success response to a single-character lookup.
    #[error("Character not found")]
    CharacterNotFound { status: u16 },

    /// Any non-success response to an episode batch lookup.
    #[error("Failed to fetch episodes")]
    EpisodesUnavailable { status: u16 },

    /// The host could not complete the round-trip at all.
    #[error("network error: {0}")]
    Transport(String),

    /// A success response whose body did not decode.
    #[error("deserialization failed: {0}")]
    Deserialization(String),
}

impl ApiError {
    /// HTTP status attached to the error, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Service { status, .. }
            | ApiError::CharacterNotFound { status }
            | ApiError::EpisodesUnavailable { status } => Some(*status),
            ApiError::Transport(_) | ApiError::Deserialization(_) => None,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Deserialization(e.to_string())
    }
}
