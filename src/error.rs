//! Error types for the FPL agent

use thiserror::Error;


pub type Result<T> = std::result::Result<T, FplError>;

#[derive(Error, Debug)]
pub enum FplError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to parse identifier: {0}")]
    InvalidId(#[from] std::num::ParseIntError),

    #[error("FPL API rate limited the request to {url}")]
    RateLimited { url: String },

    #[error("FPL API returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Request to {url} failed after {attempts} attempt(s): {source}")]
    RetriesExhausted {
        url: String,
        attempts: u32,
        #[source]
        source: Box<FplError>,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Team ID not provided and {env_var} environment variable not set")]
    MissingTeamId { env_var: String },

    #[error("Unknown tool: {name}")]
    UnknownTool { name: String },
}

impl FplError {
    /// Whether the access layer should try the request again.
    pub fn is_retryable(&self) -> bool {
        match self {
            FplError::Http(_)
            | FplError::Json(_)
            | FplError::RateLimited { .. }
            | FplError::Status { .. } => true,
            FplError::Io(_)
            | FplError::Toml(_)
            | FplError::InvalidId(_)
            | FplError::RetriesExhausted { .. }
            | FplError::Config { .. }
            | FplError::MissingTeamId { .. }
            | FplError::UnknownTool { .. } => false,
        }
    }
}
