//! Error types for deck_buyer

use std::path::PathBuf;
use thiserror::Error;

/// Unified error type for deck_buyer operations
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP error status code
    #[error("HTTP error: {0}")]
    HttpStatus(reqwest::StatusCode),
    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Failed to parse JSON (config file)
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// Failed to read a listing CSV
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// Deck file missing or unreadable
    #[error("Error loading deck {}: {source}", .path.display())]
    DeckRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Deck file contained no usable card lines
    #[error("Error loading deck {}: no cards found", .0.display())]
    EmptyDeck(PathBuf),
    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result alias for deck_buyer operations
pub type Result<T> = std::result::Result<T, Error>;
