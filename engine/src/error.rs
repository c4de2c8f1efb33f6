use shared::models::SelectionError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid selection: {source}")]
    InvalidSelection {
        #[from]
        source: SelectionError,
    },

    #[error("CSV parsing system error: {source}")]
    CsvSystemError {
        #[from]
        source: csv::Error,
    },

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("CSV data format error: {0}")]
    CsvDataFormatError(String),

    #[error("Market data store error: {0}")]
    MarketDataError(String),

    #[error("Serialization error: {source}")]
    SerializationError {
        #[from]
        source: serde_json::Error,
    },
}

impl EngineError {
    /// Errors the caller can fix by changing the selection or the settings file,
    /// as opposed to failures of the row source or the output.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            EngineError::ConfigError(_) | EngineError::InvalidSelection { .. }
        )
    }
}

pub type Result<T, E = EngineError> = std::result::Result<T, E>;
