//! Error types for the dt command-line tool

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("API error: {0}")]
    Api(#[from] dt_api::DtApiError),

    #[error("Gaussian process error: {0}")]
    Gp(#[from] dt_gp::GpError),

    #[error("No temperature readings for {0}")]
    NoTemperatureData(String),
}

pub type Result<T> = std::result::Result<T, CliError>;
