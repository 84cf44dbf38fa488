use thiserror::Error;

/// The gateway call itself failed: network, credentials, quota or an unusable reply.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Missing API key: {env_var} environment variable is not set")]
    MissingApiKey { env_var: String },

    #[error("API request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
}

/// Model output could not be decoded into the expected shape.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("No JSON object found in model output")]
    NoJsonObject,

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Video analysis failed: {0}")]
    Gateway(#[from] GatewayError),
}

/// Failure of article, concept or notes generation.
#[derive(Error, Debug)]
pub enum StudioError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("Malformed model output: {0}")]
    Malformed(#[from] DecodeError),
}

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}
