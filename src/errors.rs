use thiserror::Error;

#[derive(Error, Debug)]
pub enum SelectionError {
    #[error("at most {max} reference files are allowed")] TooManyReferences { max: usize },
    #[error("cannot read upload {path}: {source}")] Upload { path: String, source: std::io::Error },
    #[error("unsupported selection file: {0}")] Format(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")] Read { path: String, source: std::io::Error },
    #[error("invalid config {path}: {message}")] Parse { path: String, message: String },
}

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("no endpoint configured for submission")] MissingEndpoint,
    #[error("backend rejected the request ({status}): {body}")] Status { status: u16, body: String },
    #[error("cannot encode instructions: {0}")] Encode(#[from] serde_json::Error),
    #[error("transport error: {0}")] Transport(#[from] reqwest::Error),
}
