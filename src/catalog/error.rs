use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("data file not found: {0}")]
    FileNotFound(String),
    #[error("data file read error: {0}")]
    FileRead(#[from] std::io::Error),
    #[error("invalid table in {file}: {message}")]
    InvalidTable { file: String, message: String },
}
