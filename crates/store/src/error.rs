use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Missing environment variable {0}")]
    MissingEnv(&'static str),

    #[error("Cannot read boundary file {path}: {source}")]
    BoundaryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid boundary file {path}: {source}")]
    BoundaryParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
