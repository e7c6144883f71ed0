use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to load configuration")]
    Load(#[from] config::ConfigError),
}

pub type Result<A> = std::result::Result<A, ConfigError>;
