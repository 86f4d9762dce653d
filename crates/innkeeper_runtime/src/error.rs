//! Runtime error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Llm(#[from] innkeeper_llms::Error),

    #[error("Provider not found: {0}")]
    ProviderNotFound(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Question is empty")]
    EmptyQuestion,

    #[error("Export failed: {0}")]
    Export(#[from] innkeeper_core::InnkeeperError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
