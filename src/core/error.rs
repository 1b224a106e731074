//! Error types for Gamma Levels

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GexError {
    #[error("Missing price: {0}")]
    MissingPrice(String),

    #[error("Malformed contract: {0}")]
    MalformedContract(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Data error: {0}")]
    Data(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type GexResult<T> = Result<T, GexError>;

impl GexError {
    pub fn missing_price(msg: impl Into<String>) -> Self {
        Self::MissingPrice(msg.into())
    }

    pub fn malformed_contract(msg: impl Into<String>) -> Self {
        Self::MalformedContract(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data(msg.into())
    }
}
