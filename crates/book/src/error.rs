use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum BookError {
    #[error("Invalid book configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, BookError>;
