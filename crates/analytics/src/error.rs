use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AnalyticsError {
    #[error("Invalid trade: {0}")]
    InvalidTrade(String),
}

pub type Result<T> = std::result::Result<T, AnalyticsError>;
