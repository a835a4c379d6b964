use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum StrategyError {
    #[error("Fill would move position to {attempted}, beyond limit {limit}")]
    PositionLimitExceeded { attempted: Decimal, limit: Decimal },
}

pub type Result<T> = std::result::Result<T, StrategyError>;
