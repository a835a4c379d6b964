use thiserror::Error;

#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("Book error: {0}")]
    Book(#[from] agora_book::BookError),

    #[error("Analytics error: {0}")]
    Analytics(#[from] agora_analytics::AnalyticsError),
}

pub type Result<T> = std::result::Result<T, RunnerError>;
