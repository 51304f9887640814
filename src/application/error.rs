use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Category must not be empty")]
    EmptyCategory,

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}
