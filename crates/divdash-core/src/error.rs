use thiserror::Error;

/// Validation errors for user-entered dashboard input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("ticker cannot be empty")]
    EmptyTicker,
    #[error("quantity must be a positive integer: '{value}'")]
    InvalidQuantity { value: String },

    #[error("field '{field}' must be a number: '{value}'")]
    NotANumber { field: &'static str, value: String },
    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be positive")]
    NonPositiveValue { field: &'static str },

    #[error("portfolio index {index} is out of range for {len} entries")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Errors raised while turning exchange payloads into display records.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("payload is missing the '{table}' table")]
    MissingTable { table: &'static str },
    #[error("'{table}.data' must be an array of rows")]
    MalformedTable { table: &'static str },
}

/// Top-level error type for core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    #[error(transparent)]
    Store(#[from] crate::store::StoreError),
}
