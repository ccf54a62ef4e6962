use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, PartialEq)]
pub enum Error {
    /// A text field could not be turned into a usable number.
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    /// Sheet or piece dimensions that are not finite and positive.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// The search was stopped through its cancel token.
    #[error("search cancelled")]
    Cancelled,

    /// The search ran past its time limit, in milliseconds.
    #[error("search exceeded time limit of {0}ms")]
    Timeout(u64),
}
