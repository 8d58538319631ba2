use thiserror::Error as ThisError;

/// Errors raised by the core array helpers.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum Error {
    /// Argument passed into a function was invalid.
    #[error("Invalid argument `{arg}`: {reason}")]
    InvalidArg {
        /// The invalid arg
        arg: String,
        /// Explaining why arg is invalid.
        reason: String,
    },
}

impl Error {
    pub(crate) fn invalid_arg(arg: &str, reason: &str) -> Self {
        Error::InvalidArg {
            arg: arg.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Result type for the core helpers.
pub type Result<T> = core::result::Result<T, Error>;
