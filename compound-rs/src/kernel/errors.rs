use thiserror::Error;

/// Validation errors raised at kernel construction or configuration time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required input or configuration field is empty.
    #[error("Input `{arg}` was empty.")]
    EmptyInput {
        /// Name of the argument that is empty.
        arg: &'static str,
    },
    /// A required field was absent from the stream metadata.
    #[error("Required field `{arg}` is missing.")]
    MissingField {
        /// Name of the missing field.
        arg: &'static str,
    },
    /// A configuration argument value is invalid.
    #[error("Invalid argument `{arg}`: {reason}")]
    InvalidArgument {
        /// Name of the argument.
        arg: &'static str,
        /// Human readable reason.
        reason: &'static str,
    },
    /// Failure reported by a core array helper.
    #[error(transparent)]
    Core(#[from] compound_rs_core::Error),
}

/// Runtime execution invariant violations for checked kernel entrypoints.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecInvariantViolation {
    /// The kernel was run before it was configured.
    #[error("Execution invariant violation: kernel was not configured.")]
    NotConfigured,
    /// Input length along the transformed axis mismatched the configured geometry.
    #[error("Shape mismatch on `{arg}`. Expected last axis of length {expected}, got {got}.")]
    ShapeMismatch {
        /// Name of the argument.
        arg: &'static str,
        /// Required length.
        expected: usize,
        /// Received length.
        got: usize,
    },
    /// Caller-provided output did not match the input shape.
    #[error("Output shape mismatch. Expected {expected:?}, got {got:?}.")]
    OutputShapeMismatch {
        /// Required shape.
        expected: Vec<usize>,
        /// Received shape.
        got: Vec<usize>,
    },
    /// An execution precondition was violated.
    #[error("Execution invariant violation: {reason}")]
    InvalidState {
        /// Human readable reason.
        reason: &'static str,
    },
}
