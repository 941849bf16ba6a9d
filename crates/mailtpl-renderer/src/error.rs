//! Error types for block validation and value parsing.

/// A block's data is missing, empty or inconsistent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {block} block: {field} {reason}")]
pub struct BlockError {
    /// Block kind (e.g. "table").
    pub block: &'static str,
    /// Offending field (e.g. "`item_row`").
    pub field: &'static str,
    /// What is wrong with the value.
    pub reason: String,
}

impl BlockError {
    #[must_use]
    pub fn new(block: &'static str, field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            block,
            field,
            reason: reason.into(),
        }
    }
}

/// Error parsing an [`Amount`](crate::Amount) from a string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ParseAmountError {
    /// Input is not a plain decimal number.
    #[error("invalid decimal number `{0}`")]
    Invalid(String),
    /// Input does not fit into the supported range.
    #[error("decimal number `{0}` is out of range")]
    OutOfRange(String),
}
