//! Error type for building emails.

use mailtpl_config::ConfigError;
use mailtpl_renderer::BlockError;

/// Builder error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A block's required fields are missing, empty or inconsistent.
    #[error(transparent)]
    InvalidBlockData(#[from] BlockError),
    /// A configuration value violates its documented constraint.
    #[error(transparent)]
    InvalidConfiguration(#[from] ConfigError),
    /// The builder was already used to build an email.
    #[error("cannot {operation}: email has already been built")]
    DocumentAlreadyBuilt {
        /// Rejected operation (e.g. "append button block").
        operation: String,
    },
}

/// Result type for builder operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_built_message() {
        let err = Error::DocumentAlreadyBuilt {
            operation: "build".to_owned(),
        };
        assert_eq!(err.to_string(), "cannot build: email has already been built");
    }
}
