use super::Error;

/// Error when a required input was missing when an operation needed it.
///
/// Returned, for example, when the reading loop is asked to read a database without any
/// schema names, or when a table name handed to a catalog query is empty.
#[derive(Debug)]
pub(super) struct InvalidArguments {
    message: Box<str>,
}

impl std::error::Error for InvalidArguments {}

impl core::fmt::Display for InvalidArguments {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid arguments: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid arguments error.
    pub fn invalid_arguments(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidArguments(InvalidArguments {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error, or any error it wraps, is an invalid arguments error.
    pub fn is_invalid_arguments(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::InvalidArguments(_)))
    }
}
