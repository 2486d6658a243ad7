use super::Error;

/// Error when a table's foreign relations cannot be turned into fields.
///
/// This occurs when:
/// - two relations on the same table share a local column
/// - a relation references a local column the table does not have (for example because the
///   column was excluded in the configuration)
#[derive(Debug)]
pub(super) struct InvalidRelation {
    message: Box<str>,
}

impl std::error::Error for InvalidRelation {}

impl core::fmt::Display for InvalidRelation {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid relation: {}", self.message)
    }
}

impl Error {
    pub fn invalid_relation(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidRelation(InvalidRelation {
            message: message.into().into(),
        }))
    }

    pub fn is_invalid_relation(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::InvalidRelation(_)))
    }
}
