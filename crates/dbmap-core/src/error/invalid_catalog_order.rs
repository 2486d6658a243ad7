use super::Error;

/// Error when catalog rows for one group are not contiguous.
///
/// The row grouper relies on the catalog query's `ORDER BY` to keep all rows of an index or
/// foreign key together. A key that shows up again after its group was closed means the
/// query broke that contract.
#[derive(Debug)]
pub(super) struct InvalidCatalogOrder {
    key: Box<str>,
}

impl std::error::Error for InvalidCatalogOrder {}

impl core::fmt::Display for InvalidCatalogOrder {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "catalog rows are not grouped: `{}` appears again after its group was closed",
            self.key
        )
    }
}

impl Error {
    pub fn invalid_catalog_order(key: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidCatalogOrder(InvalidCatalogOrder {
            key: key.into().into(),
        }))
    }

    pub fn is_invalid_catalog_order(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::InvalidCatalogOrder(_)))
    }
}
