use super::Error;

/// Error when a catalog query fails or one of its rows cannot be decoded.
///
/// Wraps the error reported by the underlying driver library (tokio-postgres,
/// mysql_async, rusqlite). The reading loop adds the schema and table in scope as context.
#[derive(Debug)]
pub(super) struct QueryFailure {
    pub(super) inner: Box<dyn std::error::Error + Send + Sync>,
}

impl std::error::Error for QueryFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.inner.as_ref())
    }
}

impl core::fmt::Display for QueryFailure {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("query failed: ")?;
        core::fmt::Display::fmt(&self.inner, f)?;
        let mut source = self.inner.source();
        while let Some(err) = source {
            write!(f, ": {}", err)?;
            source = err.source();
        }
        Ok(())
    }
}

impl Error {
    /// Creates an error from a failed catalog query.
    ///
    /// This is the preferred way to convert driver-specific errors into dbmap errors once a
    /// connection has been established.
    pub fn query_failure(err: impl std::error::Error + Send + Sync + 'static) -> Error {
        Error::from(super::ErrorKind::QueryFailure(QueryFailure {
            inner: Box::new(err),
        }))
    }

    /// Returns `true` if this error, or any error it wraps, is a query failure.
    pub fn is_query_failure(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::QueryFailure(_)))
    }
}
