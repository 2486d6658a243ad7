use super::Error;

/// Error when the database cannot be reached.
///
/// Covers failures to build the connection pool, to open a connection and to ping the
/// server. Without a live connection nothing can be read, so this error ends the run.
#[derive(Debug)]
pub(super) struct ConnectionFailure {
    pub(super) inner: Box<dyn std::error::Error + Send + Sync>,
}

impl std::error::Error for ConnectionFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.inner.as_ref())
    }
}

impl core::fmt::Display for ConnectionFailure {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("connection failed: ")?;
        // Display the error and walk its source chain
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
    /// Creates an error from a failure to connect to, or ping, the database.
    pub fn connection_failure(err: impl std::error::Error + Send + Sync + 'static) -> Error {
        Error::from(super::ErrorKind::ConnectionFailure(ConnectionFailure {
            inner: Box::new(err),
        }))
    }

    /// Returns `true` if this error, or any error it wraps, is a connection failure.
    pub fn is_connection_failure(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::ConnectionFailure(_)))
    }
}
