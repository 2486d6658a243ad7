use super::Error;
use std::path::{Path, PathBuf};

/// Error when a generated file or one of its directories cannot be written.
#[derive(Debug)]
pub(super) struct OutputIo {
    path: PathBuf,
    inner: std::io::Error,
}

impl std::error::Error for OutputIo {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.inner)
    }
}

impl core::fmt::Display for OutputIo {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "failed to write {}: {}", self.path.display(), self.inner)
    }
}

impl Error {
    /// Creates an output error for `path`.
    pub fn output_io(path: impl AsRef<Path>, err: std::io::Error) -> Error {
        Error::from(super::ErrorKind::OutputIo(OutputIo {
            path: path.as_ref().to_path_buf(),
            inner: err,
        }))
    }

    /// Returns `true` if this error, or any error it wraps, is an output error.
    pub fn is_output_io(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::OutputIo(_)))
    }
}
