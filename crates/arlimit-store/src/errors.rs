//! Error helpers for arlimit-store
//!
//! Builds `LimitError` values with consistent path and operation context.

use arlimit_core::errors::LimitError;
use std::fmt::Display;
use std::io;
use std::path::Path;

/// Create a missing file error
pub fn missing_file(path: &Path) -> LimitError {
    LimitError::MissingFile {
        path: path.display().to_string(),
    }
}

/// Create a parse error
pub fn parse_error(path: &Path, reason: impl Display) -> LimitError {
    LimitError::Parse {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

/// Create a persist error
pub fn persist_error(path: &Path, reason: impl Display) -> LimitError {
    LimitError::Persist {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

/// Map a read failure, distinguishing an absent file from other IO errors
pub fn read_error(operation: &str, path: &Path, err: io::Error) -> LimitError {
    if err.kind() == io::ErrorKind::NotFound {
        missing_file(path)
    } else {
        LimitError::Io {
            operation: operation.to_string(),
            reason: format!("{}: {}", path.display(), err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_error_not_found_is_missing_file() {
        let err = read_error(
            "read_registry",
            Path::new("ar.conf"),
            io::Error::from(io::ErrorKind::NotFound),
        );
        assert_eq!(
            err,
            LimitError::MissingFile {
                path: "ar.conf".to_string()
            }
        );
    }

    #[test]
    fn test_read_error_other_kinds_are_io() {
        let err = read_error(
            "read_registry",
            Path::new("ar.conf"),
            io::Error::from(io::ErrorKind::PermissionDenied),
        );
        assert!(matches!(err, LimitError::Io { ref operation, .. } if operation == "read_registry"));
    }
}
