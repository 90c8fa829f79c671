//! Error types for the task store.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Task cannot be empty!")]
    EmptyDescription,

    #[error("No tasks available.")]
    EmptyList,

    #[error("Task {index} does not exist (list has {len} tasks)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize tasks: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;

impl StoreError {
    /// Validation failures are reported to the user and the session goes on.
    /// Everything else is a filesystem problem the caller should treat as fatal.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyDescription | Self::EmptyList | Self::IndexOutOfRange { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreError::IndexOutOfRange { index: 4, len: 3 };
        assert_eq!(err.to_string(), "Task 4 does not exist (list has 3 tasks)");

        let err = StoreError::Write {
            path: PathBuf::from("tasks.json"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "failed to write tasks.json: denied");
    }

    #[test]
    fn test_validation_classification() {
        assert!(StoreError::EmptyDescription.is_validation());
        assert!(StoreError::EmptyList.is_validation());
        assert!(StoreError::IndexOutOfRange { index: 0, len: 0 }.is_validation());

        let err = StoreError::Read {
            path: PathBuf::from("tasks.json"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(!err.is_validation());
    }
}
