//! Artifact persistence errors.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to read a model artifact.
#[derive(Debug, Error)]
pub enum ArtifactLoadError {
    #[error("Cannot read artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt artifact {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Incompatible artifact format version {found} (supported: {expected})")]
    IncompatibleVersion { found: u32, expected: u32 },

    #[error("Artifact feature schema does not match this build (artifact: {found:?}, expected: {expected:?})")]
    SchemaMismatch {
        found: Vec<String>,
        expected: Vec<String>,
    },
}

/// Failure to write a model artifact.
#[derive(Debug, Error)]
pub enum ArtifactSaveError {
    #[error("Cannot write artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot serialize artifact: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incompatible_version_display() {
        let error = ArtifactLoadError::IncompatibleVersion {
            found: 2,
            expected: 1,
        };
        assert_eq!(
            error.to_string(),
            "Incompatible artifact format version 2 (supported: 1)"
        );
    }

    #[test]
    fn test_io_error_keeps_path_and_source() {
        let error = ArtifactLoadError::Io {
            path: PathBuf::from("artifacts/missing.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(error.to_string().contains("artifacts/missing.json"));
        assert!(std::error::Error::source(&error).is_some());
    }
}
