//! Reading and writing artifact files.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use features_spi::FeatureSchema;
use serde::Deserialize;
use tracing::info;

use crate::error::{ArtifactLoadError, ArtifactSaveError};
use crate::model::{ModelArtifact, FORMAT_VERSION};

/// Fields checked before decoding the full bundle.
#[derive(Deserialize)]
struct ArtifactHeader {
    format_version: u32,
    schema: FeatureSchema,
}

impl ModelArtifact {
    /// Write the artifact as JSON, creating parent directories.
    ///
    /// The file is written next to the target and renamed into place, so a
    /// reader never sees a partial artifact.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ArtifactSaveError> {
        let path = path.as_ref();
        let io_err = |source| ArtifactSaveError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let staging = path.with_extension("json.partial");
        let written = self
            .write_json(&staging)
            .and_then(|()| fs::rename(&staging, path).map_err(io_err));
        if let Err(err) = written {
            // Best effort: the staging file may never have been created.
            let _ = fs::remove_file(&staging);
            return Err(err);
        }

        info!(path = %path.display(), "saved model artifact");
        Ok(())
    }

    fn write_json(&self, staging: &Path) -> Result<(), ArtifactSaveError> {
        let io_err = |source| ArtifactSaveError::Io {
            path: staging.to_path_buf(),
            source,
        };
        let file = fs::File::create(staging).map_err(io_err)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, self)?;
        writer.flush().map_err(io_err)
    }

    /// Read and verify an artifact file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ArtifactLoadError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| ArtifactLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let corrupt = |source| ArtifactLoadError::Corrupt {
            path: path.to_path_buf(),
            source,
        };

        let header: ArtifactHeader = serde_json::from_slice(&bytes).map_err(corrupt)?;
        if header.format_version != FORMAT_VERSION {
            return Err(ArtifactLoadError::IncompatibleVersion {
                found: header.format_version,
                expected: FORMAT_VERSION,
            });
        }
        let expected = FeatureSchema::current();
        if header.schema != expected {
            return Err(ArtifactLoadError::SchemaMismatch {
                found: header.schema.names,
                expected: expected.names,
            });
        }

        let artifact: ModelArtifact = serde_json::from_slice(&bytes).map_err(corrupt)?;
        info!(
            path = %path.display(),
            training_records = artifact.summary.training_records,
            trained_at = %artifact.summary.trained_at,
            "loaded model artifact"
        );
        Ok(artifact)
    }
}
