// Output artifact writer
// Owns the header file handle for a run; direct or temp-file-and-rename

use sha2::{Digest, Sha256};
use std::fs::{self, File, Permissions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

/// Errors that can occur while producing the output artifact
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Failed to open output {}: {source}", path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to move finished output into {}: {source}", path.display())]
    Persist { path: PathBuf, source: io::Error },
}

/// What was written, reported once the artifact is committed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactSummary {
    pub path: PathBuf,
    pub bytes: u64,
    pub sha256: String,
}

enum Sink {
    Direct(BufWriter<File>),
    Staged {
        file: BufWriter<NamedTempFile>,
        /// Mode of the header being replaced, restored before the rename
        keep: Option<Permissions>,
    },
}

/// Scoped write handle for the generated header
///
/// Dropping a direct writer without [`ArtifactWriter::commit`] leaves whatever
/// was appended so far at the final path. Dropping a staged writer removes the
/// temporary file and leaves the final path untouched.
pub struct ArtifactWriter {
    path: PathBuf,
    sink: Sink,
    hasher: Sha256,
    bytes: u64,
}

impl ArtifactWriter {
    /// Truncate (or create) `path` and write straight into it
    pub fn direct(path: &Path) -> Result<Self, ArtifactError> {
        let file = File::create(path).map_err(|source| ArtifactError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self::with_sink(path, Sink::Direct(BufWriter::new(file))))
    }

    /// Stage into a temporary file next to `path`; renamed over it on commit
    pub fn staged(path: &Path) -> Result<Self, ArtifactError> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let prefix = path
            .file_name()
            .map(|name| format!(".{}.", name.to_string_lossy()))
            .unwrap_or_else(|| ".artifact.".to_string());

        let mut builder = tempfile::Builder::new();
        builder.prefix(&prefix).suffix(".tmp");
        // Same creation mode as File::create, so umask applies instead of 0600
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            builder.permissions(Permissions::from_mode(0o666));
        }

        let tmp = builder
            .tempfile_in(dir)
            .map_err(|source| ArtifactError::Open {
                path: path.to_path_buf(),
                source,
            })?;
        let keep = fs::metadata(path).ok().map(|m| m.permissions());

        Ok(Self::with_sink(
            path,
            Sink::Staged {
                file: BufWriter::new(tmp),
                keep,
            },
        ))
    }

    /// Pick the writer matching the configured write mode
    pub fn create(path: &Path, atomic: bool) -> Result<Self, ArtifactError> {
        if atomic {
            Self::staged(path)
        } else {
            Self::direct(path)
        }
    }

    fn with_sink(path: &Path, sink: Sink) -> Self {
        ArtifactWriter {
            path: path.to_path_buf(),
            sink,
            hasher: Sha256::new(),
            bytes: 0,
        }
    }

    /// Append text to the artifact
    pub fn append(&mut self, text: &str) -> Result<(), ArtifactError> {
        let data = text.as_bytes();
        match &mut self.sink {
            Sink::Direct(w) => w.write_all(data)?,
            Sink::Staged { file, .. } => file.write_all(data)?,
        }
        self.hasher.update(data);
        self.bytes += data.len() as u64;
        Ok(())
    }

    /// Flush everything and make the artifact visible at its final path
    pub fn commit(self) -> Result<ArtifactSummary, ArtifactError> {
        match self.sink {
            Sink::Direct(mut w) => {
                w.flush()?;
            }
            Sink::Staged { file, keep } => {
                let tmp = file.into_inner().map_err(|e| e.into_error())?;
                if let Some(permissions) = keep {
                    tmp.as_file().set_permissions(permissions)?;
                }
                tmp.persist(&self.path).map_err(|e| ArtifactError::Persist {
                    path: self.path.clone(),
                    source: e.error,
                })?;
            }
        }

        Ok(ArtifactSummary {
            path: self.path,
            bytes: self.bytes,
            sha256: hex::encode(self.hasher.finalize()),
        })
    }
}

/// SHA-256 of a file on disk, hex encoded
pub fn file_sha256(path: &Path) -> Result<String, ArtifactError> {
    let data = std::fs::read(path)?;
    let mut hasher = Sha256::new();
    hasher.update(&data);
    Ok(hex::encode(hasher.finalize()))
}
