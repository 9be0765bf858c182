// Batch orchestration
// Drives load -> render -> append for every vocabulary entry, in order

use std::path::Path;
use thiserror::Error;

use super::artifact::{ArtifactError, ArtifactSummary, ArtifactWriter};
use super::config::BuildConfig;
use super::vocabulary::VocabularyEntry;
use crate::audio::{load_clip, AudioError, LoadOptions};
use crate::codegen::{render_declaration, symbol_name};

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Failed to encode '{identifier}': {source}")]
    Clip {
        identifier: String,
        source: AudioError,
    },

    #[error("Output error: {0}")]
    Artifact(#[from] ArtifactError),

    #[error("Batch already ran (state: {0:?})")]
    AlreadyFinished(RunState),
}

/// Lifecycle of a batch; `Done` and `Failed` are terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    NotStarted,
    Writing,
    Done,
    Failed,
}

/// Per-entry diagnostics collected during a run
#[derive(Debug, Clone, PartialEq)]
pub struct EntrySummary {
    pub identifier: String,
    pub symbol: String,
    pub sample_rate: u32,
    pub channels: u16,
    pub sample_count: usize,
    pub duration_secs: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BuildReport {
    pub entries: Vec<EntrySummary>,
    pub artifact: ArtifactSummary,
}

/// Load one entry's recording and render its declaration
pub fn encode_entry(
    input_dir: &Path,
    entry: &VocabularyEntry,
    options: &LoadOptions,
) -> Result<(String, EntrySummary), BuildError> {
    log::info!("Encoding {}", entry.identifier);

    let clip = load_clip(input_dir, &entry.identifier, options).map_err(|source| {
        BuildError::Clip {
            identifier: entry.identifier.clone(),
            source,
        }
    })?;

    log::info!("number of channels = {}", clip.channels);
    log::info!(
        "length = {:.3}s {}",
        clip.duration_secs(),
        clip.sample_rate
    );

    let symbol = symbol_name(&entry.suffix);
    let declaration = render_declaration(&symbol, &clip.samples);

    let summary = EntrySummary {
        identifier: entry.identifier.clone(),
        symbol,
        sample_rate: clip.sample_rate,
        channels: clip.channels,
        sample_count: clip.samples.len(),
        duration_secs: clip.duration_secs(),
    };

    Ok((declaration, summary))
}

/// One generation run over a vocabulary
pub struct Batch {
    config: BuildConfig,
    state: RunState,
}

impl Batch {
    pub fn new(config: BuildConfig) -> Self {
        Batch {
            config,
            state: RunState::NotStarted,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Generate the header; the first failing entry aborts the whole run
    pub fn run(&mut self) -> Result<BuildReport, BuildError> {
        if self.state != RunState::NotStarted {
            return Err(BuildError::AlreadyFinished(self.state));
        }

        match self.write_artifact() {
            Ok(report) => {
                self.state = RunState::Done;
                log::info!(
                    "Wrote {} declarations to {} ({} bytes, sha256 {})",
                    report.entries.len(),
                    report.artifact.path.display(),
                    report.artifact.bytes,
                    report.artifact.sha256
                );
                Ok(report)
            }
            Err(e) => {
                self.state = RunState::Failed;
                log::error!("Header generation failed: {}", e);
                if !self.config.atomic_write {
                    log::warn!(
                        "{} may be incomplete",
                        self.config.output_path.display()
                    );
                }
                Err(e)
            }
        }
    }

    fn write_artifact(&mut self) -> Result<BuildReport, BuildError> {
        let mut artifact =
            ArtifactWriter::create(&self.config.output_path, self.config.atomic_write)?;
        self.state = RunState::Writing;

        let mut entries = Vec::with_capacity(self.config.vocabulary.len());
        for entry in &self.config.vocabulary {
            let (declaration, summary) =
                encode_entry(&self.config.input_dir, entry, &self.config.load)?;
            artifact.append(&declaration)?;
            entries.push(summary);
        }

        let artifact = artifact.commit()?;
        Ok(BuildReport { entries, artifact })
    }
}
