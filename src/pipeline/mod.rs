// Pipeline execution module
// Orchestrates the recording-to-header generation run

pub mod artifact;
pub mod batch;
pub mod config;
pub mod vocabulary;

pub use artifact::{file_sha256, ArtifactError, ArtifactSummary, ArtifactWriter};
pub use batch::{encode_entry, Batch, BuildError, BuildReport, EntrySummary, RunState};
pub use config::{BuildConfig, DEFAULT_OUTPUT_PATH};
pub use vocabulary::{Vocabulary, VocabularyEntry, VocabularyError, DEFAULT_VOCABULARY};
