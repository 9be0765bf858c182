// Build configuration
// Compiled-in paths and policies for one header generation run

use std::path::PathBuf;

use super::vocabulary::Vocabulary;
use crate::audio::LoadOptions;

/// Where the firmware build expects the generated header
pub const DEFAULT_OUTPUT_PATH: &str = "../Firmware/Core/Inc/audio_samples.h";

#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Directory holding `<identifier>.wav` recordings
    pub input_dir: PathBuf,

    /// Generated header, overwritten on every run
    pub output_path: PathBuf,

    pub vocabulary: Vocabulary,

    pub load: LoadOptions,

    /// Write to a temporary file and rename into place only after every entry succeeded
    pub atomic_write: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        BuildConfig {
            input_dir: PathBuf::from("."),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            vocabulary: Vocabulary::default(),
            load: LoadOptions::default(),
            atomic_write: true,
        }
    }
}

impl BuildConfig {
    pub fn with_input_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.input_dir = dir.into();
        self
    }

    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    pub fn with_vocabulary(mut self, vocabulary: Vocabulary) -> Self {
        self.vocabulary = vocabulary;
        self
    }

    pub fn with_load_options(mut self, load: LoadOptions) -> Self {
        self.load = load;
        self
    }

    pub fn with_atomic_write(mut self, atomic: bool) -> Self {
        self.atomic_write = atomic;
        self
    }
}
