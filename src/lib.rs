// Voicepack - Voice prompt header generator
// Module declarations

pub mod audio;
pub mod codegen;
pub mod pipeline;

pub use pipeline::{Batch, BuildConfig, BuildError, BuildReport, RunState, Vocabulary};

/// Generate the firmware header from the recordings in the working directory
pub fn run() -> Result<BuildReport, BuildError> {
    init_logging();
    run_with(BuildConfig::default())
}

/// Generate a header with an explicit configuration
pub fn run_with(config: BuildConfig) -> Result<BuildReport, BuildError> {
    Batch::new(config).run()
}

fn init_logging() {
    // log records reach the subscriber through its tracing-log bridge
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
