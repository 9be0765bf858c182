// Audio processing module
// Handles WAV file ingestion for voice prompt clips

pub mod ingest;

pub use ingest::{
    check_sample_range, clip_path, ingest_wav, load_clip, AudioError, ChannelPolicy, Clip,
    LoadOptions, SampleRangePolicy,
};
