// Clip ingestion module
// Reads a voice prompt WAV file into memory and validates it as a byte table

use hound::{SampleFormat, WavReader};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Largest value a firmware table element (`uint8_t`) can hold
pub const MAX_SAMPLE_VALUE: i32 = u8::MAX as i32;

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("Missing input file: {}", path.display())]
    MissingInput { path: PathBuf },

    #[error("Unreadable audio file {}: {reason}", path.display())]
    UnreadableFormat { path: PathBuf, reason: String },

    #[error("Failed to decode WAV data: {0}")]
    WavReadError(#[from] hound::Error),

    #[error("Unsupported audio format: {0}")]
    UnsupportedFormat(String),

    #[error("Expected mono audio, found {0} channels")]
    UnsupportedChannels(u16),

    #[error("Sample {index} has value {value}, outside 0..=255")]
    SampleOutOfRange { index: usize, value: i32 },
}

impl AudioError {
    /// Attach the source path to decoder-level failures
    fn at_path(self, path: &Path) -> Self {
        match self {
            AudioError::WavReadError(e) => AudioError::UnreadableFormat {
                path: path.to_path_buf(),
                reason: e.to_string(),
            },
            AudioError::UnsupportedFormat(reason) => AudioError::UnreadableFormat {
                path: path.to_path_buf(),
                reason,
            },
            other => other,
        }
    }
}

/// What to do with samples that do not fit an unsigned byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SampleRangePolicy {
    /// Fail the load on the first out-of-range sample
    #[default]
    Reject,
    /// Keep raw values; the generated literal carries them verbatim
    PassThrough,
}

/// How multi-channel recordings are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelPolicy {
    #[default]
    MonoOnly,
    /// Emit the raw interleaved sample order unchanged
    Interleaved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadOptions {
    pub range: SampleRangePolicy,
    pub channels: ChannelPolicy,
}

impl LoadOptions {
    /// Accept anything the container decodes to, without validation
    pub fn legacy() -> Self {
        LoadOptions {
            range: SampleRangePolicy::PassThrough,
            channels: ChannelPolicy::Interleaved,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clip {
    /// Raw sample values in storage order (8-bit PCM stays unsigned)
    pub samples: Vec<i32>,

    /// Sample rate in Hz
    pub sample_rate: u32,

    /// Number of channels (1 = mono, 2 = stereo)
    pub channels: u16,

    /// Bit depth of the stored samples (8, 16, 24, 32)
    pub bit_depth: u16,
}

impl Clip {
    /// Total number of frames (samples / channels)
    pub fn frame_count(&self) -> usize {
        if self.channels == 0 {
            return 0;
        }
        self.samples.len() / self.channels as usize
    }

    /// Get duration in seconds as f64
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frame_count() as f64 / self.sample_rate as f64
    }
}

/// Path of the companion recording for a vocabulary identifier
pub fn clip_path(input_dir: &Path, identifier: &str) -> PathBuf {
    input_dir.join(format!("{}.wav", identifier))
}

/// Load `<identifier>.wav` from `input_dir` fully into memory
pub fn load_clip(
    input_dir: &Path,
    identifier: &str,
    options: &LoadOptions,
) -> Result<Clip, AudioError> {
    let path = clip_path(input_dir, identifier);

    let bytes = std::fs::read(&path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => AudioError::MissingInput { path: path.clone() },
        _ => AudioError::UnreadableFormat {
            path: path.clone(),
            reason: e.to_string(),
        },
    })?;

    ingest_wav(&bytes, options).map_err(|e| e.at_path(&path))
}

/// Decode a WAV file from raw bytes and validate it against `options`
pub fn ingest_wav(data: &[u8], options: &LoadOptions) -> Result<Clip, AudioError> {
    let cursor = Cursor::new(data);
    let mut reader = WavReader::new(cursor)?;

    let spec = reader.spec();
    let sample_rate = spec.sample_rate;
    let channels = spec.channels;
    let bit_depth = spec.bits_per_sample;
    let sample_format = spec.sample_format;

    if channels != 1 && options.channels == ChannelPolicy::MonoOnly {
        return Err(AudioError::UnsupportedChannels(channels));
    }

    let samples: Vec<i32> = match (sample_format, bit_depth) {
        (SampleFormat::Int, 8) => {
            // hound re-centers 8-bit PCM around zero; undo that to get the stored byte
            reader
                .samples::<i8>()
                .map(|s| s.map(|v| v as i32 + 128))
                .collect::<Result<Vec<_>, _>>()?
        }
        (SampleFormat::Int, 16) => reader
            .samples::<i16>()
            .map(|s| s.map(i32::from))
            .collect::<Result<Vec<_>, _>>()?,
        (SampleFormat::Int, 24) | (SampleFormat::Int, 32) => reader
            .samples::<i32>()
            .collect::<Result<Vec<_>, _>>()?,
        _ => {
            return Err(AudioError::UnsupportedFormat(format!(
                "{:?} {}-bit audio",
                sample_format, bit_depth
            )));
        }
    };

    if options.range == SampleRangePolicy::Reject {
        check_sample_range(&samples)?;
    }

    Ok(Clip {
        samples,
        sample_rate,
        channels,
        bit_depth,
    })
}

/// Find the first sample that cannot be stored in a `uint8_t`
pub fn check_sample_range(samples: &[i32]) -> Result<(), AudioError> {
    match samples
        .iter()
        .enumerate()
        .find(|&(_, &v)| !(0..=MAX_SAMPLE_VALUE).contains(&v))
    {
        Some((index, &value)) => Err(AudioError::SampleOutOfRange { index, value }),
        None => Ok(()),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use hound::{WavSpec, WavWriter};
    use tempfile::TempDir;

    /// Write unsigned 8-bit PCM exactly as the bytes appear on disk
    pub(crate) fn write_u8_wav(path: &Path, bytes: &[u8], channels: u16) {
        let spec = WavSpec {
            channels,
            sample_rate: 8000,
            bits_per_sample: 8,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(path, spec).unwrap();
        for &b in bytes {
            writer.write_sample((b as i16 - 128) as i8).unwrap();
        }
        writer.finalize().unwrap();
    }

    fn write_i16_wav(path: &Path, samples: &[i16]) {
        let spec = WavSpec {
            channels: 1,
            sample_rate: 16000,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(path, spec).unwrap();
        for &s in samples {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_load_clip_reads_unsigned_bytes() {
        let dir = TempDir::new().unwrap();
        write_u8_wav(&dir.path().join("0.wav"), &[0, 10, 128, 255], 1);

        let clip = load_clip(dir.path(), "0", &LoadOptions::default()).unwrap();

        assert_eq!(clip.samples, vec![0, 10, 128, 255]);
        assert_eq!(clip.sample_rate, 8000);
        assert_eq!(clip.channels, 1);
        assert_eq!(clip.bit_depth, 8);
    }

    #[test]
    fn test_load_clip_missing_file() {
        let dir = TempDir::new().unwrap();

        let err = load_clip(dir.path(), "5", &LoadOptions::default()).unwrap_err();

        match err {
            AudioError::MissingInput { path } => assert_eq!(path, dir.path().join("5.wav")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_clip_not_a_wav() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("point.wav"), b"definitely not RIFF").unwrap();

        let err = load_clip(dir.path(), "point", &LoadOptions::default()).unwrap_err();

        match err {
            AudioError::UnreadableFormat { path, .. } => {
                assert_eq!(path, dir.path().join("point.wav"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_clip_unreadable_path() {
        let dir = TempDir::new().unwrap();
        // Exists, but reading it fails with something other than NotFound
        std::fs::create_dir(dir.path().join("7.wav")).unwrap();

        let err = load_clip(dir.path(), "7", &LoadOptions::default()).unwrap_err();

        match err {
            AudioError::UnreadableFormat { path, .. } => {
                assert_eq!(path, dir.path().join("7.wav"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_float_wav_is_unreadable() {
        let dir = TempDir::new().unwrap();
        let spec = WavSpec {
            channels: 1,
            sample_rate: 8000,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };
        let mut writer = WavWriter::create(dir.path().join("1.wav"), spec).unwrap();
        writer.write_sample(0.5f32).unwrap();
        writer.finalize().unwrap();

        let err = load_clip(dir.path(), "1", &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, AudioError::UnreadableFormat { .. }));
    }

    #[test]
    fn test_stereo_rejected_by_default() {
        let dir = TempDir::new().unwrap();
        write_u8_wav(&dir.path().join("2.wav"), &[1, 2, 3, 4], 2);

        let err = load_clip(dir.path(), "2", &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, AudioError::UnsupportedChannels(2)));
    }

    #[test]
    fn test_stereo_interleaved_kept_in_storage_order() {
        let dir = TempDir::new().unwrap();
        write_u8_wav(&dir.path().join("2.wav"), &[1, 2, 3, 4], 2);

        let options = LoadOptions {
            channels: ChannelPolicy::Interleaved,
            ..LoadOptions::default()
        };
        let clip = load_clip(dir.path(), "2", &options).unwrap();

        assert_eq!(clip.samples, vec![1, 2, 3, 4]);
        assert_eq!(clip.channels, 2);
        assert_eq!(clip.frame_count(), 2);
    }

    #[test]
    fn test_wide_samples_rejected_by_default() {
        let dir = TempDir::new().unwrap();
        write_i16_wav(&dir.path().join("minus.wav"), &[12, -3, 1000]);

        let err = load_clip(dir.path(), "minus", &LoadOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            AudioError::SampleOutOfRange { index: 1, value: -3 }
        ));
    }

    #[test]
    fn test_wide_samples_pass_through_in_legacy_mode() {
        let dir = TempDir::new().unwrap();
        write_i16_wav(&dir.path().join("minus.wav"), &[12, -3, 1000]);

        let clip = load_clip(dir.path(), "minus", &LoadOptions::legacy()).unwrap();
        assert_eq!(clip.samples, vec![12, -3, 1000]);
        assert_eq!(clip.bit_depth, 16);
    }

    #[test]
    fn test_empty_clip() {
        let dir = TempDir::new().unwrap();
        write_u8_wav(&dir.path().join("9.wav"), &[], 1);

        let clip = load_clip(dir.path(), "9", &LoadOptions::default()).unwrap();
        assert!(clip.samples.is_empty());
        assert_eq!(clip.duration_secs(), 0.0);
    }

    #[test]
    fn test_clip_duration_secs() {
        let clip = Clip {
            samples: vec![128; 4000],
            sample_rate: 8000,
            channels: 1,
            bit_depth: 8,
        };

        assert_eq!(clip.frame_count(), 4000);
        assert_eq!(clip.duration_secs(), 0.5);
    }
}
