//! WAV output for rendered stimuli.

use std::path::Path;

use clap::ValueEnum;
use hound::{SampleFormat, WavSpec, WavWriter};

/// Sample encoding for written stimulus files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum BitDepth {
    /// 32-bit IEEE float, bit-exact with the rendered buffer.
    #[default]
    #[value(name = "float32")]
    Float32,
    /// 16-bit PCM for playback hardware that rejects float WAVs.
    #[value(name = "pcm16")]
    Pcm16,
}

/// Write a mono sample buffer to `path`.
pub fn write_wav(
    path: &Path,
    samples: &[f32],
    sample_rate: u32,
    depth: BitDepth,
) -> hound::Result<()> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: match depth {
            BitDepth::Float32 => 32,
            BitDepth::Pcm16 => 16,
        },
        sample_format: match depth {
            BitDepth::Float32 => SampleFormat::Float,
            BitDepth::Pcm16 => SampleFormat::Int,
        },
    };

    let mut writer = WavWriter::create(path, spec)?;
    match depth {
        BitDepth::Float32 => {
            for &sample in samples {
                writer.write_sample(sample)?;
            }
        }
        BitDepth::Pcm16 => {
            for &sample in samples {
                let clamped = (sample.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16;
                writer.write_sample(clamped)?;
            }
        }
    }
    writer.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::WavReader;

    #[test]
    fn float_wav_round_trips_exactly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tone.wav");
        let samples: Vec<f32> = (0..480).map(|i| (i as f32 * 0.013).sin()).collect();

        write_wav(&path, &samples, 48000, BitDepth::Float32).unwrap();

        let reader = WavReader::open(&path).unwrap();
        assert_eq!(reader.spec().sample_rate, 48000);
        assert_eq!(reader.spec().channels, 1);
        let read: Vec<f32> = reader.into_samples::<f32>().map(Result::unwrap).collect();
        assert_eq!(read, samples);
    }

    #[test]
    fn pcm_wav_has_sixteen_bits() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tone16.wav");
        let samples = vec![0.0f32, 0.5, -0.5, 1.0, -1.0];

        write_wav(&path, &samples, 44100, BitDepth::Pcm16).unwrap();

        let reader = WavReader::open(&path).unwrap();
        assert_eq!(reader.spec().bits_per_sample, 16);
        let read: Vec<i16> = reader.into_samples::<i16>().map(Result::unwrap).collect();
        assert_eq!(read[0], 0);
        assert_eq!(read[3], i16::MAX);
    }
}
