//! WAV file writer for generated cues.
//!
//! Writes 16-bit mono PCM using the hound crate.

use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter};

use crate::error::{Result, SoundError};
use crate::types::SampleBuffer;

/// Number of audio channels (mono).
pub const CHANNELS: u16 = 1;

/// Bits per stored sample.
pub const BITS_PER_SAMPLE: u16 = 16;

/// Returns the PCM layout used for every WAV this crate writes.
pub fn pcm_spec(sample_rate: u32) -> WavSpec {
    WavSpec {
        channels: CHANNELS,
        sample_rate,
        bits_per_sample: BITS_PER_SAMPLE,
        sample_format: SampleFormat::Int,
    }
}

/// Quantizes `buffer` and writes it to `path` as 16-bit mono PCM.
///
/// # Example
///
/// ```ignore
/// use pina_sounds::audio::write_wav;
/// use pina_sounds::synth::chat_tone;
///
/// let buffer = chat_tone()?;
/// write_wav(&buffer, Path::new("pina_chat_temp.wav"))?;
/// ```
pub fn write_wav(buffer: &SampleBuffer, path: &Path) -> Result<()> {
    let spec = pcm_spec(buffer.sample_rate());

    let mut writer =
        WavWriter::create(path, spec).map_err(|e| SoundError::wav_write_failed(path, e))?;

    for sample in buffer.quantize() {
        writer
            .write_sample(sample)
            .map_err(|e| SoundError::wav_write_failed(path, e))?;
    }

    writer
        .finalize()
        .map_err(|e| SoundError::wav_write_failed(path, e))?;

    tracing::debug!(path = %path.display(), samples = buffer.len(), "wrote WAV");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::synth::chat_tone;
    use tempfile::tempdir;

    #[test]
    fn write_wav_creates_pcm16_mono_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.wav");

        let buffer = SampleBuffer::new(vec![0.0, 0.5, -0.5, 0.0], 44100);
        write_wav(&buffer, &path).unwrap();

        let reader = hound::WavReader::open(&path).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 44100);
        assert_eq!(spec.bits_per_sample, 16);
        assert_eq!(spec.sample_format, SampleFormat::Int);
        assert_eq!(reader.len(), 4);
    }

    #[test]
    fn written_samples_stay_within_one_quantization_step() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("chat.wav");

        let buffer = chat_tone().unwrap();
        write_wav(&buffer, &path).unwrap();

        let mut reader = hound::WavReader::open(&path).unwrap();
        let stored: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(stored.len(), buffer.len());

        let step = 1.0 / 32767.0;
        for (original, quantized) in buffer.samples().iter().zip(&stored) {
            let restored = *quantized as f64 / 32767.0;
            assert!((original - restored).abs() <= step);
        }
    }

    #[test]
    fn write_into_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("test.wav");

        let buffer = SampleBuffer::new(vec![0.0; 4], 44100);
        let err = write_wav(&buffer, &path).unwrap_err();
        assert_eq!(err.code, ErrorCode::WavWriteFailed);
    }
}
