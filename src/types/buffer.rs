//! SampleBuffer type holding synthesized audio.

/// Full-scale value used when quantizing to signed 16-bit PCM.
pub const I16_FULL_SCALE: f64 = 32767.0;

/// Mono floating-point samples at a fixed sample rate.
///
/// Buffers are created by the tone generator, consumed once by the
/// encoder, and dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    samples: Vec<f64>,
    sample_rate: u32,
}

impl SampleBuffer {
    /// Wraps already-computed samples.
    pub fn new(samples: Vec<f64>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Returns the buffer length in seconds.
    pub fn duration_sec(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Returns the maximum absolute sample value (0.0 for an empty buffer).
    pub fn peak(&self) -> f64 {
        self.samples.iter().fold(0.0, |acc, s| acc.max(s.abs()))
    }

    /// Scales the buffer so its peak equals `target`.
    ///
    /// A silent buffer has no peak to scale and is left untouched.
    pub fn normalize(&mut self, target: f64) {
        let peak = self.peak();
        if peak == 0.0 || !peak.is_finite() {
            return;
        }
        for sample in &mut self.samples {
            *sample = *sample / peak * target;
        }
    }

    /// Converts to signed 16-bit PCM by scaling by 32767 and truncating.
    ///
    /// Values outside [-1, 1] saturate at the i16 limits.
    pub fn quantize(&self) -> Vec<i16> {
        self.samples
            .iter()
            .map(|s| (s * I16_FULL_SCALE) as i16)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peak_of_empty_buffer_is_zero() {
        let buffer = SampleBuffer::new(Vec::new(), 44100);
        assert!(buffer.is_empty());
        assert_eq!(buffer.peak(), 0.0);
    }

    #[test]
    fn normalize_sets_peak() {
        let mut buffer = SampleBuffer::new(vec![0.1, -2.0, 1.0], 44100);
        buffer.normalize(0.7);
        assert!((buffer.peak() - 0.7).abs() < 1e-12);
        assert!((buffer.samples()[1] + 0.7).abs() < 1e-12);
        assert!((buffer.samples()[2] - 0.35).abs() < 1e-12);
    }

    #[test]
    fn normalize_leaves_silence_alone() {
        let mut buffer = SampleBuffer::new(vec![0.0; 8], 44100);
        buffer.normalize(0.7);
        assert!(buffer.samples().iter().all(|s| *s == 0.0));
    }

    #[test]
    fn quantize_truncates_toward_zero() {
        let buffer = SampleBuffer::new(vec![0.0, 1.0, -1.0, 0.5, -0.5, 2.0], 44100);
        assert_eq!(
            buffer.quantize(),
            vec![0, 32767, -32767, 16383, -16383, i16::MAX]
        );
    }

    #[test]
    fn duration_from_length() {
        let buffer = SampleBuffer::new(vec![0.0; 22050], 44100);
        assert_eq!(buffer.duration_sec(), 0.5);
    }
}
