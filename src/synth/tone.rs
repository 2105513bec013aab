//! Additive tone synthesis.
//!
//! A tone is a weighted sum of sine partials, optionally amplitude
//! modulated, shaped by linear fades, and normalized to a fixed peak.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SoundError};
use crate::types::SampleBuffer;

use super::envelope::{apply_fades, linspace};

/// Sample rate of every generated cue.
pub const SAMPLE_RATE: u32 = 44100;

/// Peak amplitude after normalization.
pub const TARGET_PEAK: f64 = 0.7;

/// One sine component of an additive tone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Partial {
    /// Frequency in Hz.
    pub frequency: f64,
    /// Relative amplitude.
    pub weight: f64,
}

impl Partial {
    pub const fn new(frequency: f64, weight: f64) -> Self {
        Self { frequency, weight }
    }
}

/// Low-frequency amplitude modulation (tremolo).
///
/// The signal is multiplied by `1 + depth * sin(2π * frequency * t)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Modulation {
    /// Modulation rate in Hz.
    pub frequency: f64,
    /// Modulation depth (0.0 = none).
    pub depth: f64,
}

/// Immutable parameters for one cue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToneSpec {
    /// Sample rate in Hz.
    pub sample_rate: u32,

    /// Length of the tone in seconds.
    pub duration_sec: f64,

    /// Partials summed in order.
    pub partials: Vec<Partial>,

    /// Optional tremolo applied to the summed partials.
    pub modulation: Option<Modulation>,

    /// Fade-in length in seconds.
    pub fade_in_sec: f64,

    /// Fade-out length in seconds.
    pub fade_out_sec: f64,

    /// Peak amplitude after normalization.
    pub target_peak: f64,
}

impl ToneSpec {
    /// The chat cue: 0.6s, 800/1200/1600 Hz, 0.1s fades.
    pub fn chat() -> Self {
        Self {
            sample_rate: SAMPLE_RATE,
            duration_sec: 0.6,
            partials: vec![
                Partial::new(800.0, 1.0),
                Partial::new(1200.0, 0.5),
                Partial::new(1600.0, 0.3),
            ],
            modulation: None,
            fade_in_sec: 0.1,
            fade_out_sec: 0.1,
            target_peak: TARGET_PEAK,
        }
    }

    /// The notification cue: 0.8s, 600/1000 Hz with a 5 Hz tremolo, 0.15s fades.
    pub fn notification() -> Self {
        Self {
            sample_rate: SAMPLE_RATE,
            duration_sec: 0.8,
            partials: vec![Partial::new(600.0, 1.0), Partial::new(1000.0, 0.7)],
            modulation: Some(Modulation {
                frequency: 5.0,
                depth: 0.3,
            }),
            fade_in_sec: 0.15,
            fade_out_sec: 0.15,
            target_peak: TARGET_PEAK,
        }
    }

    /// Number of samples in the rendered buffer.
    pub fn sample_count(&self) -> usize {
        seconds_to_samples(self.duration_sec, self.sample_rate)
    }

    pub fn fade_in_samples(&self) -> usize {
        seconds_to_samples(self.fade_in_sec, self.sample_rate)
    }

    pub fn fade_out_samples(&self) -> usize {
        seconds_to_samples(self.fade_out_sec, self.sample_rate)
    }

    /// Checks that these parameters can be rendered.
    ///
    /// Overlapping fades are rejected rather than clamped.
    pub fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            return Err(SoundError::invalid_tone_spec("sample rate must be > 0"));
        }
        if !(self.duration_sec.is_finite() && self.duration_sec > 0.0) {
            return Err(SoundError::invalid_tone_spec(format!(
                "duration must be positive, got {}",
                self.duration_sec
            )));
        }
        if self.sample_count() < 2 {
            return Err(SoundError::invalid_tone_spec(format!(
                "duration {}s is shorter than two samples",
                self.duration_sec
            )));
        }
        if self.partials.is_empty() {
            return Err(SoundError::invalid_tone_spec("at least one partial is required"));
        }
        let fade_ok = |secs: f64| secs.is_finite() && secs >= 0.0;
        if !fade_ok(self.fade_in_sec) || !fade_ok(self.fade_out_sec) {
            return Err(SoundError::invalid_tone_spec(format!(
                "fade lengths must be finite and non-negative, got {} and {}",
                self.fade_in_sec, self.fade_out_sec
            )));
        }

        let fades = self.fade_in_samples().checked_add(self.fade_out_samples());
        match fades {
            Some(fades) if fades <= self.sample_count() => {}
            _ => {
                return Err(SoundError::invalid_tone_spec(format!(
                    "fade-in ({}s) and fade-out ({}s) do not fit in a {}-sample tone",
                    self.fade_in_sec,
                    self.fade_out_sec,
                    self.sample_count()
                )));
            }
        }

        Ok(())
    }
}

/// Renders a tone into a normalized sample buffer.
///
/// The time axis spans `[0, duration]` inclusive, so the last sample sits
/// exactly at `duration`.
pub fn render(spec: &ToneSpec) -> Result<SampleBuffer> {
    spec.validate()?;

    let count = spec.sample_count();
    let time_axis = linspace(0.0, spec.duration_sec, count);

    let mut samples: Vec<f64> = time_axis
        .iter()
        .map(|&t| {
            let signal: f64 = spec
                .partials
                .iter()
                .map(|p| p.weight * (2.0 * PI * p.frequency * t).sin())
                .sum();
            match spec.modulation {
                Some(m) => signal * (1.0 + m.depth * (2.0 * PI * m.frequency * t).sin()),
                None => signal,
            }
        })
        .collect();

    apply_fades(&mut samples, spec.fade_in_samples(), spec.fade_out_samples());

    let mut buffer = SampleBuffer::new(samples, spec.sample_rate);
    buffer.normalize(spec.target_peak);

    tracing::debug!(
        samples = buffer.len(),
        peak = buffer.peak(),
        "rendered tone"
    );

    Ok(buffer)
}

/// Renders the chat cue.
pub fn chat_tone() -> Result<SampleBuffer> {
    render(&ToneSpec::chat())
}

/// Renders the notification cue.
pub fn notification_tone() -> Result<SampleBuffer> {
    render(&ToneSpec::notification())
}

fn seconds_to_samples(seconds: f64, sample_rate: u32) -> usize {
    (sample_rate as f64 * seconds).round() as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn chat_length_and_peak() {
        let buffer = chat_tone().unwrap();
        assert_eq!(buffer.len(), 26460);
        assert_eq!(buffer.sample_rate(), 44100);
        assert!((buffer.peak() - 0.7).abs() < 1e-6);
    }

    #[test]
    fn notification_length_and_peak() {
        let buffer = notification_tone().unwrap();
        assert_eq!(buffer.len(), 35280);
        assert!((buffer.peak() - 0.7).abs() < 1e-6);
    }

    #[test]
    fn fade_counts() {
        assert_eq!(ToneSpec::chat().fade_in_samples(), 4410);
        assert_eq!(ToneSpec::notification().fade_out_samples(), 6615);
    }

    #[test]
    fn rendering_is_deterministic() {
        assert_eq!(chat_tone().unwrap(), chat_tone().unwrap());
        assert_eq!(notification_tone().unwrap(), notification_tone().unwrap());
    }

    #[test]
    fn buffer_starts_and_ends_silent() {
        for buffer in [chat_tone().unwrap(), notification_tone().unwrap()] {
            let samples = buffer.samples();
            assert_eq!(samples[0], 0.0);
            assert!(samples[samples.len() - 1].abs() < 1e-12);
        }
    }

    #[test]
    fn fade_regions_follow_envelope() {
        // A slow partial keeps the raw signal monotonic, exposing the envelope.
        let spec = ToneSpec {
            sample_rate: 1000,
            duration_sec: 1.0,
            partials: vec![Partial::new(0.25, 1.0)],
            modulation: None,
            fade_in_sec: 0.2,
            fade_out_sec: 0.3,
            target_peak: TARGET_PEAK,
        };
        let buffer = render(&spec).unwrap();
        let samples = buffer.samples();
        assert!(samples[..200].windows(2).all(|w| w[0].abs() <= w[1].abs()));
        assert!(samples[700..].windows(2).all(|w| w[0].abs() >= w[1].abs()));
    }

    #[test]
    fn modulation_changes_output() {
        let mut spec = ToneSpec::notification();
        let modulated = render(&spec).unwrap();
        spec.modulation = None;
        let plain = render(&spec).unwrap();
        assert_eq!(modulated.len(), plain.len());
        assert_ne!(modulated, plain);
    }

    #[test]
    fn overlapping_fades_rejected() {
        let mut spec = ToneSpec::chat();
        spec.duration_sec = 0.15;
        let err = render(&spec).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidToneSpec);
    }

    #[test]
    fn fades_filling_the_whole_tone_are_allowed() {
        let mut spec = ToneSpec::chat();
        spec.duration_sec = 0.2;
        let buffer = render(&spec).unwrap();
        assert_eq!(buffer.len(), 8820);
    }

    #[test]
    fn degenerate_specs_rejected() {
        let mut spec = ToneSpec::chat();
        spec.partials.clear();
        assert!(spec.validate().is_err());

        let mut spec = ToneSpec::chat();
        spec.duration_sec = 0.0;
        assert!(spec.validate().is_err());

        let mut spec = ToneSpec::chat();
        spec.duration_sec = f64::NAN;
        assert!(spec.validate().is_err());

        let mut spec = ToneSpec::chat();
        spec.sample_rate = 0;
        assert!(spec.validate().is_err());
    }

    #[test]
    fn non_finite_fades_rejected() {
        for bad in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
            let mut spec = ToneSpec::chat();
            spec.fade_in_sec = bad;
            assert_eq!(spec.validate().unwrap_err().code, ErrorCode::InvalidToneSpec);

            let mut spec = ToneSpec::notification();
            spec.fade_out_sec = bad;
            assert_eq!(render(&spec).unwrap_err().code, ErrorCode::InvalidToneSpec);
        }
    }

    #[test]
    fn huge_fades_do_not_overflow() {
        let mut spec = ToneSpec::chat();
        spec.fade_in_sec = 1e300;
        spec.fade_out_sec = 1e300;
        assert_eq!(spec.validate().unwrap_err().code, ErrorCode::InvalidToneSpec);
    }
}
