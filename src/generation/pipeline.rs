//! Generation pipeline for the PINA cues.
//!
//! Each sound runs render -> encode independently; a failure in one sound
//! is recorded in the [`RunReport`] and does not stop the next.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::audio::{encode, EncodeOutcome, Transcoder};
use crate::config::SoundsConfig;
use crate::error::{Result, SoundError};
use crate::synth::{render, ToneSpec};

/// The cues this tool produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundKind {
    /// Played for incoming chat messages.
    Chat,
    /// Played for notifications.
    Notification,
}

impl SoundKind {
    /// All cues in production order.
    pub const ALL: [SoundKind; 2] = [SoundKind::Chat, SoundKind::Notification];

    /// Returns the string representation of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundKind::Chat => "chat",
            SoundKind::Notification => "notification",
        }
    }

    /// File name stem shared by the temp and final artifacts.
    pub fn file_stem(&self) -> &'static str {
        match self {
            SoundKind::Chat => "pina_chat",
            SoundKind::Notification => "pina_notification",
        }
    }

    pub fn tone_spec(&self) -> ToneSpec {
        match self {
            SoundKind::Chat => ToneSpec::chat(),
            SoundKind::Notification => ToneSpec::notification(),
        }
    }
}

impl std::fmt::Display for SoundKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of one sound's pipeline.
#[derive(Debug)]
pub struct SoundReport {
    pub kind: SoundKind,
    pub result: Result<EncodeOutcome>,
}

/// Outcomes of a full run, in production order.
#[derive(Debug, Default)]
pub struct RunReport {
    pub sounds: Vec<SoundReport>,
}

impl RunReport {
    /// Number of sounds whose final artifact exists.
    pub fn produced(&self) -> usize {
        self.sounds.iter().filter(|s| s.result.is_ok()).count()
    }

    /// Number of sounds that failed outright.
    pub fn failed(&self) -> usize {
        self.sounds.len() - self.produced()
    }

    /// Process exit code: 0 if at least one artifact was produced, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.produced() > 0 {
            0
        } else {
            1
        }
    }

    /// Renders the report as JSON for `--json`.
    pub fn to_json(&self) -> serde_json::Value {
        let sounds: Vec<serde_json::Value> = self
            .sounds
            .iter()
            .map(|sound| match &sound.result {
                Ok(outcome) => serde_json::json!({
                    "sound": sound.kind,
                    "status": "ok",
                    "artifact": outcome.artifact,
                    "fallback_reason": outcome.fallback_reason.as_ref().map(|r| r.to_string()),
                }),
                Err(err) => serde_json::json!({
                    "sound": sound.kind,
                    "status": "error",
                    "code": err.code.as_str(),
                    "message": err.message,
                }),
            })
            .collect();

        serde_json::json!({
            "produced": self.produced(),
            "failed": self.failed(),
            "sounds": sounds,
        })
    }
}

/// Renders and encodes a single cue into `output_dir`.
pub fn produce(
    kind: SoundKind,
    output_dir: &Path,
    transcoder: &dyn Transcoder,
) -> Result<EncodeOutcome> {
    let buffer = render(&kind.tone_spec())?;
    tracing::debug!(sound = %kind, samples = buffer.len(), "generated");
    encode(&buffer, kind.file_stem(), output_dir, transcoder)
}

/// Produces every cue, calling `on_start` before each one.
pub fn produce_all<F>(output_dir: &Path, transcoder: &dyn Transcoder, mut on_start: F) -> RunReport
where
    F: FnMut(SoundKind),
{
    let sounds = SoundKind::ALL
        .iter()
        .map(|&kind| {
            on_start(kind);
            let result = produce(kind, output_dir, transcoder);
            if let Err(ref e) = result {
                tracing::debug!(sound = %kind, code = %e.code, "{}", e.message);
            }
            SoundReport { kind, result }
        })
        .collect();

    RunReport { sounds }
}

/// Creates the configured output directory if needed and returns it.
pub fn prepare_output_dir(config: &SoundsConfig) -> Result<PathBuf> {
    let dir = config.effective_output_dir();
    fs::create_dir_all(&dir)
        .map_err(|e| SoundError::file_operation_failed("create directory", &dir, e))?;
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{DisabledTranscoder, TranscodeFailure};
    use crate::error::ErrorCode;
    use crate::types::AudioFormat;
    use tempfile::tempdir;

    #[test]
    fn kind_names() {
        assert_eq!(SoundKind::Chat.file_stem(), "pina_chat");
        assert_eq!(SoundKind::Notification.file_stem(), "pina_notification");
        assert_eq!(SoundKind::Notification.to_string(), "notification");
    }

    #[test]
    fn kinds_map_to_their_tones() {
        assert_eq!(SoundKind::Chat.tone_spec().sample_count(), 26460);
        assert_eq!(SoundKind::Notification.tone_spec().sample_count(), 35280);
    }

    #[test]
    fn produce_all_runs_both_sounds_in_order() {
        let dir = tempdir().unwrap();
        let mut started = Vec::new();

        let report = produce_all(dir.path(), &DisabledTranscoder, |kind| started.push(kind));

        assert_eq!(started, SoundKind::ALL.to_vec());
        assert_eq!(report.produced(), 2);
        assert_eq!(report.exit_code(), 0);
        for sound in &report.sounds {
            let outcome = sound.result.as_ref().unwrap();
            assert_eq!(outcome.artifact.format, AudioFormat::Wav);
            assert_eq!(outcome.fallback_reason, Some(TranscodeFailure::Disabled));
        }
    }

    #[test]
    fn failures_are_isolated_and_reported() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("gone");

        let report = produce_all(&missing, &DisabledTranscoder, |_| {});

        assert_eq!(report.sounds.len(), 2);
        assert_eq!(report.produced(), 0);
        assert_eq!(report.failed(), 2);
        assert_eq!(report.exit_code(), 1);
        let err = report.sounds[0].result.as_ref().unwrap_err();
        assert_eq!(err.code, ErrorCode::WavWriteFailed);
    }

    #[test]
    fn json_report_shape() {
        let dir = tempdir().unwrap();
        let report = produce_all(dir.path(), &DisabledTranscoder, |_| {});
        let json = report.to_json();

        assert_eq!(json["produced"], 2);
        assert_eq!(json["sounds"][0]["sound"], "chat");
        assert_eq!(json["sounds"][0]["status"], "ok");
        assert_eq!(json["sounds"][1]["artifact"]["format"], "wav");
        assert_eq!(json["sounds"][1]["fallback_reason"], "transcoding disabled");
    }

    #[test]
    fn prepare_output_dir_creates_nested_dirs() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let config = SoundsConfig {
            output_dir: Some(nested.clone()),
            ..SoundsConfig::default()
        };

        assert_eq!(prepare_output_dir(&config).unwrap(), nested);
        assert!(nested.is_dir());
    }
}
