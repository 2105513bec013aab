//! Encoder: write the temp WAV, transcode, then clean up or fall back.
//!
//! Per sound the files move through
//! `Written(temp) -> {Transcoded -> Cleaned} | {TranscodeFailed -> Renamed}`,
//! leaving exactly one of `<name>.mp3` or `<name>.wav` behind.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{Result, SoundError};
use crate::types::{AudioFormat, EncodedAudioFile, SampleBuffer};

use super::transcode::{TranscodeFailure, Transcoder};
use super::wav::write_wav;

/// Suffix appended to the logical name for the intermediate WAV.
pub const TEMP_SUFFIX: &str = "_temp";

/// Result of encoding one sound.
#[derive(Debug, Clone, Serialize)]
pub struct EncodeOutcome {
    /// The final artifact on disk.
    pub artifact: EncodedAudioFile,

    /// Why transcoding failed, when the artifact is the WAV fallback.
    #[serde(serialize_with = "serialize_failure")]
    pub fallback_reason: Option<TranscodeFailure>,
}

impl EncodeOutcome {
    /// Returns true if the artifact is the uncompressed fallback.
    pub fn fell_back(&self) -> bool {
        self.fallback_reason.is_some()
    }
}

/// Returns `<dir>/<name>_temp.wav`.
pub fn temp_path(output_dir: &Path, name: &str) -> PathBuf {
    output_dir.join(format!("{}{}.{}", name, TEMP_SUFFIX, AudioFormat::Wav.extension()))
}

/// Returns `<dir>/<name>.<ext>`.
pub fn final_path(output_dir: &Path, name: &str, format: AudioFormat) -> PathBuf {
    output_dir.join(format!("{}.{}", name, format.extension()))
}

/// Writes `buffer` as `name` into `output_dir`, transcoding to MP3 if possible.
///
/// A transcode failure is not an error: the temp WAV is renamed to
/// `<name>.wav` and the failure is returned in [`EncodeOutcome::fallback_reason`].
/// Errors are only returned for WAV writing and file deletes or renames.
pub fn encode(
    buffer: &SampleBuffer,
    name: &str,
    output_dir: &Path,
    transcoder: &dyn Transcoder,
) -> Result<EncodeOutcome> {
    let temp = temp_path(output_dir, name);
    write_wav(buffer, &temp)?;

    let mp3 = final_path(output_dir, name, AudioFormat::Mp3);
    let wav = final_path(output_dir, name, AudioFormat::Wav);

    match transcoder.transcode(&temp, &mp3) {
        Ok(()) => {
            // The MP3 is already final; a stuck temp file only warrants a warning.
            if let Err(e) = remove(&temp) {
                tracing::warn!(path = %temp.display(), error = %e, "failed to delete temp WAV");
            }
            remove_stale(&wav)?;
            tracing::debug!(path = %mp3.display(), "transcoded");
            Ok(EncodeOutcome {
                artifact: EncodedAudioFile {
                    name: name.to_string(),
                    path: mp3,
                    format: AudioFormat::Mp3,
                },
                fallback_reason: None,
            })
        }
        Err(reason) => {
            tracing::warn!(
                transcoder = transcoder.name(),
                reason = %reason,
                "transcode failed, keeping WAV"
            );
            remove_stale(&mp3)?;
            fs::rename(&temp, &wav)
                .map_err(|e| SoundError::file_operation_failed("rename", &temp, e))?;
            Ok(EncodeOutcome {
                artifact: EncodedAudioFile {
                    name: name.to_string(),
                    path: wav,
                    format: AudioFormat::Wav,
                },
                fallback_reason: Some(reason),
            })
        }
    }
}

fn remove(path: &Path) -> Result<()> {
    fs::remove_file(path).map_err(|e| SoundError::file_operation_failed("delete", path, e))
}

/// Removes a leftover artifact of the other format from an earlier run.
fn remove_stale(path: &Path) -> Result<()> {
    if path.exists() {
        tracing::debug!(path = %path.display(), "removing stale artifact");
        remove(path)?;
    }
    Ok(())
}

fn serialize_failure<S>(
    reason: &Option<TranscodeFailure>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match reason {
        Some(reason) => serializer.serialize_some(&reason.to_string()),
        None => serializer.serialize_none(),
    }
}
