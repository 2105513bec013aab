//! EncodedAudioFile type representing a sound's final artifact.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Container format of a final artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    /// Uncompressed 16-bit mono PCM.
    Wav,
    /// Lossy MP3 produced by the external transcoder.
    Mp3,
}

impl AudioFormat {
    /// Returns the file extension (without the dot).
    pub fn extension(&self) -> &'static str {
        match self {
            AudioFormat::Wav => "wav",
            AudioFormat::Mp3 => "mp3",
        }
    }
}

impl std::fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// The one file left on disk for a logical sound name.
///
/// Either `<name>.mp3` (transcode succeeded) or `<name>.wav` (fallback);
/// never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedAudioFile {
    /// Logical sound name, e.g. "pina_chat".
    pub name: String,

    /// Full path of the artifact.
    pub path: PathBuf,

    /// Container format of the artifact.
    pub format: AudioFormat,
}

impl EncodedAudioFile {
    /// Returns the artifact's file name for display.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| format!("{}.{}", self.name, self.format))
    }

    /// Returns true if the artifact is the compressed format.
    pub fn is_compressed(&self) -> bool {
        self.format == AudioFormat::Mp3
    }
}
