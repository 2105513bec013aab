//! Error types for pina-sounds.
//!
//! Every stage of a sound's pipeline (synthesis, WAV writing, file
//! shuffling) reports failures as a [`SoundError`] carrying an
//! [`ErrorCode`]. A failed transcode is not an error: it is recovered
//! locally by the WAV fallback (see [`crate::audio::TranscodeFailure`]).

use std::fmt;
use std::path::Path;

/// Error codes identifying the stage that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Tone parameters cannot produce a valid buffer.
    /// Trigger: non-positive duration, empty partial list, or fades longer
    /// than the buffer.
    InvalidToneSpec,

    /// Failed to create or finalize the intermediate WAV file.
    /// Trigger: unwritable output directory, disk full.
    WavWriteFailed,

    /// Failed to delete or rename a file after transcoding.
    /// Trigger: permissions, file held open by another process.
    FileOperationFailed,

    /// Runtime configuration is invalid.
    /// Trigger: zero timeout, empty transcoder program name.
    InvalidConfig,
}

impl ErrorCode {
    /// Returns the string representation of the error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidToneSpec => "INVALID_TONE_SPEC",
            ErrorCode::WavWriteFailed => "WAV_WRITE_FAILED",
            ErrorCode::FileOperationFailed => "FILE_OPERATION_FAILED",
            ErrorCode::InvalidConfig => "INVALID_CONFIG",
        }
    }

    /// Returns a human-readable description of the error.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::InvalidToneSpec => "Tone parameters cannot produce a valid sample buffer",
            ErrorCode::WavWriteFailed => "Failed to write the intermediate WAV file",
            ErrorCode::FileOperationFailed => "Failed to delete or rename an output file",
            ErrorCode::InvalidConfig => "Configuration is invalid",
        }
    }

    /// Returns a recovery hint suggesting how to resolve this error.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCode::InvalidToneSpec => {
                "Use a positive duration and keep fade-in plus fade-out within the tone length"
            }
            ErrorCode::WavWriteFailed => {
                "Check that the output directory exists, is writable, and has free space"
            }
            ErrorCode::FileOperationFailed => {
                "Check file permissions in the output directory and remove stale *_temp.wav files"
            }
            ErrorCode::InvalidConfig => {
                "Check --output-dir, --ffmpeg and --timeout (or the PINA_* environment variables)"
            }
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Main error type for sound generation.
#[derive(Debug)]
pub struct SoundError {
    /// The error code identifying the failing stage.
    pub code: ErrorCode,
    /// Human-readable error message with context.
    pub message: String,
    /// Optional underlying cause of the error.
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl SoundError {
    /// Creates a new SoundError with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new SoundError with an underlying cause.
    pub fn with_source(
        code: ErrorCode,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates an INVALID_TONE_SPEC error.
    pub fn invalid_tone_spec(reason: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::InvalidToneSpec,
            format!("Invalid tone: {}", reason.into()),
        )
    }

    /// Creates a WAV_WRITE_FAILED error for the given path.
    pub fn wav_write_failed(path: &Path, source: hound::Error) -> Self {
        Self::with_source(
            ErrorCode::WavWriteFailed,
            format!("Failed to write WAV file {}: {}", path.display(), source),
            source,
        )
    }

    /// Creates a FILE_OPERATION_FAILED error.
    pub fn file_operation_failed(
        action: &str,
        path: &Path,
        source: std::io::Error,
    ) -> Self {
        Self::with_source(
            ErrorCode::FileOperationFailed,
            format!("Failed to {} {}: {}", action, path.display(), source),
            source,
        )
    }

    /// Creates an INVALID_CONFIG error.
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidConfig, reason)
    }
}

impl fmt::Display for SoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}. Recovery: {}",
            self.code,
            self.message,
            self.code.recovery_hint()
        )
    }
}

impl std::error::Error for SoundError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Result type alias using SoundError.
pub type Result<T> = std::result::Result<T, SoundError>;
