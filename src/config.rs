//! Runtime configuration.
//!
//! Holds the output directory and transcoder settings. Defaults reproduce
//! the classic behavior: files land in the working directory and `ffmpeg`
//! is looked up on `PATH`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Result, SoundError};

/// Default LAME VBR quality (`-qscale:a`), 0 = best, 9 = smallest.
pub const DEFAULT_QUALITY: u8 = 2;

/// Default time budget for one transcoder run, in seconds.
pub const DEFAULT_TIMEOUT_SEC: u64 = 30;

/// Upper bound accepted for the transcoder timeout, in seconds.
pub const MAX_TIMEOUT_SEC: u64 = 600;

/// Settings for the external MP3 transcoder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscoderConfig {
    /// Program to invoke; a bare name is resolved through `PATH`.
    pub program: PathBuf,

    /// LAME VBR quality passed as `-qscale:a`.
    pub quality: u8,

    /// Seconds to wait before killing the transcoder.
    pub timeout_sec: u64,
}

impl TranscoderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_sec)
    }
}

impl Default for TranscoderConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from("ffmpeg"),
            quality: DEFAULT_QUALITY,
            timeout_sec: DEFAULT_TIMEOUT_SEC,
        }
    }
}

/// Runtime configuration for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoundsConfig {
    /// Directory receiving the artifacts.
    /// If None, the current working directory is used.
    pub output_dir: Option<PathBuf>,

    /// External transcoder settings.
    pub transcoder: TranscoderConfig,

    /// Skip transcoding and keep every sound as WAV.
    pub wav_only: bool,
}

impl SoundsConfig {
    /// Creates a new SoundsConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a SoundsConfig from environment variables.
    ///
    /// Reads the following environment variables:
    /// - `PINA_OUTPUT_DIR` - Directory for the generated files
    /// - `PINA_FFMPEG` - Transcoder program (name or path)
    /// - `PINA_TRANSCODE_TIMEOUT` - Transcoder timeout in seconds
    ///
    /// Falls back to defaults for unset or unparsable variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(dir) = lookup("PINA_OUTPUT_DIR").filter(|s| !s.is_empty()) {
            config.output_dir = Some(PathBuf::from(dir));
        }

        if let Some(program) = lookup("PINA_FFMPEG").filter(|s| !s.is_empty()) {
            config.transcoder.program = PathBuf::from(program);
        }

        if let Some(timeout) = lookup("PINA_TRANSCODE_TIMEOUT") {
            match timeout.trim().parse::<u64>() {
                Ok(secs) if (1..=MAX_TIMEOUT_SEC).contains(&secs) => {
                    config.transcoder.timeout_sec = secs;
                }
                _ => tracing::warn!(value = %timeout, "ignoring invalid PINA_TRANSCODE_TIMEOUT"),
            }
        }

        config
    }

    /// Returns the effective output directory.
    pub fn effective_output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.transcoder.program.as_os_str().is_empty() {
            return Err(SoundError::invalid_config("transcoder program must not be empty"));
        }

        if !(1..=MAX_TIMEOUT_SEC).contains(&self.transcoder.timeout_sec) {
            return Err(SoundError::invalid_config(format!(
                "transcoder timeout must be between 1 and {} seconds, got {}",
                MAX_TIMEOUT_SEC, self.transcoder.timeout_sec
            )));
        }

        if self.transcoder.quality > 9 {
            return Err(SoundError::invalid_config(format!(
                "MP3 quality must be 0-9, got {}",
                self.transcoder.quality
            )));
        }

        if let Some(dir) = &self.output_dir {
            if dir.exists() && !dir.is_dir() {
                return Err(SoundError::invalid_config(format!(
                    "output path {} is not a directory",
                    dir.display()
                )));
            }
        }

        Ok(())
    }
}
