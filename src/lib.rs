//! pina-sounds: synthesizes the PINA chat and notification cues.
//!
//! Each cue is rendered as an additive sine tone, written as 16-bit mono
//! WAV, and converted to MP3 with `ffmpeg` when it is available. When it
//! is not, the WAV is kept as the final file.
//!
//! # Modules
//!
//! - [`synth`]: Tone parameters and rendering (ToneSpec, render)
//! - [`audio`]: WAV writing, transcoding, and the encoder with WAV fallback
//! - [`generation`]: Per-sound pipeline and run report
//! - [`config`]: Runtime configuration (SoundsConfig, TranscoderConfig)
//! - [`error`]: Error types and codes (SoundError, ErrorCode)
//!
//! # Example
//!
//! ```rust,ignore
//! use pina_sounds::{
//!     audio::{encode, FfmpegTranscoder},
//!     synth::chat_tone,
//! };
//!
//! let buffer = chat_tone()?;
//! let outcome = encode(&buffer, "pina_chat", Path::new("."), &FfmpegTranscoder::default())?;
//! println!("created {}", outcome.artifact.file_name());
//! ```

pub mod audio;
pub mod cli;
pub mod config;
pub mod error;
pub mod generation;
pub mod synth;
pub mod types;

// Re-export commonly used types at crate root for convenience
pub use config::{SoundsConfig, TranscoderConfig};
pub use error::{ErrorCode, Result, SoundError};
pub use generation::{produce, produce_all, RunReport, SoundKind};
pub use types::{AudioFormat, EncodedAudioFile, SampleBuffer};
