//! Audio output module.
//!
//! WAV writing, external MP3 transcoding, and the encoder that ties them
//! together with the WAV fallback.

pub mod encoder;
pub mod transcode;
pub mod wav;

// Re-export commonly used items
pub use encoder::{encode, final_path, temp_path, EncodeOutcome};
pub use transcode::{DisabledTranscoder, FfmpegTranscoder, TranscodeFailure, Transcoder};
pub use wav::{pcm_spec, write_wav, BITS_PER_SAMPLE, CHANNELS};
