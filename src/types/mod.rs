//! Core types for pina-sounds.
//!
//! - [`SampleBuffer`]: synthesized floating-point samples at a fixed rate
//! - [`EncodedAudioFile`]: the single final artifact of one sound

mod artifact;
mod buffer;

pub use artifact::{AudioFormat, EncodedAudioFile};
pub use buffer::SampleBuffer;
