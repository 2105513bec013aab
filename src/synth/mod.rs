//! Tone synthesis module.
//!
//! Renders the chat and notification cues as normalized sample buffers.

pub mod envelope;
pub mod tone;

pub use tone::{
    chat_tone, notification_tone, render, Modulation, Partial, ToneSpec, SAMPLE_RATE,
    TARGET_PEAK,
};
