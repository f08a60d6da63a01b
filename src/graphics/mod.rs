//! Graphics — turning animated images into playable cell frames.
//!
//! Bytes come in through `source`, every frame goes through an
//! `ImageProcessor`, and `Animation` owns the result for playback.

pub mod animation;
pub mod processor;
pub mod source;

pub use animation::Animation;
pub use processor::{ImageProcessor, PaletteProcessor, SizePolicy};
