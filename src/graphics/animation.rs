//! Animation — an immutable sequence of pre-converted frames with a cyclic
//! playback cursor.
//!
//! All decoding and resizing happens once, at construction. Playback is
//! index cycling only, so a game loop can call [`Animation::next_frame`]
//! every tick without paying for image work.

use std::path::Path;

use log::debug;

use super::processor::{ImageProcessor, SizePolicy};
use super::source::{self, DecodedFrames};
use crate::error::{Error, Result};
use crate::types::{RenderFrame, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Playhead {
    BeforeFirst,
    Playing(usize),
}

#[derive(Debug, Clone)]
pub struct Animation {
    frames: Box<[RenderFrame]>,
    playhead: Playhead,
}

impl Animation {
    /// Use already-built frames as-is.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `frames` is empty.
    pub fn from_frames(frames: impl IntoIterator<Item = RenderFrame>) -> Result<Self> {
        let frames: Box<[RenderFrame]> = frames.into_iter().collect();
        if frames.is_empty() {
            return Err(Error::InvalidArgument(
                "an animation needs at least one frame".into(),
            ));
        }
        Ok(Self {
            frames,
            playhead: Playhead::BeforeFirst,
        })
    }

    /// Decode an animated image and run every frame through `processor`.
    ///
    /// # Errors
    ///
    /// `InvalidFormat` if the bytes are not an animated container, plus
    /// whatever the size policy or the processor reject.
    pub fn from_image_bytes<P>(bytes: &[u8], processor: &P, policy: SizePolicy) -> Result<Self>
    where
        P: ImageProcessor + ?Sized,
    {
        let decoded = source::decode_frames(bytes)?;
        Self::from_decoded(decoded, processor, policy)
    }

    pub fn from_path<P>(path: impl AsRef<Path>, processor: &P, policy: SizePolicy) -> Result<Self>
    where
        P: ImageProcessor + ?Sized,
    {
        let bytes = source::read_path(path)?;
        Self::from_image_bytes(&bytes, processor, policy)
    }

    /// Like [`Animation::from_path`] but the bytes come over HTTP(S).
    ///
    /// # Errors
    ///
    /// `Upstream` if the download fails; nothing is built in that case.
    pub fn from_url<P>(url: &str, processor: &P, policy: SizePolicy) -> Result<Self>
    where
        P: ImageProcessor + ?Sized,
    {
        let bytes = source::fetch_url(url)?;
        Self::from_image_bytes(&bytes, processor, policy)
    }

    fn from_decoded<P>(decoded: DecodedFrames, processor: &P, policy: SizePolicy) -> Result<Self>
    where
        P: ImageProcessor + ?Sized,
    {
        let target = policy.resolve(decoded.native_size)?;
        debug!(
            "processing {} frames at {}x{} ({policy:?})",
            decoded.frames.len(),
            target.width,
            target.height
        );

        let frames = decoded
            .frames
            .iter()
            .map(|frame| processor.process(frame, target))
            .collect::<Result<Vec<_>>>()?;
        Self::from_frames(frames)
    }

    /// Advance the cursor, wrapping after the last frame, and return the
    /// frame it now points at.
    pub fn next_frame(&mut self) -> &RenderFrame {
        let next = match self.playhead {
            Playhead::Playing(i) if i + 1 < self.frames.len() => i + 1,
            _ => 0,
        };
        self.playhead = Playhead::Playing(next);
        &self.frames[next]
    }

    /// Index of the frame last returned by `next_frame`, if any.
    pub fn current_index(&self) -> Option<usize> {
        match self.playhead {
            Playhead::BeforeFirst => None,
            Playhead::Playing(i) => Some(i),
        }
    }

    /// The frame last returned by `next_frame`, without advancing.
    pub fn current_frame(&self) -> Option<&RenderFrame> {
        self.current_index().map(|i| &self.frames[i])
    }

    /// Rewind so the next call to `next_frame` returns the first frame.
    pub fn reset(&mut self) {
        self.playhead = Playhead::BeforeFirst;
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn frames(&self) -> &[RenderFrame] {
        &self.frames
    }

    // Layout size is always the first frame, wherever playback is.

    pub fn width(&self) -> u16 {
        self.frames[0].width()
    }

    pub fn height(&self) -> u16 {
        self.frames[0].height()
    }

    pub fn size(&self) -> Size {
        self.frames[0].size()
    }
}
