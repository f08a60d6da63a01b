//! Frame sources — where animation bytes come from and how they are decoded.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use image::codecs::gif::GifDecoder;
use image::{AnimationDecoder, ImageDecoder, ImageFormat, RgbaImage};
use log::{debug, info};

use crate::error::{Error, Result};
use crate::types::Size;

/// Every frame of a multi-frame container, composited to the full canvas,
/// in source order.
#[derive(Debug, Clone)]
pub struct DecodedFrames {
    pub native_size: Size,
    pub frames: Vec<RgbaImage>,
}

pub fn read_path(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    debug!("reading frame source {}", path.display());
    Ok(fs::read(path)?)
}

/// Download a frame source. Any transport error or non-success status is
/// reported as `Upstream`.
pub fn fetch_url(url: &str) -> Result<Vec<u8>> {
    let upstream = |reason: String| Error::Upstream {
        url: url.to_string(),
        reason,
    };

    info!("fetching frame source {url}");
    let response = reqwest::blocking::get(url)
        .and_then(|response| response.error_for_status())
        .map_err(|e| upstream(e.to_string()))?;
    let bytes = response.bytes().map_err(|e| upstream(e.to_string()))?;
    debug!("fetched {} bytes from {url}", bytes.len());
    Ok(bytes.to_vec())
}

/// Decode an animated container.
///
/// # Errors
///
/// `InvalidFormat` if the bytes are not a GIF or hold fewer than two
/// frames, `Decode` if the GIF itself is corrupt.
pub fn decode_frames(bytes: &[u8]) -> Result<DecodedFrames> {
    let format = image::guess_format(bytes)
        .map_err(|_| Error::InvalidFormat("unrecognized image container".into()))?;
    if format != ImageFormat::Gif {
        return Err(Error::InvalidFormat(format!(
            "{format:?} is not an animated format, expected a GIF"
        )));
    }

    let decoder = GifDecoder::new(Cursor::new(bytes))?;
    let (width, height) = decoder.dimensions();
    let native_size = Size::new(
        u16::try_from(width).map_err(|_| oversized(width, height))?,
        u16::try_from(height).map_err(|_| oversized(width, height))?,
    );

    let frames: Vec<RgbaImage> = decoder
        .into_frames()
        .collect_frames()?
        .into_iter()
        .map(|frame| frame.into_buffer())
        .collect();

    if frames.len() < 2 {
        return Err(Error::InvalidFormat(format!(
            "GIF holds {} frame(s), an animation needs at least 2",
            frames.len()
        )));
    }

    debug!(
        "decoded {} frames at {}x{}",
        frames.len(),
        native_size.width,
        native_size.height
    );
    Ok(DecodedFrames {
        native_size,
        frames,
    })
}

fn oversized(width: u32, height: u32) -> Error {
    Error::InvalidFormat(format!("canvas {width}x{height} is too large"))
}
