//! Image Processor — converts one decoded bitmap frame into a `RenderFrame`.
//!
//! The processor is the seam between pixel data and console cells. The
//! animation only ever talks to the [`ImageProcessor`] trait; the bundled
//! [`PaletteProcessor`] is one way of doing it.

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use crate::color::GameColor;
use crate::color::palette::ColorPalette;
use crate::error::{Error, Result};
use crate::types::{Cell, RenderFrame, Size};

/// Converts a decoded frame plus a target size into console cells.
///
/// Implementations must be deterministic for a given input pair.
pub trait ImageProcessor {
    fn process(&self, frame: &RgbaImage, size: Size) -> Result<RenderFrame>;
}

impl<F> ImageProcessor for F
where
    F: Fn(&RgbaImage, Size) -> Result<RenderFrame>,
{
    fn process(&self, frame: &RgbaImage, size: Size) -> Result<RenderFrame> {
        self(frame, size)
    }
}

/// How the target size of an animation is chosen. Resolved once, before
/// any frame is processed.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum SizePolicy {
    /// Keep the source's own width and height.
    #[default]
    Native,
    /// Scale every frame to exactly this size.
    Absolute(Size),
    /// Scale by a percentage of the native size (`100.0` keeps it).
    Relative(f32),
}

impl SizePolicy {
    /// # Errors
    ///
    /// `InvalidArgument` for an empty native or absolute size, or a
    /// percentage that is not a finite positive number.
    pub fn resolve(&self, native: Size) -> Result<Size> {
        let size = match *self {
            SizePolicy::Native => native,
            SizePolicy::Absolute(size) => size,
            SizePolicy::Relative(percent) => {
                if !percent.is_finite() || percent <= 0.0 {
                    return Err(Error::InvalidArgument(format!(
                        "scale percentage must be positive, got {percent}"
                    )));
                }
                let scale = |dim: u16| {
                    (f32::from(dim) * percent / 100.0)
                        .round()
                        .clamp(1.0, f32::from(u16::MAX)) as u16
                };
                Size::new(scale(native.width), scale(native.height))
            }
        };

        if size.is_empty() {
            return Err(Error::InvalidArgument(format!(
                "target size must be positive, got {}x{}",
                size.width, size.height
            )));
        }
        Ok(size)
    }
}

/// Quantizes every pixel onto a console palette and draws it as `glyph`.
#[derive(Debug, Clone)]
pub struct PaletteProcessor {
    palette: ColorPalette,
    glyph: char,
}

impl PaletteProcessor {
    pub const DEFAULT_GLYPH: char = '\u{2588}';

    pub fn new(palette: ColorPalette) -> Self {
        Self {
            palette,
            glyph: Self::DEFAULT_GLYPH,
        }
    }

    pub fn with_glyph(mut self, glyph: char) -> Self {
        self.glyph = glyph;
        self
    }

    pub fn palette(&self) -> &ColorPalette {
        &self.palette
    }

    fn cell_for(&self, pixel: &Rgba<u8>) -> Cell {
        let [r, g, b, a] = pixel.0;
        if a == 0 {
            return Cell::default();
        }
        let fg = self.palette.nearest_color(GameColor::from_rgb(r, g, b));
        Cell::new(self.glyph, fg)
    }
}

impl Default for PaletteProcessor {
    fn default() -> Self {
        Self::new(ColorPalette::default())
    }
}

impl ImageProcessor for PaletteProcessor {
    fn process(&self, frame: &RgbaImage, size: Size) -> Result<RenderFrame> {
        let (width, height) = (u32::from(size.width), u32::from(size.height));
        let resized;
        let source = if frame.dimensions() == (width, height) {
            frame
        } else {
            resized = imageops::resize(frame, width, height, FilterType::Triangle);
            &resized
        };

        let cells = source.pixels().map(|p| self.cell_for(p)).collect();
        RenderFrame::new(size.width, size.height, cells)
    }
}
