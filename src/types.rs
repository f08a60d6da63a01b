//! Shared boundary types for the engine core.
//!
//! This module defines the primitives every other module speaks in:
//! - Geometry: `Coord` and `Size`, with rectangle membership tests
//! - Image Processor → Animation → Renderer: `RenderFrame` made of `Cell`s

use serde::{Deserialize, Serialize};

use crate::color::GameColor;
use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Geometry primitives
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// True if `self` lies inside the closed rectangle spanned by `start`
    /// and `end`. Corner order does not matter.
    pub fn is_in_range(&self, start: Coord, end: Coord) -> bool {
        let (min_x, max_x) = (start.x.min(end.x), start.x.max(end.x));
        let (min_y, max_y) = (start.y.min(end.y), start.y.max(end.y));
        (min_x..=max_x).contains(&self.x) && (min_y..=max_y).contains(&self.y)
    }

    /// True if `self` lies inside the `size.width` x `size.height` cells
    /// anchored at `start`. An empty size contains nothing.
    pub fn is_in_area(&self, start: Coord, size: Size) -> bool {
        let dx = i64::from(self.x) - i64::from(start.x);
        let dy = i64::from(self.y) - i64::from(start.y);
        (0..i64::from(size.width)).contains(&dx) && (0..i64::from(size.height)).contains(&dy)
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: u16,
    pub height: u16,
}

impl Size {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

// ---------------------------------------------------------------------------
// Image Processor → Animation → Renderer boundary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub glyph: char,
    pub fg: GameColor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg: Option<GameColor>,
}

impl Cell {
    pub fn new(glyph: char, fg: GameColor) -> Self {
        Cell { glyph, fg, bg: None }
    }

    pub fn with_background(mut self, bg: GameColor) -> Self {
        self.bg = Some(bg);
        self
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell {
            glyph: ' ',
            fg: GameColor::WHITE,
            bg: None,
        }
    }
}

/// A pre-converted grid of console cells, ready to be drawn as-is.
///
/// Cells are stored row-major. The grid is immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderFrame {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl RenderFrame {
    /// Build a frame from row-major cells.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if either dimension is zero or the cell count does
    /// not match `width * height`.
    pub fn new(width: u16, height: u16, cells: Vec<Cell>) -> Result<Self> {
        let size = Size::new(width, height);
        if size.is_empty() {
            return Err(Error::InvalidArgument(format!(
                "frame dimensions must be positive, got {width}x{height}"
            )));
        }
        if cells.len() != size.area() {
            return Err(Error::InvalidArgument(format!(
                "expected {} cells for a {width}x{height} frame, got {}",
                size.area(),
                cells.len(),
            )));
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// A frame where every cell is `cell`.
    pub fn filled(size: Size, cell: Cell) -> Result<Self> {
        Self::new(size.width, size.height, vec![cell; size.area()])
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn cell(&self, at: Coord) -> Option<&Cell> {
        if !at.is_in_area(Coord::new(0, 0), self.size()) {
            return None;
        }
        self.cells
            .get(at.y as usize * self.width as usize + at.x as usize)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width as usize)
    }
}
