//! Renderer — writes `RenderFrame`s to a terminal.
//!
//! The renderer is stateless. It does not know about animation or input;
//! it draws whatever frame it is handed at the requested origin.

use std::io::Write;

use crossterm::{cursor, queue, style};

use crate::error::Result;
use crate::types::{Cell, RenderFrame};

pub struct Renderer;

impl Renderer {
    /// Draw `frame` with its top-left corner at (`column`, `row`).
    pub fn draw<W: Write>(out: &mut W, frame: &RenderFrame, column: u16, row: u16) -> Result<()> {
        for (y, cells) in frame.rows().enumerate() {
            queue!(out, cursor::MoveTo(column, row.saturating_add(y as u16)))?;
            for cell in cells {
                queue!(
                    out,
                    style::PrintStyledContent(style::StyledContent::new(
                        to_content_style(cell),
                        cell.glyph
                    ))
                )?;
            }
        }
        out.flush()?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Style conversion
// ---------------------------------------------------------------------------

pub fn to_content_style(cell: &Cell) -> style::ContentStyle {
    let mut cs = style::ContentStyle::default();
    cs.foreground_color = Some(cell.fg.into());
    if let Some(bg) = cell.bg {
        cs.background_color = Some(bg.into());
    }
    cs
}
