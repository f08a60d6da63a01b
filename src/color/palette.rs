//! The 16-color console palette cells are quantized to.

use serde::{Deserialize, Serialize};

use super::GameColor;

pub const PALETTE_LEN: usize = 16;

/// Ordered console palette. Index `i` is the color the terminal shows for
/// console color `i` (black, dark blue, dark green, ... white).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorPalette {
    colors: [GameColor; PALETTE_LEN],
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::from_colors([
            GameColor::new(0x000000),
            GameColor::new(0x000080),
            GameColor::new(0x008000),
            GameColor::new(0x008080),
            GameColor::new(0x800000),
            GameColor::new(0x800080),
            GameColor::new(0x808000),
            GameColor::new(0xC0C0C0),
            GameColor::new(0x808080),
            GameColor::new(0x0000FF),
            GameColor::new(0x00FF00),
            GameColor::new(0x00FFFF),
            GameColor::new(0xFF0000),
            GameColor::new(0xFF00FF),
            GameColor::new(0xFFFF00),
            GameColor::new(0xFFFFFF),
        ])
    }
}

impl ColorPalette {
    pub fn from_colors(colors: [GameColor; PALETTE_LEN]) -> Self {
        Self { colors }
    }

    pub fn colors(&self) -> &[GameColor; PALETTE_LEN] {
        &self.colors
    }

    pub fn get(&self, index: usize) -> Option<GameColor> {
        self.colors.get(index).copied()
    }

    /// Exact lookup. `None` if the palette does not contain `color`.
    pub fn index_of(&self, color: GameColor) -> Option<usize> {
        self.colors.iter().position(|c| *c == color)
    }

    /// Index of the closest palette entry; ties go to the lower index.
    pub fn nearest(&self, color: GameColor) -> usize {
        self.colors
            .iter()
            .enumerate()
            .min_by_key(|(_, c)| c.distance_sq(color))
            .map_or(0, |(i, _)| i)
    }

    pub fn nearest_color(&self, color: GameColor) -> GameColor {
        self.colors[self.nearest(color)]
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn exact_lookup_misses_off_palette_colors() {
        let palette = ColorPalette::default();
        assert_eq!(palette.index_of(GameColor::RED), Some(12));
        assert_eq!(palette.index_of(GameColor::from_rgb(250, 0, 0)), None);
    }

    #[test]
    fn nearest_snaps_to_closest_entry() {
        let palette = ColorPalette::default();
        assert_eq!(palette.nearest(GameColor::from_rgb(250, 5, 5)), 12);
        assert_eq!(palette.nearest(GameColor::from_rgb(10, 10, 10)), 0);
        assert_eq!(
            palette.nearest_color(GameColor::from_rgb(200, 200, 190)),
            GameColor::new(0xC0C0C0)
        );
    }

    #[test]
    fn nearest_prefers_lower_index_on_ties() {
        let mut colors = [GameColor::WHITE; PALETTE_LEN];
        colors[3] = GameColor::BLACK;
        colors[7] = GameColor::BLACK;
        let palette = ColorPalette::from_colors(colors);
        assert_eq!(palette.nearest(GameColor::BLACK), 3);
    }

    #[test]
    fn round_trips_through_json() {
        let palette = ColorPalette::default();
        let json = serde_json::to_string(&palette).unwrap();
        assert!(json.starts_with("[\"#000000\",\"#000080\""));
        let back: ColorPalette = serde_json::from_str(&json).unwrap();
        assert_eq!(back, palette);
    }
}
