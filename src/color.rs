use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use exhibition_explorer::data::aggregate::ArtistCount;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: artist → Color32
// ---------------------------------------------------------------------------

/// One colour per plotted artist, assigned in ranking order.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
}

impl ColorMap {
    pub fn for_artists(artists: &[ArtistCount]) -> Self {
        let palette = generate_palette(artists.len());
        let mapping = artists
            .iter()
            .zip(palette)
            .map(|(a, c)| (a.artist.clone(), c))
            .collect();
        ColorMap { mapping }
    }

    pub fn color_for(&self, artist: &str) -> Color32 {
        self.mapping.get(artist).copied().unwrap_or(Color32::GRAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_colours_are_distinct() {
        let palette = generate_palette(10);
        assert_eq!(palette.len(), 10);
        for (i, a) in palette.iter().enumerate() {
            for b in &palette[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn unknown_artist_is_grey() {
        let map = ColorMap::for_artists(&[ArtistCount {
            artist: "A B".into(),
            count: 1,
        }]);
        assert_ne!(map.color_for("A B"), Color32::GRAY);
        assert_eq!(map.color_for("C D"), Color32::GRAY);
    }
}
