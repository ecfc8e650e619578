//! Glyph atlases: rasterising characters, packing them into one bitmap, and
//! looking up the packed glyphs while laying out text.

mod cosmic;
mod packer;

use std::collections::HashMap;

use thiserror::Error;

use crate::geometry::{IRect, Vec2};
use crate::renderer::AtlasId;

pub use cosmic::CosmicRasterizer;
pub use packer::{fill_atlas, AtlasFiller, FilledAtlas};

/// Vertical metrics shared by every glyph of one face and size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LineMetrics {
    /// Distance from the top of a line to its baseline
    pub ascent: f32,
    pub line_height: f32,
}

/// Coverage bitmap of one character as produced by a rasteriser.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterGlyph {
    pub width: u32,
    pub height: u32,
    /// Pixels from the pen position to the bitmap's left edge
    pub left: i32,
    /// Pixels from the baseline up to the bitmap's top edge
    pub top: i32,
    pub advance: f32,
    /// `width * height` coverage bytes, row-major
    pub coverage: Vec<u8>,
}

/// Placement of one packed glyph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphInfo {
    pub ch: char,
    /// Pixel rectangle inside the atlas
    pub rect: IRect,
    /// Offset from the pen position on the baseline to the bitmap's top-left
    pub bearing: Vec2,
    /// Pen movement after drawing the glyph
    pub advance: Vec2,
}

#[derive(Debug, Error)]
pub enum FillError {
    #[error("glyph {ch:?} is {width}px wide, wider than the {atlas_width}px atlas")]
    GlyphTooWide {
        ch: char,
        width: u32,
        atlas_width: u32,
    },
    #[error("atlas is full, no room for glyph {ch:?}")]
    OutOfSpace { ch: char },
    #[error("failed to rasterise {ch:?}: {reason}")]
    Rasterize { ch: char, reason: String },
}

/// Source of glyph bitmaps for the atlas filler.
pub trait GlyphRasterizer {
    /// Rasterise one character. `Ok(None)` means the face has no glyph for it.
    fn rasterize(&mut self, ch: char) -> Result<Option<RasterGlyph>, FillError>;

    fn line_metrics(&self) -> LineMetrics;
}

/// A filled atlas bound to the id it was registered under.
#[derive(Debug, Clone)]
pub struct GlyphAtlas {
    id: AtlasId,
    metrics: LineMetrics,
    /// char -> (subtexture index, placement)
    glyphs: HashMap<char, (usize, GlyphInfo)>,
}

impl GlyphAtlas {
    /// `glyphs` must be in the same order as the subtexture table that was
    /// registered under `id`.
    pub fn new(id: AtlasId, metrics: LineMetrics, glyphs: &[GlyphInfo]) -> Self {
        let glyphs = glyphs
            .iter()
            .enumerate()
            .map(|(index, info)| (info.ch, (index, *info)))
            .collect();
        Self {
            id,
            metrics,
            glyphs,
        }
    }

    pub fn id(&self) -> AtlasId {
        self.id
    }

    pub fn metrics(&self) -> LineMetrics {
        self.metrics
    }

    /// Subtexture index and placement of `ch`.
    pub fn glyph(&self, ch: char) -> Option<(usize, &GlyphInfo)> {
        self.glyphs.get(&ch).map(|(index, info)| (*index, info))
    }

    /// Width of `text` laid out on one line. Missing glyphs take no space.
    pub fn measure(&self, text: &str) -> f32 {
        text.chars()
            .filter_map(|ch| self.glyph(ch))
            .map(|(_, info)| info.advance.x)
            .sum()
    }
}

/// Printable ASCII, the default character set for UI atlases.
pub fn ascii_charset() -> Vec<char> {
    (' '..='~').collect()
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Deterministic rasteriser: every glyph is a solid block whose width
    /// depends on nothing but the configured size.
    pub struct BlockRasterizer {
        pub size: u32,
    }

    impl GlyphRasterizer for BlockRasterizer {
        fn rasterize(&mut self, ch: char) -> Result<Option<RasterGlyph>, FillError> {
            if ch == '\u{fffd}' {
                return Ok(None);
            }
            let (width, height) = if ch == ' ' {
                (0, 0)
            } else {
                (self.size / 2, self.size)
            };
            Ok(Some(RasterGlyph {
                width,
                height,
                left: 1,
                top: self.size as i32 - 2,
                advance: (self.size / 2 + 2) as f32,
                coverage: vec![255; (width * height) as usize],
            }))
        }

        fn line_metrics(&self) -> LineMetrics {
            LineMetrics {
                ascent: self.size as f32 - 2.0,
                line_height: self.size as f32 * 1.2,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::BlockRasterizer;
    use super::*;
    use crate::geometry::Rect;
    use crate::renderer::QuadBatch;

    #[test]
    fn test_glyph_atlas_lookup() {
        let mut rasterizer = BlockRasterizer { size: 10 };
        let filled = fill_atlas(64, 64, &mut rasterizer, &['a', 'b', ' ']).unwrap();

        let mut batch = QuadBatch::new(Rect::new(0.0, 0.0, 100.0, 100.0));
        let id = batch
            .register_atlas(64, 64, &filled.subtextures())
            .unwrap();
        let atlas = filled.into_glyph_atlas(id);

        let (index, info) = atlas.glyph('b').unwrap();
        assert_eq!(index, 1);
        assert_eq!(info.ch, 'b');
        assert!(atlas.glyph('z').is_none());
        assert_eq!(atlas.measure("ab b"), 7.0 * 4.0);
    }

    #[test]
    fn test_ascii_charset() {
        let chars = ascii_charset();
        assert_eq!(chars.first(), Some(&' '));
        assert_eq!(chars.last(), Some(&'~'));
        assert_eq!(chars.len(), 95);
    }
}
