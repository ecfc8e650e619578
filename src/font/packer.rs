//! Shelf packing of glyph bitmaps into a single-channel atlas.
//!
//! Glyphs are placed left to right on the current shelf; when a glyph does
//! not fit horizontally a new shelf starts under the tallest glyph placed so
//! far. Fills are incremental: a filler can take several batches of
//! characters, and a failed batch leaves the shelf state as it was.

use image::{GrayImage, Luma};

use crate::geometry::{IRect, Vec2};
use crate::renderer::AtlasId;

use super::{FillError, GlyphAtlas, GlyphInfo, GlyphRasterizer, LineMetrics};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Shelf {
    x: u32,
    y: u32,
    /// Bottom of the tallest glyph on any shelf so far
    max_y: u32,
}

pub struct AtlasFiller {
    image: GrayImage,
    shelf: Shelf,
    glyphs: Vec<GlyphInfo>,
    metrics: LineMetrics,
}

impl AtlasFiller {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: GrayImage::new(width, height),
            shelf: Shelf::default(),
            glyphs: Vec::new(),
            metrics: LineMetrics::default(),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Glyphs packed so far, in subtexture order.
    pub fn glyphs(&self) -> &[GlyphInfo] {
        &self.glyphs
    }

    /// Rasterise and pack `chars`. Characters the face lacks are skipped.
    ///
    /// On error neither the shelf position nor the glyph list change, so
    /// the caller can retry the batch in a fresh atlas.
    pub fn fill<R>(&mut self, rasterizer: &mut R, chars: &[char]) -> Result<usize, FillError>
    where
        R: GlyphRasterizer + ?Sized,
    {
        let saved = self.shelf;
        let saved_len = self.glyphs.len();

        match self.fill_inner(rasterizer, chars) {
            Ok(added) => {
                self.metrics = rasterizer.line_metrics();
                log::debug!(
                    "Packed {} glyphs, shelf at ({}, {})",
                    added,
                    self.shelf.x,
                    self.shelf.y
                );
                Ok(added)
            }
            Err(err) => {
                self.shelf = saved;
                self.glyphs.truncate(saved_len);
                Err(err)
            }
        }
    }

    fn fill_inner<R>(&mut self, rasterizer: &mut R, chars: &[char]) -> Result<usize, FillError>
    where
        R: GlyphRasterizer + ?Sized,
    {
        let (atlas_width, atlas_height) = self.image.dimensions();
        let mut added = 0;

        for &ch in chars {
            let Some(glyph) = rasterizer.rasterize(ch)? else {
                log::debug!("No glyph for {:?}, skipping", ch);
                continue;
            };

            if glyph.width > atlas_width {
                return Err(FillError::GlyphTooWide {
                    ch,
                    width: glyph.width,
                    atlas_width,
                });
            }
            if self.shelf.x + glyph.width > atlas_width {
                self.shelf.x = 0;
                self.shelf.y = self.shelf.max_y;
            }
            if self.shelf.y + glyph.height > atlas_height {
                return Err(FillError::OutOfSpace { ch });
            }

            let (x, y) = (self.shelf.x, self.shelf.y);
            for row in 0..glyph.height {
                for col in 0..glyph.width {
                    let value = glyph.coverage[(row * glyph.width + col) as usize];
                    self.image.put_pixel(x + col, y + row, Luma([value]));
                }
            }

            self.glyphs.push(GlyphInfo {
                ch,
                rect: IRect::new(x as i32, y as i32, glyph.width as i32, glyph.height as i32),
                bearing: Vec2::new(glyph.left as f32, -glyph.top as f32),
                advance: Vec2::new(glyph.advance, 0.0),
            });

            self.shelf.x += glyph.width;
            self.shelf.max_y = self.shelf.max_y.max(y + glyph.height);
            added += 1;
        }

        Ok(added)
    }

    pub fn finish(self) -> FilledAtlas {
        FilledAtlas {
            image: self.image,
            glyphs: self.glyphs,
            metrics: self.metrics,
        }
    }
}

/// A packed bitmap ready for registration.
#[derive(Debug, Clone)]
pub struct FilledAtlas {
    pub image: GrayImage,
    pub glyphs: Vec<GlyphInfo>,
    pub metrics: LineMetrics,
}

impl FilledAtlas {
    /// Subtexture table in glyph order.
    pub fn subtextures(&self) -> Vec<IRect> {
        self.glyphs.iter().map(|glyph| glyph.rect).collect()
    }

    pub fn into_glyph_atlas(self, id: AtlasId) -> GlyphAtlas {
        GlyphAtlas::new(id, self.metrics, &self.glyphs)
    }
}

/// Pack `chars` into a fresh `width` x `height` atlas in one go.
pub fn fill_atlas<R>(
    width: u32,
    height: u32,
    rasterizer: &mut R,
    chars: &[char],
) -> Result<FilledAtlas, FillError>
where
    R: GlyphRasterizer + ?Sized,
{
    let mut filler = AtlasFiller::new(width, height);
    filler.fill(rasterizer, chars)?;
    Ok(filler.finish())
}
