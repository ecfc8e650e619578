use cosmic_text::{
    Attrs, Buffer, Family, FontSystem, Metrics, Shaping, SwashCache, SwashContent, Weight,
};

use super::{FillError, GlyphRasterizer, LineMetrics, RasterGlyph};

/// Rasterises characters from the system's sans-serif face with cosmic-text.
pub struct CosmicRasterizer {
    font_system: FontSystem,
    swash_cache: SwashCache,
    metrics: Metrics,
    weight: Weight,
    line: LineMetrics,
}

impl CosmicRasterizer {
    /// Regular weight at `font_size` pixels.
    pub fn new(font_size: f32) -> Self {
        Self::with_weight(font_size, Weight::NORMAL)
    }

    pub fn bold(font_size: f32) -> Self {
        Self::with_weight(font_size, Weight::BOLD)
    }

    fn with_weight(font_size: f32, weight: Weight) -> Self {
        let mut font_system = FontSystem::new();
        let metrics = Metrics::new(font_size, font_size * 1.2);

        let mut line = LineMetrics {
            ascent: font_size * 0.8,
            line_height: font_size * 1.2,
        };
        let mut buffer = Buffer::new(&mut font_system, metrics);
        buffer.set_text(
            &mut font_system,
            "M",
            &Attrs::new().family(Family::SansSerif).weight(weight),
            Shaping::Advanced,
            None,
        );
        buffer.shape_until_scroll(&mut font_system, false);
        if let Some(run) = buffer.layout_runs().next() {
            // line_y is the baseline offset from the top of the first line
            line.ascent = run.line_y;
            line.line_height = run.line_height;
        }

        log::debug!(
            "Rasteriser at {}px: ascent {}, line height {}",
            font_size,
            line.ascent,
            line.line_height
        );

        Self {
            font_system,
            swash_cache: SwashCache::new(),
            metrics,
            weight,
            line,
        }
    }
}

impl GlyphRasterizer for CosmicRasterizer {
    fn rasterize(&mut self, ch: char) -> Result<Option<RasterGlyph>, FillError> {
        let mut utf8 = [0u8; 4];
        let text = ch.encode_utf8(&mut utf8);

        let mut buffer = Buffer::new(&mut self.font_system, self.metrics);
        buffer.set_text(
            &mut self.font_system,
            text,
            &Attrs::new().family(Family::SansSerif).weight(self.weight),
            Shaping::Advanced,
            None,
        );
        buffer.shape_until_scroll(&mut self.font_system, false);

        let Some(glyph) = buffer
            .layout_runs()
            .next()
            .and_then(|run| run.glyphs.first().cloned())
        else {
            return Ok(None);
        };
        if glyph.glyph_id == 0 {
            return Ok(None);
        }

        let cache_key = glyph.physical((0., 0.), 1.0).cache_key;
        let Some(image) = self
            .swash_cache
            .get_image_uncached(&mut self.font_system, cache_key)
        else {
            // Whitespace has an advance but no bitmap
            return Ok(Some(RasterGlyph {
                width: 0,
                height: 0,
                left: 0,
                top: 0,
                advance: glyph.w,
                coverage: Vec::new(),
            }));
        };

        let width = image.placement.width;
        let height = image.placement.height;
        let pixels = (width * height) as usize;
        let coverage = match image.content {
            SwashContent::Mask => image.data,
            // Alpha channel of color bitmaps
            SwashContent::Color => image.data.chunks_exact(4).map(|px| px[3]).collect(),
            // Average subpixel channels
            SwashContent::SubpixelMask => image
                .data
                .chunks_exact(3)
                .map(|px| ((px[0] as u16 + px[1] as u16 + px[2] as u16) / 3) as u8)
                .collect(),
        };
        if coverage.len() != pixels {
            return Err(FillError::Rasterize {
                ch,
                reason: format!("expected {} coverage bytes, got {}", pixels, coverage.len()),
            });
        }

        Ok(Some(RasterGlyph {
            width,
            height,
            left: image.placement.left,
            top: image.placement.top,
            advance: glyph.w,
            coverage,
        }))
    }

    fn line_metrics(&self) -> LineMetrics {
        self.line
    }
}
