use quill::font::{fill_atlas, FillError, GlyphRasterizer, LineMetrics, RasterGlyph};
use quill::geometry::{Rect, Vec2};
use quill::renderer::constants::{MAX_ATLASES, MAX_QUADS};
use quill::renderer::{AtlasError, QuadBatch};
use quill::widgets::{Color, UiContext};

const VIEWPORT: Rect = Rect::new(0.0, 0.0, 640.0, 480.0);

/// Every glyph is a solid 4x8 block sitting on the baseline.
struct SolidGlyphs;

impl GlyphRasterizer for SolidGlyphs {
    fn rasterize(&mut self, ch: char) -> Result<Option<RasterGlyph>, FillError> {
        if ch == ' ' {
            return Ok(Some(RasterGlyph {
                width: 0,
                height: 0,
                left: 0,
                top: 0,
                advance: 3.0,
                coverage: Vec::new(),
            }));
        }
        Ok(Some(RasterGlyph {
            width: 4,
            height: 8,
            left: 0,
            top: 8,
            advance: 5.0,
            coverage: vec![255; 32],
        }))
    }

    fn line_metrics(&self) -> LineMetrics {
        LineMetrics {
            ascent: 8.0,
            line_height: 10.0,
        }
    }
}

#[test]
#[should_panic(expected = "quad batch overflow")]
fn test_overflow_is_fatal() {
    let mut batch = QuadBatch::new(VIEWPORT);
    for _ in 0..=MAX_QUADS {
        batch.push_colored_quad(Rect::new(0.0, 0.0, 1.0, 1.0), Color::WHITE, 0, None);
    }
}

#[test]
fn test_full_batch_is_accepted() {
    let mut batch = QuadBatch::new(VIEWPORT);
    for _ in 0..MAX_QUADS {
        batch.push_colored_quad(Rect::new(0.0, 0.0, 1.0, 1.0), Color::WHITE, 0, None);
    }
    assert_eq!(batch.len(), MAX_QUADS);
    batch.reset();
    assert!(batch.is_empty());
}

#[test]
fn test_quads_paint_in_ascending_z_then_push_order() {
    let mut batch = QuadBatch::new(VIEWPORT);
    let colors = [
        (Color::from_hex(0x000001), 5),
        (Color::from_hex(0x000002), -3),
        (Color::from_hex(0x000003), 5),
        (Color::from_hex(0x000004), 0),
    ];
    for (color, z) in colors {
        batch.push_colored_quad(Rect::new(0.0, 0.0, 1.0, 1.0), color, z, None);
    }
    let order: Vec<[f32; 4]> = batch.prepare().iter().map(|quad| quad.color).collect();
    let expected: Vec<[f32; 4]> = [1, 3, 0, 2].iter().map(|&i| colors[i].0.to_array()).collect();
    assert_eq!(order, expected);
}

#[test]
fn test_atlas_limit() {
    let mut batch = QuadBatch::new(VIEWPORT);
    for _ in 0..MAX_ATLASES {
        batch.register_atlas(8, 8, &[]).unwrap();
    }
    assert!(matches!(
        batch.register_atlas(8, 8, &[]),
        Err(AtlasError::Full { .. })
    ));
}

#[test]
fn test_filled_atlas_drives_labels() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut batch = QuadBatch::new(VIEWPORT);
    let filled = fill_atlas(64, 64, &mut SolidGlyphs, &['a', 'b', ' ']).unwrap();
    let id = batch
        .register_atlas(64, 64, &filled.subtextures())
        .unwrap();
    let atlas = filled.into_glyph_atlas(id);
    assert_eq!(atlas.measure("a b"), 13.0);

    let mut ctx = UiContext::new(VIEWPORT);
    ctx.set_fonts(atlas, None);
    let width = ctx.frame(&mut batch, |ui| ui.label(Vec2::new(2.0, 2.0), "a b", false));
    assert_eq!(width, 13.0);

    // the space has no bitmap and pushes nothing
    let quads = batch.prepare();
    assert_eq!(quads.len(), 2);
    assert_eq!(quads[0].rect, [2.0, 2.0, 4.0, 8.0]);
    assert_eq!(quads[1].rect, [10.0, 2.0, 4.0, 8.0]);
    assert_eq!(quads[1].uv_rect, [4.0 / 64.0, 0.0, 4.0 / 64.0, 8.0 / 64.0]);
}
