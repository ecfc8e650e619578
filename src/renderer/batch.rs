//! CPU side of the quad renderer: per-frame pending quads plus the atlas table.
//!
//! Nothing here touches the GPU, so the whole push/sort/reset cycle can be
//! driven headless. [`Renderer`](super::Renderer) owns one of these and
//! uploads [`QuadBatch::prepare`]'s output at draw time.

use crate::geometry::{IRect, Rect, Vec2};
use crate::widgets::Color;

use super::atlas::{AtlasError, AtlasId, AtlasRegistry};
use super::constants::MAX_QUADS;
use super::gpu::QuadInstance;

/// Pending quads for one frame.
///
/// Draw order: quads are painted in ascending `z`, and quads with equal `z`
/// keep the order they were pushed in. `z` only orders quads; there is no
/// depth test, so a quad never hides another through distance.
#[derive(Debug)]
pub struct QuadBatch {
    instances: Vec<QuadInstance>,
    capacity: usize,
    viewport: Rect,
    atlases: AtlasRegistry,
}

impl QuadBatch {
    pub fn new(viewport: Rect) -> Self {
        Self::with_capacity(viewport, MAX_QUADS)
    }

    pub fn with_capacity(viewport: Rect, capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
            capacity,
            viewport,
            atlases: AtlasRegistry::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Record the window size. Quads pushed without a clip are clipped to it.
    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
    }

    pub fn atlases(&self) -> &AtlasRegistry {
        &self.atlases
    }

    /// Register an atlas's dimensions and subtexture table.
    pub fn register_atlas(
        &mut self,
        width: u32,
        height: u32,
        subtextures: &[IRect],
    ) -> Result<AtlasId, AtlasError> {
        self.atlases.register(width, height, subtextures)
    }

    fn clip_or_viewport(&self, clip: Option<Rect>) -> [f32; 4] {
        let clip = clip.unwrap_or(self.viewport);
        [clip.x, clip.y, clip.width, clip.height]
    }

    fn push(&mut self, instance: QuadInstance) {
        assert!(
            self.instances.len() < self.capacity,
            "quad batch overflow: more than {} quads pushed in one frame",
            self.capacity
        );
        self.instances.push(instance);
    }

    /// Append an untextured quad.
    ///
    /// # Panics
    ///
    /// Panics when the batch already holds its capacity of quads.
    pub fn push_colored_quad(&mut self, rect: Rect, color: Color, z: i8, clip: Option<Rect>) {
        let clip = self.clip_or_viewport(clip);
        self.push(QuadInstance::colored(
            [rect.x, rect.y, rect.width, rect.height],
            color.to_array(),
            clip,
            z,
        ));
    }

    /// Append a quad sampling one subtexture, sized to the subtexture and
    /// with its top-left corner at `position`. Coverage is drawn in white.
    ///
    /// # Panics
    ///
    /// Panics when the batch is full or when `atlas`/`subtexture` were never
    /// registered.
    pub fn push_textured_quad(
        &mut self,
        atlas: AtlasId,
        subtexture: usize,
        position: Vec2,
        z: i8,
        clip: Option<Rect>,
    ) {
        self.push_tinted_quad(atlas, subtexture, position, Color::WHITE, z, clip);
    }

    /// Like [`QuadBatch::push_textured_quad`], multiplying coverage by `tint`.
    pub fn push_tinted_quad(
        &mut self,
        atlas: AtlasId,
        subtexture: usize,
        position: Vec2,
        tint: Color,
        z: i8,
        clip: Option<Rect>,
    ) {
        let (Some(rect), Some(uv)) = (
            self.atlases.subtexture(atlas, subtexture),
            self.atlases.normalized(atlas, subtexture),
        ) else {
            panic!("unknown subtexture {subtexture} of atlas {atlas:?}");
        };
        let clip = self.clip_or_viewport(clip);
        self.push(QuadInstance::textured(
            [position.x, position.y, rect.width as f32, rect.height as f32],
            tint.to_array(),
            uv,
            atlas.0,
            clip,
            z,
        ));
    }

    /// Order pending quads for painting and expose them for upload.
    pub fn prepare(&mut self) -> &[QuadInstance] {
        // stable: equal z keeps push order
        self.instances.sort_by_key(QuadInstance::depth_key);
        &self.instances
    }

    /// Drop all pending quads. Registered atlases are kept.
    pub fn reset(&mut self) {
        log::trace!("Resetting quad batch ({} quads)", self.instances.len());
        self.instances.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Rect {
        Rect::new(0.0, 0.0, 800.0, 600.0)
    }

    #[test]
    fn test_push_then_reset() {
        let mut batch = QuadBatch::new(viewport());
        for i in 0..10 {
            batch.push_colored_quad(
                Rect::new(i as f32, 0.0, 4.0, 4.0),
                Color::WHITE,
                0,
                None,
            );
        }
        assert_eq!(batch.len(), 10);
        assert_eq!(batch.prepare().len(), 10);
        batch.reset();
        assert!(batch.is_empty());
    }

    #[test]
    fn test_fill_to_capacity() {
        let mut batch = QuadBatch::new(viewport());
        for _ in 0..MAX_QUADS {
            batch.push_colored_quad(Rect::new(0.0, 0.0, 1.0, 1.0), Color::BLACK, 0, None);
        }
        assert_eq!(batch.len(), MAX_QUADS);
    }

    #[test]
    #[should_panic(expected = "quad batch overflow")]
    fn test_overflow_is_fatal() {
        let mut batch = QuadBatch::new(viewport());
        for _ in 0..=MAX_QUADS {
            batch.push_colored_quad(Rect::new(0.0, 0.0, 1.0, 1.0), Color::BLACK, 0, None);
        }
    }

    #[test]
    fn test_missing_clip_defaults_to_viewport() {
        let mut batch = QuadBatch::new(viewport());
        batch.push_colored_quad(Rect::new(1.0, 2.0, 3.0, 4.0), Color::WHITE, 0, None);
        batch.push_colored_quad(
            Rect::new(1.0, 2.0, 3.0, 4.0),
            Color::WHITE,
            0,
            Some(Rect::new(0.0, 0.0, 2.0, 2.0)),
        );
        let quads = batch.prepare();
        assert_eq!(quads[0].clip, [0.0, 0.0, 800.0, 600.0]);
        assert_eq!(quads[1].clip, [0.0, 0.0, 2.0, 2.0]);
    }

    #[test]
    fn test_prepare_orders_by_z_and_keeps_push_order_on_ties() {
        let mut batch = QuadBatch::new(viewport());
        let quad = |x: f32| Rect::new(x, 0.0, 1.0, 1.0);
        batch.push_colored_quad(quad(0.0), Color::WHITE, 5, None);
        batch.push_colored_quad(quad(1.0), Color::WHITE, -3, None);
        batch.push_colored_quad(quad(2.0), Color::WHITE, 5, None);
        batch.push_colored_quad(quad(3.0), Color::WHITE, 0, None);
        batch.push_colored_quad(quad(4.0), Color::WHITE, -3, None);

        let order: Vec<f32> = batch.prepare().iter().map(|q| q.rect[0]).collect();
        assert_eq!(order, vec![1.0, 4.0, 3.0, 0.0, 2.0]);
    }

    #[test]
    fn test_textured_quad_uses_subtexture_size_and_normalized_uv() {
        let mut batch = QuadBatch::new(viewport());
        let atlas = batch
            .register_atlas(
                128,
                64,
                &[IRect::new(0, 0, 8, 16), IRect::new(32, 16, 16, 32)],
            )
            .unwrap();
        batch.push_textured_quad(atlas, 1, Vec2::new(10.0, 20.0), 1, None);

        let quad = batch.prepare()[0];
        assert_eq!(quad.rect, [10.0, 20.0, 16.0, 32.0]);
        assert_eq!(quad.uv_rect, [0.25, 0.25, 0.125, 0.5]);
        assert!(quad.is_textured());
        assert_eq!(quad.layer(), atlas.index() as u32);
        assert_eq!(quad.color, [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    #[should_panic(expected = "unknown subtexture")]
    fn test_unknown_subtexture_is_fatal() {
        let mut batch = QuadBatch::new(viewport());
        let atlas = batch.register_atlas(16, 16, &[IRect::new(0, 0, 4, 4)]).unwrap();
        batch.push_textured_quad(atlas, 3, Vec2::ZERO, 0, None);
    }

    #[test]
    fn test_reset_keeps_atlases() {
        let mut batch = QuadBatch::new(viewport());
        let atlas = batch.register_atlas(16, 16, &[IRect::new(0, 0, 4, 4)]).unwrap();
        batch.push_textured_quad(atlas, 0, Vec2::ZERO, 0, None);
        batch.reset();
        batch.push_textured_quad(atlas, 0, Vec2::ZERO, 0, None);
        assert_eq!(batch.len(), 1);
    }
}
