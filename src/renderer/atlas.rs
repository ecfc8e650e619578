//! Registry of texture atlases and their subtexture tables.
//!
//! The registry is pure CPU bookkeeping. [`Renderer`](super::Renderer) pairs
//! each registered atlas with one layer of its GPU texture array.

use thiserror::Error;

use crate::geometry::IRect;

use super::constants::{ATLAS_LAYER_SIZE, MAX_ATLASES};

/// Handle to a registered atlas. Also the index of its texture layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AtlasId(pub(crate) u32);

impl AtlasId {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Reasons an atlas could not be registered. Registration never panics; the
/// caller decides whether running without the atlas is acceptable.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AtlasError {
    #[error("all {max} atlas slots are in use")]
    Full { max: usize },
    #[error("atlas of {width}x{height} does not fit a {max}x{max} layer")]
    TooLarge { width: u32, height: u32, max: u32 },
    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },
    #[error("subtexture {index} lies outside the atlas bounds")]
    SubtextureOutOfBounds { index: usize },
}

#[derive(Debug, Clone)]
pub(crate) struct AtlasEntry {
    pub width: u32,
    pub height: u32,
    pub subtextures: Vec<IRect>,
}

#[derive(Debug, Default)]
pub struct AtlasRegistry {
    entries: Vec<AtlasEntry>,
}

impl AtlasRegistry {
    pub fn new() -> Self {
        Self {
            entries: Vec::with_capacity(MAX_ATLASES),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Validate and record an atlas, returning the id of its slot.
    pub fn register(
        &mut self,
        width: u32,
        height: u32,
        subtextures: &[IRect],
    ) -> Result<AtlasId, AtlasError> {
        if self.entries.len() >= MAX_ATLASES {
            return Err(AtlasError::Full { max: MAX_ATLASES });
        }
        if width == 0 || height == 0 || width > ATLAS_LAYER_SIZE || height > ATLAS_LAYER_SIZE {
            return Err(AtlasError::TooLarge {
                width,
                height,
                max: ATLAS_LAYER_SIZE,
            });
        }
        if let Some(index) = subtextures
            .iter()
            .position(|rect| !rect.fits_within(width, height))
        {
            return Err(AtlasError::SubtextureOutOfBounds { index });
        }

        let id = AtlasId(self.entries.len() as u32);
        self.entries.push(AtlasEntry {
            width,
            height,
            subtextures: subtextures.to_vec(),
        });
        Ok(id)
    }

    pub(crate) fn get(&self, id: AtlasId) -> Option<&AtlasEntry> {
        self.entries.get(id.index())
    }

    /// Pixel rectangle of one subtexture.
    pub fn subtexture(&self, id: AtlasId, index: usize) -> Option<IRect> {
        self.get(id)
            .and_then(|entry| entry.subtextures.get(index))
            .copied()
    }

    /// Subtexture rectangle normalised against its atlas: `[u, v, width, height]`.
    pub fn normalized(&self, id: AtlasId, index: usize) -> Option<[f32; 4]> {
        let entry = self.get(id)?;
        let rect = entry.subtextures.get(index)?;
        let (w, h) = (entry.width as f32, entry.height as f32);
        Some([
            rect.x as f32 / w,
            rect.y as f32 / h,
            rect.width as f32 / w,
            rect.height as f32 / h,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_assigns_sequential_ids() {
        let mut registry = AtlasRegistry::new();
        let a = registry.register(64, 64, &[IRect::new(0, 0, 8, 8)]).unwrap();
        let b = registry.register(32, 32, &[]).unwrap();
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_register_beyond_capacity_fails_softly() {
        let mut registry = AtlasRegistry::new();
        for _ in 0..MAX_ATLASES {
            registry.register(8, 8, &[]).unwrap();
        }
        assert_eq!(
            registry.register(8, 8, &[]),
            Err(AtlasError::Full { max: MAX_ATLASES })
        );
        assert_eq!(registry.len(), MAX_ATLASES);
    }

    #[test]
    fn test_register_rejects_oversized_atlas() {
        let mut registry = AtlasRegistry::new();
        let result = registry.register(ATLAS_LAYER_SIZE + 1, 4, &[]);
        assert!(matches!(result, Err(AtlasError::TooLarge { .. })));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_register_rejects_out_of_bounds_subtexture() {
        let mut registry = AtlasRegistry::new();
        let subtextures = [IRect::new(0, 0, 4, 4), IRect::new(14, 0, 4, 4)];
        assert_eq!(
            registry.register(16, 16, &subtextures),
            Err(AtlasError::SubtextureOutOfBounds { index: 1 })
        );

        // edges past i32::MAX are rejected, not wrapped
        let overflowing = [IRect::new(i32::MAX, 0, 1, 1), IRect::new(0, i32::MAX, 1, 1)];
        assert_eq!(
            registry.register(16, 16, &overflowing),
            Err(AtlasError::SubtextureOutOfBounds { index: 0 })
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn test_normalized_coordinates() {
        let mut registry = AtlasRegistry::new();
        let id = registry
            .register(256, 128, &[IRect::new(64, 32, 16, 64)])
            .unwrap();
        assert_eq!(
            registry.normalized(id, 0),
            Some([0.25, 0.25, 0.0625, 0.5])
        );
        assert_eq!(registry.normalized(id, 1), None);
    }
}
