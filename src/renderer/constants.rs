//! Renderer limits to avoid magic numbers throughout the codebase.

/// Quads that may be pushed between two draws. Pushing more is a fatal error.
pub const MAX_QUADS: usize = 2048;

/// Texture atlases that may be registered for the renderer's lifetime.
pub const MAX_ATLASES: usize = 16;

/// Side length in pixels of one atlas layer. Atlases larger than this on
/// either axis are rejected at registration.
pub const ATLAS_LAYER_SIZE: u32 = 1024;

/// Container nesting levels, including the viewport root.
pub const MAX_CLIP_DEPTH: usize = 32;
