//! Immediate-mode UI for editor shells, drawn through one batched quad
//! pipeline.
//!
//! A frame is built by calling widget methods on [`widgets::Ui`]. Each call
//! hit-tests against the pointer, updates the hot/active state and appends
//! quads to a [`renderer::QuadBatch`], which a [`renderer::Renderer`] uploads
//! and draws in a single call.

pub mod clip;
pub mod font;
pub mod geometry;
pub mod interaction;
pub mod layout;
pub mod renderer;
pub mod tree;
pub mod widgets;

pub mod prelude {
    pub use crate::font::{ascii_charset, fill_atlas, CosmicRasterizer, GlyphAtlas};
    pub use crate::geometry::{IRect, Rect, Size, Vec2};
    pub use crate::interaction::{Active, WidgetId};
    pub use crate::layout::{ContainerFlags, Length, Offset, PanelLayout, Placement};
    pub use crate::renderer::{GpuContext, QuadBatch, Renderer};
    pub use crate::tree::{FileTree, FsListing, TreeAction};
    pub use crate::widgets::{Color, Theme, Ui, UiContext};
}
