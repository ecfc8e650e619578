//! Fixed and relative placement of panels and containers.
//!
//! This is not a constraint solver: every length and offset resolves against
//! the parent's extent in one step.

pub mod panels;

pub use panels::{PanelLayout, Panels};

use bitflags::bitflags;

use crate::geometry::{Rect, Size};

bitflags! {
    /// Options accepted by `container_begin`.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
    pub struct ContainerFlags: u8 {
        /// Ignore the requested x/width and span the parent's width
        const FILL_WIDTH  = 0b0001;
        /// Ignore the requested y/height and span the parent's height
        const FILL_HEIGHT = 0b0010;
        /// Consume horizontal wheel input
        const SCROLL_X    = 0b0100;
        /// Consume vertical wheel input
        const SCROLL_Y    = 0b1000;

        const FILL = Self::FILL_WIDTH.bits() | Self::FILL_HEIGHT.bits();
        const SCROLL = Self::SCROLL_X.bits() | Self::SCROLL_Y.bits();
    }
}

impl ContainerFlags {
    pub fn scrolls(&self) -> bool {
        self.intersects(ContainerFlags::SCROLL)
    }

    /// Expand `rect` to the parent extent on the axes this container fills.
    pub fn apply_fill(&self, rect: Rect, parent: Size) -> Rect {
        let mut rect = rect;
        if self.contains(ContainerFlags::FILL_WIDTH) {
            rect.x = 0.0;
            rect.width = parent.width;
        }
        if self.contains(ContainerFlags::FILL_HEIGHT) {
            rect.y = 0.0;
            rect.height = parent.height;
        }
        rect
    }
}

/// Extent of a child along one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    /// Exact pixels
    Fixed(f32),
    /// Fraction of the parent extent
    Relative(f32),
    /// Parent extent minus the given pixels
    Remaining(f32),
}

impl Length {
    pub fn resolve(&self, parent: f32) -> f32 {
        match *self {
            Length::Fixed(px) => px,
            Length::Relative(fraction) => parent * fraction,
            Length::Remaining(px) => (parent - px).max(0.0),
        }
    }
}

/// f32 converts to exact sizing
impl From<f32> for Length {
    fn from(value: f32) -> Self {
        Length::Fixed(value)
    }
}

/// Position of a child along one axis, relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Offset {
    /// Pixels from the parent's near edge
    FromStart(f32),
    /// Pixels between the child's far edge and the parent's far edge
    FromEnd(f32),
    /// Fraction of the parent extent from the near edge
    Relative(f32),
}

impl Offset {
    pub fn resolve(&self, parent: f32, extent: f32) -> f32 {
        match *self {
            Offset::FromStart(px) => px,
            Offset::FromEnd(px) => parent - px - extent,
            Offset::Relative(fraction) => parent * fraction,
        }
    }
}

impl Default for Offset {
    fn default() -> Self {
        Offset::FromStart(0.0)
    }
}

/// Where a child sits inside its parent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: Offset,
    pub y: Offset,
    pub width: Length,
    pub height: Length,
}

impl Placement {
    pub fn new(x: Offset, y: Offset, width: impl Into<Length>, height: impl Into<Length>) -> Self {
        Self {
            x,
            y,
            width: width.into(),
            height: height.into(),
        }
    }

    /// Covers the whole parent.
    pub fn fill() -> Self {
        Self::new(
            Offset::FromStart(0.0),
            Offset::FromStart(0.0),
            Length::Relative(1.0),
            Length::Relative(1.0),
        )
    }

    /// Resolve into a parent-relative rectangle.
    pub fn resolve(&self, parent: Size) -> Rect {
        let width = self.width.resolve(parent.width);
        let height = self.height.resolve(parent.height);
        Rect::new(
            self.x.resolve(parent.width, width),
            self.y.resolve(parent.height, height),
            width,
            height,
        )
    }
}
