//! The editor shell: a side panel on the left, a bottom panel under the main
//! area, and the main area filling what is left.

use crate::geometry::Rect;

/// Sizes of the shell's docked panels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelLayout {
    pub side_width: f32,
    pub side_hidden: bool,
    pub bottom_height: f32,
    pub bottom_hidden: bool,
}

impl Default for PanelLayout {
    fn default() -> Self {
        Self {
            side_width: 450.0,
            side_hidden: false,
            bottom_height: 400.0,
            bottom_hidden: false,
        }
    }
}

/// Absolute rectangles of the shell panels for one viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Panels {
    pub side: Rect,
    pub bottom: Rect,
    pub main: Rect,
}

impl PanelLayout {
    pub fn side_width(mut self, width: f32) -> Self {
        self.side_width = width;
        self
    }

    pub fn bottom_height(mut self, height: f32) -> Self {
        self.bottom_height = height;
        self
    }

    pub fn hide_side(mut self, hidden: bool) -> Self {
        self.side_hidden = hidden;
        self
    }

    pub fn hide_bottom(mut self, hidden: bool) -> Self {
        self.bottom_hidden = hidden;
        self
    }

    /// Split `viewport` into the three panels.
    ///
    /// Panel sizes are clamped to the viewport, so a window smaller than the
    /// configured panels leaves the main area empty instead of negative.
    pub fn resolve(&self, viewport: Rect) -> Panels {
        let side_width = if self.side_hidden {
            0.0
        } else {
            self.side_width.clamp(0.0, viewport.width)
        };
        let bottom_height = if self.bottom_hidden {
            0.0
        } else {
            self.bottom_height.clamp(0.0, viewport.height)
        };

        let rest_x = viewport.x + side_width;
        let rest_width = viewport.width - side_width;
        let main_height = viewport.height - bottom_height;

        Panels {
            side: Rect::new(viewport.x, viewport.y, side_width, viewport.height),
            bottom: Rect::new(
                rest_x,
                viewport.y + main_height,
                rest_width,
                bottom_height,
            ),
            main: Rect::new(rest_x, viewport.y, rest_width, main_height),
        }
    }
}
