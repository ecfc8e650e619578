//! Colors and the palette widgets draw with.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from `0xRRGGBB`.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
            a: 1.0,
        }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);
}

impl Default for Color {
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

impl From<Color> for wgpu::Color {
    fn from(color: Color) -> Self {
        wgpu::Color {
            r: color.r as f64,
            g: color.g as f64,
            b: color.b as f64,
            a: color.a as f64,
        }
    }
}

/// Colors and metrics shared by every widget in a [`UiContext`].
///
/// [`UiContext`]: crate::widgets::UiContext
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Button and row background when neither hovered nor pressed
    pub idle: Color,
    /// Background under the pointer
    pub hot: Color,
    /// Background of the widget holding the press
    pub active: Color,
    pub text: Color,
    pub side_panel: Color,
    pub bottom_panel: Color,
    pub main_panel: Color,
    /// Height of one tree/list row in pixels
    pub row_height: f32,
    /// Horizontal indentation per tree depth level
    pub indent: f32,
    /// Gap between the row's left edge (after indentation) and its label
    pub text_padding: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            idle: Color::from_hex(0x2e2b28),
            hot: Color::from_hex(0x404040),
            active: Color::from_hex(0x808080),
            text: Color::from_hex(0xd8d4cf),
            side_panel: Color::from_hex(0x363330),
            bottom_panel: Color::from_hex(0x24221f),
            main_panel: Color::from_hex(0x141414),
            row_height: 24.0,
            indent: 16.0,
            text_padding: 6.0,
        }
    }
}

impl Theme {
    pub fn idle(mut self, color: Color) -> Self {
        self.idle = color;
        self
    }

    pub fn hot(mut self, color: Color) -> Self {
        self.hot = color;
        self
    }

    pub fn active(mut self, color: Color) -> Self {
        self.active = color;
        self
    }

    pub fn text(mut self, color: Color) -> Self {
        self.text = color;
        self
    }

    pub fn row_height(mut self, height: f32) -> Self {
        self.row_height = height;
        self
    }

    pub fn indent(mut self, indent: f32) -> Self {
        self.indent = indent;
        self
    }

    pub fn text_padding(mut self, padding: f32) -> Self {
        self.text_padding = padding;
        self
    }
}
