//! Per-window UI state and the per-frame handle widgets draw through.

use std::collections::HashMap;

use crate::clip::ClipStack;
use crate::font::GlyphAtlas;
use crate::geometry::{Rect, Size, Vec2};
use crate::interaction::{Interaction, WidgetId};
use crate::renderer::QuadBatch;

use super::style::{Color, Theme};

/// Pointer state fed by the host between frames.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputState {
    /// Absolute pointer position in window pixels
    pub pointer: Vec2,
    pub button_down: bool,
    /// Wheel displacement accumulated since the last frame, in pixels.
    /// Positive values move content down or right.
    pub scroll: Vec2,
}

/// Persistent scroll position of one container.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollState {
    /// Displacement of the container's children, always in `[-(content - visible), 0]`
    pub offset: Vec2,
    /// Extent reached by the children on the last frame
    pub content: Vec2,
    pub visible: Size,
}

/// Outcome of hit-testing a widget for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Response {
    pub hovered: bool,
    /// The widget holds a press claimed on an earlier frame
    pub active: bool,
    /// The press was released over the widget holding it
    pub activated: bool,
}

/// Everything that outlives a frame: identity state, input, scroll offsets,
/// theme and fonts.
pub struct UiContext {
    pub(crate) interaction: Interaction,
    pub(crate) input: InputState,
    pub(crate) clip: ClipStack,
    pub(crate) scroll: HashMap<WidgetId, ScrollState>,
    pub(crate) theme: Theme,
    pub(crate) regular: Option<GlyphAtlas>,
    pub(crate) bold: Option<GlyphAtlas>,
    viewport: Rect,
    frame: u64,
}

impl UiContext {
    pub fn new(viewport: Rect) -> Self {
        Self {
            interaction: Interaction::new(),
            input: InputState::default(),
            clip: ClipStack::new(viewport),
            scroll: HashMap::new(),
            theme: Theme::default(),
            regular: None,
            bold: None,
            viewport,
            frame: 0,
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Atlases used for labels. Bold text falls back to `regular`.
    pub fn set_fonts(&mut self, regular: GlyphAtlas, bold: Option<GlyphAtlas>) {
        self.regular = Some(regular);
        self.bold = bold;
    }

    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.input.pointer = Vec2::new(x, y);
    }

    pub fn pointer_button(&mut self, down: bool) {
        self.input.button_down = down;
    }

    /// Accumulate wheel movement until the next frame consumes it.
    pub fn scrolled(&mut self, dx: f32, dy: f32) {
        self.input.scroll += Vec2::new(dx, dy);
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn scroll_state(&self, id: WidgetId) -> Option<ScrollState> {
        self.scroll.get(&id).copied()
    }

    /// Start a frame. Widgets push their quads into `batch`; the frame is
    /// finished with [`Ui::end`].
    pub fn begin_frame<'a>(&'a mut self, batch: &'a mut QuadBatch) -> Ui<'a> {
        self.frame += 1;
        log::trace!("Begin frame {}", self.frame);
        self.interaction.begin_frame();
        self.clip.reset(self.viewport);
        Ui {
            ctx: self,
            batch,
            z: 0,
            scroll_consumed: false,
        }
    }

    /// Run one whole frame through `build`.
    pub fn frame<R>(&mut self, batch: &mut QuadBatch, build: impl FnOnce(&mut Ui<'_>) -> R) -> R {
        let mut ui = self.begin_frame(batch);
        let result = build(&mut ui);
        ui.end();
        result
    }
}

/// Handle for one frame. Widget calls are methods on this type.
pub struct Ui<'a> {
    pub(crate) ctx: &'a mut UiContext,
    pub(crate) batch: &'a mut QuadBatch,
    pub(crate) z: i8,
    pub(crate) scroll_consumed: bool,
}

impl<'a> Ui<'a> {
    /// Finish the frame.
    ///
    /// # Panics
    ///
    /// Panics when a `container_begin` was not matched by `container_end`.
    pub fn end(self) {
        let open = self.ctx.clip.depth() - 1;
        assert!(
            open == 0,
            "unbalanced containers: {} container_begin without container_end",
            open
        );
        self.ctx.interaction.end_frame(self.ctx.input.button_down);
        self.ctx.input.scroll = Vec2::ZERO;
        log::trace!("End frame {}, {} quads", self.ctx.frame, self.batch.len());
    }

    pub fn theme(&self) -> &Theme {
        &self.ctx.theme
    }

    pub fn input(&self) -> &InputState {
        &self.ctx.input
    }

    pub fn interaction(&self) -> &Interaction {
        &self.ctx.interaction
    }

    pub fn clip_stack(&self) -> &ClipStack {
        &self.ctx.clip
    }

    /// Size of the innermost container, for resolving placements.
    pub fn parent_size(&self) -> Size {
        self.ctx.clip.local_size()
    }

    /// Draw everything built in `f` with draw order `z`.
    pub fn layer<R>(&mut self, z: i8, f: impl FnOnce(&mut Self) -> R) -> R {
        let previous = self.z;
        self.z = z;
        let result = f(self);
        self.z = previous;
        result
    }

    /// Hit-test `absolute` against the pointer, run `draw` with the outcome,
    /// then update hot/active state.
    ///
    /// The pointer must be inside both the widget and the visible clip, so a
    /// widget scrolled or clipped out of view never takes hover. The new
    /// identity state is only stored once `draw` returns: a widget whose
    /// quads overflow the batch never becomes hot or active.
    pub(crate) fn interact(
        &mut self,
        id: WidgetId,
        absolute: Rect,
        clip: Rect,
        draw: impl FnOnce(&mut Self, Response),
    ) -> Response {
        let input = self.ctx.input;
        let hovered =
            !clip.is_empty() && clip.contains(input.pointer) && absolute.contains(input.pointer);

        let mut staged = self.ctx.interaction;
        if hovered {
            staged.report_hover(id);
            staged.try_claim_active(id, input.button_down);
        }
        let response = Response {
            hovered,
            active: staged.holds_press(id),
            activated: staged.released_over(id, hovered, input.button_down),
        };

        draw(self, response);
        self.ctx.interaction = staged;
        if response.activated {
            log::debug!("Widget {:?} activated", id);
        }
        response
    }

    pub(crate) fn state_color(&self, response: Response) -> Color {
        let theme = &self.ctx.theme;
        if response.active {
            theme.active
        } else if response.hovered {
            theme.hot
        } else {
            theme.idle
        }
    }

    /// Push a background quad unless it is invisible or clipped away.
    pub(crate) fn fill(&mut self, absolute: Rect, color: Color, clip: Rect) {
        if color.a <= 0.0 || absolute.intersect(&clip).is_empty() {
            return;
        }
        self.batch.push_colored_quad(absolute, color, self.z, Some(clip));
    }

    /// Lay out `text` on one line with its top-left corner at `top_left`
    /// and push one quad per visible glyph. Returns the advance width.
    pub(crate) fn draw_text(&mut self, top_left: Vec2, text: &str, bold: bool, clip: Rect) -> f32 {
        let ctx = &*self.ctx;
        let atlas = if bold {
            ctx.bold.as_ref().or(ctx.regular.as_ref())
        } else {
            ctx.regular.as_ref()
        };
        let Some(atlas) = atlas else {
            return 0.0;
        };

        let baseline = top_left.y + atlas.metrics().ascent;
        let mut pen = top_left.x;
        for ch in text.chars() {
            let Some((index, glyph)) = atlas.glyph(ch) else {
                continue;
            };
            if glyph.rect.width > 0 && glyph.rect.height > 0 {
                let position = Vec2::new(pen + glyph.bearing.x, baseline + glyph.bearing.y);
                let bounds = Rect::new(
                    position.x,
                    position.y,
                    glyph.rect.width as f32,
                    glyph.rect.height as f32,
                );
                if !bounds.intersect(&clip).is_empty() {
                    self.batch.push_tinted_quad(
                        atlas.id(),
                        index,
                        position,
                        ctx.theme.text,
                        self.z,
                        Some(clip),
                    );
                }
            }
            pen += glyph.advance.x;
        }
        pen - top_left.x
    }

    /// Line height of the font used for `bold` text, or the row height when
    /// no font is loaded.
    pub(crate) fn line_height(&self, bold: bool) -> f32 {
        let ctx = &*self.ctx;
        let atlas = if bold {
            ctx.bold.as_ref().or(ctx.regular.as_ref())
        } else {
            ctx.regular.as_ref()
        };
        atlas.map_or(ctx.theme.row_height, |atlas| atlas.metrics().line_height)
    }
}
