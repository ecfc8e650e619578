//! Clipping and scrolling containers, and the three-panel window shell.

use crate::geometry::{Rect, Vec2};
use crate::interaction::WidgetId;
use crate::layout::{ContainerFlags, PanelLayout, Panels};

use super::context::{ScrollState, Ui};
use super::style::Color;

impl Ui<'_> {
    /// Open a container at `rect`, local to the current one. Widgets drawn
    /// until the matching [`Ui::container_end`] are positioned relative to
    /// it and clipped by it.
    pub fn container_begin(&mut self, flags: ContainerFlags, rect: Rect, id: WidgetId) {
        let parent = self.ctx.clip.local_size();
        let rect = flags.apply_fill(rect, parent);
        let scroll = if flags.scrolls() {
            self.ctx.scroll.get(&id).map_or(Vec2::ZERO, |state| state.offset)
        } else {
            Vec2::ZERO
        };
        self.ctx.clip.push_container(rect, id, flags, scroll);
    }

    /// Close the innermost container.
    ///
    /// A scrolling container under the pointer takes this frame's wheel
    /// delta unless a nested container already did. The new offset shows on
    /// the next frame.
    ///
    /// # Panics
    ///
    /// Panics when no container is open.
    pub fn container_end(&mut self) {
        let visible = self.ctx.clip.compute_absolute_clip();
        let level = self.ctx.clip.pop();
        if !level.flags.scrolls() {
            return;
        }
        let Some(id) = level.id else {
            return;
        };

        let input = self.ctx.input;
        let mut offset = level.scroll;
        let delta = Vec2::new(
            if level.flags.contains(ContainerFlags::SCROLL_X) {
                input.scroll.x
            } else {
                0.0
            },
            if level.flags.contains(ContainerFlags::SCROLL_Y) {
                input.scroll.y
            } else {
                0.0
            },
        );
        if !self.scroll_consumed
            && delta != Vec2::ZERO
            && !visible.is_empty()
            && visible.contains(input.pointer)
        {
            offset += delta;
            self.scroll_consumed = true;
        }

        let size = level.rect.size();
        offset.x = clamp_offset(offset.x, level.content.x, size.width);
        offset.y = clamp_offset(offset.y, level.content.y, size.height);
        if offset != level.scroll {
            log::trace!("Container {:?} scrolled to {:?}", id, offset);
        }

        self.ctx.scroll.insert(
            id,
            ScrollState {
                offset,
                content: level.content,
                visible: size,
            },
        );
    }

    /// Run `f` inside a container.
    pub fn container<R>(
        &mut self,
        flags: ContainerFlags,
        rect: Rect,
        id: WidgetId,
        f: impl FnOnce(&mut Self) -> R,
    ) -> R {
        self.container_begin(flags, rect, id);
        let result = f(self);
        self.container_end();
        result
    }

    /// A non-interactive filled rectangle, local to the current container.
    pub fn panel(&mut self, rect: Rect, color: Color) {
        self.ctx.clip.note_extent(&rect);
        let absolute = self.ctx.clip.transform_to_absolute(rect);
        let clip = self.ctx.clip.compute_absolute_clip();
        self.fill(absolute, color, clip);
    }

    /// Paint the shell's panel backgrounds and return their rectangles for
    /// use with [`Ui::container`]. Hidden panels paint nothing.
    pub fn shell(&mut self, layout: &PanelLayout) -> Panels {
        let viewport = Rect::from_size(self.parent_size());
        let panels = layout.resolve(viewport);
        let (side, bottom, main) = (
            self.ctx.theme.side_panel,
            self.ctx.theme.bottom_panel,
            self.ctx.theme.main_panel,
        );
        self.panel(panels.side, side);
        self.panel(panels.bottom, bottom);
        self.panel(panels.main, main);
        panels
    }
}

/// Keep content from scrolling past either edge. Content smaller than the
/// container does not scroll at all.
fn clamp_offset(offset: f32, content: f32, visible: f32) -> f32 {
    let max_scroll = (content - visible).max(0.0);
    offset.clamp(-max_scroll, 0.0)
}
