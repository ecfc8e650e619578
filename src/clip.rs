//! Nested container levels: clip composition and coordinate translation.
//!
//! Every level stores its rectangle relative to the parent's content origin.
//! The composed clip and absolute positions are derived by walking the stack,
//! never cached, so a level can be pushed and popped without bookkeeping.
//!
//! The stack also carries each container's row cursor and content extent, so
//! it doubles as the parent-marker stack for widget nesting.

use crate::geometry::{Rect, Size, Vec2};
use crate::interaction::WidgetId;
use crate::layout::ContainerFlags;
use crate::renderer::constants::MAX_CLIP_DEPTH;

#[derive(Debug, Clone, PartialEq)]
pub struct ClipLevel {
    /// Rectangle relative to the parent's content origin
    pub rect: Rect,
    /// Displacement applied to this level's children
    pub scroll: Vec2,
    pub id: Option<WidgetId>,
    pub flags: ContainerFlags,
    /// Top of the next row, in this level's unscrolled coordinates
    pub cursor: f32,
    /// Far corner reached by children, in this level's unscrolled coordinates
    pub content: Vec2,
}

impl ClipLevel {
    fn new(rect: Rect) -> Self {
        Self {
            rect,
            scroll: Vec2::ZERO,
            id: None,
            flags: ContainerFlags::empty(),
            cursor: 0.0,
            content: Vec2::ZERO,
        }
    }

    fn note_extent(&mut self, rect: &Rect) {
        self.content.x = self.content.x.max(rect.right());
        self.content.y = self.content.y.max(rect.bottom());
    }
}

#[derive(Debug, Clone)]
pub struct ClipStack {
    levels: Vec<ClipLevel>,
}

impl ClipStack {
    /// A stack holding only the root level.
    pub fn new(viewport: Rect) -> Self {
        let mut levels = Vec::with_capacity(MAX_CLIP_DEPTH);
        levels.push(ClipLevel::new(viewport));
        Self { levels }
    }

    /// Drop every container level and replace the root.
    pub fn reset(&mut self, viewport: Rect) {
        self.levels.clear();
        self.levels.push(ClipLevel::new(viewport));
    }

    /// Number of levels including the root.
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    pub fn top(&self) -> &ClipLevel {
        self.levels.last().expect("clip stack always holds the root level")
    }

    fn top_mut(&mut self) -> &mut ClipLevel {
        self.levels
            .last_mut()
            .expect("clip stack always holds the root level")
    }

    /// Push a plain clipping level.
    ///
    /// # Panics
    ///
    /// Panics when the stack already holds [`MAX_CLIP_DEPTH`] levels.
    pub fn push(&mut self, local: Rect) {
        self.push_level(ClipLevel::new(local));
    }

    /// Push a container level whose children are displaced by `scroll`.
    pub fn push_container(
        &mut self,
        local: Rect,
        id: WidgetId,
        flags: ContainerFlags,
        scroll: Vec2,
    ) {
        self.push_level(ClipLevel {
            scroll,
            id: Some(id),
            flags,
            ..ClipLevel::new(local)
        });
    }

    fn push_level(&mut self, level: ClipLevel) {
        assert!(
            self.levels.len() < MAX_CLIP_DEPTH,
            "clip stack overflow: more than {} nested levels",
            MAX_CLIP_DEPTH
        );
        self.levels.push(level);
    }

    /// Remove the innermost level. Its extent is recorded in the parent's
    /// content so scrollable ancestors account for it.
    ///
    /// # Panics
    ///
    /// Panics when only the root level is left.
    pub fn pop(&mut self) -> ClipLevel {
        assert!(self.levels.len() > 1, "cannot pop the root clip level");
        let level = self.levels.pop().expect("depth checked above");
        self.top_mut().note_extent(&level.rect);
        level
    }

    /// Visible region after clipping by every level, in absolute coordinates.
    pub fn compute_absolute_clip(&self) -> Rect {
        let mut origin = Vec2::ZERO;
        let mut clip: Option<Rect> = None;
        for level in &self.levels {
            let absolute = level.rect.offset(origin);
            clip = Some(match clip {
                Some(clip) => clip.intersect(&absolute),
                None => absolute,
            });
            origin = absolute.origin() + level.scroll;
        }
        clip.unwrap_or_default()
    }

    /// Absolute position of the innermost level's content origin.
    pub fn content_origin(&self) -> Vec2 {
        self.levels
            .iter()
            .fold(Vec2::ZERO, |origin, level| {
                origin + level.rect.origin() + level.scroll
            })
    }

    /// Translate a rectangle local to the innermost level into absolute
    /// coordinates, including every level's scroll displacement.
    pub fn transform_to_absolute(&self, local: Rect) -> Rect {
        local.offset(self.content_origin())
    }

    /// Size of the innermost level.
    pub fn local_size(&self) -> Size {
        self.top().rect.size()
    }

    /// Reserve a row of `height` in the innermost level and return its top.
    pub fn advance_row(&mut self, height: f32) -> f32 {
        let top = self.top_mut();
        let y = top.cursor;
        top.cursor += height;
        let width = top.rect.width;
        top.note_extent(&Rect::new(0.0, y, width, height));
        y
    }

    /// Record that a child occupies `local` in the innermost level.
    pub fn note_extent(&mut self, local: &Rect) {
        self.top_mut().note_extent(local);
    }
}
