use crate::geometry::{Rect, Vec2};

use super::context::Ui;

impl Ui<'_> {
    /// A single line of text with its top-left corner at `position`, local
    /// to the current container. Returns the advance width.
    pub fn label(&mut self, position: Vec2, text: &str, bold: bool) -> f32 {
        let origin = self.ctx.clip.content_origin();
        let clip = self.ctx.clip.compute_absolute_clip();
        let width = self.draw_text(position + origin, text, bold, clip);
        let height = self.line_height(bold);
        self.ctx
            .clip
            .note_extent(&Rect::new(position.x, position.y, width, height));
        width
    }
}
