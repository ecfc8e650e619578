use crate::geometry::{Rect, Vec2};
use crate::interaction::WidgetId;

use super::context::{Response, Ui};

impl Ui<'_> {
    /// A clickable rectangle, local to the current container. Returns true
    /// on the frame the press that started on it is released over it.
    pub fn button(&mut self, rect: Rect, id: WidgetId) -> bool {
        self.button_response(rect, None, id).activated
    }

    /// A button with a label drawn centered vertically after the text padding.
    pub fn labeled_button(&mut self, rect: Rect, label: &str, id: WidgetId) -> bool {
        self.button_response(rect, Some(label), id).activated
    }

    fn button_response(&mut self, rect: Rect, label: Option<&str>, id: WidgetId) -> Response {
        self.ctx.clip.note_extent(&rect);
        let absolute = self.ctx.clip.transform_to_absolute(rect);
        let clip = self.ctx.clip.compute_absolute_clip();

        self.interact(id, absolute, clip, |ui, response| {
            let color = ui.state_color(response);
            ui.fill(absolute, color, clip);

            let Some(label) = label else {
                return;
            };
            if absolute.intersect(&clip).is_empty() {
                return;
            }
            let line_height = ui.line_height(false);
            let top_left = Vec2::new(
                absolute.x + ui.ctx.theme.text_padding,
                absolute.y + (absolute.height - line_height) / 2.0,
            );
            ui.draw_text(top_left, label, false, clip);
        })
    }
}

#[cfg(test)]
mod tests {
    use std::panic::{self, AssertUnwindSafe};

    use crate::geometry::Rect;
    use crate::interaction::{Active, WidgetId};
    use crate::renderer::QuadBatch;
    use crate::widgets::{Color, Theme, UiContext};

    const A: WidgetId = WidgetId::new(1);
    const B: WidgetId = WidgetId::new(2);

    fn setup() -> (UiContext, QuadBatch) {
        let viewport = Rect::new(0.0, 0.0, 200.0, 200.0);
        let theme = Theme::default().idle(Color::from_hex(0x101010));
        (UiContext::new(viewport).with_theme(theme), QuadBatch::new(viewport))
    }

    #[test]
    fn test_click_activates_once_on_release() {
        let (mut ctx, mut batch) = setup();
        let rect = Rect::new(10.0, 10.0, 50.0, 20.0);
        ctx.pointer_moved(20.0, 15.0);

        ctx.pointer_button(true);
        assert!(!ctx.frame(&mut batch, |ui| ui.button(rect, A)));
        assert_eq!(ctx.interaction().active(), Active::Widget(A));
        batch.reset();

        ctx.pointer_button(false);
        assert!(ctx.frame(&mut batch, |ui| ui.button(rect, A)));
        assert_eq!(ctx.interaction().active(), Active::None);
        batch.reset();

        assert!(!ctx.frame(&mut batch, |ui| ui.button(rect, A)));
    }

    #[test]
    fn test_release_outside_does_not_activate() {
        let (mut ctx, mut batch) = setup();
        let rect = Rect::new(10.0, 10.0, 50.0, 20.0);
        ctx.pointer_moved(20.0, 15.0);
        ctx.pointer_button(true);
        ctx.frame(&mut batch, |ui| ui.button(rect, A));

        ctx.pointer_moved(150.0, 150.0);
        ctx.frame(&mut batch, |ui| ui.button(rect, A));
        assert!(ctx.interaction().is_active(A));

        ctx.pointer_button(false);
        assert!(!ctx.frame(&mut batch, |ui| ui.button(rect, A)));
    }

    #[test]
    fn test_overlapping_buttons_last_wins() {
        let (mut ctx, mut batch) = setup();
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        ctx.pointer_moved(50.0, 50.0);
        ctx.pointer_button(true);
        ctx.frame(&mut batch, |ui| {
            ui.button(rect, A);
            ui.button(rect, B);
        });
        assert_eq!(ctx.interaction().hot(), Some(B));
        assert_eq!(ctx.interaction().active(), Active::Widget(B));
    }

    #[test]
    fn test_state_colors() {
        let (mut ctx, mut batch) = setup();
        let theme = ctx.theme().clone();
        let rect = Rect::new(0.0, 0.0, 40.0, 40.0);

        ctx.pointer_moved(100.0, 100.0);
        ctx.frame(&mut batch, |ui| ui.button(rect, A));
        assert_eq!(batch.prepare()[0].color, theme.idle.to_array());
        batch.reset();

        ctx.pointer_moved(10.0, 10.0);
        ctx.frame(&mut batch, |ui| ui.button(rect, A));
        assert_eq!(batch.prepare()[0].color, theme.hot.to_array());
        batch.reset();

        // the claim only settles once the press frame is over
        ctx.pointer_button(true);
        ctx.frame(&mut batch, |ui| ui.button(rect, A));
        assert_eq!(batch.prepare()[0].color, theme.hot.to_array());
        batch.reset();

        ctx.frame(&mut batch, |ui| ui.button(rect, A));
        assert_eq!(batch.prepare()[0].color, theme.active.to_array());
    }

    #[test]
    fn test_overlapping_buttons_never_both_active_color() {
        let (mut ctx, mut batch) = setup();
        let theme = ctx.theme().clone();
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        let build = |ctx: &mut UiContext, batch: &mut QuadBatch| {
            ctx.frame(batch, |ui| {
                ui.button(rect, A);
                ui.button(rect, B);
            });
            let colors: Vec<[f32; 4]> = batch.prepare().iter().map(|q| q.color).collect();
            batch.reset();
            colors
        };

        ctx.pointer_moved(50.0, 50.0);
        ctx.pointer_button(true);
        let hot = theme.hot.to_array();
        assert_eq!(build(&mut ctx, &mut batch), vec![hot, hot]);
        assert_eq!(build(&mut ctx, &mut batch), vec![hot, theme.active.to_array()]);
    }

    #[test]
    fn test_overflow_leaves_identity_untouched() {
        let viewport = Rect::new(0.0, 0.0, 200.0, 200.0);
        let mut ctx = UiContext::new(viewport);
        let mut batch = QuadBatch::with_capacity(viewport, 1);
        batch.push_colored_quad(Rect::new(0.0, 0.0, 1.0, 1.0), Color::WHITE, 0, None);

        ctx.pointer_moved(20.0, 15.0);
        ctx.pointer_button(true);
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            ctx.frame(&mut batch, |ui| ui.button(Rect::new(10.0, 10.0, 50.0, 20.0), A))
        }));
        assert!(result.is_err());
        assert_eq!(ctx.interaction().active(), Active::None);
        assert_eq!(ctx.interaction().hot(), None);
    }

    #[test]
    fn test_clipped_button_is_not_drawn_or_hovered() {
        let (mut ctx, mut batch) = setup();
        ctx.pointer_moved(250.0, 10.0);
        ctx.frame(&mut batch, |ui| ui.button(Rect::new(220.0, 0.0, 50.0, 20.0), A));
        assert!(batch.is_empty());
        assert_eq!(ctx.interaction().hot(), None);
    }
}
