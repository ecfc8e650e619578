//! Full-width rows stacked top to bottom inside the current container.

use crate::geometry::{Rect, Vec2};
use crate::interaction::WidgetId;
use crate::tree::{FileTree, TreeAction, TreeItem};

use super::context::Ui;

/// The action activating `item` at `index` asks for.
pub fn row_action(index: usize, item: &TreeItem) -> TreeAction {
    if !item.is_dir() {
        TreeAction::Select(index)
    } else if item.is_open() {
        TreeAction::Collapse(index)
    } else {
        TreeAction::Expand(index)
    }
}

impl Ui<'_> {
    /// A row at indentation 0.
    pub fn list_item(&mut self, label: &str, id: WidgetId) -> bool {
        self.tree_item(0, label, false, id)
    }

    /// A row whose label is indented by `depth` steps. Returns true when the
    /// row was clicked this frame.
    pub fn tree_item(&mut self, depth: u16, label: &str, bold: bool, id: WidgetId) -> bool {
        let row_height = self.ctx.theme.row_height;
        let indent = self.ctx.theme.indent;
        let padding = self.ctx.theme.text_padding;

        let y = self.ctx.clip.advance_row(row_height);
        let width = self.ctx.clip.local_size().width;
        let absolute = self
            .ctx
            .clip
            .transform_to_absolute(Rect::new(0.0, y, width, row_height));
        let clip = self.ctx.clip.compute_absolute_clip();

        let response = self.interact(id, absolute, clip, |ui, response| {
            if absolute.intersect(&clip).is_empty() {
                return;
            }
            let color = ui.state_color(response);
            ui.fill(absolute, color, clip);

            let line_height = ui.line_height(bold);
            let top_left = Vec2::new(
                absolute.x + depth as f32 * indent + padding,
                absolute.y + (row_height - line_height) / 2.0,
            );
            ui.draw_text(top_left, label, bold, clip);
        });
        response.activated
    }

    /// Row `index` of `tree`. Directories are drawn bold.
    ///
    /// # Panics
    ///
    /// Panics when `index` is out of bounds.
    pub fn filetree_item(&mut self, tree: &FileTree, index: usize, id: WidgetId) -> bool {
        let item = &tree.items()[index];
        self.tree_item(item.depth, tree.name(item), item.is_dir(), id)
    }

    /// Every visible row of `tree`, with ids derived from `id` and the row
    /// index. Returns the action for the row activated this frame, if any.
    pub fn file_tree(&mut self, tree: &FileTree, id: WidgetId) -> Option<TreeAction> {
        let mut action = None;
        for (index, item) in tree.visible() {
            if self.filetree_item(tree, index, id.child(index)) {
                action = Some(row_action(index, item));
            }
        }
        action
    }
}
