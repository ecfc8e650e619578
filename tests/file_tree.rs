use quill::geometry::Rect;
use quill::interaction::WidgetId;
use quill::renderer::QuadBatch;
use quill::tree::{FileTree, ListingEntry, MemoryListing, TreeAction};
use quill::widgets::{Color, Theme, UiContext};

const ROW: f32 = 20.0;
const TREE: WidgetId = WidgetId::new(42);

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn listing() -> MemoryListing {
    let mut listing = MemoryListing::new();
    listing.insert(
        "project",
        vec![ListingEntry::dir("src"), ListingEntry::file("README.md")],
    );
    listing.insert(
        "project/src",
        vec![ListingEntry::file("lib.rs"), ListingEntry::file("main.rs")],
    );
    listing
}

fn context() -> (UiContext, QuadBatch) {
    let viewport = Rect::new(0.0, 0.0, 300.0, 200.0);
    let theme = Theme::default()
        .idle(Color::from_hex(0x111111))
        .row_height(ROW);
    (UiContext::new(viewport).with_theme(theme), QuadBatch::new(viewport))
}

/// Top edge of every row quad drawn in one frame.
fn row_tops(ctx: &mut UiContext, batch: &mut QuadBatch, tree: &FileTree) -> Vec<f32> {
    ctx.frame(batch, |ui| ui.file_tree(tree, TREE));
    let tops = batch.prepare().iter().map(|quad| quad.rect[1]).collect();
    batch.reset();
    tops
}

/// Press and release the pointer over row `row`, returning the action
/// reported on the release frame.
fn click_row(
    ctx: &mut UiContext,
    batch: &mut QuadBatch,
    tree: &FileTree,
    row: usize,
) -> Option<TreeAction> {
    ctx.pointer_moved(30.0, row as f32 * ROW + ROW / 2.0);
    ctx.pointer_button(true);
    let pressed = ctx.frame(batch, |ui| ui.file_tree(tree, TREE));
    assert_eq!(pressed, None, "activation must wait for release");
    batch.reset();

    ctx.pointer_button(false);
    let released = ctx.frame(batch, |ui| ui.file_tree(tree, TREE));
    batch.reset();
    released
}

#[test]
fn test_expand_and_collapse_through_clicks() {
    init();
    let mut listing = listing();
    let mut tree = FileTree::load("project", &mut listing).unwrap();
    let (mut ctx, mut batch) = context();

    assert_eq!(row_tops(&mut ctx, &mut batch, &tree), vec![0.0, ROW]);

    let action = click_row(&mut ctx, &mut batch, &tree, 0);
    assert_eq!(action, Some(TreeAction::Expand(0)));
    tree.apply(action.unwrap(), &mut listing).unwrap();

    let names: Vec<(&str, u16)> = tree
        .visible()
        .map(|(_, item)| (tree.name(item), item.depth))
        .collect();
    assert_eq!(
        names,
        vec![("src", 1), ("lib.rs", 2), ("main.rs", 2), ("README.md", 1)]
    );
    assert_eq!(
        row_tops(&mut ctx, &mut batch, &tree),
        vec![0.0, ROW, 2.0 * ROW, 3.0 * ROW]
    );

    let action = click_row(&mut ctx, &mut batch, &tree, 0);
    assert_eq!(action, Some(TreeAction::Collapse(0)));
    tree.apply(action.unwrap(), &mut listing).unwrap();

    let visible: Vec<usize> = tree.visible().map(|(index, _)| index).collect();
    assert_eq!(visible, vec![0, 3]);
    assert_eq!(tree.len(), 4, "collapsing keeps the explored children");
}

#[test]
fn test_file_row_selects_without_mutating() {
    init();
    let mut listing = listing();
    let mut tree = FileTree::load("project", &mut listing).unwrap();
    let (mut ctx, mut batch) = context();

    let action = click_row(&mut ctx, &mut batch, &tree, 1);
    assert_eq!(action, Some(TreeAction::Select(1)));
    tree.apply(action.unwrap(), &mut listing).unwrap();
    assert_eq!(tree.len(), 2);
}

#[test]
fn test_click_activates_exactly_once() {
    init();
    let mut listing = listing();
    let tree = FileTree::load("project", &mut listing).unwrap();
    let (mut ctx, mut batch) = context();

    assert!(click_row(&mut ctx, &mut batch, &tree, 0).is_some());
    let idle = ctx.frame(&mut batch, |ui| ui.file_tree(&tree, TREE));
    assert_eq!(idle, None);
}
