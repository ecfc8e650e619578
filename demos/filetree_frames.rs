//! Drives the file tree through a few simulated frames without a window.
//!
//! Run with `RUST_LOG=debug cargo run --example filetree_frames [DIR]`.

use quill::font::FilledAtlas;
use quill::prelude::*;

const VIEWPORT: Rect = Rect::new(0.0, 0.0, 1280.0, 800.0);
const TREE: WidgetId = WidgetId::new(0x7472_6565);
const SIDE: WidgetId = WidgetId::new(0x7369_6465);

fn build_font(batch: &mut QuadBatch, rasterizer: &mut CosmicRasterizer, name: &str) -> GlyphAtlas {
    let filled: FilledAtlas = fill_atlas(512, 512, rasterizer, &ascii_charset())
        .unwrap_or_else(|err| panic!("failed to fill the {name} atlas: {err}"));

    let path = std::env::temp_dir().join(format!("quill-{name}-atlas.png"));
    match filled.image.save(&path) {
        Ok(()) => log::info!("Wrote {} atlas to {}", name, path.display()),
        Err(err) => log::warn!("Could not write {}: {}", path.display(), err),
    }

    let id = batch
        .register_atlas(
            filled.image.width(),
            filled.image.height(),
            &filled.subtextures(),
        )
        .unwrap_or_else(|err| panic!("failed to register the {name} atlas: {err}"));
    filled.into_glyph_atlas(id)
}

fn frame(
    ctx: &mut UiContext,
    batch: &mut QuadBatch,
    tree: &FileTree,
    layout: &PanelLayout,
) -> Option<TreeAction> {
    let action = ctx.frame(batch, |ui| {
        let panels = ui.shell(layout);
        ui.container(ContainerFlags::SCROLL_Y, panels.side, SIDE, |ui| {
            ui.file_tree(tree, TREE)
        })
    });
    log::info!("Frame produced {} quads", batch.len());
    batch.reset();
    action
}

fn main() {
    env_logger::init();

    let root = std::env::args().nth(1).unwrap_or_else(|| ".".to_string());
    let mut batch = QuadBatch::new(VIEWPORT);

    let regular = build_font(&mut batch, &mut CosmicRasterizer::new(15.0), "regular");
    let bold = build_font(&mut batch, &mut CosmicRasterizer::bold(15.0), "bold");

    let mut ctx = UiContext::new(VIEWPORT);
    ctx.set_fonts(regular, Some(bold));

    let mut listing = FsListing;
    let mut tree = match FileTree::load(&root, &mut listing) {
        Ok(tree) => tree,
        Err(err) => {
            log::error!("{}", err);
            std::process::exit(1);
        }
    };
    let layout = PanelLayout::default();
    let row_height = ctx.theme().row_height;

    // Click each of the first rows in turn: hover, press, release.
    for row in 0..3 {
        let y = row as f32 * row_height + row_height / 2.0;
        ctx.pointer_moved(40.0, y);
        frame(&mut ctx, &mut batch, &tree, &layout);

        ctx.pointer_button(true);
        frame(&mut ctx, &mut batch, &tree, &layout);

        ctx.pointer_button(false);
        if let Some(action) = frame(&mut ctx, &mut batch, &tree, &layout) {
            log::info!("Row {} activated: {:?}", row, action);
            if let Err(err) = tree.apply(action, &mut listing) {
                log::warn!("{}", err);
            }
        }
    }

    ctx.scrolled(0.0, -3.0 * row_height);
    frame(&mut ctx, &mut batch, &tree, &layout);
    if let Some(state) = ctx.scroll_state(SIDE) {
        log::info!("Side panel scrolled to {:?}", state.offset);
    }

    for (index, item) in tree.visible() {
        let indent = "  ".repeat(item.depth.saturating_sub(1) as usize);
        let marker = match (item.is_dir(), item.is_open()) {
            (true, true) => "v ",
            (true, false) => "> ",
            (false, _) => "  ",
        };
        println!("{:4} {}{}{}", index, indent, marker, tree.name(item));
    }
}
