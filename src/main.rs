mod config;
mod model;
mod ui;

use eframe::egui;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([960.0, 640.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Loot Profile Editor",
        options,
        Box::new(|_cc| Ok(Box::new(ui::app::ProfileEditorApp::new()))),
    )
}
