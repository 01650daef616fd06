mod app;
use recall_app::*;

use app::RecallApp;
use log::info;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let store = SqliteStore::open("recall.sqlite3").expect("Failed to initialize database");
    let pending = store.len().unwrap_or(0);
    info!("loaded {pending} pending review(s) from database");

    let engine = SchedulingEngine::new(store);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([500.0, 700.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Med Recall",
        options,
        Box::new(|_cc| Ok(Box::new(RecallApp::new(engine)))),
    )
}
