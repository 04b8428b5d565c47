use anyhow::Context;
use eframe::egui;
use gdp_dashboard::app::GdpViewerApp;
use gdp_dashboard::config::DashboardConfig;
use gdp_dashboard::data::loader;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = DashboardConfig::default();
    let dataset = loader::load_file(&config.data_path)
        .with_context(|| format!("loading {}", config.data_path.display()))?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    let title = config.title.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(GdpViewerApp::new(dataset, &config)))),
    )
    .map_err(|e| anyhow::anyhow!("running viewer: {e}"))
}
