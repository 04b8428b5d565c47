use eframe::egui;

use crate::config::DashboardConfig;
use crate::data::model::Dataset;
use crate::layout::{self, Layout};
use crate::state::ViewState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

/// Native front-end over the same layout and render callback as the HTTP page.
pub struct GdpViewerApp {
    pub dataset: Dataset,
    pub layout: Layout,
    pub state: ViewState,
}

impl GdpViewerApp {
    pub fn new(dataset: Dataset, config: &DashboardConfig) -> Self {
        let layout = layout::build_layout(&dataset, config);
        let state = ViewState::new(&dataset);
        Self {
            dataset,
            layout,
            state,
        }
    }
}

impl eframe::App for GdpViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title, description, status ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.layout, &self.dataset, &self.state);
        });

        // ---- Left side panel: country picker + year range ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &self.layout, &self.dataset, &mut self.state);
            });

        // ---- Central panel: chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::gdp_plot(ui, self.state.chart());
        });
    }
}
