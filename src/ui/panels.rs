use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::model::Dataset;
use crate::layout::Layout;
use crate::state::{ControlEvent, Phase, ViewState};

// ---------------------------------------------------------------------------
// Left side panel – country picker and year range
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, layout: &Layout, dataset: &Dataset, state: &mut ViewState) {
    // ---- Year range ----
    ui.strong(&layout.slider.label);

    let bounds = state.bounds();
    let current = state.year_range();
    let mut start = current.start();
    let mut end = current.end();

    let start_changed = ui
        .add(egui::Slider::new(&mut start, bounds.start()..=bounds.end()).text("from"))
        .changed();
    let end_changed = ui
        .add(egui::Slider::new(&mut end, bounds.start()..=bounds.end()).text("to"))
        .changed();
    if start_changed || end_changed {
        let _ = state.handle(dataset, ControlEvent::YearRange(start, end));
    }

    let marks: Vec<&str> = layout.slider.marks.values().map(String::as_str).collect();
    ui.label(RichText::new(marks.join(" · ")).weak().small());
    ui.separator();

    // ---- Country picker ----
    let n_selected = state.selection().countries.len();
    let n_total = layout.dropdown.options.len();
    ui.strong(format!("{}  ({n_selected}/{n_total})", layout.dropdown.label));

    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            let _ = state.handle(
                dataset,
                ControlEvent::Countries(layout.dropdown.options.clone()),
            );
        }
        if ui.small_button("Clear").clicked() {
            let _ = state.clear_countries(dataset);
        }
    });
    if n_selected == 0 {
        ui.label(RichText::new(&layout.dropdown.placeholder).italics().weak());
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for country in &layout.dropdown.options {
                let mut checked = state.is_country_selected(country);
                if ui.checkbox(&mut checked, country.as_str()).changed() {
                    let _ = state.toggle_country(dataset, country);
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the title, description and a one-line status.
pub fn top_bar(ui: &mut Ui, layout: &Layout, dataset: &Dataset, state: &ViewState) {
    ui.heading(&layout.title);
    ui.label(&layout.description);

    ui.horizontal(|ui: &mut Ui| {
        let chart = state.chart();
        ui.label(format!(
            "{} countries loaded, {} shown, {} points",
            dataset.len(),
            chart.series.len(),
            chart.point_count()
        ));

        if state.phase() == Phase::Unfiltered {
            ui.separator();
            ui.label(RichText::new("unfiltered").weak());
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}
