use eframe::egui::{Color32, Ui};
use egui_plot::{Legend, Line, Plot, PlotPoints};

use crate::chart::ChartSpec;

// ---------------------------------------------------------------------------
// GDP line chart (central panel)
// ---------------------------------------------------------------------------

/// Draw a [`ChartSpec`]: one line per series, year on x, value on y.
pub fn gdp_plot(ui: &mut Ui, chart: &ChartSpec) {
    ui.heading(&chart.title);

    if chart.series.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("No data for the current selection.");
        });
        return;
    }

    Plot::new("gdp_plot")
        .legend(Legend::default())
        .x_axis_label(chart.x_axis.label.as_str())
        .y_axis_label(chart.y_axis.label.as_str())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for series in &chart.series {
                let [r, g, b] = series.color.0;

                // Year labels are integers by construction; skip anything else.
                let points: PlotPoints = series
                    .points
                    .iter()
                    .filter_map(|p| p.year_number().map(|year| [year as f64, p.value]))
                    .collect();

                let line = Line::new(points)
                    .name(&series.name)
                    .color(Color32::from_rgb(r, g, b))
                    .width(1.5);

                plot_ui.line(line);
            }
        });
}
