//! The filter-and-redraw callback.
//!
//! [`render`] is a pure function of the dataset and the two control values.
//! It keeps no state between calls, so the same inputs always produce the
//! same [`ChartSpec`].

use serde::Serialize;

use crate::color::{ColorMap, SeriesColor};
use crate::data::filter::{self, Selection, YearRange};
use crate::data::model::Dataset;

pub const CHART_TITLE: &str = "GDP Per Capita Over Time";
pub const X_AXIS_LABEL: &str = "Year";
pub const Y_AXIS_LABEL: &str = "GDP Per Capita";

// ---------------------------------------------------------------------------
// ChartSpec – what the external renderer draws
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisKind {
    /// Discrete labels, plotted in the order they arrive.
    Category,
    Linear,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub label: String,
    pub kind: AxisKind,
}

/// One (year, value) point. The year keeps its column label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Point {
    pub year: String,
    pub value: f64,
}

impl Point {
    pub fn new(year: impl Into<String>, value: f64) -> Self {
        Self {
            year: year.into(),
            value,
        }
    }

    /// The year as a number, for renderers with a numeric x axis.
    pub fn year_number(&self) -> Option<i32> {
        self.year.parse().ok()
    }
}

/// One line: a single country's points in year order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub color: SeriesColor,
    pub points: Vec<Point>,
}

/// Line-chart description handed to a renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub series: Vec<Series>,
}

impl ChartSpec {
    fn line_chart(series: Vec<Series>) -> Self {
        ChartSpec {
            title: CHART_TITLE.to_string(),
            x_axis: Axis {
                label: X_AXIS_LABEL.to_string(),
                kind: AxisKind::Category,
            },
            y_axis: Axis {
                label: Y_AXIS_LABEL.to_string(),
                kind: AxisKind::Linear,
            },
            series,
        }
    }

    /// Total number of points across all series.
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }
}

// ---------------------------------------------------------------------------
// render
// ---------------------------------------------------------------------------

/// Filter the dataset and build the line chart.
///
/// An empty `selected_countries` keeps every country; `None` for the range
/// keeps every year. Unknown countries and ranges that match no column give
/// fewer (possibly zero) series, never an error.
pub fn render(
    dataset: &Dataset,
    selected_countries: &[String],
    selected_year_range: Option<YearRange>,
) -> ChartSpec {
    let selection = Selection {
        countries: selected_countries.to_vec(),
        years: selected_year_range,
    };
    render_selection(dataset, &selection)
}

/// [`render`] over an already-built [`Selection`].
///
/// One series per surviving country, in source row order, with one point
/// per surviving year column.
pub fn render_selection(dataset: &Dataset, selection: &Selection) -> ChartSpec {
    let view = filter::apply(dataset, selection);
    if view.column_count() == 0 {
        return ChartSpec::line_chart(Vec::new());
    }

    let colors = ColorMap::new(&dataset.sorted_countries());
    let mut series = Vec::with_capacity(view.row_count());
    for row in view.rows() {
        let points = view
            .year_columns()
            .map(|(c, year)| Point::new(year.label.as_str(), row.values[c]))
            .collect();
        series.push(Series {
            name: row.country.clone(),
            color: colors.color_for(&row.country),
            points,
        });
    }
    ChartSpec::line_chart(series)
}
