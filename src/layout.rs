//! Static page description derived once from the dataset.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::chart::{self, ChartSpec};
use crate::config::DashboardConfig;
use crate::data::model::Dataset;

/// Slider marks are labelled on multiples of this many years.
pub const TICK_INTERVAL: i32 = 50;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dropdown {
    pub id: String,
    pub label: String,
    pub placeholder: String,
    pub multi: bool,
    /// Distinct countries, sorted.
    pub options: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeSlider {
    pub id: String,
    pub label: String,
    pub min: i32,
    pub max: i32,
    pub step: i32,
    /// year → label, only for multiples of [`TICK_INTERVAL`].
    pub marks: BTreeMap<i32, String>,
    pub value: [i32; 2],
}

/// Everything the front-end needs before the first interaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: String,
    pub description: String,
    pub dropdown: Dropdown,
    pub slider: RangeSlider,
    pub figure: ChartSpec,
}

pub fn build_layout(dataset: &Dataset, config: &DashboardConfig) -> Layout {
    let (min, max) = dataset.year_bounds();

    Layout {
        title: config.title.clone(),
        description: config.description.clone(),
        dropdown: Dropdown {
            id: "country".to_string(),
            label: "Country Dropdown".to_string(),
            placeholder: "Select a country".to_string(),
            multi: true,
            options: dataset.sorted_countries(),
        },
        slider: RangeSlider {
            id: "range-slider-1".to_string(),
            label: "Select Year Range:".to_string(),
            min,
            max,
            step: 1,
            marks: tick_marks(min, max),
            value: [min, max],
        },
        figure: chart::render(dataset, &[], None),
    }
}

/// Labels for every multiple of [`TICK_INTERVAL`] in `[min, max]`.
pub fn tick_marks(min: i32, max: i32) -> BTreeMap<i32, String> {
    (min..=max)
        .filter(|y| y.rem_euclid(TICK_INTERVAL) == 0)
        .map(|y| (y, y.to_string()))
        .collect()
}
