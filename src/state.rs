use log::{debug, warn};

use crate::chart::{self, ChartSpec};
use crate::data::filter::{Selection, YearRange};
use crate::data::model::Dataset;
use crate::error::Result;

// ---------------------------------------------------------------------------
// Control events and view phase
// ---------------------------------------------------------------------------

/// A value change delivered by one of the two controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlEvent {
    /// New country selection; empty means all countries.
    Countries(Vec<String>),
    /// New `[start, end]` year range.
    YearRange(i32, i32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Initial render, nothing touched yet.
    Unfiltered,
    /// At least one control event has been handled.
    Filtered,
}

// ---------------------------------------------------------------------------
// View state
// ---------------------------------------------------------------------------

/// Ephemeral UI state for one front-end. The dataset is passed in on every
/// call and never stored here.
#[derive(Debug, Clone)]
pub struct ViewState {
    selection: Selection,
    bounds: YearRange,
    chart: ChartSpec,
    phase: Phase,
    /// Last rejected interaction, shown in the UI.
    pub status_message: Option<String>,
}

impl ViewState {
    /// Unfiltered view: all countries, full year range.
    pub fn new(dataset: &Dataset) -> Self {
        let (min, max) = dataset.year_bounds();
        let bounds = YearRange::spanning(min, max);
        let selection = Selection {
            countries: Vec::new(),
            years: Some(bounds),
        };
        let chart = chart::render_selection(dataset, &selection);
        Self {
            selection,
            bounds,
            chart,
            phase: Phase::Unfiltered,
            status_message: None,
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Currently selected range (the full dataset bounds until changed).
    pub fn year_range(&self) -> YearRange {
        self.selection.years.unwrap_or(self.bounds)
    }

    pub fn bounds(&self) -> YearRange {
        self.bounds
    }

    pub fn chart(&self) -> &ChartSpec {
        &self.chart
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_country_selected(&self, country: &str) -> bool {
        self.selection.countries.iter().any(|c| c == country)
    }

    /// Apply one control event and redraw.
    ///
    /// An inverted year range is rejected: the previous range and chart stay
    /// in place and the error is kept in `status_message`.
    pub fn handle(&mut self, dataset: &Dataset, event: ControlEvent) -> Result<()> {
        match event {
            ControlEvent::Countries(countries) => {
                self.selection.countries = countries;
            }
            ControlEvent::YearRange(start, end) => match YearRange::new(start, end) {
                Ok(range) => self.selection.years = Some(range),
                Err(e) => {
                    warn!("Rejected year range: {e}");
                    self.status_message = Some(e.to_string());
                    return Err(e);
                }
            },
        }

        self.chart = chart::render_selection(dataset, &self.selection);
        self.phase = Phase::Filtered;
        self.status_message = None;
        debug!(
            "Redrew chart: {} series, {} points",
            self.chart.series.len(),
            self.chart.point_count()
        );
        Ok(())
    }

    /// Toggle a single country in the selection.
    pub fn toggle_country(&mut self, dataset: &Dataset, country: &str) -> Result<()> {
        let mut countries = self.selection.countries.clone();
        if let Some(pos) = countries.iter().position(|c| c == country) {
            countries.remove(pos);
        } else {
            countries.push(country.to_string());
        }
        self.handle(dataset, ControlEvent::Countries(countries))
    }

    /// Clear the country selection, i.e. show all countries.
    pub fn clear_countries(&mut self, dataset: &Dataset) -> Result<()> {
        self.handle(dataset, ControlEvent::Countries(Vec::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::RawTable;
    use crate::error::DashboardError;

    fn dataset() -> Dataset {
        Dataset::from_raw(RawTable {
            columns: vec!["country".into(), "2000".into(), "2001".into(), "2002".into()],
            rows: vec![
                vec!["A".into(), "1".into(), "2".into(), "3".into()],
                vec!["B".into(), "4".into(), "5".into(), "6".into()],
            ],
        })
        .unwrap()
    }

    #[test]
    fn starts_unfiltered_with_full_chart() {
        let ds = dataset();
        let state = ViewState::new(&ds);
        assert_eq!(state.phase(), Phase::Unfiltered);
        assert_eq!(state.year_range(), YearRange::new(2000, 2002).unwrap());
        assert_eq!(state.chart().point_count(), 6);
    }

    #[test]
    fn events_move_to_filtered_and_redraw() {
        let ds = dataset();
        let mut state = ViewState::new(&ds);
        state
            .handle(&ds, ControlEvent::Countries(vec!["B".into()]))
            .unwrap();
        assert_eq!(state.phase(), Phase::Filtered);
        assert_eq!(state.chart().series.len(), 1);

        state.handle(&ds, ControlEvent::YearRange(2001, 2001)).unwrap();
        assert_eq!(state.chart().point_count(), 1);
        assert_eq!(state.chart().series[0].points[0].value, 5.0);
    }

    #[test]
    fn inverted_range_keeps_previous_state() {
        let ds = dataset();
        let mut state = ViewState::new(&ds);
        state.handle(&ds, ControlEvent::YearRange(2000, 2001)).unwrap();
        let before = state.chart().clone();

        let err = state
            .handle(&ds, ControlEvent::YearRange(2002, 2000))
            .unwrap_err();
        assert!(matches!(err, DashboardError::InvalidSelection { .. }));
        assert_eq!(state.year_range(), YearRange::new(2000, 2001).unwrap());
        assert_eq!(state.chart(), &before);
        assert!(state.status_message.is_some());

        state.handle(&ds, ControlEvent::YearRange(2000, 2002)).unwrap();
        assert!(state.status_message.is_none());
    }

    #[test]
    fn toggle_and_clear_countries() {
        let ds = dataset();
        let mut state = ViewState::new(&ds);
        state.toggle_country(&ds, "A").unwrap();
        assert!(state.is_country_selected("A"));
        assert_eq!(state.chart().series.len(), 1);

        state.toggle_country(&ds, "A").unwrap();
        assert!(!state.is_country_selected("A"));
        assert_eq!(state.chart().series.len(), 2);

        state.toggle_country(&ds, "B").unwrap();
        state.clear_countries(&ds).unwrap();
        assert!(state.selection().countries.is_empty());
        assert_eq!(state.chart().series.len(), 2);
    }
}
