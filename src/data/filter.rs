use std::collections::HashSet;

use super::model::{CountryRow, Dataset, LongRecord, YearColumn};
use crate::error::{DashboardError, Result};

// ---------------------------------------------------------------------------
// YearRange – inclusive [start, end], start <= end
// ---------------------------------------------------------------------------

/// Inclusive year interval. `start <= end` holds for every constructed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    start: i32,
    end: i32,
}

impl YearRange {
    pub fn new(start: i32, end: i32) -> Result<Self> {
        if start > end {
            return Err(DashboardError::InvalidSelection { start, end });
        }
        Ok(Self { start, end })
    }

    /// The range covering both years, whichever order they come in.
    pub fn spanning(a: i32, b: i32) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    pub fn start(&self) -> i32 {
        self.start
    }

    pub fn end(&self) -> i32 {
        self.end
    }

    pub fn contains(&self, year: i32) -> bool {
        self.start <= year && year <= self.end
    }
}

// ---------------------------------------------------------------------------
// Selection – what the two controls currently say
// ---------------------------------------------------------------------------

/// Country and year filters. An empty country list and a `None` range both
/// mean "no filter on that axis".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub countries: Vec<String>,
    pub years: Option<YearRange>,
}

impl Selection {
    /// Build a selection from raw control values.
    ///
    /// A missing or empty range means all years; `[start, end]` must be
    /// ordered; any other length is rejected.
    pub fn from_controls(countries: Option<Vec<String>>, range: Option<&[i32]>) -> Result<Self> {
        let years = match range {
            None | Some([]) => None,
            Some(&[start, end]) => Some(YearRange::new(start, end)?),
            Some(other) => return Err(DashboardError::InvalidRangeArity(other.len())),
        };
        Ok(Selection {
            countries: countries.unwrap_or_default(),
            years,
        })
    }
}

// ---------------------------------------------------------------------------
// FilteredView – row/column indices into a borrowed dataset
// ---------------------------------------------------------------------------

/// The result of applying a [`Selection`]: surviving row and column indices,
/// both in source order. The dataset itself is only borrowed.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    dataset: &'a Dataset,
    rows: Vec<usize>,
    columns: Vec<usize>,
}

/// Apply the country filter, then the year filter.
///
/// No existence check is made on the requested countries: unknown names
/// simply match no row.
pub fn apply<'a>(dataset: &'a Dataset, selection: &Selection) -> FilteredView<'a> {
    let rows = if selection.countries.is_empty() {
        (0..dataset.len()).collect()
    } else {
        let wanted: HashSet<&str> = selection.countries.iter().map(String::as_str).collect();
        dataset
            .rows()
            .iter()
            .enumerate()
            .filter(|(_, row)| wanted.contains(row.country.as_str()))
            .map(|(i, _)| i)
            .collect()
    };

    let columns = match selection.years {
        None => (0..dataset.years().len()).collect(),
        Some(range) => dataset
            .years()
            .iter()
            .enumerate()
            .filter(|(_, col)| range.contains(col.year))
            .map(|(i, _)| i)
            .collect(),
    };

    FilteredView {
        dataset,
        rows,
        columns,
    }
}

impl<'a> FilteredView<'a> {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Surviving rows, in source order.
    pub fn rows(&self) -> impl Iterator<Item = &'a CountryRow> + '_ {
        let rows = self.dataset.rows();
        self.rows.iter().map(move |&r| &rows[r])
    }

    /// Surviving year columns with their index into [`CountryRow::values`].
    pub fn year_columns(&self) -> impl Iterator<Item = (usize, &'a YearColumn)> + '_ {
        let years = self.dataset.years();
        self.columns.iter().map(move |&c| (c, &years[c]))
    }

    /// Reshape into long form, one record per (country, year) cell.
    ///
    /// Records are ordered year-major: every surviving country for the first
    /// year, then every country for the next year, and so on.
    pub fn melt(&self) -> Vec<LongRecord> {
        let rows = self.dataset.rows();
        let years = self.dataset.years();
        let mut out = Vec::with_capacity(self.rows.len() * self.columns.len());
        for &c in &self.columns {
            for &r in &self.rows {
                out.push(LongRecord {
                    country: rows[r].country.clone(),
                    year: years[c].label.clone(),
                    value: rows[r].values[c],
                });
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{RawCell, RawTable};

    fn dataset() -> Dataset {
        let row = |c: &str, vals: [&str; 3]| {
            let mut cells = vec![RawCell::from(c)];
            cells.extend(vals.iter().map(|v| RawCell::from(*v)));
            cells
        };
        Dataset::from_raw(RawTable {
            columns: ["country", "1990", "2000", "2010"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            rows: vec![
                row("Chile", ["1", "2", "3"]),
                row("Albania", ["4", "5", "6"]),
                row("Benin", ["7", "8", "9"]),
            ],
        })
        .unwrap()
    }

    #[test]
    fn year_range_rejects_inverted_bounds() {
        assert!(YearRange::new(2000, 2000).is_ok());
        assert!(matches!(
            YearRange::new(2001, 2000),
            Err(DashboardError::InvalidSelection {
                start: 2001,
                end: 2000
            })
        ));
    }

    #[test]
    fn from_controls_handles_every_range_shape() {
        let sel = Selection::from_controls(None, None).unwrap();
        assert_eq!(sel, Selection::default());

        let sel = Selection::from_controls(Some(vec![]), Some(&[])).unwrap();
        assert!(sel.years.is_none());

        let sel = Selection::from_controls(Some(vec!["A".into()]), Some(&[1990, 2000])).unwrap();
        assert_eq!(sel.countries, vec!["A"]);
        assert_eq!(sel.years, Some(YearRange::new(1990, 2000).unwrap()));

        assert!(matches!(
            Selection::from_controls(None, Some(&[2000, 1990])),
            Err(DashboardError::InvalidSelection { .. })
        ));
        assert!(matches!(
            Selection::from_controls(None, Some(&[2000])),
            Err(DashboardError::InvalidRangeArity(1))
        ));
    }

    #[test]
    fn empty_selection_keeps_everything() {
        let ds = dataset();
        let view = apply(&ds, &Selection::default());
        assert_eq!(view.row_count(), 3);
        assert_eq!(view.column_count(), 3);
    }

    #[test]
    fn country_filter_preserves_source_order() {
        let ds = dataset();
        let sel = Selection {
            countries: vec!["Benin".into(), "Chile".into(), "Nowhere".into()],
            years: None,
        };
        let view = apply(&ds, &sel);
        let countries: Vec<&str> = view.rows().map(|r| r.country.as_str()).collect();
        assert_eq!(countries, vec!["Chile", "Benin"]);
    }

    #[test]
    fn year_filter_is_inclusive() {
        let ds = dataset();
        let sel = Selection {
            countries: vec![],
            years: Some(YearRange::new(1995, 2010).unwrap()),
        };
        let records = apply(&ds, &sel).melt();
        let years: Vec<&str> = records.iter().map(|r| r.year.as_str()).collect();
        assert_eq!(years, vec!["2000", "2000", "2000", "2010", "2010", "2010"]);
    }

    #[test]
    fn melt_is_year_major() {
        let ds = dataset();
        let sel = Selection {
            countries: vec!["Albania".into(), "Chile".into()],
            years: Some(YearRange::new(1990, 2000).unwrap()),
        };
        let records = apply(&ds, &sel).melt();
        let triples: Vec<(&str, &str, f64)> = records
            .iter()
            .map(|r| (r.country.as_str(), r.year.as_str(), r.value))
            .collect();
        assert_eq!(
            triples,
            vec![
                ("Chile", "1990", 1.0),
                ("Albania", "1990", 4.0),
                ("Chile", "2000", 2.0),
                ("Albania", "2000", 5.0),
            ]
        );
    }

    #[test]
    fn filtering_does_not_touch_the_dataset() {
        let ds = dataset();
        let before = ds.clone();
        let sel = Selection {
            countries: vec!["Chile".into()],
            years: Some(YearRange::new(2000, 2000).unwrap()),
        };
        let _ = apply(&ds, &sel).melt();
        assert_eq!(ds, before);
    }
}
