use std::collections::{BTreeSet, HashSet};
use std::fmt;

use super::normalize::normalize_cell;
use crate::error::{DashboardError, Result};

/// Name of the identifying column in every source table.
pub const COUNTRY_COLUMN: &str = "country";

// ---------------------------------------------------------------------------
// RawCell – a single cell before normalisation
// ---------------------------------------------------------------------------

/// A cell as it comes out of the source file.
///
/// CSV only ever yields `Text`; JSON and Parquet keep their native types.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCell {
    Integer(i64),
    Float(f64),
    Text(String),
    Null,
}

impl fmt::Display for RawCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawCell::Integer(i) => write!(f, "{i}"),
            RawCell::Float(v) => write!(f, "{v}"),
            RawCell::Text(s) => write!(f, "{s}"),
            RawCell::Null => write!(f, "<null>"),
        }
    }
}

impl From<&str> for RawCell {
    fn from(s: &str) -> Self {
        RawCell::Text(s.to_string())
    }
}

impl From<i64> for RawCell {
    fn from(i: i64) -> Self {
        RawCell::Integer(i)
    }
}

impl From<f64> for RawCell {
    fn from(v: f64) -> Self {
        RawCell::Float(v)
    }
}

// ---------------------------------------------------------------------------
// RawTable – header + rows, exactly as read
// ---------------------------------------------------------------------------

/// An un-normalised table: header labels plus row-major cells.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<RawCell>>,
}

// ---------------------------------------------------------------------------
// Dataset – the normalised country × year table
// ---------------------------------------------------------------------------

/// One year column: the label as written in the header and its integer value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearColumn {
    pub label: String,
    pub year: i32,
}

/// One country's values, aligned with [`Dataset::years`].
#[derive(Debug, Clone, PartialEq)]
pub struct CountryRow {
    pub country: String,
    pub values: Vec<f64>,
}

/// The normalised dataset. Built once, never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    years: Vec<YearColumn>,
    rows: Vec<CountryRow>,
}

impl Dataset {
    /// Validate and normalise a raw table.
    ///
    /// The `country` column may sit anywhere; every other column must be an
    /// integer year label, strictly ascending.
    pub fn from_raw(table: RawTable) -> Result<Self> {
        let country_idx = table
            .columns
            .iter()
            .position(|c| c.trim() == COUNTRY_COLUMN)
            .ok_or(DashboardError::MissingCountryColumn)?;

        let year_indices: Vec<usize> = (0..table.columns.len())
            .filter(|&i| i != country_idx)
            .collect();
        let years = parse_year_columns(&table.columns, &year_indices)?;

        let mut rows = Vec::with_capacity(table.rows.len());
        let mut seen: HashSet<String> = HashSet::new();

        for (i, cells) in table.rows.into_iter().enumerate() {
            let row_no = i + 1;
            if cells.len() != table.columns.len() {
                return Err(DashboardError::RowLength {
                    row: row_no,
                    expected: table.columns.len(),
                    found: cells.len(),
                });
            }

            let country = match &cells[country_idx] {
                RawCell::Text(s) if !s.trim().is_empty() => s.clone(),
                _ => return Err(DashboardError::InvalidCountry(row_no)),
            };
            if !seen.insert(country.clone()) {
                return Err(DashboardError::DuplicateCountry(country));
            }

            let values = year_indices
                .iter()
                .zip(&years)
                .map(|(&col, year)| {
                    normalize_cell(&cells[col]).map_err(|source| DashboardError::MalformedData {
                        row: row_no,
                        country: country.clone(),
                        column: year.label.clone(),
                        source,
                    })
                })
                .collect::<Result<Vec<f64>>>()?;

            rows.push(CountryRow { country, values });
        }

        Ok(Dataset { years, rows })
    }

    /// Year columns in source order.
    pub fn years(&self) -> &[YearColumn] {
        &self.years
    }

    /// Country rows in source order.
    pub fn rows(&self) -> &[CountryRow] {
        &self.rows
    }

    /// Number of countries.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset has no countries.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct country names, sorted.
    pub fn sorted_countries(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|r| r.country.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// First and last year column. Construction guarantees at least one.
    pub fn year_bounds(&self) -> (i32, i32) {
        let first = self.years.first().map_or(0, |y| y.year);
        let last = self.years.last().map_or(0, |y| y.year);
        (first, last)
    }
}

fn parse_year_columns(columns: &[String], indices: &[usize]) -> Result<Vec<YearColumn>> {
    if indices.is_empty() {
        return Err(DashboardError::NoYearColumns);
    }

    let mut years: Vec<YearColumn> = Vec::with_capacity(indices.len());
    for &i in indices {
        let label = columns[i].trim().to_string();
        let year: i32 = label
            .parse()
            .map_err(|_| DashboardError::InvalidYearColumn(label.clone()))?;
        if let Some(prev) = years.last() {
            if prev.year >= year {
                return Err(DashboardError::UnorderedYearColumns {
                    previous: prev.label.clone(),
                    column: label,
                });
            }
        }
        years.push(YearColumn { label, year });
    }
    Ok(years)
}

// ---------------------------------------------------------------------------
// LongRecord – melted (country, year, value) triple
// ---------------------------------------------------------------------------

/// One point of the long-form view. Derived per render, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct LongRecord {
    pub country: String,
    pub year: String,
    pub value: f64,
}
