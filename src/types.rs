//! Core data types for tplot-rs
//!
//! This module contains the fundamental data structures used throughout
//! the crate for representing stored variables and their plot options.
//!
//! # Main Types
//!
//! - [`Variable`] - A named time series (or spectrogram) with options and provenance
//! - [`ValueGrid`] - Row-major 2-D value storage indexed by (time, component)
//! - [`SpecBins`] - Bin boundaries; their presence marks a spectrogram
//! - [`PlotOptions`] / [`AxisOptions`] - Per-variable axis settings
//! - [`OptionValue`] - Dynamically typed option payload
//!
//! # Invariants
//!
//! A [`Variable`] always satisfies:
//! - `times.len() == values.rows()`
//! - with bins, `values.cols()` equals the bin count
//! - time-varying bins carry one row per timestamp

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{Result, TplotError};

/// Row-major 2-D array of values indexed by (time, component)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ValueGridRepr", into = "ValueGridRepr")]
pub struct ValueGrid {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

#[derive(Serialize, Deserialize)]
struct ValueGridRepr {
    rows: usize,
    cols: usize,
    #[serde(with = "crate::serde_f64::vec")]
    data: Vec<f64>,
}

impl TryFrom<ValueGridRepr> for ValueGrid {
    type Error = TplotError;

    fn try_from(repr: ValueGridRepr) -> Result<Self> {
        ValueGrid::new(repr.rows, repr.cols, repr.data)
    }
}

impl From<ValueGrid> for ValueGridRepr {
    fn from(grid: ValueGrid) -> Self {
        Self {
            rows: grid.rows,
            cols: grid.cols,
            data: grid.data,
        }
    }
}

impl ValueGrid {
    /// Create a grid from row-major data
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        if rows.checked_mul(cols) != Some(data.len()) {
            return Err(TplotError::Shape(format!(
                "{} values cannot fill a {}x{} grid",
                data.len(),
                rows,
                cols
            )));
        }
        Ok(Self { rows, cols, data })
    }

    /// Create a single-column grid (one component per timestamp)
    pub fn from_column(values: Vec<f64>) -> Self {
        Self {
            rows: values.len(),
            cols: 1,
            data: values,
        }
    }

    /// Create a grid from equally sized rows
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let cols = rows.first().map(Vec::len).unwrap_or(0);
        if let Some(bad) = rows.iter().position(|r| r.len() != cols) {
            return Err(TplotError::Shape(format!(
                "row {} has {} values, expected {}",
                bad,
                rows[bad].len(),
                cols
            )));
        }
        let n = rows.len();
        Ok(Self {
            rows: n,
            cols,
            data: rows.into_iter().flatten().collect(),
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Raw row-major data
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Get one row (all components at one timestamp)
    pub fn row(&self, index: usize) -> Option<&[f64]> {
        if index >= self.rows {
            return None;
        }
        let start = index * self.cols;
        Some(&self.data[start..start + self.cols])
    }

    /// Swap rows and columns
    pub fn transpose(&self) -> Self {
        let mut data = Vec::with_capacity(self.data.len());
        for c in 0..self.cols {
            for r in 0..self.rows {
                data.push(self.data[r * self.cols + c]);
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            data,
        }
    }
}

/// Bin boundaries for a spectrogram
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SpecBins {
    /// One set of bins shared by every sample
    Static(#[serde(with = "crate::serde_f64::vec")] Vec<f64>),
    /// One row of bins per timestamp
    PerSample(ValueGrid),
}

impl SpecBins {
    /// Number of bins per sample
    pub fn count(&self) -> usize {
        match self {
            SpecBins::Static(bins) => bins.len(),
            SpecBins::PerSample(grid) => grid.cols(),
        }
    }

    /// Bins that apply to the sample at `index`
    pub fn row_for(&self, index: usize) -> Option<&[f64]> {
        match self {
            SpecBins::Static(bins) => Some(bins),
            SpecBins::PerSample(grid) => grid.row(index),
        }
    }
}

/// Axis scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AxisScale {
    #[default]
    Linear,
    Log,
}

impl AxisScale {
    /// Map a truthy flag to a scale
    pub fn from_flag(log: bool) -> Self {
        if log {
            AxisScale::Log
        } else {
            AxisScale::Linear
        }
    }

    pub fn is_log(&self) -> bool {
        matches!(self, AxisScale::Log)
    }
}

/// Settings for one plot axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AxisOptions {
    /// Axis title
    pub label: Option<String>,
    /// Secondary title line
    #[serde(default)]
    pub subtitle: Option<String>,
    /// Linear or log
    pub scale: AxisScale,
    /// Explicit user-set range; `None` means auto-scale
    #[serde(default, with = "crate::serde_f64::opt_pair")]
    pub range: Option<[f64; 2]>,
}

/// Per-variable plot options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PlotOptions {
    pub x: AxisOptions,
    pub y: AxisOptions,
    pub z: AxisOptions,
    /// X axis of the interactive slice plot (the bins)
    pub interactive_x: AxisOptions,
    /// Y axis of the interactive slice plot (the values)
    pub interactive_y: AxisOptions,
    /// Draw as a spectrogram in the main panel
    pub spec: bool,
    /// Legend entries, one per component
    #[serde(default)]
    pub legend_names: Vec<String>,
    /// Color specification as given by the user
    #[serde(default)]
    pub color: Option<OptionValue>,
    /// Relative panel height
    #[serde(default, with = "crate::serde_f64::opt")]
    pub panel_size: Option<f64>,
    /// Options without a dedicated field, keyed by lower-case name
    #[serde(default)]
    pub extras: BTreeMap<String, OptionValue>,
}

/// Where a variable came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Provenance {
    /// Time range covered by the data
    #[serde(default, with = "crate::serde_f64::opt_pair")]
    pub time_range: Option<[f64; 2]>,
    /// Source dtype tag
    pub dtype: Option<OptionValue>,
    /// Creation timestamp
    pub create_time: Option<OptionValue>,
}

/// Dynamically typed option payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Float(#[serde(with = "crate::serde_f64")] f64),
    Text(String),
    Ints(Vec<i64>),
    Floats(#[serde(with = "crate::serde_f64::vec")] Vec<f64>),
    Texts(Vec<String>),
}

impl OptionValue {
    /// Truthiness in the IDL sense: non-zero numbers, non-empty text
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Bool(b) => Some(*b),
            OptionValue::Int(i) => Some(*i != 0),
            OptionValue::Float(f) => Some(*f != 0.0),
            OptionValue::Text(s) => Some(!s.is_empty()),
            OptionValue::Ints(v) if v.len() == 1 => Some(v[0] != 0),
            OptionValue::Floats(v) if v.len() == 1 => Some(v[0] != 0.0),
            _ => None,
        }
    }

    /// Single number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            OptionValue::Int(i) => Some(*i as f64),
            OptionValue::Float(f) => Some(*f),
            OptionValue::Ints(v) if v.len() == 1 => Some(v[0] as f64),
            OptionValue::Floats(v) if v.len() == 1 => Some(v[0]),
            _ => None,
        }
    }

    /// All numbers, widening integers
    pub fn as_f64s(&self) -> Option<Vec<f64>> {
        match self {
            OptionValue::Int(i) => Some(vec![*i as f64]),
            OptionValue::Float(f) => Some(vec![*f]),
            OptionValue::Ints(v) => Some(v.iter().map(|i| *i as f64).collect()),
            OptionValue::Floats(v) => Some(v.clone()),
            _ => None,
        }
    }

    /// Exactly two numbers, e.g. a range
    pub fn as_pair(&self) -> Option<[f64; 2]> {
        match self.as_f64s()?.as_slice() {
            [lo, hi] => Some([*lo, *hi]),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            OptionValue::Text(s) => Some(s),
            OptionValue::Texts(v) if v.len() == 1 => Some(&v[0]),
            _ => None,
        }
    }

    /// Text or list of texts
    pub fn as_texts(&self) -> Option<Vec<String>> {
        match self {
            OptionValue::Text(s) => Some(vec![s.clone()]),
            OptionValue::Texts(v) => Some(v.clone()),
            _ => None,
        }
    }
}

impl std::fmt::Display for OptionValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionValue::Bool(b) => write!(f, "{}", b),
            OptionValue::Int(i) => write!(f, "{}", i),
            OptionValue::Float(v) => write!(f, "{}", v),
            OptionValue::Text(s) => write!(f, "'{}'", s),
            OptionValue::Ints(v) => write!(f, "{:?}", v),
            OptionValue::Floats(v) => write!(f, "{:?}", v),
            OptionValue::Texts(v) => write!(f, "{:?}", v),
        }
    }
}

/// A stored variable: a time series, or a spectrogram when bins are present
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    /// Unique name in the store
    pub name: String,
    /// Sample timestamps (seconds)
    #[serde(with = "crate::serde_f64::vec")]
    pub times: Vec<f64>,
    /// Values indexed by (time, component/bin)
    pub values: ValueGrid,
    /// Bin boundaries; `Some` marks a spectrogram
    pub bins: Option<SpecBins>,
    /// Plot options
    #[serde(default)]
    pub options: PlotOptions,
    /// Provenance metadata
    #[serde(default)]
    pub provenance: Provenance,
}

impl Variable {
    /// Create a variable, checking the shape invariants
    pub fn new(
        name: impl Into<String>,
        times: Vec<f64>,
        values: ValueGrid,
        bins: Option<SpecBins>,
    ) -> Result<Self> {
        let var = Self {
            name: name.into(),
            times,
            values,
            bins,
            options: PlotOptions::default(),
            provenance: Provenance::default(),
        };
        var.validate()?;
        Ok(var)
    }

    /// Check the shape invariants
    pub fn validate(&self) -> Result<()> {
        if self.times.len() != self.values.rows() {
            return Err(TplotError::Shape(format!(
                "'{}': {} timestamps but {} value rows",
                self.name,
                self.times.len(),
                self.values.rows()
            )));
        }
        if let Some(bins) = &self.bins {
            if bins.count() != self.values.cols() {
                return Err(TplotError::Shape(format!(
                    "'{}': {} bins but {} values per sample",
                    self.name,
                    bins.count(),
                    self.values.cols()
                )));
            }
            if let SpecBins::PerSample(grid) = bins {
                if grid.rows() != self.times.len() {
                    return Err(TplotError::Shape(format!(
                        "'{}': {} bin rows for {} timestamps",
                        self.name,
                        grid.rows(),
                        self.times.len()
                    )));
                }
            }
        }
        Ok(())
    }

    /// Whether this variable carries bin boundaries
    pub fn is_spectrogram(&self) -> bool {
        self.bins.is_some()
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Min/max of the non-NaN timestamps
    pub fn data_time_range(&self) -> Option<[f64; 2]> {
        self.times
            .iter()
            .filter(|t| !t.is_nan())
            .fold(None, |acc, &t| match acc {
                None => Some([t, t]),
                Some([lo, hi]) => Some([lo.min(t), hi.max(t)]),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_rows_and_transpose() {
        let grid = ValueGrid::new(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(grid.row(1), Some(&[4.0, 5.0, 6.0][..]));
        assert_eq!(grid.row(2), None);

        let t = grid.transpose();
        assert_eq!(t.rows(), 3);
        assert_eq!(t.cols(), 2);
        assert_eq!(t.row(0), Some(&[1.0, 4.0][..]));
        assert_eq!(t.row(2), Some(&[3.0, 6.0][..]));
    }

    #[test]
    fn test_grid_rejects_bad_length() {
        assert!(ValueGrid::new(2, 2, vec![1.0, 2.0, 3.0]).is_err());
        assert!(ValueGrid::from_rows(vec![vec![1.0], vec![1.0, 2.0]]).is_err());
    }

    #[test]
    fn test_grid_deserialize_checks_shape() {
        let res: std::result::Result<ValueGrid, _> =
            serde_json::from_str(r#"{"rows":2,"cols":2,"data":[1.0]}"#);
        assert!(res.is_err());
    }

    #[test]
    fn test_variable_invariants() {
        let values = ValueGrid::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();

        assert!(Variable::new("ok", vec![0.0, 1.0], values.clone(), None).is_ok());
        assert!(Variable::new("short", vec![0.0], values.clone(), None).is_err());
        assert!(Variable::new(
            "bins",
            vec![0.0, 1.0],
            values.clone(),
            Some(SpecBins::Static(vec![10.0, 20.0, 30.0]))
        )
        .is_err());

        let var = Variable::new(
            "spec",
            vec![0.0, 1.0],
            values,
            Some(SpecBins::Static(vec![10.0, 20.0])),
        )
        .unwrap();
        assert!(var.is_spectrogram());
        assert_eq!(var.len(), 2);
    }

    #[test]
    fn test_per_sample_bins() {
        let bins = SpecBins::PerSample(
            ValueGrid::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap(),
        );
        assert_eq!(bins.count(), 2);
        assert_eq!(bins.row_for(1), Some(&[3.0, 4.0][..]));
        assert_eq!(SpecBins::Static(vec![5.0]).row_for(99), Some(&[5.0][..]));
    }

    #[test]
    fn test_option_value_conversions() {
        assert_eq!(OptionValue::Int(1).as_bool(), Some(true));
        assert_eq!(OptionValue::Floats(vec![0.0]).as_bool(), Some(false));
        assert_eq!(OptionValue::Ints(vec![1, 100]).as_pair(), Some([1.0, 100.0]));
        assert_eq!(OptionValue::Floats(vec![1.0]).as_pair(), None);
        assert_eq!(OptionValue::Texts(vec!["a".into()]).as_text(), Some("a"));
        assert_eq!(OptionValue::Text("b".into()).as_f64(), None);
    }

    #[test]
    fn test_data_time_range_skips_nan() {
        let var = Variable::new(
            "t",
            vec![3.0, f64::NAN, 1.0],
            ValueGrid::from_column(vec![0.0; 3]),
            None,
        )
        .unwrap();
        assert_eq!(var.data_time_range(), Some([1.0, 3.0]));
    }
}
