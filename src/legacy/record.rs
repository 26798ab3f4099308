//! tplot layout inside an IDL SAVE file
//!
//! IDL's `tplot_save` writes two variables:
//!
//! - `DQ`: one structure per stored quantity
//!   - field 0: name
//!   - field 1: data structure; x at position 0, y at position 2 and, for
//!     spectrograms (more than four fields), v at position 4
//!   - field 3: option structure, one tag per option
//!   - fields 4, 5, 6: time range, dtype tag, creation time
//! - `TV`: `[0]` options (TRANGE, WSIZE, VAR_LABEL...) and `[1]` settings
//!   with P/D/X/Y sub-structures (plot/device/axis settings)
//!
//! The positions match files produced by IDL tplot and are validated
//! against the structures themselves, not against a published layout.

use super::array::NumericArray;
use super::sav::{SavFile, SavValue, Scalar, StructArray, StructRow};
use crate::error::{Result, TplotError};
use crate::types::{OptionValue, SpecBins, ValueGrid};

const FIELD_NAME: usize = 0;
const FIELD_DATA: usize = 1;
const FIELD_OPTIONS: usize = 3;
const FIELD_TRANGE: usize = 4;
const FIELD_DTYPE: usize = 5;
const FIELD_CREATE_TIME: usize = 6;

const DATA_X: usize = 0;
const DATA_Y: usize = 2;
const DATA_V: usize = 4;

/// Record-level metadata copied onto the restored variable
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LegacyMetadata {
    pub time_range: Option<[f64; 2]>,
    pub dtype: Option<OptionValue>,
    pub create_time: Option<OptionValue>,
}

/// A plain time series
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesRecord {
    pub name: String,
    pub times: NumericArray,
    pub values: NumericArray,
    /// Option name (as stored) and value
    pub options: Vec<(String, OptionValue)>,
    pub metadata: LegacyMetadata,
}

/// A time series with bin boundaries
#[derive(Debug, Clone, PartialEq)]
pub struct SpectrogramRecord {
    pub series: TimeSeriesRecord,
    pub bins: NumericArray,
}

/// One stored quantity, classified once at decode time
#[derive(Debug, Clone, PartialEq)]
pub enum LegacyRecord {
    TimeSeries(TimeSeriesRecord),
    Spectrogram(SpectrogramRecord),
}

impl LegacyRecord {
    pub fn name(&self) -> &str {
        &self.series().name
    }

    pub fn series(&self) -> &TimeSeriesRecord {
        match self {
            LegacyRecord::TimeSeries(series) => series,
            LegacyRecord::Spectrogram(spec) => &spec.series,
        }
    }

    /// Convert every numeric array to host byte order
    pub fn to_native(self) -> Self {
        match self {
            LegacyRecord::TimeSeries(series) => LegacyRecord::TimeSeries(series.to_native()),
            LegacyRecord::Spectrogram(spec) => LegacyRecord::Spectrogram(SpectrogramRecord {
                series: spec.series.to_native(),
                bins: spec.bins.to_native(),
            }),
        }
    }
}

impl TimeSeriesRecord {
    fn to_native(self) -> Self {
        Self {
            times: self.times.to_native(),
            values: self.values.to_native(),
            ..self
        }
    }

    /// Timestamps as f64
    pub fn time_values(&self) -> Result<Vec<f64>> {
        let times = self.times.to_f64_vec()?;
        if self.times.ndim() > 1 {
            return Err(TplotError::LegacyFormat(format!(
                "'{}': time array has {} dimensions",
                self.name,
                self.times.ndim()
            )));
        }
        Ok(times)
    }

    /// Values laid out as (time, component)
    pub fn value_grid(&self) -> Result<ValueGrid> {
        grid_by_time(&self.name, "y", &self.values)
    }
}

impl SpectrogramRecord {
    /// Bins, shared or one row per sample
    pub fn spec_bins(&self) -> Result<SpecBins> {
        match self.bins.ndim() {
            0 | 1 => Ok(SpecBins::Static(self.bins.to_f64_vec()?)),
            _ => Ok(SpecBins::PerSample(grid_by_time(
                &self.series.name,
                "v",
                &self.bins,
            )?)),
        }
    }
}

/// 2-D arrays are stored with dimensions swapped relative to (time, component)
fn grid_by_time(name: &str, what: &str, array: &NumericArray) -> Result<ValueGrid> {
    let data = array.to_f64_vec()?;
    match array.shape() {
        [_] | [] => Ok(ValueGrid::from_column(data)),
        [components, times] => Ok(ValueGrid::new(*components, *times, data)?.transpose()),
        shape => Err(TplotError::LegacyFormat(format!(
            "'{}': {} array has unsupported shape {:?}",
            name, what, shape
        ))),
    }
}

/// Global settings from the `TV` variable, by shared option name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LegacySettings {
    pub entries: Vec<(&'static str, OptionValue)>,
}

/// The `DQ` structure array
pub fn quantities(file: &SavFile) -> Result<&StructArray> {
    file.get("dq")
        .ok_or_else(|| TplotError::LegacyFormat("no 'dq' variable in file".to_string()))?
        .as_structs()
        .ok_or_else(|| TplotError::LegacyFormat("'dq' is not a structure array".to_string()))
}

/// Decode one `DQ` element
pub fn decode_record(row: StructRow<'_>) -> Result<LegacyRecord> {
    let name = match row.at(FIELD_NAME) {
        Some(SavValue::Scalar(Scalar::Str(name))) => name.clone(),
        other => {
            return Err(TplotError::LegacyFormat(format!(
                "quantity name is {}",
                describe(other)
            )))
        }
    };

    let data = row
        .at(FIELD_DATA)
        .and_then(SavValue::as_structs)
        .and_then(|s| s.row(0))
        .ok_or_else(|| TplotError::LegacyFormat(format!("'{}': missing data structure", name)))?;

    let times = numeric_field(&name, "x", data.at(DATA_X))?;
    let values = numeric_field(&name, "y", data.at(DATA_Y))?;

    let options = match row.at(FIELD_OPTIONS) {
        Some(SavValue::Structs(opts)) => match opts.row(0) {
            Some(opts) => decode_options(&name, opts),
            None => Vec::new(),
        },
        _ => Vec::new(),
    };

    let metadata = LegacyMetadata {
        time_range: row.at(FIELD_TRANGE).and_then(option_value).and_then(|v| v.as_pair()),
        dtype: row.at(FIELD_DTYPE).and_then(option_value),
        create_time: row.at(FIELD_CREATE_TIME).and_then(option_value),
    };

    let series = TimeSeriesRecord {
        name,
        times,
        values,
        options,
        metadata,
    };

    if data.len() > DATA_V {
        let bins = numeric_field(&series.name, "v", data.at(DATA_V))?;
        Ok(LegacyRecord::Spectrogram(SpectrogramRecord { series, bins }))
    } else {
        Ok(LegacyRecord::TimeSeries(series))
    }
}

/// Decode the `TV` settings, if present
pub fn decode_settings(file: &SavFile) -> Result<Option<LegacySettings>> {
    let Some(tv) = file.get("tv") else {
        return Ok(None);
    };
    let tv = tv
        .as_structs()
        .and_then(|s| s.row(0))
        .ok_or_else(|| TplotError::LegacyFormat("'tv' is not a structure".to_string()))?;

    let mut settings = LegacySettings::default();

    if let Some(options) = tv.at(0).and_then(SavValue::as_structs).and_then(|s| s.row(0)) {
        for (tag, value) in options.fields() {
            let target = match tag.to_ascii_uppercase().as_str() {
                "TRANGE" => "x_range",
                "WSIZE" => "wsize",
                "VAR_LABEL" => "var_label",
                _ => continue,
            };
            if let Some(value) = option_value(value) {
                settings.entries.push((target, value));
            }
        }
    }

    let plot = tv
        .at(1)
        .and_then(SavValue::as_structs)
        .and_then(|s| s.row(0))
        .and_then(|s| s.field("P"))
        .and_then(SavValue::as_structs)
        .and_then(|s| s.row(0));
    if let Some(title) = plot.and_then(|p| p.field("TITLE")).and_then(option_value) {
        settings.entries.push(("title", title));
    }

    Ok(Some(settings))
}

fn decode_options(name: &str, opts: StructRow<'_>) -> Vec<(String, OptionValue)> {
    opts.fields()
        .filter_map(|(tag, value)| match option_value(value) {
            Some(v) => Some((tag.to_string(), v)),
            None => {
                tracing::warn!(
                    "'{}': option {} holds a {} and was not restored",
                    name,
                    tag,
                    value.kind()
                );
                None
            }
        })
        .collect()
}

fn numeric_field(name: &str, what: &str, value: Option<&SavValue>) -> Result<NumericArray> {
    match value {
        Some(SavValue::Numeric(arr)) => Ok(arr.clone()),
        other => Err(TplotError::LegacyFormat(format!(
            "'{}': {} data is {}",
            name,
            what,
            describe(other)
        ))),
    }
}

fn describe(value: Option<&SavValue>) -> &'static str {
    value.map(SavValue::kind).unwrap_or("missing")
}

/// Convert a save-file value into an option payload
///
/// Structures, undefined values and complex numbers have no option form.
pub fn option_value(value: &SavValue) -> Option<OptionValue> {
    match value {
        SavValue::Scalar(Scalar::Int(i)) => Some(OptionValue::Int(*i)),
        SavValue::Scalar(Scalar::UInt(u)) => Some(match i64::try_from(*u) {
            Ok(i) => OptionValue::Int(i),
            Err(_) => OptionValue::Float(*u as f64),
        }),
        SavValue::Scalar(Scalar::Float(f)) => Some(OptionValue::Float(*f)),
        SavValue::Scalar(Scalar::Str(s)) => Some(OptionValue::Text(s.clone())),
        SavValue::Numeric(arr) => {
            let arr = arr.clone().to_native();
            if arr.element().is_complex() {
                None
            } else if arr.element().is_integer() {
                arr.to_i64_vec().ok().map(OptionValue::Ints)
            } else {
                arr.to_f64_vec().ok().map(OptionValue::Floats)
            }
        }
        SavValue::Strings { values, .. } => Some(OptionValue::Texts(values.clone())),
        SavValue::Scalar(Scalar::Complex(..)) | SavValue::Structs(_) | SavValue::Null => None,
    }
}
