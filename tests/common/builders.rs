//! Test data builders for creating test objects

use super::sav_builder::{Row, SavBuilder, Value};
use tplot_rs::{SpecBins, ValueGrid, Variable, VariableStore};

/// Builder for creating test Variables
pub struct VariableBuilder {
    name: String,
    times: Vec<f64>,
    rows: Vec<Vec<f64>>,
    bins: Option<SpecBins>,
}

impl VariableBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            times: Vec::new(),
            rows: Vec::new(),
            bins: None,
        }
    }

    /// Single-component series
    pub fn series(mut self, times: &[f64], values: &[f64]) -> Self {
        self.times = times.to_vec();
        self.rows = values.iter().map(|v| vec![*v]).collect();
        self
    }

    /// One row of values per timestamp
    pub fn rows(mut self, times: &[f64], rows: Vec<Vec<f64>>) -> Self {
        self.times = times.to_vec();
        self.rows = rows;
        self
    }

    pub fn bins(mut self, bins: &[f64]) -> Self {
        self.bins = Some(SpecBins::Static(bins.to_vec()));
        self
    }

    pub fn per_sample_bins(mut self, rows: Vec<Vec<f64>>) -> Self {
        self.bins = Some(SpecBins::PerSample(ValueGrid::from_rows(rows).unwrap()));
        self
    }

    pub fn build(self) -> Variable {
        let values = if self.rows.is_empty() {
            ValueGrid::new(0, self.bins.as_ref().map_or(1, SpecBins::count), Vec::new()).unwrap()
        } else {
            ValueGrid::from_rows(self.rows).unwrap()
        };
        Variable::new(self.name, self.times, values, self.bins).unwrap()
    }

    /// Build and insert into `store`
    pub fn store_in(self, store: &mut VariableStore) {
        store.put(self.build());
    }
}

/// A spectrogram with `n` samples at t = 0, 10, 20, ... over three bins
pub fn spectrogram(name: &str, n: usize) -> Variable {
    let times: Vec<f64> = (0..n).map(|i| i as f64 * 10.0).collect();
    let rows = (0..n)
        .map(|i| vec![i as f64, i as f64 + 0.5, i as f64 + 1.0])
        .collect();
    VariableBuilder::new(name)
        .rows(&times, rows)
        .bins(&[10.0, 100.0, 1000.0])
        .build()
}

/// One `DQ` element in the tplot layout
pub struct QuantityBuilder {
    name: String,
    times: Vec<f64>,
    rows: Vec<Vec<f64>>,
    bins: Option<Value>,
    options: Vec<(String, Value)>,
    trange: [f64; 2],
    dtype: i32,
    create_time: f64,
}

impl QuantityBuilder {
    pub fn new(name: &str, times: &[f64], rows: Vec<Vec<f64>>) -> Self {
        let trange = [
            times.first().copied().unwrap_or(0.0),
            times.last().copied().unwrap_or(0.0),
        ];
        Self {
            name: name.to_string(),
            times: times.to_vec(),
            rows,
            bins: None,
            options: Vec::new(),
            trange,
            dtype: 1,
            create_time: 1.6e9,
        }
    }

    pub fn bins(mut self, bins: &[f64]) -> Self {
        self.bins = Some(Value::doubles(bins));
        self
    }

    /// Time-varying bins, one row per sample
    pub fn bins_by_time(mut self, rows: &[Vec<f64>]) -> Self {
        self.bins = Some(Value::doubles_by_time(rows));
        self
    }

    pub fn option(mut self, name: &str, value: Value) -> Self {
        self.options.push((name.to_string(), value));
        self
    }

    pub fn trange(mut self, lo: f64, hi: f64) -> Self {
        self.trange = [lo, hi];
        self
    }

    pub fn build(self) -> Row {
        let y = if self.rows.iter().all(|r| r.len() == 1) {
            Value::doubles(&self.rows.iter().map(|r| r[0]).collect::<Vec<_>>())
        } else {
            Value::doubles_by_time(&self.rows)
        };
        let mut data = Row::new("")
            .tag("X", Value::doubles(&self.times))
            .tag("X_UNITS", Value::str("s"))
            .tag("Y", y)
            .tag("Y_UNITS", Value::str(""));
        if let Some(v) = self.bins {
            data = data.tag("V", v);
        }

        let options = if self.options.is_empty() {
            Value::Long(0)
        } else {
            let mut row = Row::new("");
            for (name, value) in self.options {
                row = row.tag(&name, value);
            }
            row.into_value()
        };

        Row::new("TPLOT_QUANT")
            .tag("NAME", Value::str(&self.name))
            .tag("DH", data.into_value())
            .tag("LH", Value::Long(0))
            .tag("DL", options)
            .tag("TRANGE", Value::doubles(&self.trange))
            .tag("DTYPE", Value::Long(self.dtype))
            .tag("CREATE_TIME", Value::Double(self.create_time))
    }
}

/// Global settings stored in `TV`
#[derive(Default)]
pub struct SettingsBuilder {
    trange: Option<[f64; 2]>,
    wsize: Option<[i16; 2]>,
    var_label: Option<Vec<String>>,
    title: Option<String>,
}

impl SettingsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trange(mut self, lo: f64, hi: f64) -> Self {
        self.trange = Some([lo, hi]);
        self
    }

    pub fn wsize(mut self, w: i16, h: i16) -> Self {
        self.wsize = Some([w, h]);
        self
    }

    pub fn var_label(mut self, labels: &[&str]) -> Self {
        self.var_label = Some(labels.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn build(self) -> Value {
        let mut options = Row::new("TPLOT_OPTIONS").tag("DUMMY", Value::Long(0));
        if let Some([lo, hi]) = self.trange {
            options = options.tag("TRANGE", Value::doubles(&[lo, hi]));
        }
        if let Some(ws) = self.wsize {
            options = options.tag("WSIZE", Value::ints(&ws));
        }
        if let Some(labels) = &self.var_label {
            let labels: Vec<&str> = labels.iter().map(String::as_str).collect();
            options = options.tag("VAR_LABEL", Value::strings(&labels));
        }

        let mut plot = Row::new("").tag("CHARSIZE", Value::Double(1.0));
        if let Some(title) = &self.title {
            plot = plot.tag("TITLE", Value::str(title));
        }
        let settings = Row::new("TPLOT_SETTINGS")
            .tag("D", Row::new("").tag("NAME", Value::str("X")).into_value())
            .tag("P", plot.into_value())
            .tag("X", Row::new("").tag("STYLE", Value::Long(1)).into_value())
            .tag("Y", Row::new("").tag("STYLE", Value::Long(0)).into_value());

        Row::new("TPLOT_VARS")
            .tag("OPTIONS", options.into_value())
            .tag("SETTINGS", settings.into_value())
            .into_value()
    }
}

/// A complete tplot save file with the given quantities and settings
pub fn tplot_file(quantities: Vec<Row>, settings: Option<SettingsBuilder>) -> SavBuilder {
    let mut builder = SavBuilder::new()
        .notice("written by the test suite")
        .variable("DQ", &Value::Struct(quantities));
    if let Some(settings) = settings {
        builder = builder.variable("TV", &settings.build());
    }
    builder
}
