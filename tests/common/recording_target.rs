//! Render target that records every call

use tplot_rs::{Axis, RenderTarget};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Label(Axis, String),
    LogMode(bool, bool),
    Range(Axis, f64, f64),
    Data(Vec<f64>, Vec<f64>),
}

#[derive(Debug, Default)]
pub struct RecordingTarget {
    pub calls: Vec<Call>,
}

impl RecordingTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Data passed in the most recent `set_data` call
    pub fn last_data(&self) -> Option<(&[f64], &[f64])> {
        self.calls.iter().rev().find_map(|c| match c {
            Call::Data(xs, ys) => Some((xs.as_slice(), ys.as_slice())),
            _ => None,
        })
    }

    /// Log flags from the most recent `set_log_mode` call
    pub fn last_log_mode(&self) -> Option<(bool, bool)> {
        self.calls.iter().rev().find_map(|c| match c {
            Call::LogMode(x, y) => Some((*x, *y)),
            _ => None,
        })
    }

    /// Whether the most recent calls blanked the plot
    pub fn is_cleared(&self) -> bool {
        matches!(
            self.calls.as_slice(),
            [
                ..,
                Call::LogMode(false, false),
                Call::Label(Axis::X, x),
                Call::Label(Axis::Y, y),
                Call::Data(xs, ys),
            ] if x.is_empty() && y.is_empty() && xs.is_empty() && ys.is_empty()
        )
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }
}

impl RenderTarget for RecordingTarget {
    fn set_axis_label(&mut self, axis: Axis, text: &str) {
        self.calls.push(Call::Label(axis, text.to_string()));
    }

    fn set_log_mode(&mut self, x_log: bool, y_log: bool) {
        self.calls.push(Call::LogMode(x_log, y_log));
    }

    fn set_range(&mut self, axis: Axis, lo: f64, hi: f64) {
        self.calls.push(Call::Range(axis, lo, hi));
    }

    fn set_data(&mut self, xs: &[f64], ys: &[f64]) {
        self.calls.push(Call::Data(xs.to_vec(), ys.to_vec()));
    }
}
