//! Interactive spectrogram slice
//!
//! When the cursor moves over a spectrogram panel, the secondary plot shows
//! the spectrum (values against bins) of the sample nearest to the cursor
//! time. Hovering over anything else clears the secondary plot.
//!
//! # Flow
//!
//! 1. The GUI reports cursor moves to a [`HoverSource`] as
//!    `(time, variable name)` pairs.
//! 2. The source forwards each [`HoverEvent`] to every registered
//!    [`HoverListener`], in registration order.
//! 3. [`HoverIndexer`] looks the variable up in the [`VariableStore`],
//!    picks the nearest sample and pushes labels, log modes, ranges and
//!    data to its [`RenderTarget`].
//!
//! Events are handled synchronously, one at a time.

use crate::store::VariableStore;
use crate::types::{AxisScale, Variable};

/// Axis of the secondary plot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Bottom axis (bins)
    X,
    /// Left axis (values)
    Y,
}

/// Rendering surface for the secondary plot
///
/// Implemented by the GUI layer; the indexer only pushes already-derived
/// values through it.
#[cfg_attr(test, mockall::automock)]
pub trait RenderTarget {
    /// Set an axis title
    fn set_axis_label(&mut self, axis: Axis, text: &str);
    /// Switch each axis between linear and log
    fn set_log_mode(&mut self, x_log: bool, y_log: bool);
    /// Fix an axis range (in display coordinates, i.e. log10 for log axes)
    fn set_range(&mut self, axis: Axis, lo: f64, hi: f64);
    /// Replace the plotted line
    fn set_data(&mut self, xs: &[f64], ys: &[f64]);
}

impl<T: RenderTarget + ?Sized> RenderTarget for &mut T {
    fn set_axis_label(&mut self, axis: Axis, text: &str) {
        (**self).set_axis_label(axis, text)
    }

    fn set_log_mode(&mut self, x_log: bool, y_log: bool) {
        (**self).set_log_mode(x_log, y_log)
    }

    fn set_range(&mut self, axis: Axis, lo: f64, hi: f64) {
        (**self).set_range(axis, lo, hi)
    }

    fn set_data(&mut self, xs: &[f64], ys: &[f64]) {
        (**self).set_data(xs, ys)
    }
}

/// A cursor move over a panel
#[derive(Debug, Clone, PartialEq)]
pub struct HoverEvent {
    /// Cursor position on the time axis
    pub time: f64,
    /// Variable drawn in the panel under the cursor
    pub variable: String,
}

impl HoverEvent {
    pub fn new(time: f64, variable: impl Into<String>) -> Self {
        Self {
            time,
            variable: variable.into(),
        }
    }
}

/// Receiver of hover events
pub trait HoverListener {
    fn on_hover(&mut self, store: &VariableStore, event: &HoverEvent);
}

impl<F> HoverListener for F
where
    F: FnMut(&VariableStore, &HoverEvent),
{
    fn on_hover(&mut self, store: &VariableStore, event: &HoverEvent) {
        self(store, event)
    }
}

/// Fans hover events out to registered listeners
#[derive(Default)]
pub struct HoverSource<'a> {
    listeners: Vec<Box<dyn HoverListener + 'a>>,
}

impl<'a> HoverSource<'a> {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Add a listener; listeners are called in registration order
    pub fn register_listener(&mut self, listener: impl HoverListener + 'a) {
        self.listeners.push(Box::new(listener));
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Deliver a new hover position to every listener
    pub fn change_hover_time(&mut self, store: &VariableStore, time: f64, variable: &str) {
        let event = HoverEvent::new(time, variable);
        for listener in &mut self.listeners {
            listener.on_hover(store, &event);
        }
    }
}

/// What a hover event did to the secondary plot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverOutcome {
    /// The plot was emptied
    Cleared,
    /// The plot shows the sample at `index`
    Updated { index: usize, x_log: bool, y_log: bool },
}

/// Index of the timestamp closest to `time`
///
/// Ties go to the lowest index. NaN timestamps never match.
pub fn nearest_index(times: &[f64], time: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &t) in times.iter().enumerate() {
        let distance = (t - time).abs();
        if distance.is_nan() {
            continue;
        }
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((i, distance)),
        }
    }
    best.map(|(i, _)| i)
}

fn nan_min(values: &[f64]) -> Option<f64> {
    values
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .reduce(f64::min)
}

/// Whether an axis can honour a log request for the given data
///
/// Negative data forces linear and is reported; all-NaN data renders linear.
pub fn effective_log(requested: AxisScale, values: &[f64], context: &str) -> bool {
    if !requested.is_log() {
        return false;
    }
    match nan_min(values) {
        Some(min) if min < 0.0 => {
            tracing::warn!(
                "Negative data is incompatible with log plotting ({}), using linear axis",
                context
            );
            false
        }
        Some(_) => true,
        None => false,
    }
}

/// Drives the secondary plot from hover events
pub struct HoverIndexer<R: RenderTarget> {
    target: R,
}

impl<R: RenderTarget> HoverIndexer<R> {
    pub fn new(target: R) -> Self {
        Self { target }
    }

    pub fn target(&self) -> &R {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut R {
        &mut self.target
    }

    pub fn into_target(self) -> R {
        self.target
    }

    /// Update the secondary plot for one hover event
    pub fn handle(&mut self, store: &VariableStore, event: &HoverEvent) -> HoverOutcome {
        let Some(variable) = store.get(&event.variable).filter(|v| v.is_spectrogram()) else {
            self.clear();
            return HoverOutcome::Cleared;
        };
        let Some(index) = nearest_index(&variable.times, event.time) else {
            self.clear();
            return HoverOutcome::Cleared;
        };
        self.show_sample(variable, index)
    }

    fn show_sample(&mut self, variable: &Variable, index: usize) -> HoverOutcome {
        let (Some(bins), Some(row)) = (
            variable.bins.as_ref().and_then(|b| b.row_for(index)),
            variable.values.row(index),
        ) else {
            self.clear();
            return HoverOutcome::Cleared;
        };
        let opts = &variable.options;

        let x_log = effective_log(
            opts.interactive_x.scale,
            bins,
            &format!("{} bins", variable.name),
        );
        let y_log = effective_log(
            opts.interactive_y.scale,
            row,
            &format!("{} values", variable.name),
        );

        let z_label = opts.z.label.as_deref().unwrap_or("");
        self.target.set_axis_label(Axis::X, &format!("{} bins", z_label));
        self.target.set_axis_label(Axis::Y, z_label);
        self.target.set_log_mode(x_log, y_log);

        if let Some(range) = opts.interactive_x.range {
            self.apply_range(Axis::X, range, x_log);
        }
        if let Some(range) = opts.interactive_y.range {
            self.apply_range(Axis::Y, range, y_log);
        }

        self.target.set_data(bins, row);

        tracing::trace!(
            "Hover on '{}' at sample {} (t = {})",
            variable.name,
            index,
            variable.times[index]
        );
        HoverOutcome::Updated {
            index,
            x_log,
            y_log,
        }
    }

    fn apply_range(&mut self, axis: Axis, [lo, hi]: [f64; 2], log: bool) {
        if log {
            self.target.set_range(axis, lo.log10(), hi.log10());
        } else {
            self.target.set_range(axis, lo, hi);
        }
    }

    /// Empty plot, blank labels, linear axes
    pub fn clear(&mut self) {
        self.target.set_log_mode(false, false);
        self.target.set_axis_label(Axis::X, "");
        self.target.set_axis_label(Axis::Y, "");
        self.target.set_data(&[], &[]);
    }
}

impl<R: RenderTarget> HoverListener for HoverIndexer<R> {
    fn on_hover(&mut self, store: &VariableStore, event: &HoverEvent) {
        self.handle(store, event);
    }
}
