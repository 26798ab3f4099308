//! # tplot-rs: time-series variable store
//!
//! Named time series and spectrograms, the options that control how they are
//! plotted, and the two pieces of tplot behaviour that need more than a
//! lookup table:
//!
//! - **Restore**: rebuild a [`VariableStore`] from a legacy IDL `tplot_save`
//!   file or from a native JSON snapshot
//! - **Hover slicing**: as the cursor moves over a spectrogram panel, show the
//!   spectrum at the nearest timestamp in a secondary plot
//!
//! ## Architecture
//!
//! - **Store**: [`VariableStore`] is an owned context object passed by reference
//! - **Legacy**: [`legacy`] reads the IDL SAVE container and the tplot layout inside it
//! - **Snapshot**: [`snapshot`] saves and loads the native format
//! - **Hover**: [`hover`] drives any [`RenderTarget`] from hover events
//!
//! ## Example
//!
//! ```ignore
//! use tplot_rs::{HoverEvent, HoverIndexer, VariableRestorer, VariableStore};
//!
//! let mut store = VariableStore::new();
//! VariableRestorer::new().restore(&mut store, "orbit.tplot")?;
//!
//! let mut indexer = HoverIndexer::new(my_plot);
//! indexer.handle(&store, &HoverEvent::new(1.4e9, "swe_spec"));
//! ```

pub mod config;
pub mod error;
pub mod hover;
pub mod legacy;
pub mod options;
pub mod restore;
mod serde_f64;
pub mod snapshot;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use config::TplotConfig;
pub use error::{Result, TplotError};
pub use hover::{Axis, HoverEvent, HoverIndexer, HoverOutcome, HoverSource, RenderTarget};
pub use options::{set_option, set_shared_option};
pub use restore::{RestoreReport, VariableRestorer};
pub use store::{SharedOptions, VariableStore};
pub use types::{AxisScale, OptionValue, PlotOptions, SpecBins, ValueGrid, Variable};
