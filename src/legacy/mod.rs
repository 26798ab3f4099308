//! Legacy save files
//!
//! Support for `.tplot` files written by IDL's `tplot_save`:
//!
//! - [`sav`] reads the IDL SAVE container into a generic value tree
//! - [`array`] holds raw numeric arrays and their byte order
//! - [`record`] maps the tplot layout onto typed records

pub mod array;
pub mod record;
pub mod sav;

pub use array::{ByteOrder, ElementType, NumericArray};
pub use record::{LegacyRecord, LegacySettings, SpectrogramRecord, TimeSeriesRecord};
pub use sav::{SavFile, SavValue, Scalar, StructArray, StructRow};
