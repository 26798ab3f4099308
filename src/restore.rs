//! Restoring a store from disk
//!
//! [`VariableRestorer`] accepts two file kinds, told apart by extension:
//!
//! - legacy IDL SAVE files written by `tplot_save` (`.tplot` by default)
//! - native snapshots written by [`crate::snapshot::save`] (anything else)
//!
//! A path that does not exist is logged and reported as
//! [`RestoreReport::NotFound`]; the store is left as it was.
//!
//! Legacy restores are not transactional. Variables decoded before a
//! malformed record stay in the store when the error is returned.

use std::path::Path;

use crate::config::{TplotConfig, DEFAULT_LEGACY_EXTENSION};
use crate::error::{Result, ResultExt, TplotError};
use crate::legacy::record::{self, LegacyRecord};
use crate::legacy::SavFile;
use crate::options::{set_option, set_shared_option};
use crate::snapshot;
use crate::store::VariableStore;

/// Result of a restore call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestoreReport {
    /// Nothing at the given path
    NotFound,
    /// Names of the variables written to the store, in file order
    Restored { variables: Vec<String> },
}

impl RestoreReport {
    pub fn variables(&self) -> &[String] {
        match self {
            RestoreReport::NotFound => &[],
            RestoreReport::Restored { variables } => variables,
        }
    }
}

/// Reads saved files into a [`VariableStore`]
#[derive(Debug, Clone)]
pub struct VariableRestorer {
    legacy_extension: String,
}

impl Default for VariableRestorer {
    fn default() -> Self {
        Self {
            legacy_extension: DEFAULT_LEGACY_EXTENSION.to_string(),
        }
    }
}

impl VariableRestorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &TplotConfig) -> Self {
        Self {
            legacy_extension: config.legacy_extension.clone(),
        }
    }

    fn is_legacy(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(&self.legacy_extension))
    }

    /// Restore every variable in `path` into `store`
    pub fn restore(
        &self,
        store: &mut VariableStore,
        path: impl AsRef<Path>,
    ) -> Result<RestoreReport> {
        let path = path.as_ref();
        if !path.is_file() {
            tracing::error!("File {:?} not found, nothing restored", path);
            return Ok(RestoreReport::NotFound);
        }

        let variables = if self.is_legacy(path) {
            restore_legacy(store, path)?
        } else {
            restore_snapshot(store, path)?
        };

        tracing::info!("Restored {} variables from {:?}", variables.len(), path);
        Ok(RestoreReport::Restored { variables })
    }
}

fn restore_legacy(store: &mut VariableStore, path: &Path) -> Result<Vec<String>> {
    let file = SavFile::read(path).with_context(|| format!("Reading {:?}", path))?;
    let quantities = record::quantities(&file)?;
    let mut restored = Vec::with_capacity(quantities.len());

    for row in quantities.rows() {
        let record = record::decode_record(row)?.to_native();
        tracing::debug!(
            "Decoded '{}' ({})",
            record.name(),
            match &record {
                LegacyRecord::TimeSeries(_) => "time series",
                LegacyRecord::Spectrogram(_) => "spectrogram",
            }
        );

        let series = record.series();
        let times = series.time_values()?;
        let values = series.value_grid()?;
        let bins = match &record {
            LegacyRecord::Spectrogram(spec) => Some(spec.spec_bins()?),
            LegacyRecord::TimeSeries(_) => None,
        };

        let name = series.name.clone();
        store
            .store_data(&name, times, values, bins)
            .map_err(|e| TplotError::LegacyFormat(e.to_string()))?;

        for (option, value) in &series.options {
            match set_option(store, &name, &option.to_ascii_lowercase(), value.clone()) {
                Ok(()) => {}
                Err(TplotError::InvalidOption { option, message }) => {
                    tracing::warn!("'{}': skipping option {}: {}", name, option, message);
                }
                Err(e) => return Err(e),
            }
        }

        if let Some(variable) = store.get_mut(&name) {
            let metadata = &series.metadata;
            variable.provenance.time_range = metadata.time_range;
            variable.provenance.dtype = metadata.dtype.clone();
            variable.provenance.create_time = metadata.create_time.clone();
        }

        restored.push(name);
    }

    if restored.is_empty() {
        return Ok(restored);
    }

    match record::decode_settings(&file)? {
        Some(settings) => {
            for (option, value) in settings.entries {
                if let Err(e) = set_shared_option(store, option, value) {
                    tracing::warn!("Skipping global setting {}: {}", option, e);
                }
            }
        }
        None => tracing::warn!("{:?} has no global settings", path),
    }

    Ok(restored)
}

fn restore_snapshot(store: &mut VariableStore, path: &Path) -> Result<Vec<String>> {
    let snapshot = snapshot::load(path)?;
    let mut restored = Vec::with_capacity(snapshot.variables.len());

    for variable in snapshot.variables {
        tracing::debug!("Restoring '{}' from snapshot", variable.name);
        restored.push(variable.name.clone());
        store.put(variable);
    }
    store.shared_options_mut().replace_with(snapshot.options);

    Ok(restored)
}
