//! Variable store
//!
//! [`VariableStore`] maps variable names to [`Variable`]s and owns the one
//! [`SharedOptions`] record that applies to every panel. It is an ordinary
//! owned value: callers pass it by reference to the restore, option and
//! hover operations instead of reaching for global state.

use serde::{Deserialize, Serialize};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use crate::error::Result;
use crate::types::{OptionValue, SpecBins, ValueGrid, Variable};

/// Settings shared by all panels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SharedOptions {
    /// Plot title
    pub title: Option<String>,
    /// Window size in pixels (width, height)
    pub window_size: Option<[u32; 2]>,
    /// Displayed time range
    #[serde(default, with = "crate::serde_f64::opt_pair")]
    pub x_range: Option<[f64; 2]>,
    /// Variables shown as extra labels under the time axis
    #[serde(default)]
    pub var_label: Vec<String>,
    /// Options without a dedicated field
    #[serde(default)]
    pub extras: BTreeMap<String, OptionValue>,
}

impl SharedOptions {
    /// Replace every setting in place so all holders of this record see the update
    pub fn replace_with(&mut self, other: SharedOptions) {
        *self = other;
    }
}

/// Named variables plus the shared options
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariableStore {
    variables: BTreeMap<String, Variable>,
    shared: SharedOptions,
}

impl VariableStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.variables.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Variable> {
        self.variables.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    /// Insert a variable under its own name, returning any variable it replaced
    pub fn put(&mut self, variable: Variable) -> Option<Variable> {
        self.variables.insert(variable.name.clone(), variable)
    }

    /// Build a variable from arrays and store it, replacing any existing one
    ///
    /// Provenance is initialised from the data: the covered time range and
    /// the current wall-clock time as creation time.
    pub fn store_data(
        &mut self,
        name: &str,
        times: Vec<f64>,
        values: ValueGrid,
        bins: Option<SpecBins>,
    ) -> Result<&mut Variable> {
        let mut variable = Variable::new(name, times, values, bins)?;
        variable.provenance.time_range = variable.data_time_range();
        variable.provenance.create_time =
            Some(OptionValue::Text(chrono::Utc::now().to_rfc3339()));

        tracing::debug!(
            "Stored '{}' ({} samples, spectrogram: {})",
            name,
            variable.len(),
            variable.is_spectrogram()
        );

        Ok(match self.variables.entry(name.to_string()) {
            Entry::Occupied(mut slot) => {
                slot.insert(variable);
                slot.into_mut()
            }
            Entry::Vacant(slot) => slot.insert(variable),
        })
    }

    pub fn remove(&mut self, name: &str) -> Option<Variable> {
        self.variables.remove(name)
    }

    /// Variable names in sorted order
    pub fn names(&self) -> Vec<String> {
        self.variables.keys().cloned().collect()
    }

    /// Variables in name order
    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.variables.values()
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn shared_options(&self) -> &SharedOptions {
        &self.shared
    }

    pub fn shared_options_mut(&mut self) -> &mut SharedOptions {
        &mut self.shared
    }
}
