//! Native snapshot files
//!
//! A snapshot is a single JSON array:
//!
//! ```text
//! [count, variable_1, ..., variable_count, shared_options]
//! ```
//!
//! The leading count lets a reader know how many variable entries follow
//! before the shared options. Non-finite floats are written as strings
//! (`"NaN"`, `"inf"`, `"-inf"`) so arrays round-trip bit for bit.

use serde::de::{self, IgnoredAny, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::path::Path;

use crate::error::{Result, ResultExt, TplotError};
use crate::store::{SharedOptions, VariableStore};
use crate::types::Variable;

/// Contents of a snapshot file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub variables: Vec<Variable>,
    pub options: SharedOptions,
}

impl Snapshot {
    /// Copy everything out of a store
    pub fn from_store(store: &VariableStore) -> Self {
        Self {
            variables: store.iter().cloned().collect(),
            options: store.shared_options().clone(),
        }
    }

    /// Check every variable's shape invariants
    pub fn validate(&self) -> Result<()> {
        for variable in &self.variables {
            variable
                .validate()
                .map_err(|e| TplotError::Snapshot(e.to_string()))?;
        }
        Ok(())
    }
}

impl Serialize for Snapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.variables.len() + 2))?;
        seq.serialize_element(&self.variables.len())?;
        for variable in &self.variables {
            seq.serialize_element(variable)?;
        }
        seq.serialize_element(&self.options)?;
        seq.end()
    }
}

struct SnapshotVisitor;

impl<'de> Visitor<'de> for SnapshotVisitor {
    type Value = Snapshot;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a sequence of [count, variables..., shared options]")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<Snapshot, A::Error> {
        let count: usize = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(0, &self))?;

        // Cap the pre-allocation; the count comes from the file
        let mut variables = Vec::with_capacity(count.min(1024));
        for i in 0..count {
            let variable: Variable = seq
                .next_element()?
                .ok_or_else(|| de::Error::invalid_length(i + 1, &self))?;
            variables.push(variable);
        }

        let options: SharedOptions = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(count + 1, &self))?;

        if seq.next_element::<IgnoredAny>()?.is_some() {
            return Err(de::Error::custom(format!(
                "more entries than the declared {} variables",
                count
            )));
        }

        Ok(Snapshot { variables, options })
    }
}

impl<'de> Deserialize<'de> for Snapshot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_seq(SnapshotVisitor)
    }
}

/// Write a store to a snapshot file
pub fn save(path: impl AsRef<Path>, store: &VariableStore) -> Result<()> {
    let path = path.as_ref();
    let snapshot = Snapshot::from_store(store);
    let content = serde_json::to_string(&snapshot)?;
    std::fs::write(path, content).with_context(|| format!("Writing snapshot {:?}", path))?;
    tracing::info!(
        "Saved {} variables to {:?}",
        snapshot.variables.len(),
        path
    );
    Ok(())
}

/// Read and validate a snapshot file
pub fn load(path: impl AsRef<Path>) -> Result<Snapshot> {
    let path = path.as_ref();
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Reading snapshot {:?}", path))?;
    let snapshot: Snapshot = serde_json::from_str(&content)
        .map_err(|e| TplotError::Snapshot(format!("{:?}: {}", path, e)))?;
    snapshot.validate()?;
    Ok(snapshot)
}
