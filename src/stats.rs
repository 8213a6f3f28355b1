//! Summary aggregates over the loaded table.

use std::collections::{BTreeSet, HashSet};

use serde::Serialize;

use crate::data::{Table, Value};

/// Body of `GET /api/stats`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stats {
    /// Distinct `subject_id` values, ignoring nulls and non-finite numbers.
    pub unique_patients: usize,
    /// Distinct non-null arms, in order of first appearance.
    pub treatment_arms: Vec<String>,
    /// Distinct non-null doses, ascending.
    pub dose_levels: Vec<f64>,
    pub total_records: usize,
}

impl Stats {
    pub fn compute(table: &Table) -> Self {
        let unique_patients = table
            .column("subject_id")
            .map(|cells| cells.filter(|v| v.as_text().is_some()).collect::<BTreeSet<&Value>>().len())
            .unwrap_or(0);

        let mut seen = HashSet::new();
        let treatment_arms = table
            .column("arm")
            .map(|cells| {
                cells
                    .filter_map(Value::as_text)
                    .filter(|arm| seen.insert(arm.clone()))
                    .collect()
            })
            .unwrap_or_default();

        let mut dose_levels: Vec<f64> = table
            .column("dose")
            .map(|cells| cells.filter_map(Value::as_f64).collect())
            .unwrap_or_default();
        dose_levels.sort_by(f64::total_cmp);
        dose_levels.dedup();

        Self {
            unique_patients,
            treatment_arms,
            dose_levels,
            total_records: table.len(),
        }
    }
}
