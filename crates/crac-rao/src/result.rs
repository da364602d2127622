//! Immutable evaluation snapshot handed to the optimization loop.

use anyhow::{Context, Result};
use crac_core::FlowCnec;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

/// Everything the outer search loop needs from one objective evaluation:
/// the costs, and the ranked limiting elements for diagnostic reporting.
///
/// Built once per candidate state by
/// [`ObjectiveFunction::evaluate`](crate::ObjectiveFunction::evaluate); all
/// fields are computed eagerly at that point and never re-derived. Maps are
/// ordered so serialized output is deterministic.
#[derive(Debug, Clone, Serialize)]
pub struct ObjectiveFunctionResult {
    functional_cost: f64,
    virtual_costs: BTreeMap<String, f64>,
    most_limiting_elements: Vec<Arc<FlowCnec>>,
    costly_elements: BTreeMap<String, Vec<Arc<FlowCnec>>>,
}

impl ObjectiveFunctionResult {
    pub(crate) fn new(
        functional_cost: f64,
        virtual_costs: BTreeMap<String, f64>,
        most_limiting_elements: Vec<Arc<FlowCnec>>,
        costly_elements: BTreeMap<String, Vec<Arc<FlowCnec>>>,
    ) -> Self {
        Self {
            functional_cost,
            virtual_costs,
            most_limiting_elements,
            costly_elements,
        }
    }

    #[inline]
    pub fn functional_cost(&self) -> f64 {
        self.functional_cost
    }

    /// Sum of all virtual costs; 0.0 when none are registered.
    pub fn virtual_cost(&self) -> f64 {
        self.virtual_costs.values().sum()
    }

    /// One virtual cost by name, `NaN` for a name that was never registered
    /// (a zero cost means "registered and currently free").
    pub fn virtual_cost_named(&self, name: &str) -> f64 {
        self.virtual_costs.get(name).copied().unwrap_or(f64::NAN)
    }

    /// Functional cost plus the sum of all virtual costs.
    pub fn total_cost(&self) -> f64 {
        self.functional_cost + self.virtual_cost()
    }

    /// Registered virtual-cost names, sorted.
    pub fn virtual_cost_names(&self) -> Vec<&str> {
        self.virtual_costs.keys().map(String::as_str).collect()
    }

    /// Up to `max_elements` CNECs limiting the functional cost, worst first.
    pub fn most_limiting_elements(&self, max_elements: usize) -> &[Arc<FlowCnec>] {
        &self.most_limiting_elements[..self.most_limiting_elements.len().min(max_elements)]
    }

    /// Up to `max_elements` CNECs driving the named virtual cost, most
    /// violated first; empty for an unknown name.
    pub fn costly_elements(&self, name: &str, max_elements: usize) -> &[Arc<FlowCnec>] {
        match self.costly_elements.get(name) {
            Some(elements) => &elements[..elements.len().min(max_elements)],
            None => &[],
        }
    }

    /// Export to pretty-printed JSON.
    pub fn to_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("serializing ObjectiveFunctionResult to JSON")?;
        std::fs::write(path, json)
            .with_context(|| format!("writing JSON to {}", path.display()))?;
        Ok(())
    }

    /// Convert to a JSON value (for streaming/stdout).
    pub fn to_json_value(&self) -> Result<serde_json::Value> {
        serde_json::to_value(self).context("converting ObjectiveFunctionResult to JSON value")
    }
}
