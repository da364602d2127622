//! Read-only flow and sensitivity snapshots.
//!
//! The RAO evaluators never compute flows themselves: they read a
//! [`FlowResult`], a snapshot produced by the external sensitivity
//! computation for one candidate network state. Two snapshots matter during
//! an optimization: the *initial* one (pre-optimization baseline) and the
//! *current* one being scored.
//!
//! [`FlowSnapshot`] is the in-memory implementation an importer or
//! sensitivity adapter fills; algorithmic code should only depend on the
//! trait so that adapters can stream values from their own structures.

use crate::cnec::FlowCnec;
use crate::units::{Side, Unit};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Outcome of the sensitivity computation that produced a [`FlowResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SensitivityStatus {
    /// Primary method converged
    Success,
    /// Degraded fallback method was used; results are usable but penalized
    Fallback,
    /// Computation failed; results must not be used
    Failure,
}

impl SensitivityStatus {
    #[inline]
    pub fn is_failure(&self) -> bool {
        matches!(self, SensitivityStatus::Failure)
    }
}

impl fmt::Display for SensitivityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensitivityStatus::Success => write!(f, "success"),
            SensitivityStatus::Fallback => write!(f, "fallback"),
            SensitivityStatus::Failure => write!(f, "failure"),
        }
    }
}

impl std::str::FromStr for SensitivityStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "success" => Ok(SensitivityStatus::Success),
            "fallback" => Ok(SensitivityStatus::Fallback),
            "failure" => Ok(SensitivityStatus::Failure),
            _ => Err(format!("Unknown sensitivity status: {}", s)),
        }
    }
}

/// Read-only accessors over computed flows, margins, and loop-flows.
///
/// Keyed by (CNEC, unit) and, for directional flows, by side. Implementations
/// must be shareable across threads: the evaluators may sweep the CNEC set in
/// parallel against a single snapshot.
///
/// Missing data is surfaced as `NaN` by [`FlowSnapshot`]; `NaN` values order
/// as never-binding in the rankings and produce zero violation excess.
/// Implementations backed by richer stores may panic instead — the evaluators
/// never catch either, since they cannot recover from malformed upstream
/// data.
pub trait FlowResult: Send + Sync {
    /// Flow through the CNEC's branch, seen from `side`.
    fn flow(&self, cnec: &FlowCnec, side: Side, unit: Unit) -> f64;

    /// Distance between the flow and the closest threshold. Positive margins
    /// are secure.
    fn margin(&self, cnec: &FlowCnec, unit: Unit) -> f64;

    /// Margin normalized by the zonal PTDF sum when positive (computed
    /// upstream), used by the relative-margin objective.
    fn relative_margin(&self, cnec: &FlowCnec, unit: Unit) -> f64;

    /// Portion of the flow attributable to cross-border exchanges. Signed.
    fn loop_flow(&self, cnec: &FlowCnec, unit: Unit) -> f64;
}

/// In-memory [`FlowResult`] backed by hash maps.
#[derive(Debug, Clone, Default)]
pub struct FlowSnapshot {
    flows: HashMap<(String, Side, Unit), f64>,
    margins: HashMap<(String, Unit), f64>,
    relative_margins: HashMap<(String, Unit), f64>,
    loop_flows: HashMap<(String, Unit), f64>,
}

impl FlowSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_flow(&mut self, cnec_id: impl Into<String>, side: Side, unit: Unit, value: f64) {
        self.flows.insert((cnec_id.into(), side, unit), value);
    }

    pub fn set_margin(&mut self, cnec_id: impl Into<String>, unit: Unit, value: f64) {
        self.margins.insert((cnec_id.into(), unit), value);
    }

    pub fn set_relative_margin(&mut self, cnec_id: impl Into<String>, unit: Unit, value: f64) {
        self.relative_margins.insert((cnec_id.into(), unit), value);
    }

    pub fn set_loop_flow(&mut self, cnec_id: impl Into<String>, unit: Unit, value: f64) {
        self.loop_flows.insert((cnec_id.into(), unit), value);
    }

    /// Builder-style variant of [`set_margin`](Self::set_margin).
    pub fn with_margin(mut self, cnec_id: impl Into<String>, unit: Unit, value: f64) -> Self {
        self.set_margin(cnec_id, unit, value);
        self
    }

    /// Builder-style variant of [`set_relative_margin`](Self::set_relative_margin).
    pub fn with_relative_margin(
        mut self,
        cnec_id: impl Into<String>,
        unit: Unit,
        value: f64,
    ) -> Self {
        self.set_relative_margin(cnec_id, unit, value);
        self
    }

    /// Builder-style variant of [`set_loop_flow`](Self::set_loop_flow).
    pub fn with_loop_flow(mut self, cnec_id: impl Into<String>, unit: Unit, value: f64) -> Self {
        self.set_loop_flow(cnec_id, unit, value);
        self
    }

    /// Builder-style variant of [`set_flow`](Self::set_flow).
    pub fn with_flow(
        mut self,
        cnec_id: impl Into<String>,
        side: Side,
        unit: Unit,
        value: f64,
    ) -> Self {
        self.set_flow(cnec_id, side, unit, value);
        self
    }
}

impl FlowResult for FlowSnapshot {
    fn flow(&self, cnec: &FlowCnec, side: Side, unit: Unit) -> f64 {
        self.flows
            .get(&(cnec.id.clone(), side, unit))
            .copied()
            .unwrap_or(f64::NAN)
    }

    fn margin(&self, cnec: &FlowCnec, unit: Unit) -> f64 {
        self.margins
            .get(&(cnec.id.clone(), unit))
            .copied()
            .unwrap_or(f64::NAN)
    }

    fn relative_margin(&self, cnec: &FlowCnec, unit: Unit) -> f64 {
        self.relative_margins
            .get(&(cnec.id.clone(), unit))
            .copied()
            .unwrap_or(f64::NAN)
    }

    fn loop_flow(&self, cnec: &FlowCnec, unit: Unit) -> f64 {
        self.loop_flows
            .get(&(cnec.id.clone(), unit))
            .copied()
            .unwrap_or(f64::NAN)
    }
}
