//! Critical network elements under contingency (CNECs).
//!
//! A [`FlowCnec`] identifies a physical branch observed in a specific
//! [`State`] and carries the two flags that drive the objective function:
//!
//! - **optimized**: the element's margin takes part in the functional cost
//!   (the optimizer tries to maximize its worst margin);
//! - **monitored**: the element is an MNEC, penalized through a virtual cost
//!   when its margin degrades too far from the initial situation.
//!
//! An element may be optimized-only, monitored-only, or both. CNECs are
//! immutable from the evaluators' point of view: they are built once by the
//! (external) CRAC importer and only read afterwards.

use crate::error::{CracError, CracResult};
use crate::state::State;
use crate::units::Unit;
use serde::Serialize;

/// Loop-flow limit attached to a CNEC, already reduced by its reliability
/// margin.
///
/// Attached by the (external) importer from the loop-flow extension of the
/// CRAC; the value is defined in a single unit and is never converted here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LoopFlowThreshold {
    pub value: f64,
    pub unit: Unit,
}

impl LoopFlowThreshold {
    pub fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    /// The threshold reduced by the reliability margin, in the requested unit.
    ///
    /// Unit conversion needs nominal voltages from the network model, so a
    /// request in another unit is a validation error rather than a silent
    /// conversion.
    pub fn threshold_with_reliability_margin(&self, unit: Unit) -> CracResult<f64> {
        if unit != self.unit {
            return Err(CracError::Validation(format!(
                "loop-flow threshold defined in {}, requested in {}",
                self.unit, unit
            )));
        }
        Ok(self.value)
    }
}

/// A critical network element and contingency.
#[derive(Debug, Clone, Serialize)]
pub struct FlowCnec {
    pub id: String,
    pub name: String,
    /// TSO operating the element, when known
    pub operator: Option<String>,
    pub state: State,
    /// Margin takes part in the functional (min-margin) cost
    pub optimized: bool,
    /// Element is an MNEC, guarded by the MNEC virtual cost
    pub monitored: bool,
    /// Loop-flow limit, present only on cross-border relevant elements
    pub loop_flow_threshold: Option<LoopFlowThreshold>,
}

impl FlowCnec {
    /// Create a CNEC that is neither optimized nor monitored; callers opt in
    /// through the builder methods.
    pub fn new(id: impl Into<String>, name: impl Into<String>, state: State) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            operator: None,
            state,
            optimized: false,
            monitored: false,
            loop_flow_threshold: None,
        }
    }

    /// Include this element's margin in the functional cost.
    pub fn optimized(mut self) -> Self {
        self.optimized = true;
        self
    }

    /// Guard this element with the MNEC violation cost.
    pub fn monitored(mut self) -> Self {
        self.monitored = true;
        self
    }

    /// Set the operating TSO.
    pub fn with_operator(mut self, operator: impl Into<String>) -> Self {
        self.operator = Some(operator.into());
        self
    }

    /// Attach a loop-flow limit (already reduced by its reliability margin).
    pub fn with_loop_flow_threshold(mut self, value: f64, unit: Unit) -> Self {
        self.loop_flow_threshold = Some(LoopFlowThreshold::new(value, unit));
        self
    }

    #[inline]
    pub fn is_optimized(&self) -> bool {
        self.optimized
    }

    #[inline]
    pub fn is_monitored(&self) -> bool {
        self.monitored
    }
}
