//! Virtual cost guarding monitored elements (MNECs).
//!
//! An MNEC is not optimized for, but the optimizer must not degrade it
//! either: its margin may only drop by a configured slack below its initial
//! value. Any further degradation is charged proportionally.

use crac_core::{FlowCnec, FlowResult, SensitivityStatus, Unit};
use std::sync::Arc;

use super::{sort_largest_excess_first, CostEvaluator};
use crate::error::RaoResult;

/// Totals below this are numerical noise and reported as exactly zero.
const COST_EPSILON: f64 = 1e-10;

/// Configuration of the MNEC virtual cost.
#[derive(Debug, Clone, Copy)]
pub struct MnecParameters {
    /// How far an MNEC margin may drop below its initial value before being
    /// charged, in the evaluator's unit
    pub acceptable_margin_diminution: f64,
    /// Cost per unit of excess degradation
    pub violation_cost: f64,
}

impl Default for MnecParameters {
    fn default() -> Self {
        Self {
            acceptable_margin_diminution: 50.0,
            violation_cost: 10.0,
        }
    }
}

/// Penalizes monitored CNECs whose margin degraded beyond the acceptable
/// slack relative to the initial snapshot.
pub struct MnecViolationCostEvaluator {
    cnecs: Vec<Arc<FlowCnec>>,
    unit: Unit,
    initial_flow_result: Arc<dyn FlowResult>,
    parameters: MnecParameters,
}

impl MnecViolationCostEvaluator {
    /// Retains the monitored CNECs of `cnecs`; non-monitored elements
    /// contribute nothing even if supplied.
    pub fn new(
        cnecs: &[Arc<FlowCnec>],
        unit: Unit,
        initial_flow_result: Arc<dyn FlowResult>,
        parameters: MnecParameters,
    ) -> Self {
        Self {
            cnecs: cnecs
                .iter()
                .filter(|c| c.is_monitored())
                .cloned()
                .collect(),
            unit,
            initial_flow_result,
            parameters,
        }
    }

    /// Degradation beyond the allowed floor, ≥ 0.
    ///
    /// The floor is `initial margin − acceptable diminution`; as long as the
    /// current margin stays at or above it the excess is zero.
    fn excess(&self, flow_result: &dyn FlowResult, cnec: &FlowCnec) -> f64 {
        let initial_margin = self.initial_flow_result.margin(cnec, self.unit);
        let current_margin = flow_result.margin(cnec, self.unit);
        let allowed_margin = initial_margin - self.parameters.acceptable_margin_diminution;
        (allowed_margin - current_margin).max(0.0)
    }

    fn violations(&self, flow_result: &dyn FlowResult) -> Vec<(Arc<FlowCnec>, f64)> {
        let mut violations: Vec<(Arc<FlowCnec>, f64)> = self
            .cnecs
            .iter()
            .map(|cnec| (Arc::clone(cnec), self.excess(flow_result, cnec)))
            .filter(|(_, excess)| *excess > 0.0)
            .collect();
        sort_largest_excess_first(&mut violations);
        violations
    }
}

impl CostEvaluator for MnecViolationCostEvaluator {
    fn name(&self) -> &str {
        "mnec-cost"
    }

    fn unit(&self) -> Unit {
        self.unit
    }

    fn compute_cost(
        &self,
        flow_result: &dyn FlowResult,
        _status: SensitivityStatus,
    ) -> RaoResult<f64> {
        let total: f64 = self
            .violations(flow_result)
            .iter()
            .map(|(_, excess)| excess * self.parameters.violation_cost)
            .sum();
        Ok(if total < COST_EPSILON { 0.0 } else { total })
    }

    fn costly_elements(
        &self,
        flow_result: &dyn FlowResult,
        max_elements: usize,
    ) -> Vec<Arc<FlowCnec>> {
        let mut elements: Vec<Arc<FlowCnec>> = self
            .violations(flow_result)
            .into_iter()
            .map(|(cnec, _)| cnec)
            .collect();
        elements.truncate(max_elements);
        elements
    }
}
