//! Flat overcost reflecting degraded sensitivity computations.

use crac_core::{FlowCnec, FlowResult, SensitivityStatus, Unit};
use std::sync::Arc;

use super::CostEvaluator;
use crate::error::{RaoError, RaoResult};

/// Charges a flat penalty when the sensitivity computation fell back to its
/// degraded mode, so the optimizer prefers candidates whose effects are known
/// accurately. A failed computation aborts the evaluation instead: costs
/// derived from failed sensitivities would be meaningless.
///
/// No per-CNEC breakdown exists; the ranking is always empty.
pub struct SensitivityFallbackOvercostEvaluator {
    fallback_overcost: f64,
}

impl SensitivityFallbackOvercostEvaluator {
    pub fn new(fallback_overcost: f64) -> Self {
        Self { fallback_overcost }
    }
}

impl CostEvaluator for SensitivityFallbackOvercostEvaluator {
    fn name(&self) -> &str {
        "sensitivity-fallback-cost"
    }

    fn unit(&self) -> Unit {
        // The flat overcost is not tied to a physical quantity; megawatts by
        // convention, matching the default objective unit.
        Unit::Megawatt
    }

    fn compute_cost(
        &self,
        _flow_result: &dyn FlowResult,
        status: SensitivityStatus,
    ) -> RaoResult<f64> {
        match status {
            SensitivityStatus::Success => Ok(0.0),
            SensitivityStatus::Fallback => Ok(self.fallback_overcost),
            SensitivityStatus::Failure => Err(RaoError::SensitivityFailure),
        }
    }

    fn costly_elements(
        &self,
        _flow_result: &dyn FlowResult,
        _max_elements: usize,
    ) -> Vec<Arc<FlowCnec>> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crac_core::FlowSnapshot;

    #[test]
    fn test_success_costs_nothing() {
        let evaluator = SensitivityFallbackOvercostEvaluator::new(10000.0);
        let snapshot = FlowSnapshot::new();
        let cost = evaluator
            .compute_cost(&snapshot, SensitivityStatus::Success)
            .unwrap();
        assert_eq!(cost, 0.0);
    }

    #[test]
    fn test_fallback_charges_configured_overcost() {
        let evaluator = SensitivityFallbackOvercostEvaluator::new(10000.0);
        let snapshot = FlowSnapshot::new();
        let cost = evaluator
            .compute_cost(&snapshot, SensitivityStatus::Fallback)
            .unwrap();
        assert_eq!(cost, 10000.0);
    }

    #[test]
    fn test_failure_aborts() {
        let evaluator = SensitivityFallbackOvercostEvaluator::new(10000.0);
        let snapshot = FlowSnapshot::new();
        let result = evaluator.compute_cost(&snapshot, SensitivityStatus::Failure);
        assert!(matches!(result, Err(RaoError::SensitivityFailure)));
    }

    #[test]
    fn test_no_costly_elements() {
        let evaluator = SensitivityFallbackOvercostEvaluator::new(10000.0);
        let snapshot = FlowSnapshot::new();
        assert!(evaluator.costly_elements(&snapshot, 10).is_empty());
    }
}
