//! Virtual cost penalizing loop-flow excess on cross-border elements.
//!
//! A CNEC's loop-flow magnitude is allowed up to the greater of its static
//! input threshold and its initial magnitude plus an acceptable augmentation:
//! flow that was already there before the optimization is never charged as a
//! new violation, only growth beyond the configured allowance is.

use crac_core::{FlowCnec, FlowResult, SensitivityStatus, Unit};
use std::sync::Arc;

use super::{sort_largest_excess_first, CostEvaluator};
use crate::error::{RaoError, RaoResult};

/// Configuration of the loop-flow virtual cost.
#[derive(Debug, Clone, Copy)]
pub struct LoopFlowParameters {
    /// How much the loop-flow magnitude may grow beyond its initial value
    /// before being charged, in the evaluator's unit
    pub acceptable_augmentation: f64,
    /// Cost per unit of excess loop-flow
    pub violation_cost: f64,
}

impl Default for LoopFlowParameters {
    fn default() -> Self {
        Self {
            acceptable_augmentation: 0.0,
            violation_cost: 10.0,
        }
    }
}

/// A CNEC with its input threshold resolved at construction.
struct LoopFlowEntry {
    cnec: Arc<FlowCnec>,
    input_threshold: f64,
}

/// Penalizes loop-flow magnitude beyond threshold-with-margin, accounting for
/// how much loop-flow was already present in the initial snapshot.
pub struct LoopFlowViolationCostEvaluator {
    entries: Vec<LoopFlowEntry>,
    unit: Unit,
    initial_flow_result: Arc<dyn FlowResult>,
    parameters: LoopFlowParameters,
}

impl LoopFlowViolationCostEvaluator {
    /// Fails fast if a CNEC has no loop-flow threshold, if a threshold is
    /// defined in another unit, or if a threshold is negative. Thresholds are
    /// cached here so per-call evaluation cannot fail.
    pub fn new(
        cnecs: &[Arc<FlowCnec>],
        unit: Unit,
        initial_flow_result: Arc<dyn FlowResult>,
        parameters: LoopFlowParameters,
    ) -> RaoResult<Self> {
        let mut entries = Vec::with_capacity(cnecs.len());
        for cnec in cnecs {
            let threshold = cnec.loop_flow_threshold.as_ref().ok_or_else(|| {
                RaoError::Config(format!("CNEC '{}' has no loop-flow threshold", cnec.id))
            })?;
            let input_threshold = threshold.threshold_with_reliability_margin(unit)?;
            if input_threshold < 0.0 {
                return Err(RaoError::Config(format!(
                    "CNEC '{}' has negative loop-flow threshold {}",
                    cnec.id, input_threshold
                )));
            }
            entries.push(LoopFlowEntry {
                cnec: Arc::clone(cnec),
                input_threshold,
            });
        }
        Ok(Self {
            entries,
            unit,
            initial_flow_result,
            parameters,
        })
    }

    fn entry_excess(&self, flow_result: &dyn FlowResult, entry: &LoopFlowEntry) -> f64 {
        let initial_loop_flow = self
            .initial_flow_result
            .loop_flow(&entry.cnec, self.unit)
            .abs();
        let highest_threshold = entry
            .input_threshold
            .max(initial_loop_flow + self.parameters.acceptable_augmentation);
        let current_loop_flow = flow_result.loop_flow(&entry.cnec, self.unit).abs();
        (current_loop_flow - highest_threshold).max(0.0)
    }

    /// Loop-flow magnitude beyond the CNEC's bound, ≥ 0.
    ///
    /// Fails if `cnec` is not part of this evaluator's set.
    pub fn loop_flow_excess(&self, flow_result: &dyn FlowResult, cnec: &FlowCnec) -> RaoResult<f64> {
        let entry = self
            .entries
            .iter()
            .find(|e| e.cnec.id == cnec.id)
            .ok_or_else(|| {
                RaoError::Config(format!(
                    "CNEC '{}' is not monitored by the loop-flow evaluator",
                    cnec.id
                ))
            })?;
        Ok(self.entry_excess(flow_result, entry))
    }

    fn violations(&self, flow_result: &dyn FlowResult) -> Vec<(Arc<FlowCnec>, f64)> {
        let mut violations: Vec<(Arc<FlowCnec>, f64)> = self
            .entries
            .iter()
            .map(|entry| (Arc::clone(&entry.cnec), self.entry_excess(flow_result, entry)))
            .filter(|(_, excess)| *excess > 0.0)
            .collect();
        sort_largest_excess_first(&mut violations);
        violations
    }
}

impl CostEvaluator for LoopFlowViolationCostEvaluator {
    fn name(&self) -> &str {
        "loop-flow-cost"
    }

    fn unit(&self) -> Unit {
        self.unit
    }

    fn compute_cost(
        &self,
        flow_result: &dyn FlowResult,
        _status: SensitivityStatus,
    ) -> RaoResult<f64> {
        Ok(self
            .violations(flow_result)
            .iter()
            .map(|(_, excess)| excess * self.parameters.violation_cost)
            .sum())
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::loop_flow_cnec;
    use crac_core::{FlowCnec, FlowSnapshot, State};

    fn evaluator(
        cnecs: &[Arc<FlowCnec>],
        initial: FlowSnapshot,
        parameters: LoopFlowParameters,
    ) -> LoopFlowViolationCostEvaluator {
        LoopFlowViolationCostEvaluator::new(cnecs, Unit::Megawatt, Arc::new(initial), parameters)
            .unwrap()
    }

    /// Concrete scenario: threshold 100, no initial loop-flow, no
    /// augmentation, current 190 → excess 90; −190 gives the same excess.
    #[test]
    fn test_excess_and_sign_symmetry() {
        let cnecs = vec![loop_flow_cnec("cnec1", 100.0)];
        let initial = FlowSnapshot::new().with_loop_flow("cnec1", Unit::Megawatt, 0.0);

        let evaluator = evaluator(
            &cnecs,
            initial,
            LoopFlowParameters {
                acceptable_augmentation: 0.0,
                violation_cost: 1.0,
            },
        );

        let positive = FlowSnapshot::new().with_loop_flow("cnec1", Unit::Megawatt, 190.0);
        let negative = FlowSnapshot::new().with_loop_flow("cnec1", Unit::Megawatt, -190.0);

        assert_eq!(
            evaluator.loop_flow_excess(&positive, &cnecs[0]).unwrap(),
            90.0
        );
        assert_eq!(
            evaluator.loop_flow_excess(&negative, &cnecs[0]).unwrap(),
            90.0
        );
    }

    #[test]
    fn test_within_threshold_is_free() {
        let cnecs = vec![loop_flow_cnec("cnec1", 100.0)];
        let initial = FlowSnapshot::new().with_loop_flow("cnec1", Unit::Megawatt, 0.0);
        let current = FlowSnapshot::new().with_loop_flow("cnec1", Unit::Megawatt, 99.0);

        let evaluator = evaluator(&cnecs, initial, LoopFlowParameters::default());
        let cost = evaluator
            .compute_cost(&current, SensitivityStatus::Success)
            .unwrap();
        assert_eq!(cost, 0.0);
        assert!(evaluator.costly_elements(&current, 10).is_empty());
    }

    /// A pre-existing loop-flow above the input threshold raises the bound:
    /// only growth beyond initial + augmentation is charged.
    #[test]
    fn test_pre_existing_loop_flow_raises_bound() {
        let cnecs = vec![loop_flow_cnec("cnec1", 100.0)];
        // Initial magnitude 150 already exceeds the 100 threshold.
        let initial = FlowSnapshot::new().with_loop_flow("cnec1", Unit::Megawatt, -150.0);

        let evaluator = evaluator(
            &cnecs,
            initial,
            LoopFlowParameters {
                acceptable_augmentation: 20.0,
                violation_cost: 1.0,
            },
        );

        // Bound is max(100, 150 + 20) = 170.
        let at_bound = FlowSnapshot::new().with_loop_flow("cnec1", Unit::Megawatt, 170.0);
        assert_eq!(
            evaluator.loop_flow_excess(&at_bound, &cnecs[0]).unwrap(),
            0.0
        );

        let beyond = FlowSnapshot::new().with_loop_flow("cnec1", Unit::Megawatt, 200.0);
        assert_eq!(evaluator.loop_flow_excess(&beyond, &cnecs[0]).unwrap(), 30.0);
    }

    #[test]
    fn test_aggregate_cost_and_ranking() {
        let cnecs = vec![
            loop_flow_cnec("b-line", 100.0),
            loop_flow_cnec("a-line", 100.0),
            loop_flow_cnec("calm-line", 100.0),
        ];
        let initial = FlowSnapshot::new()
            .with_loop_flow("a-line", Unit::Megawatt, 0.0)
            .with_loop_flow("b-line", Unit::Megawatt, 0.0)
            .with_loop_flow("calm-line", Unit::Megawatt, 0.0);
        // a and b tie at excess 50, calm-line stays within bounds.
        let current = FlowSnapshot::new()
            .with_loop_flow("a-line", Unit::Megawatt, 150.0)
            .with_loop_flow("b-line", Unit::Megawatt, -150.0)
            .with_loop_flow("calm-line", Unit::Megawatt, 80.0);

        let evaluator = evaluator(
            &cnecs,
            initial,
            LoopFlowParameters {
                acceptable_augmentation: 0.0,
                violation_cost: 2.0,
            },
        );

        let cost = evaluator
            .compute_cost(&current, SensitivityStatus::Success)
            .unwrap();
        assert_eq!(cost, 200.0);

        let ranked = evaluator.costly_elements(&current, 10);
        let ids: Vec<&str> = ranked.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["a-line", "b-line"]);
    }

    #[test]
    fn test_missing_threshold_fails_construction() {
        let cnecs = vec![Arc::new(FlowCnec::new(
            "bare",
            "bare",
            State::preventive(),
        ))];
        let initial = Arc::new(FlowSnapshot::new());
        let result = LoopFlowViolationCostEvaluator::new(
            &cnecs,
            Unit::Megawatt,
            initial,
            LoopFlowParameters::default(),
        );
        assert!(matches!(result, Err(RaoError::Config(_))));
    }

    #[test]
    fn test_threshold_unit_mismatch_fails_construction() {
        let cnecs = vec![Arc::new(
            FlowCnec::new("amp-line", "amp-line", State::preventive())
                .with_loop_flow_threshold(500.0, Unit::Ampere),
        )];
        let initial = Arc::new(FlowSnapshot::new());
        let result = LoopFlowViolationCostEvaluator::new(
            &cnecs,
            Unit::Megawatt,
            initial,
            LoopFlowParameters::default(),
        );
        assert!(matches!(result, Err(RaoError::Crac(_))));
    }

    #[test]
    fn test_unknown_cnec_excess_query_fails() {
        let cnecs = vec![loop_flow_cnec("known", 100.0)];
        let initial = FlowSnapshot::new().with_loop_flow("known", Unit::Megawatt, 0.0);
        let evaluator = evaluator(&cnecs, initial, LoopFlowParameters::default());

        let stranger = FlowCnec::new("stranger", "stranger", State::preventive());
        let current = FlowSnapshot::new();
        assert!(evaluator.loop_flow_excess(&current, &stranger).is_err());
    }
}
