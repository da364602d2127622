//! Per-CNEC margin computation strategies.
//!
//! The functional cost ranks CNECs by margin, but *which* margin depends on
//! the study configuration: absolute margins, relative (PTDF-normalized)
//! margins, or margins where some operators opted their elements out of the
//! optimization. Each variant is a [`MarginEvaluator`] strategy so the cost
//! evaluators stay agnostic of the formulation.
//!
//! The closed set of variants:
//!
//! - [`BasicMarginEvaluator`] - forwards to the snapshot's absolute margin
//! - [`BasicRelativeMarginEvaluator`] - forwards to the relative margin
//! - [`UnoptimizedCnecMarginEvaluator`] - decorator neutralizing CNECs whose
//!   operator does not take part in this perimeter's optimization

use crac_core::{FlowCnec, FlowResult, Unit};
use std::collections::HashSet;
use std::sync::Arc;

/// Strategy computing the margin of one CNEC from a flow snapshot.
pub trait MarginEvaluator: Send + Sync {
    fn margin(&self, flow_result: &dyn FlowResult, cnec: &FlowCnec, unit: Unit) -> f64;
}

/// Plain absolute margin, straight from the snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicMarginEvaluator;

impl MarginEvaluator for BasicMarginEvaluator {
    fn margin(&self, flow_result: &dyn FlowResult, cnec: &FlowCnec, unit: Unit) -> f64 {
        flow_result.margin(cnec, unit)
    }
}

/// Relative margin: positive margins normalized by zonal PTDF sums upstream.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicRelativeMarginEvaluator;

impl MarginEvaluator for BasicRelativeMarginEvaluator {
    fn margin(&self, flow_result: &dyn FlowResult, cnec: &FlowCnec, unit: Unit) -> f64 {
        flow_result.relative_margin(cnec, unit)
    }
}

/// Pre-perimeter margin above which an excluded element counts as secure.
const SECURE_MARGIN_BOUND: f64 = 0.0;

/// Decorator handling CNECs whose operator opted out of the optimization.
///
/// An element of an excluded operator keeps its real margin only if it was
/// already constrained before this perimeter's optimization began (its
/// pre-perimeter margin is not above [`SECURE_MARGIN_BOUND`]); an element
/// that was secure to begin with is reported at `+∞` so it can never become
/// the binding minimum.
pub struct UnoptimizedCnecMarginEvaluator {
    inner: Box<dyn MarginEvaluator>,
    pre_perimeter: Arc<dyn FlowResult>,
    excluded_operators: HashSet<String>,
}

impl UnoptimizedCnecMarginEvaluator {
    pub fn new(
        inner: Box<dyn MarginEvaluator>,
        pre_perimeter: Arc<dyn FlowResult>,
        excluded_operators: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            inner,
            pre_perimeter,
            excluded_operators: excluded_operators.into_iter().collect(),
        }
    }

    fn is_excluded(&self, cnec: &FlowCnec) -> bool {
        cnec.operator
            .as_ref()
            .is_some_and(|op| self.excluded_operators.contains(op))
    }
}

impl MarginEvaluator for UnoptimizedCnecMarginEvaluator {
    fn margin(&self, flow_result: &dyn FlowResult, cnec: &FlowCnec, unit: Unit) -> f64 {
        if self.is_excluded(cnec) {
            let pre_perimeter_margin = self.inner.margin(self.pre_perimeter.as_ref(), cnec, unit);
            if pre_perimeter_margin > SECURE_MARGIN_BOUND {
                return f64::INFINITY;
            }
        }
        self.inner.margin(flow_result, cnec, unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crac_core::{FlowSnapshot, State};

    fn cnec_with_operator(id: &str, operator: &str) -> FlowCnec {
        FlowCnec::new(id, id, State::preventive())
            .optimized()
            .with_operator(operator)
    }

    #[test]
    fn test_basic_margin_forwards_to_snapshot() {
        let snapshot = FlowSnapshot::new().with_margin("ne-1", Unit::Megawatt, -42.0);
        let cnec = cnec_with_operator("ne-1", "RTE");

        let evaluator = BasicMarginEvaluator;
        assert_eq!(evaluator.margin(&snapshot, &cnec, Unit::Megawatt), -42.0);
    }

    #[test]
    fn test_relative_margin_forwards_to_snapshot() {
        let snapshot = FlowSnapshot::new()
            .with_margin("ne-1", Unit::Megawatt, 80.0)
            .with_relative_margin("ne-1", Unit::Megawatt, 160.0);
        let cnec = cnec_with_operator("ne-1", "RTE");

        let evaluator = BasicRelativeMarginEvaluator;
        assert_eq!(evaluator.margin(&snapshot, &cnec, Unit::Megawatt), 160.0);
    }

    #[test]
    fn test_included_operator_keeps_current_margin() {
        let baseline = Arc::new(FlowSnapshot::new().with_margin("ne-1", Unit::Megawatt, 100.0));
        let current = FlowSnapshot::new().with_margin("ne-1", Unit::Megawatt, -30.0);
        let cnec = cnec_with_operator("ne-1", "RTE");

        let evaluator = UnoptimizedCnecMarginEvaluator::new(
            Box::new(BasicMarginEvaluator),
            baseline,
            ["Elia".to_string()],
        );
        assert_eq!(evaluator.margin(&current, &cnec, Unit::Megawatt), -30.0);
    }

    #[test]
    fn test_excluded_operator_secure_baseline_is_unconstrained() {
        // Baseline margin 100 > 0: the element was not limiting before the
        // perimeter, and its operator chose not to optimize it.
        let baseline = Arc::new(FlowSnapshot::new().with_margin("ne-1", Unit::Megawatt, 100.0));
        let current = FlowSnapshot::new().with_margin("ne-1", Unit::Megawatt, -30.0);
        let cnec = cnec_with_operator("ne-1", "Elia");

        let evaluator = UnoptimizedCnecMarginEvaluator::new(
            Box::new(BasicMarginEvaluator),
            baseline,
            ["Elia".to_string()],
        );
        assert_eq!(
            evaluator.margin(&current, &cnec, Unit::Megawatt),
            f64::INFINITY
        );
    }

    #[test]
    fn test_excluded_operator_constrained_baseline_keeps_margin() {
        // Baseline margin -20 <= 0: already a limiting factor, so the element
        // must still be respected.
        let baseline = Arc::new(FlowSnapshot::new().with_margin("ne-1", Unit::Megawatt, -20.0));
        let current = FlowSnapshot::new().with_margin("ne-1", Unit::Megawatt, -30.0);
        let cnec = cnec_with_operator("ne-1", "Elia");

        let evaluator = UnoptimizedCnecMarginEvaluator::new(
            Box::new(BasicMarginEvaluator),
            baseline,
            ["Elia".to_string()],
        );
        assert_eq!(evaluator.margin(&current, &cnec, Unit::Megawatt), -30.0);
    }

    #[test]
    fn test_baseline_exactly_zero_keeps_margin() {
        let baseline = Arc::new(FlowSnapshot::new().with_margin("ne-1", Unit::Megawatt, 0.0));
        let current = FlowSnapshot::new().with_margin("ne-1", Unit::Megawatt, 15.0);
        let cnec = cnec_with_operator("ne-1", "Elia");

        let evaluator = UnoptimizedCnecMarginEvaluator::new(
            Box::new(BasicMarginEvaluator),
            baseline,
            ["Elia".to_string()],
        );
        assert_eq!(evaluator.margin(&current, &cnec, Unit::Megawatt), 15.0);
    }

    #[test]
    fn test_cnec_without_operator_never_excluded() {
        let baseline = Arc::new(FlowSnapshot::new().with_margin("ne-1", Unit::Megawatt, 100.0));
        let current = FlowSnapshot::new().with_margin("ne-1", Unit::Megawatt, -5.0);
        let cnec = FlowCnec::new("ne-1", "ne-1", State::preventive()).optimized();

        let evaluator = UnoptimizedCnecMarginEvaluator::new(
            Box::new(BasicMarginEvaluator),
            baseline,
            ["Elia".to_string()],
        );
        assert_eq!(evaluator.margin(&current, &cnec, Unit::Megawatt), -5.0);
    }

    /// The decorator composes over any wrapped strategy, including the
    /// relative-margin variant.
    #[test]
    fn test_decorator_over_relative_margin() {
        let baseline =
            Arc::new(FlowSnapshot::new().with_relative_margin("ne-1", Unit::Megawatt, 50.0));
        let current = FlowSnapshot::new().with_relative_margin("ne-1", Unit::Megawatt, -10.0);
        let cnec = cnec_with_operator("ne-1", "Elia");

        let evaluator = UnoptimizedCnecMarginEvaluator::new(
            Box::new(BasicRelativeMarginEvaluator),
            baseline,
            ["Elia".to_string()],
        );
        assert_eq!(
            evaluator.margin(&current, &cnec, Unit::Megawatt),
            f64::INFINITY
        );
    }
}
