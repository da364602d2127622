//! Cost evaluators: from a flow snapshot to a scalar cost plus a ranking.
//!
//! The objective function is assembled from evaluators sharing one contract,
//! [`CostEvaluator`]: a named, unit-tagged function from a flow snapshot and
//! sensitivity status to a scalar cost, plus a ranked list of the CNECs that
//! contribute to it. Implementations:
//!
//! | Evaluator | Role | Cost |
//! |-----------|------|------|
//! | [`MinMarginEvaluator`] | functional | −(worst margin among optimized CNECs) |
//! | [`MnecViolationCostEvaluator`] | virtual | Σ MNEC margin-degradation excess × cost |
//! | [`LoopFlowViolationCostEvaluator`] | virtual | Σ loop-flow excess × cost |
//! | [`SensitivityFallbackOvercostEvaluator`] | virtual | flat overcost on fallback |
//!
//! Evaluators hold only configuration fixed at construction; every call is a
//! pure computation over its arguments, safe to issue concurrently against
//! different snapshots.

use crac_core::{FlowCnec, FlowResult, SensitivityStatus, Unit};
use std::sync::Arc;

use crate::error::RaoResult;

pub mod fallback;
pub mod loop_flow;
pub mod min_margin;
pub mod mnec;

pub use fallback::SensitivityFallbackOvercostEvaluator;
pub use loop_flow::{LoopFlowParameters, LoopFlowViolationCostEvaluator};
pub use min_margin::MinMarginEvaluator;
pub use mnec::{MnecParameters, MnecViolationCostEvaluator};

/// A named, unit-tagged cost contribution to the objective function.
pub trait CostEvaluator: Send + Sync {
    /// Stable name, used as the virtual-cost key (e.g. "mnec-cost").
    fn name(&self) -> &str;

    /// Unit in which margins/excesses feeding this cost are expressed.
    fn unit(&self) -> Unit;

    /// Scalar cost for the given snapshot.
    ///
    /// Violation-type evaluators return values ≥ 0; the functional
    /// (min-margin) cost is negative whenever the network is secure.
    fn compute_cost(
        &self,
        flow_result: &dyn FlowResult,
        status: SensitivityStatus,
    ) -> RaoResult<f64>;

    /// Up to `max_elements` CNECs, most costly first.
    ///
    /// Only strictly contributing CNECs appear; evaluators without a per-CNEC
    /// breakdown return an empty list.
    fn costly_elements(
        &self,
        flow_result: &dyn FlowResult,
        max_elements: usize,
    ) -> Vec<Arc<FlowCnec>>;
}

/// Deterministic smallest-margin-first ordering, CNEC id as tie-break.
/// Rankings must not depend on set iteration order.
pub(crate) fn sort_worst_margin_first(entries: &mut [(Arc<FlowCnec>, f64)]) {
    entries.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.id.cmp(&b.0.id)));
}

/// Deterministic largest-excess-first ordering, CNEC id as tie-break.
pub(crate) fn sort_largest_excess_first(entries: &mut [(Arc<FlowCnec>, f64)]) {
    entries.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.id.cmp(&b.0.id)));
}
