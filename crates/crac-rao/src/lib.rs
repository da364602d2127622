//! # crac-rao: Remedial-Action Optimization Objective Function
//!
//! This crate provides the cost-evaluation core of a remedial-action
//! optimization: given a flow snapshot for one candidate network state, it
//! computes the scalar objective used to rank remedial-action combinations
//! and the ranked lists of limiting network elements used for reporting.
//!
//! ## Objective Structure
//!
//! The objective composes one *functional* cost with any number of named
//! *virtual* costs:
//!
//! | Evaluator | Kind | Meaning |
//! |-----------|------|---------|
//! | [`MinMarginEvaluator`] | functional | −(worst margin among optimized CNECs) |
//! | [`MnecViolationCostEvaluator`] | virtual | monitored-element degradation penalty |
//! | [`LoopFlowViolationCostEvaluator`] | virtual | loop-flow excess penalty |
//! | [`SensitivityFallbackOvercostEvaluator`] | virtual | degraded-sensitivity overcost |
//!
//! ### Architecture
//!
//! Two strategy layers keep the formulations composable:
//!
//! - **[`MarginEvaluator`]**: how a single CNEC's margin is read (absolute,
//!   relative, or with unoptimized-operator handling)
//! - **[`CostEvaluator`]**: how per-CNEC values aggregate into one cost plus
//!   a ranking
//!
//! [`ObjectiveFunction`] assembles the evaluators and freezes each
//! evaluation into an immutable [`ObjectiveFunctionResult`].
//!
//! Everything is a pure computation over the call's snapshot and the
//! configuration fixed at construction: no locks, no caches, no state
//! between calls. Rankings use explicit sort keys (margin/excess, then CNEC
//! id) so results are reproducible under parallel candidate evaluation.
//!
//! ## Example
//!
//! ```rust
//! use crac_core::{FlowCnec, FlowSnapshot, SensitivityStatus, State, Unit};
//! use crac_rao::{
//!     BasicMarginEvaluator, MinMarginEvaluator, ObjectiveFunction,
//!     SensitivityFallbackOvercostEvaluator,
//! };
//! use std::sync::Arc;
//!
//! let cnecs = vec![Arc::new(
//!     FlowCnec::new("ne-1", "Line FR-BE 1", State::preventive()).optimized(),
//! )];
//! let snapshot = FlowSnapshot::new().with_margin("ne-1", Unit::Megawatt, -150.0);
//!
//! let objective = ObjectiveFunction::builder()
//!     .with_functional_cost(Box::new(MinMarginEvaluator::new(
//!         &cnecs,
//!         Unit::Megawatt,
//!         Box::new(BasicMarginEvaluator),
//!     )))
//!     .with_virtual_cost(Box::new(SensitivityFallbackOvercostEvaluator::new(10000.0)))
//!     .build()
//!     .unwrap();
//!
//! let result = objective.evaluate(&snapshot, SensitivityStatus::Success).unwrap();
//! assert_eq!(result.functional_cost(), 150.0);
//! assert_eq!(result.total_cost(), 150.0);
//! assert_eq!(result.most_limiting_elements(5)[0].id, "ne-1");
//! ```

pub mod cost;
pub mod error;
pub mod margin;
pub mod objective_function;
pub mod result;
pub mod test_utils;

pub use cost::{
    CostEvaluator, LoopFlowParameters, LoopFlowViolationCostEvaluator, MinMarginEvaluator,
    MnecParameters, MnecViolationCostEvaluator, SensitivityFallbackOvercostEvaluator,
};
pub use error::{RaoError, RaoResult};
pub use margin::{
    BasicMarginEvaluator, BasicRelativeMarginEvaluator, MarginEvaluator,
    UnoptimizedCnecMarginEvaluator,
};
pub use objective_function::{ObjectiveFunction, ObjectiveFunctionBuilder};
pub use result::ObjectiveFunctionResult;
