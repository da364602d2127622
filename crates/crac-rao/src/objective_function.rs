//! Composition of one functional cost with named virtual costs.

use crac_core::{FlowCnec, FlowResult, SensitivityStatus};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

use crate::cost::CostEvaluator;
use crate::error::{RaoError, RaoResult};
use crate::result::ObjectiveFunctionResult;

/// The composite objective the optimizer minimizes.
///
/// Exactly one functional evaluator (the margin-based cost being optimized)
/// plus zero or more virtual evaluators (constraint-violation penalties),
/// keyed by each evaluator's own name. Holds only its evaluators; every query
/// is a pure computation over the given snapshot and status.
pub struct ObjectiveFunction {
    functional: Box<dyn CostEvaluator>,
    virtuals: Vec<Box<dyn CostEvaluator>>,
}

/// Builder for [`ObjectiveFunction`].
///
/// `build()` validates that a functional evaluator was supplied and that
/// virtual-cost names are unique; a missing functional cost must fail loudly
/// rather than default to zero.
#[derive(Default)]
pub struct ObjectiveFunctionBuilder {
    functional: Option<Box<dyn CostEvaluator>>,
    virtuals: Vec<Box<dyn CostEvaluator>>,
}

impl ObjectiveFunctionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the functional-cost evaluator. Required.
    pub fn with_functional_cost(mut self, evaluator: Box<dyn CostEvaluator>) -> Self {
        self.functional = Some(evaluator);
        self
    }

    /// Register a virtual-cost evaluator under its own name.
    pub fn with_virtual_cost(mut self, evaluator: Box<dyn CostEvaluator>) -> Self {
        self.virtuals.push(evaluator);
        self
    }

    pub fn build(self) -> RaoResult<ObjectiveFunction> {
        let functional = self.functional.ok_or_else(|| {
            RaoError::Config("objective function requires a functional-cost evaluator".into())
        })?;
        for (i, evaluator) in self.virtuals.iter().enumerate() {
            if self.virtuals[..i].iter().any(|e| e.name() == evaluator.name()) {
                return Err(RaoError::Config(format!(
                    "duplicate virtual-cost name '{}'",
                    evaluator.name()
                )));
            }
        }
        Ok(ObjectiveFunction {
            functional,
            virtuals: self.virtuals,
        })
    }
}

impl ObjectiveFunction {
    pub fn builder() -> ObjectiveFunctionBuilder {
        ObjectiveFunctionBuilder::new()
    }

    /// Cost of the functional evaluator alone.
    pub fn functional_cost(
        &self,
        flow_result: &dyn FlowResult,
        status: SensitivityStatus,
    ) -> RaoResult<f64> {
        self.functional.compute_cost(flow_result, status)
    }

    /// Sum of all virtual costs; 0.0 when none are registered.
    pub fn virtual_cost(
        &self,
        flow_result: &dyn FlowResult,
        status: SensitivityStatus,
    ) -> RaoResult<f64> {
        let mut total = 0.0;
        for evaluator in &self.virtuals {
            total += evaluator.compute_cost(flow_result, status)?;
        }
        Ok(total)
    }

    /// One virtual cost by name, `Ok(NaN)` for an unregistered name so
    /// callers can distinguish "no such cost" from a zero cost.
    pub fn virtual_cost_named(
        &self,
        flow_result: &dyn FlowResult,
        status: SensitivityStatus,
        name: &str,
    ) -> RaoResult<f64> {
        match self.virtuals.iter().find(|e| e.name() == name) {
            Some(evaluator) => evaluator.compute_cost(flow_result, status),
            None => Ok(f64::NAN),
        }
    }

    /// Registered virtual-cost names, in registration order.
    pub fn virtual_cost_names(&self) -> Vec<&str> {
        self.virtuals.iter().map(|e| e.name()).collect()
    }

    /// The functional evaluator's ranking: up to `max_elements` CNECs, worst
    /// margin first.
    pub fn most_limiting_elements(
        &self,
        flow_result: &dyn FlowResult,
        max_elements: usize,
    ) -> Vec<Arc<FlowCnec>> {
        self.functional.costly_elements(flow_result, max_elements)
    }

    /// The named virtual evaluator's ranking; empty for an unknown name.
    pub fn costly_elements(
        &self,
        flow_result: &dyn FlowResult,
        name: &str,
        max_elements: usize,
    ) -> Vec<Arc<FlowCnec>> {
        self.virtuals
            .iter()
            .find(|e| e.name() == name)
            .map(|e| e.costly_elements(flow_result, max_elements))
            .unwrap_or_default()
    }

    /// Evaluate everything once and freeze it into an immutable snapshot.
    pub fn evaluate(
        &self,
        flow_result: &dyn FlowResult,
        status: SensitivityStatus,
    ) -> RaoResult<ObjectiveFunctionResult> {
        let functional_cost = self.functional.compute_cost(flow_result, status)?;
        let most_limiting_elements = self.functional.costly_elements(flow_result, usize::MAX);

        let mut virtual_costs = BTreeMap::new();
        let mut costly_elements = BTreeMap::new();
        for evaluator in &self.virtuals {
            let cost = evaluator.compute_cost(flow_result, status)?;
            virtual_costs.insert(evaluator.name().to_string(), cost);
            costly_elements.insert(
                evaluator.name().to_string(),
                evaluator.costly_elements(flow_result, usize::MAX),
            );
        }

        let result = ObjectiveFunctionResult::new(
            functional_cost,
            virtual_costs,
            most_limiting_elements,
            costly_elements,
        );
        debug!(
            functional_cost,
            virtual_cost = result.virtual_cost(),
            total_cost = result.total_cost(),
            "objective function evaluated"
        );
        Ok(result)
    }
}
