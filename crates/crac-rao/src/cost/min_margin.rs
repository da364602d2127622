//! Functional cost: negative of the worst margin among optimized CNECs.

use crac_core::{FlowCnec, FlowResult, SensitivityStatus, Unit};
use rayon::prelude::*;
use std::sync::Arc;

use super::{sort_worst_margin_first, CostEvaluator};
use crate::error::RaoResult;
use crate::margin::MarginEvaluator;

/// The cost the optimizer actually minimizes: `−min(margin)` over the
/// optimized CNEC set, so that improving the worst margin lowers the cost.
///
/// Pure MNECs (monitored, not optimized) never take part: they are dropped at
/// construction and can neither drive the cost nor appear in the ranking.
/// With no optimized CNEC at all the cost is `0.0` and there is no limiting
/// element.
pub struct MinMarginEvaluator {
    cnecs: Vec<Arc<FlowCnec>>,
    unit: Unit,
    margin_evaluator: Box<dyn MarginEvaluator>,
}

impl MinMarginEvaluator {
    /// Retains the optimized CNECs of `cnecs`; the margin strategy decides
    /// between absolute, relative, and unoptimized-operator formulations.
    pub fn new(
        cnecs: &[Arc<FlowCnec>],
        unit: Unit,
        margin_evaluator: Box<dyn MarginEvaluator>,
    ) -> Self {
        Self {
            cnecs: cnecs
                .iter()
                .filter(|c| c.is_optimized())
                .cloned()
                .collect(),
            unit,
            margin_evaluator,
        }
    }

    /// All optimized CNECs with their margins, worst first.
    ///
    /// The sweep runs in parallel; the explicit (margin, id) sort key keeps
    /// the result deterministic regardless of thread scheduling.
    fn margins_worst_first(&self, flow_result: &dyn FlowResult) -> Vec<(Arc<FlowCnec>, f64)> {
        let mut margins: Vec<(Arc<FlowCnec>, f64)> = self
            .cnecs
            .par_iter()
            .map(|cnec| {
                let margin = self.margin_evaluator.margin(flow_result, cnec, self.unit);
                (Arc::clone(cnec), margin)
            })
            .collect();
        sort_worst_margin_first(&mut margins);
        margins
    }

    /// The CNEC with the smallest margin, or `None` without optimized CNECs.
    pub fn most_limiting_element(&self, flow_result: &dyn FlowResult) -> Option<Arc<FlowCnec>> {
        self.margins_worst_first(flow_result)
            .into_iter()
            .next()
            .map(|(cnec, _)| cnec)
    }
}

impl CostEvaluator for MinMarginEvaluator {
    fn name(&self) -> &str {
        "min-margin"
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
            .margins_worst_first(flow_result)
            .first()
            .map(|(_, margin)| -margin)
            .unwrap_or(0.0))
    }

    fn costly_elements(
        &self,
        flow_result: &dyn FlowResult,
        max_elements: usize,
    ) -> Vec<Arc<FlowCnec>> {
        let mut elements: Vec<Arc<FlowCnec>> = self
            .margins_worst_first(flow_result)
            .into_iter()
            .map(|(cnec, _)| cnec)
            .collect();
        elements.truncate(max_elements);
        elements
    }
}
