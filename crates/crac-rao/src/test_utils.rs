//! Shared builders for unit and integration tests.

use crac_core::{FlowCnec, State, Unit};
use std::sync::Arc;

/// An optimized-only CNEC in the preventive state.
pub fn optimized_cnec(id: &str) -> Arc<FlowCnec> {
    Arc::new(FlowCnec::new(id, id, State::preventive()).optimized())
}

/// A CNEC that is both optimized and monitored.
pub fn optimized_mnec(id: &str) -> Arc<FlowCnec> {
    Arc::new(
        FlowCnec::new(id, id, State::preventive())
            .optimized()
            .monitored(),
    )
}

/// A pure MNEC: monitored, not optimized.
pub fn pure_mnec(id: &str) -> Arc<FlowCnec> {
    Arc::new(FlowCnec::new(id, id, State::preventive()).monitored())
}

/// An optimized CNEC carrying a loop-flow threshold in megawatts.
pub fn loop_flow_cnec(id: &str, threshold_mw: f64) -> Arc<FlowCnec> {
    Arc::new(
        FlowCnec::new(id, id, State::preventive())
            .optimized()
            .with_loop_flow_threshold(threshold_mw, Unit::Megawatt),
    )
}
