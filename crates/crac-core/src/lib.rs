//! # crac-core: CRAC Domain Modeling Core
//!
//! Provides the data structures shared by capacity-allocation studies: CNECs
//! (critical network elements under contingency), network states along the
//! contingency timeline, and read-only flow/sensitivity snapshots.
//!
//! ## Design Philosophy
//!
//! The CRAC side of a remedial-action study is **read-only reference data**:
//! CNECs are built once by an importer (CSA/CIM profiles, network-derived
//! CRACs — out of scope here) and then only queried. Everything in this crate
//! is therefore immutable after construction and shareable across threads,
//! which lets the evaluation engine in `crac-rao` sweep CNEC sets in parallel
//! without synchronization.
//!
//! ## Quick Start
//!
//! ```rust
//! use crac_core::*;
//!
//! // A post-contingency CNEC, optimized and monitored
//! let state = State::post_contingency(
//!     Instant::Curative,
//!     Contingency::new("co-line-4", "Loss of line 4"),
//! ).unwrap();
//!
//! let cnec = FlowCnec::new("ne-1", "Line FR-BE 1", state)
//!     .optimized()
//!     .monitored()
//!     .with_operator("RTE");
//!
//! // A flow snapshot as the sensitivity computation would fill it
//! let snapshot = FlowSnapshot::new()
//!     .with_margin("ne-1", Unit::Megawatt, -150.0);
//!
//! assert_eq!(snapshot.margin(&cnec, Unit::Megawatt), -150.0);
//! ```
//!
//! ## Core Data Structures
//!
//! - [`FlowCnec`] - A branch observed under a [`State`], with its
//!   optimized/monitored flags and optional [`LoopFlowThreshold`] extension
//! - [`State`] / [`Instant`] / [`Contingency`] - The contingency timeline
//! - [`FlowResult`] - Read-only accessor trait over computed flows, with
//!   [`FlowSnapshot`] as the in-memory implementation
//! - [`SensitivityStatus`] - Outcome signal of the sensitivity computation
//! - [`Unit`] / [`Side`] - Runtime keys of every flow query
//!
//! ## Integration with crac-rao
//!
//! The crac-rao crate consumes these types to aggregate per-CNEC margins and
//! violations into the RAO objective function.

pub mod cnec;
pub mod error;
pub mod flow_result;
pub mod state;
pub mod units;

pub use cnec::{FlowCnec, LoopFlowThreshold};
pub use error::{CracError, CracResult};
pub use flow_result::{FlowResult, FlowSnapshot, SensitivityStatus};
pub use state::{Contingency, Instant, State};
pub use units::{Side, Unit};
