//! Physical units and branch sides used to key flow queries.
//!
//! Every flow, margin, and loop-flow query against a [`FlowResult`] is tagged
//! with a [`Unit`], and directional flow queries additionally carry a
//! [`Side`]. Unlike quantities with a fixed unit known at compile time, the
//! unit here is a runtime parameter of each query: the same CNEC can be
//! monitored in megawatts or in amperes depending on its thresholds.
//!
//! Converting between MW and A requires nominal voltages from the network
//! model, which is an external collaborator. This crate therefore never
//! converts units: a query in a unit for which no data exists is answered
//! with `NaN` by [`FlowSnapshot`], and a unit mismatch against a single-unit
//! threshold is a validation error.
//!
//! [`FlowResult`]: crate::FlowResult
//! [`FlowSnapshot`]: crate::FlowSnapshot

use serde::{Deserialize, Serialize};
use std::fmt;

/// Physical unit of a flow, margin, or threshold value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    /// Active power in megawatts
    Megawatt,
    /// Current in amperes
    Ampere,
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::Megawatt => write!(f, "MW"),
            Unit::Ampere => write!(f, "A"),
        }
    }
}

impl std::str::FromStr for Unit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mw" | "megawatt" => Ok(Unit::Megawatt),
            "a" | "ampere" => Ok(Unit::Ampere),
            _ => Err(format!("Unknown unit: {}", s)),
        }
    }
}

/// Side of a branch from which a directional flow is observed.
///
/// Flows through a branch differ between its two terminals when the branch
/// has losses or a phase shift; monitoring thresholds can be attached to
/// either side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

impl std::str::FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "left" | "one" | "1" => Ok(Side::Left),
            "right" | "two" | "2" => Ok(Side::Right),
            _ => Err(format!("Unknown side: {}", s)),
        }
    }
}
