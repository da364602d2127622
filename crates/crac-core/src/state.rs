//! Network states: instants, contingencies, and their combination.
//!
//! A CNEC is always attached to a [`State`], which identifies when along the
//! contingency timeline the element is monitored:
//!
//! - the **preventive** state, before any contingency occurs;
//! - a **post-contingency** state, pairing a [`Contingency`] with the
//!   [`Instant`] at which the network is observed after it (just after the
//!   outage, after automatic remedial actions, or after curative ones).
//!
//! The preventive state carries no contingency and the post-contingency
//! instants always carry one; the constructors enforce this pairing.

use crate::error::{CracError, CracResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Instant along the contingency timeline.
///
/// Ordered by occurrence: preventive < outage < auto < curative.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Instant {
    /// Base case, before any contingency
    Preventive,
    /// Right after a contingency, before any remedial action
    Outage,
    /// After automatic remedial actions have acted
    Auto,
    /// After curative remedial actions have been applied
    Curative,
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instant::Preventive => write!(f, "preventive"),
            Instant::Outage => write!(f, "outage"),
            Instant::Auto => write!(f, "auto"),
            Instant::Curative => write!(f, "curative"),
        }
    }
}

impl std::str::FromStr for Instant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "preventive" => Ok(Instant::Preventive),
            "outage" => Ok(Instant::Outage),
            "auto" => Ok(Instant::Auto),
            "curative" => Ok(Instant::Curative),
            _ => Err(format!("Unknown instant: {}", s)),
        }
    }
}

/// A contingency: loss of one or more network elements.
///
/// The elements themselves live in the external network model; the CRAC only
/// needs a stable identifier and a human-readable name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Contingency {
    pub id: String,
    pub name: String,
}

impl Contingency {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A network state: an instant, plus the contingency it follows (if any).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct State {
    instant: Instant,
    contingency: Option<Contingency>,
}

impl State {
    /// The preventive (base case) state.
    pub fn preventive() -> Self {
        Self {
            instant: Instant::Preventive,
            contingency: None,
        }
    }

    /// A post-contingency state at the given instant.
    ///
    /// Fails if `instant` is [`Instant::Preventive`]: the preventive state
    /// never follows a contingency.
    pub fn post_contingency(instant: Instant, contingency: Contingency) -> CracResult<Self> {
        if instant == Instant::Preventive {
            return Err(CracError::Validation(format!(
                "preventive instant cannot follow contingency '{}'",
                contingency.id
            )));
        }
        Ok(Self {
            instant,
            contingency: Some(contingency),
        })
    }

    #[inline]
    pub fn instant(&self) -> Instant {
        self.instant
    }

    #[inline]
    pub fn contingency(&self) -> Option<&Contingency> {
        self.contingency.as_ref()
    }

    #[inline]
    pub fn is_preventive(&self) -> bool {
        self.instant == Instant::Preventive
    }

    /// Deterministic string key for this state.
    ///
    /// "preventive" for the base case, "<contingency id>-<instant>" otherwise.
    pub fn id(&self) -> String {
        match &self.contingency {
            None => "preventive".to_string(),
            Some(co) => format!("{}-{}", co.id, self.instant),
        }
    }
}
