//! Per-kind fallback plans.
//!
//! Every [`FileKind`] maps to a fixed, ordered list of [`Step`]s. The router walks
//! the list until one attempt succeeds or a step whose failure policy is terminal
//! fails. Keeping the plans as data makes the fallback policy auditable on its own.

use crate::core::classify::FileKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    LoadStructure,
    LoadTrajectory,
    ExtractStructure,
    /// Open in a text viewer. `raw` marks content that is not really text input.
    OpenText { raw: bool },
}

/// What to do when an attempt fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnFailure {
    /// Report a load failure and stop.
    Fail,
    /// Record a warning and continue with the next step.
    WarnAndContinue,
    /// Report an informational notice and stop.
    Inform,
}

impl OnFailure {
    pub fn is_terminal(self) -> bool {
        !matches!(self, OnFailure::WarnAndContinue)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub attempt: Attempt,
    pub on_failure: OnFailure,
}

const fn step(attempt: Attempt, on_failure: OnFailure) -> Step {
    Step {
        attempt,
        on_failure,
    }
}

static STRUCTURE_PLAN: [Step; 1] = [step(Attempt::LoadStructure, OnFailure::Fail)];

static TRAJECTORY_PLAN: [Step; 1] = [step(Attempt::LoadTrajectory, OnFailure::Fail)];

static VOLUMETRIC_PLAN: [Step; 2] = [
    step(Attempt::ExtractStructure, OnFailure::WarnAndContinue),
    step(Attempt::OpenText { raw: true }, OnFailure::Fail),
];

static TEXT_INPUT_PLAN: [Step; 1] = [step(Attempt::OpenText { raw: false }, OnFailure::Fail)];

static UNKNOWN_PLAN: [Step; 1] = [step(Attempt::LoadStructure, OnFailure::Inform)];

pub fn plan_for(kind: FileKind) -> &'static [Step] {
    match kind {
        FileKind::Structure => &STRUCTURE_PLAN,
        FileKind::Trajectory => &TRAJECTORY_PLAN,
        FileKind::Volumetric => &VOLUMETRIC_PLAN,
        FileKind::TextInput => &TEXT_INPUT_PLAN,
        FileKind::Unknown => &UNKNOWN_PLAN,
    }
}
