use serde::{Deserialize, Serialize};

use crate::modules::fixtures::{should_continue_next_step, ExpectedResponse};

/// Result of one step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The step ran and its assertions held
    Completed { should_continue: bool },
    /// The step did not apply: no fixture, no credentials, or halted suite
    Skipped { reason: String },
}

impl StepOutcome {
    pub fn skipped(reason: impl Into<String>) -> Self {
        StepOutcome::Skipped {
            reason: reason.into(),
        }
    }

    /// Completed, with continuation decided by the expected response
    pub fn from_expected(expected: &ExpectedResponse) -> Self {
        StepOutcome::Completed {
            should_continue: should_continue_next_step(expected),
        }
    }

    pub fn proceed() -> Self {
        StepOutcome::Completed {
            should_continue: true,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, StepOutcome::Skipped { .. })
    }

    /// False only for a completed step that halts the suite
    pub fn should_continue(&self) -> bool {
        match self {
            StepOutcome::Completed { should_continue } => *should_continue,
            StepOutcome::Skipped { .. } => true,
        }
    }
}

/// Step name and outcome, kept by the suite for reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRecord {
    pub name: String,
    pub outcome: StepOutcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthenticationType {
    ThreeDs,
    NoThreeDs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureMethod {
    Automatic,
    Manual,
}

impl AuthenticationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthenticationType::ThreeDs => "three_ds",
            AuthenticationType::NoThreeDs => "no_three_ds",
        }
    }
}

impl CaptureMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaptureMethod::Automatic => "automatic",
            CaptureMethod::Manual => "manual",
        }
    }
}
