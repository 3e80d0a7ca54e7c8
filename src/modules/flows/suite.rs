use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::models::{StepOutcome, StepRecord};
use crate::config::E2eConfig;
use crate::core::Result;
use crate::modules::state::{run_step, Bootstrap, SharedState};

/// Ordered steps sharing one state snapshot
///
/// Steps run in call order on the calling task. Once a completed step reports
/// `should_continue == false`, every later step is recorded as skipped without
/// running.
pub struct SerialSuite {
    name: String,
    state_path: PathBuf,
    bootstrap: Bootstrap,
    should_continue: bool,
    records: Vec<StepRecord>,
}

impl SerialSuite {
    pub fn new(name: impl Into<String>, config: &E2eConfig) -> Self {
        Self::with_state_path(name, config.state_path.clone(), Bootstrap::from_config(config))
    }

    pub fn with_state_path(name: impl Into<String>, state_path: impl Into<PathBuf>, bootstrap: Bootstrap) -> Self {
        Self {
            name: name.into(),
            state_path: state_path.into(),
            bootstrap,
            should_continue: true,
            records: Vec::new(),
        }
    }

    /// Setup phase: overwrite the snapshot with bootstrap keys only
    pub fn reset_state(&self) -> Result<SharedState> {
        info!(suite = %self.name, path = %self.state_path.display(), "Resetting shared state");
        SharedState::reset(&self.state_path, &self.bootstrap)
    }

    /// Fresh read of the snapshot, for assertions between steps
    pub fn load_state(&self) -> Result<SharedState> {
        SharedState::load_seeded(&self.state_path, &self.bootstrap)
    }

    pub fn state_path(&self) -> &Path {
        &self.state_path
    }

    pub fn should_continue(&self) -> bool {
        self.should_continue
    }

    pub fn records(&self) -> &[StepRecord] {
        &self.records
    }

    /// Run one step, or record it as skipped if the suite has halted
    pub async fn step<F>(&mut self, name: &str, body: F) -> Result<StepOutcome>
    where
        F: AsyncFnOnce(&mut SharedState) -> Result<StepOutcome>,
    {
        if !self.should_continue {
            warn!(suite = %self.name, step = %name, "Skipping step, an earlier step halted the suite");
            let outcome = StepOutcome::skipped("halted by an earlier expected failure");
            self.record(name, &outcome);
            return Ok(outcome);
        }

        info!(suite = %self.name, step = %name, "Running step");
        let outcome = run_step(&self.state_path, &self.bootstrap, body).await?;

        match &outcome {
            StepOutcome::Completed { should_continue: false } => {
                warn!(suite = %self.name, step = %name, "Step expects a failure, later steps will be skipped");
                self.should_continue = false;
            }
            StepOutcome::Completed { .. } => {
                info!(suite = %self.name, step = %name, "Step completed");
            }
            StepOutcome::Skipped { reason } => {
                info!(suite = %self.name, step = %name, reason = %reason, "Step skipped");
            }
        }

        self.record(name, &outcome);
        Ok(outcome)
    }

    fn record(&mut self, name: &str, outcome: &StepOutcome) {
        self.records.push(StepRecord {
            name: name.to_string(),
            outcome: outcome.clone(),
        });
    }
}
