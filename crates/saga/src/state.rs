//! Saga state machine and the per-run journal.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SagaError;

/// The state of a saga in its lifecycle.
///
/// State transitions:
/// ```text
/// Running ──┬──► Completed
///           └──► Failed
/// ```
///
/// Failed runs are not compensated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SagaState {
    /// Steps are still being executed.
    Running,

    /// Every step and the final persistence succeeded (terminal state).
    Completed,

    /// A step or persistence failed (terminal state).
    Failed,
}

impl SagaState {
    /// Returns the state name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            SagaState::Running => "Running",
            SagaState::Completed => "Completed",
            SagaState::Failed => "Failed",
        }
    }
}

impl std::fmt::Display for SagaState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Journal of one orchestrator invocation.
///
/// Lives for the duration of `execute()` and is never persisted. Records the
/// steps that completed and the side effects they left behind, and emits the
/// saga metrics when the run finishes.
#[derive(Debug)]
pub struct SagaRun {
    id: Uuid,
    saga_type: &'static str,
    state: SagaState,
    completed_steps: Vec<&'static str>,
    side_effects: Vec<&'static str>,
    started: Instant,
}

impl SagaRun {
    /// Starts a run of the given saga type.
    pub fn start(saga_type: &'static str) -> Self {
        metrics::counter!("saga_executions_total", "saga_type" => saga_type).increment(1);
        let run = Self {
            id: Uuid::new_v4(),
            saga_type,
            state: SagaState::Running,
            completed_steps: Vec::new(),
            side_effects: Vec::new(),
            started: Instant::now(),
        };
        tracing::info!(saga_id = %run.id, saga_type, "saga started");
        run
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn saga_type(&self) -> &'static str {
        self.saga_type
    }

    pub fn state(&self) -> SagaState {
        self.state
    }

    pub fn completed_steps(&self) -> &[&'static str] {
        &self.completed_steps
    }

    /// Steps whose effects outside this process would survive a later failure.
    pub fn side_effects(&self) -> &[&'static str] {
        &self.side_effects
    }

    pub fn step_completed(&mut self, step: &'static str) {
        self.completed_steps.push(step);
    }

    /// Records a completed step that changed state in another module.
    pub fn side_effect_completed(&mut self, step: &'static str) {
        self.completed_steps.push(step);
        self.side_effects.push(step);
    }

    /// Reports side effects left in place by a failure that happened after
    /// them.
    pub fn report_uncompensated(&self, error: &SagaError) {
        for step in &self.side_effects {
            metrics::counter!(
                "saga_uncompensated_side_effects_total",
                "saga_type" => self.saga_type,
                "step" => *step
            )
            .increment(1);
            tracing::error!(
                saga_id = %self.id,
                saga_type = self.saga_type,
                step = *step,
                error = %error,
                "side effect left uncompensated"
            );
        }
    }

    /// Closes the run with the outcome of `execute()`.
    pub fn finish<T>(&mut self, result: &Result<T, SagaError>) {
        metrics::histogram!("saga_duration_seconds", "saga_type" => self.saga_type)
            .record(self.started.elapsed().as_secs_f64());

        match result {
            Ok(_) => {
                self.state = SagaState::Completed;
                metrics::counter!("saga_completed_total", "saga_type" => self.saga_type)
                    .increment(1);
                tracing::info!(
                    saga_id = %self.id,
                    saga_type = self.saga_type,
                    steps = ?self.completed_steps,
                    "saga completed"
                );
            }
            Err(err) => {
                self.state = SagaState::Failed;
                metrics::counter!("saga_failed_total", "saga_type" => self.saga_type)
                    .increment(1);
                tracing::warn!(
                    saga_id = %self.id,
                    saga_type = self.saga_type,
                    steps = ?self.completed_steps,
                    code = %err.code(),
                    error = %err,
                    "saga failed"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::RepositoryError;

    #[test]
    fn test_display() {
        assert_eq!(SagaState::Running.to_string(), "Running");
        assert_eq!(SagaState::Failed.to_string(), "Failed");
    }

    #[test]
    fn test_run_tracks_steps_and_side_effects() {
        let mut run = SagaRun::start("ReportFundUsage");
        assert_eq!(run.state(), SagaState::Running);
        assert_eq!(run.saga_type(), "ReportFundUsage");

        run.step_completed("Aktivitas");
        run.side_effect_completed("pay_salary");
        assert_eq!(run.completed_steps(), &["Aktivitas", "pay_salary"]);
        assert_eq!(run.side_effects(), &["pay_salary"]);

        run.finish(&Ok::<_, SagaError>(()));
        assert_eq!(run.state(), SagaState::Completed);
    }

    #[test]
    fn test_failed_run() {
        let mut run = SagaRun::start("UpdateFundUsage");
        run.side_effect_completed("cancel_salary");

        let result: Result<(), SagaError> = Err(RepositoryError::Unavailable("down".to_string()).into());
        if let Err(err) = &result {
            run.report_uncompensated(err);
        }
        run.finish(&result);

        assert_eq!(run.state(), SagaState::Failed);
        assert_eq!(run.side_effects(), &["cancel_salary"]);
    }
}
