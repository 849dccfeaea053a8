//! Poll loop waiting for a task's consolidated result.

use tokio::time::{sleep, Instant};

use super::extract::{extract_consolidated, ConsolidatedResult};
use crate::config::PollSettings;
use crate::error::BridgeError;
use crate::gateway::{EventBatch, Gateway, TaskHandle};

/// Outcome of inspecting one event batch.
#[derive(Debug)]
pub enum PollState {
    /// Nothing usable yet, poll again
    Polling,
    /// A consolidated result was found
    Done(ConsolidatedResult),
    /// The task can no longer produce a result
    Failed(BridgeError),
}

/// Task states after which the gateway will not emit more output.
const TERMINAL_STATUSES: [&str; 2] = ["failed", "completed"];

/// Drives the tick loop for one task.
#[derive(Debug, Clone)]
pub struct Poller {
    settings: PollSettings,
}

impl Poller {
    pub fn new(settings: PollSettings) -> Self {
        Self { settings }
    }

    /// Decide what one tick's batch means for `task`.
    ///
    /// An extracted result wins even when the status marker still says the
    /// task is running. Batches without a status marker never fail here.
    pub fn evaluate(batch: &EventBatch, task: &TaskHandle) -> PollState {
        if let Some(result) = extract_consolidated(batch) {
            return PollState::Done(result);
        }

        match batch.status_of(task) {
            Some(status) if TERMINAL_STATUSES.contains(&status) => {
                PollState::Failed(BridgeError::TaskEndedWithoutResult {
                    status: status.to_string(),
                })
            }
            _ => PollState::Polling,
        }
    }

    /// Poll `gateway` until `task` yields a result, fails, or the deadline passes.
    ///
    /// Transport and HTTP failures end the loop immediately.
    pub async fn wait_for_result(
        &self,
        gateway: &dyn Gateway,
        task: &TaskHandle,
    ) -> Result<ConsolidatedResult, BridgeError> {
        let deadline = Instant::now() + self.settings.timeout;
        let mut tick: u64 = 0;

        while Instant::now() < deadline {
            tick += 1;
            let batch = gateway.events(task).await?;

            match Self::evaluate(&batch, task) {
                PollState::Done(result) => {
                    tracing::info!(task = %task, tick, "Consolidated result received");
                    return Ok(result);
                }
                PollState::Failed(err) => {
                    tracing::warn!(task = %task, tick, "Task ended without result");
                    return Err(err);
                }
                PollState::Polling => {
                    tracing::debug!(
                        task = %task,
                        tick,
                        status = batch.status_of(task).unwrap_or("-"),
                        "No consolidated result yet"
                    );
                }
            }

            let remaining = deadline.saturating_duration_since(Instant::now());
            sleep(self.settings.interval.min(remaining)).await;
        }

        tracing::warn!(task = %task, tick, "Polling deadline reached");
        Err(BridgeError::PollTimeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;
    use serde_json::{json, Value};

    use crate::gateway::Envelope;

    /// Gateway that replays a fixed script of event responses.
    struct ScriptedGateway {
        script: Mutex<VecDeque<Result<EventBatch, BridgeError>>>,
        polls: AtomicUsize,
    }

    impl ScriptedGateway {
        fn new(script: Vec<Result<EventBatch, BridgeError>>) -> Self {
            Self {
                script: Mutex::new(script.into()),
                polls: AtomicUsize::new(0),
            }
        }

        fn polls(&self) -> usize {
            self.polls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Gateway for ScriptedGateway {
        async fn submit(&self, _envelope: &Envelope) -> Result<TaskHandle, BridgeError> {
            Ok(TaskHandle::new("t1"))
        }

        async fn events(&self, _task: &TaskHandle) -> Result<EventBatch, BridgeError> {
            self.polls.fetch_add(1, Ordering::SeqCst);
            self.script
                .lock()
                .expect("script lock")
                .pop_front()
                .unwrap_or_else(|| Ok(EventBatch::default()))
        }
    }

    fn result_json() -> Value {
        json!({ "score": 7, "softSkillFeedback": [], "techSkillFeedback": ["x"] })
    }

    fn batch(value: Value) -> EventBatch {
        serde_json::from_value(value).expect("batch decodes")
    }

    fn pending() -> EventBatch {
        batch(json!({ "tasks": { "t1": { "events": [] } } }))
    }

    fn with_result(status: Option<&str>) -> EventBatch {
        let mut record = json!({
            "events": [
                { "full_payload": { "result": { "status": { "message": { "parts": [
                    { "kind": "data", "data": result_json() }
                ] } } } } }
            ]
        });
        if let Some(status) = status {
            record["status"] = json!(status);
        }
        batch(json!({ "tasks": { "t1": record } }))
    }

    fn poller(interval_ms: u64, timeout_ms: u64) -> Poller {
        Poller::new(PollSettings {
            interval: Duration::from_millis(interval_ms),
            timeout: Duration::from_millis(timeout_ms),
        })
    }

    #[test]
    fn evaluate_pending_without_status_keeps_polling() {
        let state = Poller::evaluate(&pending(), &TaskHandle::new("t1"));
        assert!(matches!(state, PollState::Polling));
    }

    #[test]
    fn evaluate_result_beats_running_status() {
        let state = Poller::evaluate(&with_result(Some("working")), &TaskHandle::new("t1"));
        assert!(matches!(state, PollState::Done(_)));
    }

    #[test]
    fn evaluate_terminal_status_without_result_fails() {
        for status in ["failed", "completed"] {
            let batch = batch(json!({ "tasks": { "t1": { "status": status, "events": [] } } }));
            match Poller::evaluate(&batch, &TaskHandle::new("t1")) {
                PollState::Failed(BridgeError::TaskEndedWithoutResult { status: s }) => {
                    assert_eq!(s, status)
                }
                other => panic!("unexpected state: {:?}", other),
            }
        }
    }

    #[test]
    fn evaluate_ignores_status_of_other_tasks() {
        let batch = batch(json!({
            "tasks": {
                "t1": { "status": "working", "events": [] },
                "t0": { "status": "failed", "events": [] }
            }
        }));
        let state = Poller::evaluate(&batch, &TaskHandle::new("t1"));
        assert!(matches!(state, PollState::Polling));
    }

    #[tokio::test]
    async fn second_tick_delivers_result() {
        let gateway = ScriptedGateway::new(vec![Ok(pending()), Ok(with_result(None))]);
        let result = poller(5, 5_000)
            .wait_for_result(&gateway, &TaskHandle::new("t1"))
            .await
            .expect("result");
        assert_eq!(result.into_value(), result_json());
        assert_eq!(gateway.polls(), 2);
    }

    #[tokio::test]
    async fn transport_errors_end_polling() {
        let gateway = ScriptedGateway::new(vec![Ok(pending()), Err(BridgeError::TaskNotFound)]);
        let err = poller(5, 5_000)
            .wait_for_result(&gateway, &TaskHandle::new("t1"))
            .await
            .expect_err("not found");
        assert!(matches!(err, BridgeError::TaskNotFound));
        assert_eq!(gateway.polls(), 2);
    }

    #[tokio::test]
    async fn completed_without_result_fails() {
        let done = batch(json!({ "tasks": { "t1": { "status": "completed", "events": [] } } }));
        let gateway = ScriptedGateway::new(vec![Ok(done)]);
        let err = poller(5, 5_000)
            .wait_for_result(&gateway, &TaskHandle::new("t1"))
            .await
            .expect_err("ended");
        assert!(matches!(err, BridgeError::TaskEndedWithoutResult { .. }));
    }

    #[tokio::test]
    async fn deadline_of_two_intervals_times_out() {
        let gateway = ScriptedGateway::new(vec![]);
        let started = std::time::Instant::now();
        let err = poller(20, 40)
            .wait_for_result(&gateway, &TaskHandle::new("t1"))
            .await
            .expect_err("timeout");
        assert!(matches!(err, BridgeError::PollTimeout));
        assert!(gateway.polls() >= 1 && gateway.polls() <= 3);
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test]
    async fn zero_timeout_never_polls() {
        let gateway = ScriptedGateway::new(vec![Ok(with_result(None))]);
        let err = poller(5, 0)
            .wait_for_result(&gateway, &TaskHandle::new("t1"))
            .await
            .expect_err("timeout");
        assert!(matches!(err, BridgeError::PollTimeout));
        assert_eq!(gateway.polls(), 0);
    }
}
