use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, NaiveDateTime};
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;

use crate::services::AvailabilityEvaluator;

/// Re-evaluates working hours on a fixed interval and caches the result, so
/// long-lived sessions notice day and hour transitions.
#[derive(Clone)]
pub struct AvailabilityMonitor {
    evaluator: AvailabilityEvaluator,
    poll_interval: Duration,
    open: Arc<RwLock<bool>>,
    task: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl AvailabilityMonitor {
    pub fn new(evaluator: AvailabilityEvaluator, poll_interval: Duration) -> Self {
        let open = evaluator.is_open_now();
        Self {
            evaluator,
            poll_interval,
            open: Arc::new(RwLock::new(open)),
            task: Arc::new(Mutex::new(None)),
        }
    }

    pub async fn start(&self) {
        let mut task = self.task.lock().await;
        if task.as_ref().is_some_and(|handle| !handle.is_finished()) {
            tracing::info!("Availability monitor already running");
            return;
        }

        let monitor = self.clone();
        *task = Some(tokio::spawn(async move {
            monitor.run_loop().await;
        }));

        tracing::info!(
            interval_secs = self.poll_interval.as_secs(),
            "Availability monitor started"
        );
    }

    pub async fn stop(&self) {
        if let Some(handle) = self.task.lock().await.take() {
            handle.abort();
            tracing::info!("Availability monitor stopped");
        }
    }

    pub async fn is_running(&self) -> bool {
        self.task
            .lock()
            .await
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Last evaluated state.
    pub async fn is_open(&self) -> bool {
        *self.open.read().await
    }

    pub async fn refresh(&self) -> bool {
        self.refresh_at(Local::now().naive_local()).await
    }

    pub async fn refresh_at(&self, now: NaiveDateTime) -> bool {
        let open = self.evaluator.is_open(now);
        let mut current = self.open.write().await;
        if *current != open {
            match self.evaluator.closure_reason(now) {
                None => tracing::info!(%now, "Installation lookup opened"),
                Some(reason) => tracing::info!(%now, ?reason, "Installation lookup closed"),
            }
            *current = open;
        }
        open
    }

    async fn run_loop(&self) {
        let mut interval = tokio::time::interval(self.poll_interval);

        loop {
            interval.tick().await;
            self.refresh().await;
        }
    }
}
