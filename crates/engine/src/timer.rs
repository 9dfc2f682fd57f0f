//! Timer service backed by a tokio runtime.
//!
//! Every periodic task runs on the runtime and pushes its [`TimerId`] into an
//! unbounded channel once per period. The synchronous game loop drains the
//! channel with [`TokioTimer::try_recv`]; nothing ever calls into the
//! controller from a runtime thread.

use std::collections::HashMap;
use std::time::Duration;

use anyhow::Result;
use tokio::runtime::{Builder, Runtime};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::trace;

use crate::core::TimerService;
use crate::types::TimerId;

pub struct TokioTimer {
    rt: Runtime,
    tx: mpsc::UnboundedSender<TimerId>,
    rx: mpsc::UnboundedReceiver<TimerId>,
    tasks: HashMap<TimerId, JoinHandle<()>>,
    next_id: u64,
}

impl TokioTimer {
    /// Start a small dedicated runtime for timer tasks.
    pub fn new() -> Result<Self> {
        let rt = Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("stacking-timer")
            .enable_time()
            .build()?;
        let (tx, rx) = mpsc::unbounded_channel();

        Ok(Self {
            rt,
            tx,
            rx,
            tasks: HashMap::new(),
            next_id: 0,
        })
    }

    /// Next pending delivery, if any. Never blocks.
    pub fn try_recv(&mut self) -> Option<TimerId> {
        self.rx.try_recv().ok()
    }

    /// Number of tasks that have not been cancelled
    pub fn live_count(&self) -> usize {
        self.tasks.len()
    }
}

impl TimerService for TokioTimer {
    fn schedule_periodic(&mut self, interval_ms: u32) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        let period = Duration::from_millis(u64::from(interval_ms.max(1)));
        let tx = self.tx.clone();

        let handle = self.rt.spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately; the piece should wait a full period.
            interval.tick().await;
            loop {
                interval.tick().await;
                if tx.send(id).is_err() {
                    break;
                }
            }
        });

        trace!(?id, interval_ms, "timer task spawned");
        self.tasks.insert(id, handle);
        id
    }

    fn cancel(&mut self, id: TimerId) {
        if let Some(handle) = self.tasks.remove(&id) {
            handle.abort();
            trace!(?id, "timer task aborted");
        }
    }
}

impl Drop for TokioTimer {
    fn drop(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }
}

impl std::fmt::Debug for TokioTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokioTimer")
            .field("live", &self.tasks.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}
