//! Heartbeat service - periodic liveness pings to the companion server.
//!
//! The original client created a process-global repeating timer at load
//! time and never tore it down. Here the timer is an explicitly owned
//! [`Heartbeat`] service with start/stop, held by the top-level application
//! context. Each tick fires a detached ping so the loop never waits on the
//! network; the server watching the cadence treats a client as gone after
//! roughly two missed periods.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::Result;

/// Fixed heartbeat period.
pub const HEARTBEAT_PERIOD: Duration = Duration::from_millis(1000);

/// Something that can issue one liveness ping.
#[async_trait]
pub trait Pinger: Send + Sync {
    /// Issue a single liveness request.
    async fn ping(&self) -> Result<()>;
}

/// Background service that pings the companion server once per period.
pub struct Heartbeat {
    pinger: Arc<dyn Pinger>,
    running: Arc<RwLock<bool>>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl Heartbeat {
    /// Create a new heartbeat service driving the given pinger.
    pub fn new(pinger: Arc<dyn Pinger>) -> Self {
        Self {
            pinger,
            running: Arc::new(RwLock::new(false)),
            task: Mutex::new(None),
        }
    }

    /// Start the heartbeat loop in the background.
    ///
    /// The first ping fires one full period after start. Starting an
    /// already-running service is a no-op.
    pub async fn start(&self) {
        {
            let mut running = self.running.write().await;
            if *running {
                warn!("Heartbeat already running");
                return;
            }
            *running = true;
        }

        let pinger = Arc::clone(&self.pinger);
        let running = Arc::clone(&self.running);

        info!(
            "Heartbeat started (period={}ms)",
            HEARTBEAT_PERIOD.as_millis()
        );

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(HEARTBEAT_PERIOD);
            ticker.tick().await;

            loop {
                ticker.tick().await;

                if !*running.read().await {
                    info!("Heartbeat stopped");
                    break;
                }

                // Fire-and-forget: the loop never waits on the request, and
                // a failed ping only leaves a debug line behind.
                let pinger = Arc::clone(&pinger);
                tokio::spawn(async move {
                    if let Err(e) = pinger.ping().await {
                        debug!("heartbeat ping failed: {}", e);
                    }
                });
            }
        });

        *self.task.lock().await = Some(handle);
    }

    /// Stop the heartbeat loop. The loop task is aborted, so a restart
    /// never races an old loop into issuing extra pings; already-spawned
    /// ping requests are detached and unaffected.
    pub async fn stop(&self) {
        {
            let mut running = self.running.write().await;
            *running = false;
        }
        if let Some(handle) = self.task.lock().await.take() {
            handle.abort();
        }
    }

    /// Issue a single ping immediately, outside the timer.
    pub async fn beat_now(&self) -> Result<()> {
        self.pinger.ping().await
    }

    /// Returns whether the service is running.
    pub async fn is_running(&self) -> bool {
        *self.running.read().await
    }
}
