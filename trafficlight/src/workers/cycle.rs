use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{Instrument, debug, info};
use trafficlight_config::shared::ControllerConfig;

use crate::bail;
use crate::concurrency::handoff::HandoffQueue;
use crate::concurrency::shutdown::ShutdownRx;
use crate::error::{ErrorKind, TrafficError, TrafficResult};
use crate::state::phase::{PhaseCell, SignalPhase};
use crate::workers::base::{Worker, WorkerHandle, WorkerWaitError};

/// The background worker that cycles a signal between its phases.
///
/// The worker holds each phase for a randomly drawn duration, then toggles the
/// shared phase cell and publishes the new phase into the handoff queue. It
/// runs until the shutdown signal fires; there is no other termination
/// condition. The hold duration is redrawn after every toggle, so consecutive
/// red and green periods are independently randomized.
#[derive(Debug)]
pub struct CycleWorker {
    config: Arc<ControllerConfig>,
    phase: Arc<PhaseCell>,
    queue: Arc<HandoffQueue<SignalPhase>>,
    shutdown_rx: ShutdownRx,
}

impl CycleWorker {
    pub fn new(
        config: Arc<ControllerConfig>,
        phase: Arc<PhaseCell>,
        queue: Arc<HandoffQueue<SignalPhase>>,
        shutdown_rx: ShutdownRx,
    ) -> Self {
        Self {
            config,
            phase,
            queue,
            shutdown_rx,
        }
    }

    /// Draws the duration to hold the current phase for.
    ///
    /// Uniform over the configured `[min, max]` interval in milliseconds.
    fn draw_phase_duration(&self) -> Duration {
        let cycle = &self.config.cycle;
        let millis = rand::rng().random_range(cycle.min_duration_ms..=cycle.max_duration_ms);

        Duration::from_millis(millis)
    }

    async fn run(mut self) -> TrafficResult<()> {
        loop {
            let hold = self.draw_phase_duration();
            let deadline = Instant::now() + hold;

            debug!(
                "holding phase '{}' for {}ms",
                self.phase.load(),
                hold.as_millis()
            );

            tokio::select! {
                biased;

                // Shutdown signal received, exit the loop. An error from `changed`
                // means every sender is gone, which equally stops the cycle.
                _ = self.shutdown_rx.changed() => {
                    info!("shutdown signal received, stopping the cycle worker");

                    return Ok(());
                }

                _ = tokio::time::sleep_until(deadline) => {}
            }

            let next_phase = self.phase.load().toggled();

            // The cell is updated before the publish so a waiter woken by this
            // value also observes a matching current phase.
            self.phase.store(next_phase);

            info!("signal toggled to '{next_phase}'");

            self.queue.send(next_phase).await;
        }
    }
}

/// Handle to a running [`CycleWorker`].
#[derive(Debug)]
pub struct CycleWorkerHandle {
    phase: Arc<PhaseCell>,
    handle: Option<JoinHandle<TrafficResult<()>>>,
}

impl WorkerHandle<Arc<PhaseCell>> for CycleWorkerHandle {
    fn state(&self) -> Arc<PhaseCell> {
        self.phase.clone()
    }

    async fn wait(mut self) -> Result<(), WorkerWaitError> {
        let Some(handle) = self.handle.take() else {
            return Ok(());
        };

        handle.await??;

        Ok(())
    }
}

impl Worker<CycleWorkerHandle, Arc<PhaseCell>> for CycleWorker {
    type Error = TrafficError;

    async fn start(self) -> Result<CycleWorkerHandle, Self::Error> {
        info!("starting cycle worker for controller {}", self.config.id);

        if !self.config.cycle.is_valid() {
            bail!(
                ErrorKind::ConfigError,
                "Invalid cycle bounds",
                format!(
                    "The cycle duration bounds [{}ms, {}ms] must satisfy 0 < min <= max",
                    self.config.cycle.min_duration_ms, self.config.cycle.max_duration_ms
                )
            );
        }

        let phase = self.phase.clone();
        let cycle_worker_span = tracing::info_span!("cycle_worker", controller_id = self.config.id);

        let handle = tokio::spawn(self.run().instrument(cycle_worker_span));

        Ok(CycleWorkerHandle {
            phase,
            handle: Some(handle),
        })
    }
}
