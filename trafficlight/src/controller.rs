//! Core signal controller orchestration.
//!
//! Contains the main [`SignalController`] struct that owns the current phase,
//! the phase handoff queue, and the cycle worker lifecycle.

use std::sync::Arc;
use tracing::{debug, error, info};
use trafficlight_config::shared::ControllerConfig;

use crate::bail;
use crate::concurrency::handoff::HandoffQueue;
use crate::concurrency::shutdown::{ShutdownRx, ShutdownTx, create_shutdown_channel};
use crate::error::{ErrorKind, TrafficResult};
use crate::state::phase::{PhaseCell, SignalPhase};
use crate::workers::base::{Worker, WorkerHandle};
use crate::workers::cycle::{CycleWorker, CycleWorkerHandle};

/// Unique identifier of a signal controller within a process.
pub type ControllerId = u64;

/// Internal state tracking for the controller lifecycle.
///
/// Tracks whether the cycle worker has been started and keeps its handle while
/// it runs. The controller can only be in one of these states at a time.
#[derive(Debug)]
enum ControllerState {
    /// Controller has been created but not yet started.
    NotStarted,
    /// Controller is running with an active cycle worker.
    Started { cycle_worker: CycleWorkerHandle },
}

/// A two-phase traffic signal and the machinery that cycles it.
///
/// A [`SignalController`] owns the current phase (starting out
/// [`SignalPhase::Red`]), a handoff queue that moves phase updates from the
/// cycle worker to waiting tasks, and the worker lifecycle. After
/// [`SignalController::start`], the worker toggles the signal on a randomized
/// interval forever, until [`SignalController::shutdown`].
///
/// Starting takes `&mut self`; querying and waiting take `&self`, so a started
/// controller is typically wrapped in an [`Arc`] and shared across any number
/// of consumer tasks.
#[derive(Debug)]
pub struct SignalController {
    config: Arc<ControllerConfig>,
    phase: Arc<PhaseCell>,
    queue: Arc<HandoffQueue<SignalPhase>>,
    state: ControllerState,
    shutdown_tx: ShutdownTx,
    shutdown_rx: ShutdownRx,
}

impl SignalController {
    /// Creates a new controller with the given configuration.
    ///
    /// The signal starts out [`SignalPhase::Red`] and the cycle worker is not
    /// running until [`SignalController::start`] is called.
    pub fn new(config: ControllerConfig) -> Self {
        // The receiver created here is kept for the controller's lifetime so that
        // clones handed out later still observe a shutdown signal sent before
        // they were created.
        let (shutdown_tx, shutdown_rx) = create_shutdown_channel();

        Self {
            config: Arc::new(config),
            phase: Arc::new(PhaseCell::new(SignalPhase::Red)),
            queue: Arc::new(HandoffQueue::new()),
            state: ControllerState::NotStarted,
            shutdown_tx,
            shutdown_rx,
        }
    }

    /// Returns the unique identifier for this controller.
    pub fn id(&self) -> ControllerId {
        self.config.id
    }

    /// Returns the phase the signal is currently in.
    ///
    /// Non-blocking and callable at any time, concurrently with the cycle
    /// worker toggling the signal.
    pub fn current_phase(&self) -> SignalPhase {
        self.phase.load()
    }

    /// Returns a handle for sending shutdown signals to this controller.
    ///
    /// Multiple components can hold shutdown handles to coordinate graceful
    /// termination.
    pub fn shutdown_tx(&self) -> ShutdownTx {
        self.shutdown_tx.clone()
    }

    /// Starts the cycle worker that toggles the signal.
    ///
    /// The worker is started exactly once; calling this on an already started
    /// controller fails with [`ErrorKind::ControllerAlreadyStarted`]. Invalid
    /// cycle bounds fail with [`ErrorKind::ConfigError`].
    pub async fn start(&mut self) -> TrafficResult<()> {
        if let ControllerState::Started { .. } = self.state {
            bail!(
                ErrorKind::ControllerAlreadyStarted,
                "Controller already started",
                format!(
                    "The cycle worker of controller {} is already running",
                    self.config.id
                )
            );
        }

        info!("starting signal controller {}", self.config.id);

        let cycle_worker = CycleWorker::new(
            self.config.clone(),
            self.phase.clone(),
            self.queue.clone(),
            self.shutdown_rx.clone(),
        )
        .start()
        .await?;

        self.state = ControllerState::Started { cycle_worker };

        Ok(())
    }

    /// Suspends until the signal reaches `target`.
    ///
    /// Waits on the handoff queue, discarding published phases that do not
    /// match, and returns as soon as a published phase equals `target`. The
    /// wait resolves only on a *published* phase: a call made while the signal
    /// already shows `target` returns after the signal has cycled back to it.
    ///
    /// Fails with [`ErrorKind::ControllerNotStarted`] if the cycle worker was
    /// never started (the wait could never finish), and with
    /// [`ErrorKind::ControllerStopped`] if the controller shuts down while
    /// waiting.
    pub async fn wait_for_phase(&self, target: SignalPhase) -> TrafficResult<()> {
        if let ControllerState::NotStarted = self.state {
            bail!(
                ErrorKind::ControllerNotStarted,
                "Controller not started",
                format!(
                    "Waiting for phase '{target}' on controller {} would never finish because its cycle worker is not running",
                    self.config.id
                )
            );
        }

        info!("waiting for phase '{target}'");

        let mut shutdown_rx = self.shutdown_rx.clone();

        loop {
            tokio::select! {
                biased;

                // Shutdown signal received, stop waiting.
                _ = shutdown_rx.changed() => {
                    info!("shutdown signal received, cancelling the wait for phase '{target}'");

                    bail!(
                        ErrorKind::ControllerStopped,
                        "Controller stopped",
                        format!("The controller was stopped while waiting for phase '{target}'")
                    );
                }

                phase = self.queue.receive() => {
                    if phase == target {
                        info!("phase '{target}' was reached");

                        return Ok(());
                    }

                    debug!("discarding phase '{phase}' while waiting for '{target}'");
                }
            }
        }
    }

    /// Initiates graceful shutdown of the controller.
    ///
    /// Sends the shutdown signal to the cycle worker and to all pending
    /// [`SignalController::wait_for_phase`] calls, then returns immediately.
    /// Use [`SignalController::wait`] afterwards to wait for the worker to
    /// actually stop.
    pub fn shutdown(&self) {
        info!("trying to shut down signal controller {}", self.config.id);

        if let Err(err) = self.shutdown_tx.shutdown() {
            error!("failed to send shutdown signal to the controller: {}", err);
            return;
        }

        info!("shutdown signal successfully sent to the cycle worker");
    }

    /// Waits for the cycle worker to terminate.
    ///
    /// This resolves once the worker has observed the shutdown signal and
    /// stopped. If the controller was never started, this returns immediately.
    pub async fn wait(self) -> TrafficResult<()> {
        let ControllerState::Started { cycle_worker } = self.state else {
            info!("controller was not started, nothing to wait for");

            return Ok(());
        };

        info!("waiting for the cycle worker to stop");

        cycle_worker.wait().await?;

        Ok(())
    }

    /// Initiates shutdown and waits for complete controller termination.
    ///
    /// This convenience method combines [`SignalController::shutdown`] and
    /// [`SignalController::wait`] in a single call.
    pub async fn shutdown_and_wait(self) -> TrafficResult<()> {
        self.shutdown();
        self.wait().await
    }
}
