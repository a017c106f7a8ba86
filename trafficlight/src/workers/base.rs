use std::future::Future;

use thiserror::Error;
use tokio::task::JoinError;

use crate::error::{ErrorKind, TrafficError};
use crate::traffic_error;

/// Errors surfaced when waiting for a worker task to finish.
#[derive(Debug, Error)]
pub enum WorkerWaitError {
    /// The worker task panicked or was aborted before completing.
    #[error("The worker task did not complete: {0}")]
    TaskFailed(#[from] JoinError),

    /// The worker ran to completion but reported an error.
    #[error("The worker failed: {0}")]
    WorkerFailed(#[from] TrafficError),
}

impl From<WorkerWaitError> for TrafficError {
    fn from(err: WorkerWaitError) -> TrafficError {
        match err {
            WorkerWaitError::TaskFailed(join_err) => traffic_error!(
                ErrorKind::CycleWorkerPanic,
                "The cycle worker task did not complete",
                join_err
            ),
            WorkerWaitError::WorkerFailed(err) => err,
        }
    }
}

/// A trait for types that can be started as workers.
///
/// The generic parameter `H` represents the handle type that will be returned
/// when the worker starts, and `S` represents the state type that can be
/// accessed through the handle.
pub trait Worker<H, S>
where
    H: WorkerHandle<S>,
{
    /// Error type.
    type Error;

    /// Starts the worker and returns a future that resolves to a handle.
    ///
    /// The handle can be used to monitor and control the worker's execution.
    fn start(self) -> impl Future<Output = Result<H, Self::Error>> + Send;
}

/// A handle to a running worker that provides access to its state and
/// completion status.
///
/// The generic parameter `S` represents the type of state that can be accessed
/// through this handle.
pub trait WorkerHandle<S> {
    /// Returns the current state of the worker.
    ///
    /// Note that the state is not tied to the worker's lifetime: holding it
    /// says nothing about whether the worker is still running.
    fn state(&self) -> S;

    /// Returns a future that resolves when the worker completes.
    fn wait(self) -> impl Future<Output = Result<(), WorkerWaitError>> + Send;
}
