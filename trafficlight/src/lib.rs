//! Traffic signal controller built around a blocking phase handoff queue.
//!
//! A [`controller::SignalController`] owns the current phase of a two-phase
//! traffic signal and a background cycle worker that toggles the phase on a
//! randomized interval. Any number of tasks can query the current phase at
//! any time or block until the signal reaches a specific phase.
//!
//! # Modules
//!
//! - [`concurrency`] - handoff queue and shutdown signaling primitives
//! - [`controller`] - controller lifecycle and the wait-for-phase operation
//! - [`error`] - crate error type and error kinds
//! - [`state`] - signal phases and the shared phase cell
//! - [`workers`] - the phase cycle worker

pub mod concurrency;
pub mod controller;
pub mod error;
mod macros;
pub mod state;
pub mod workers;
