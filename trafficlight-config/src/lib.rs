//! Configuration management for traffic signal applications.
//!
//! Provides environment detection, layered configuration loading from YAML
//! files and environment variables, and the shared configuration types
//! consumed by the `trafficlight` crate.

mod environment;
mod load;
pub mod shared;

pub use environment::*;
pub use load::*;
