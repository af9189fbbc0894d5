//! Lifecycle management and observability setup.
//!
//! - [`DeviceLifecycle`] - Registers the zero device with a host and tears it down
//! - [`SetupError`] / [`TeardownError`] - What went wrong, and at which step
//! - [`setup_tracing`] - Initializes the tracing/logging infrastructure

pub mod error;
pub mod manager;
pub mod tracing;

pub use error::*;
pub use manager::*;
pub use self::tracing::*;
