//! Error types for registration and teardown.

use crate::config::ConfigError;
use crate::host::HostError;
use crate::lifecycle::RegistrationStep;
use thiserror::Error;

/// Why `start` failed. Each variant names the step that failed; by the time
/// the caller sees it, every earlier step has already been unwound.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[source] ConfigError),

    #[error("device {0} is already active")]
    AlreadyActive(String),

    #[error("identity reservation failed: {0}")]
    IdentityReservationFailed(#[source] HostError),

    #[error("handler binding failed: {0}")]
    HandlerBindingFailed(#[source] HostError),

    #[error("publication failed: {0}")]
    PublicationFailed(#[source] HostError),
}

/// One step that could not be undone.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("undoing {step}: {error}")]
pub struct StepFailure {
    pub step: RegistrationStep,
    pub error: HostError,
}

/// Teardown ran every step but some of them failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} teardown step(s) failed: {}", .failures.len(), join_failures(.failures))]
pub struct TeardownError {
    pub failures: Vec<StepFailure>,
}

fn join_failures(failures: &[StepFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
