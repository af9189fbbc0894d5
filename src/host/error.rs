//! # Host Errors
//!
//! Failures reported by the host environment. Every registry operation and
//! every client call funnels into [`HostError`], so the lifecycle can wrap
//! whichever one failed without caring which host produced it.

use crate::host::DeviceNumber;

/// Errors that can occur within the host environment itself.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    #[error("Host closed")]
    HostClosed,
    #[error("Host dropped response channel")]
    HostDropped,
    #[error("No free device numbers in {first}..={last}")]
    NumbersExhausted { first: u32, last: u32 },
    #[error("Device number not reserved: {0}")]
    NotReserved(DeviceNumber),
    #[error("Handler already bound to {0}")]
    AlreadyBound(DeviceNumber),
    #[error("No handler bound to {0}")]
    NotBound(DeviceNumber),
    #[error("Device class already exists: {0}")]
    ClassExists(String),
    #[error("Device class not found: {0}")]
    ClassNotFound(String),
    #[error("Name already published: {0}")]
    NameTaken(String),
    #[error("Device {0} is not published")]
    NotPublished(DeviceNumber),
    #[error("No such device: {0}")]
    NoSuchDevice(String),
    #[error("Host refused request: {0}")]
    Refused(String),
}
