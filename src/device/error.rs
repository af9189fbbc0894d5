//! Error types for the read path.

use thiserror::Error;

/// Errors a single read call can fail with.
///
/// Both variants are local to the call that produced them. They never
/// affect other readers and never tear the device down.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReadError {
    /// The response buffer could not be allocated.
    #[error("Out of memory: cannot allocate {requested} bytes")]
    OutOfMemory { requested: usize },

    /// The produced bytes could not be delivered to the caller's destination.
    #[error("Transfer fault: {0}")]
    TransferFault(#[from] TransferFault),
}

/// Delivery into a [`ReadDestination`](crate::device::ReadDestination) failed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("destination rejected {len} bytes: {reason}")]
pub struct TransferFault {
    pub len: usize,
    pub reason: String,
}

impl TransferFault {
    pub fn new(len: usize, reason: impl Into<String>) -> Self {
        Self {
            len,
            reason: reason.into(),
        }
    }
}
