//! # Read Dispatch
//!
//! The host side of the read-call boundary. A [`ReadHandler`] is bound to a
//! reserved device number; opening a published node yields a [`DeviceHandle`]
//! that forwards reads straight to that handler on the caller's thread.
//! The registry actor is not involved in reads, so they run in parallel.

use crate::device::{ReadDestination, ReadError, ReadRequest};
use crate::host::DeviceNumber;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// Services read calls for one bound device.
///
/// Implementations are shared across every open handle and called
/// concurrently, hence `Send + Sync`.
pub trait ReadHandler: Send + Sync + 'static {
    fn read(
        &self,
        request: ReadRequest,
        dest: &mut dyn ReadDestination,
    ) -> Result<usize, ReadError>;
}

/// An opened device node.
///
/// Cheap to clone. A handle keeps its handler alive even after the node is
/// unpublished, the same way an open file outlives `unlink`.
#[derive(Clone)]
pub struct DeviceHandle {
    name: String,
    number: DeviceNumber,
    handler: Arc<dyn ReadHandler>,
}

impl DeviceHandle {
    pub(crate) fn new(name: String, number: DeviceNumber, handler: Arc<dyn ReadHandler>) -> Self {
        Self {
            name,
            number,
            handler,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn number(&self) -> DeviceNumber {
        self.number
    }

    /// Delivers one read call to the bound handler.
    pub fn read(
        &self,
        request: ReadRequest,
        dest: &mut dyn ReadDestination,
    ) -> Result<usize, ReadError> {
        trace!(device = %self.name, count = request.count, "dispatch read");
        self.handler.read(request, dest)
    }

    /// Reads `count` bytes into a fresh vector.
    pub fn read_to_vec(&self, count: usize) -> Result<Vec<u8>, ReadError> {
        let mut out = Vec::new();
        self.read(ReadRequest::new(count), &mut out)?;
        Ok(out)
    }
}

impl fmt::Debug for DeviceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceHandle")
            .field("name", &self.name)
            .field("number", &self.number)
            .finish_non_exhaustive()
    }
}
