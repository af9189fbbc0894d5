//! # ZeroReader
//!
//! The read service. Every call gets its own freshly zeroed buffer; nothing is
//! kept between calls, so concurrent readers share no mutable state.

use crate::device::{ReadDestination, ReadError, ReadRequest};
use crate::host::ReadHandler;
use tracing::{debug, trace};

/// Stateless read service: `count` bytes in, `count` zero bytes out.
///
/// A successful read always reports the full requested count. There is no
/// end-of-stream; `count == 0` is a valid zero-length transfer.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroReader;

impl ZeroReader {
    pub fn new() -> Self {
        Self
    }

    /// Serves one read call into `dest`.
    ///
    /// The response buffer is allocated fallibly and dropped before this
    /// returns, whatever the outcome.
    pub fn read(
        &self,
        request: ReadRequest,
        dest: &mut dyn ReadDestination,
    ) -> Result<usize, ReadError> {
        if request.count == 0 {
            trace!("zero-length read");
            return Ok(0);
        }

        let buf = zeroed(request.count)?;
        dest.write_from(&buf)?;
        debug!(count = request.count, offset = request.offset, "Read ok");
        Ok(request.count)
    }

    /// Produces `count` zero bytes as an owned buffer.
    ///
    /// `read_zeroes(0)` returns an empty vector without allocating.
    pub fn read_zeroes(&self, count: usize) -> Result<Vec<u8>, ReadError> {
        if count == 0 {
            return Ok(Vec::new());
        }
        zeroed(count)
    }
}

impl ReadHandler for ZeroReader {
    fn read(
        &self,
        request: ReadRequest,
        dest: &mut dyn ReadDestination,
    ) -> Result<usize, ReadError> {
        ZeroReader::read(self, request, dest)
    }
}

/// Allocates exactly `count` bytes, all zero.
///
/// `try_reserve_exact` reports capacity overflow and allocator failure as an
/// error instead of aborting the process.
fn zeroed(count: usize) -> Result<Vec<u8>, ReadError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(count)
        .map_err(|_| ReadError::OutOfMemory { requested: count })?;
    buf.resize(count, 0);
    Ok(buf)
}
