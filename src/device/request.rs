//! # Read Requests & Destinations
//!
//! A read arrives as a [`ReadRequest`] plus a destination the produced bytes
//! are copied into. The destination is the caller's memory; the read service
//! never keeps a reference to it past the call.

use crate::device::TransferFault;

/// One read call: how many bytes the caller wants, and where it claims to be.
///
/// The offset is carried for completeness only. The zero device ignores it
/// and never advances it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReadRequest {
    pub count: usize,
    pub offset: u64,
}

impl ReadRequest {
    pub fn new(count: usize) -> Self {
        Self { count, offset: 0 }
    }

    pub fn at(count: usize, offset: u64) -> Self {
        Self { count, offset }
    }
}

/// Somewhere a read can deliver its bytes.
///
/// `write_from` must either accept all of `src` or fail without claiming a
/// partial transfer.
pub trait ReadDestination {
    fn write_from(&mut self, src: &[u8]) -> Result<(), TransferFault>;
}

/// A fixed caller-owned buffer, the in-process stand-in for a user pointer.
///
/// A buffer shorter than the requested count faults, the same way a copy
/// past the end of a user mapping would.
#[derive(Debug)]
pub struct UserBuffer<'a> {
    buf: &'a mut [u8],
}

impl<'a> UserBuffer<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf }
    }
}

impl ReadDestination for UserBuffer<'_> {
    fn write_from(&mut self, src: &[u8]) -> Result<(), TransferFault> {
        if src.len() > self.buf.len() {
            return Err(TransferFault::new(
                src.len(),
                format!("buffer holds only {} bytes", self.buf.len()),
            ));
        }
        self.buf[..src.len()].copy_from_slice(src);
        Ok(())
    }
}

/// Appends to the vector, growing it fallibly.
impl ReadDestination for Vec<u8> {
    fn write_from(&mut self, src: &[u8]) -> Result<(), TransferFault> {
        self.try_reserve(src.len())
            .map_err(|e| TransferFault::new(src.len(), e.to_string()))?;
        self.extend_from_slice(src);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_buffer_accepts_exact_fit() {
        let mut raw = [7u8; 4];
        let mut dest = UserBuffer::new(&mut raw);
        dest.write_from(&[0, 0, 0, 0]).unwrap();
        assert_eq!(raw, [0, 0, 0, 0]);
    }

    #[test]
    fn test_user_buffer_leaves_tail_untouched() {
        let mut raw = [7u8; 6];
        UserBuffer::new(&mut raw).write_from(&[0, 0]).unwrap();
        assert_eq!(raw, [0, 0, 7, 7, 7, 7]);
    }

    #[test]
    fn test_user_buffer_faults_when_too_short() {
        let mut raw = [7u8; 2];
        let err = UserBuffer::new(&mut raw).write_from(&[0; 3]).unwrap_err();
        assert_eq!(err.len, 3);
        // Nothing was copied.
        assert_eq!(raw, [7, 7]);
    }

    #[test]
    fn test_vec_destination_appends() {
        let mut dest = vec![1u8];
        dest.write_from(&[0, 0]).unwrap();
        assert_eq!(dest, vec![1, 0, 0]);
    }
}
