//! # Zero Device
//!
//! The read service behind the published node. It answers "give me N bytes"
//! with N zero bytes and never reports end-of-stream.
//!
//! ## Structure
//!
//! - [`zero`] - [`ZeroReader`], the stateless read service
//! - [`request`] - [`ReadRequest`] and the [`ReadDestination`] boundary
//! - [`error`] - [`ReadError`] for per-call failures
//!
//! ## Usage
//!
//! ```rust
//! use zero_device::device::{ReadRequest, UserBuffer, ZeroReader};
//!
//! let reader = ZeroReader::new();
//! let mut buf = [0xAAu8; 16];
//! let n = reader.read(ReadRequest::new(16), &mut UserBuffer::new(&mut buf)).unwrap();
//! assert_eq!(n, 16);
//! assert!(buf.iter().all(|b| *b == 0));
//! ```

pub mod error;
pub mod request;
pub mod zero;

pub use error::*;
pub use request::*;
pub use zero::*;
