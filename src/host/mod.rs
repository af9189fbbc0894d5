//! Host environment: device numbers, handler bindings, classes and
//! published nodes.
//!
//! This module provides the environment the zero device registers with.
//!
//! # Main Components
//!
//! - [`DeviceHost`] - Trait the lifecycle drives registration through
//! - [`HostRegistry`] - In-process host actor owning all registration tables
//! - [`RegistryClient`] - Cloneable client for the registry, also used to resolve and open nodes
//! - [`ReadHandler`] / [`DeviceHandle`] - The read-call boundary
//! - [`HostError`] - Host failures
//!
//! # Testing
//!
//! See [`mock`] for a scripted [`DeviceHost`] used to force failures at any step.

pub mod client;
pub mod error;
pub mod handler;
pub mod message;
pub mod mock;
pub mod number;
pub mod registry;
pub mod traits;

pub use client::RegistryClient;
pub use error::HostError;
pub use handler::{DeviceHandle, ReadHandler};
pub use message::{HostRequest, Response};
pub use number::{DeviceNumber, DYNAMIC_MAJOR_FIRST, DYNAMIC_MAJOR_LAST};
pub use registry::HostRegistry;
pub use traits::DeviceHost;
