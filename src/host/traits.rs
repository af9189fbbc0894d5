//! # DeviceHost Trait
//!
//! The seam between the lifecycle and whatever environment the device is
//! registered with. [`RegistryClient`](crate::host::RegistryClient) talks to
//! the in-process registry; [`MockHost`](crate::host::mock::MockHost) scripts
//! each answer for tests.
//!
//! Operations come in set-up / tear-down pairs. A caller that completed a
//! set-up step owns the matching tear-down and must call it exactly once.

use crate::host::{DeviceNumber, HostError, ReadHandler};
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait DeviceHost: Send + Sync {
    /// Reserves one device region. `label` shows up in the host's diagnostics.
    async fn reserve_region(&self, label: &str) -> Result<DeviceNumber, HostError>;

    async fn release_region(&self, number: DeviceNumber) -> Result<(), HostError>;

    /// Attaches the read handler that serves calls on `number`.
    async fn bind_handler(
        &self,
        number: DeviceNumber,
        handler: Arc<dyn ReadHandler>,
    ) -> Result<(), HostError>;

    async fn unbind_handler(&self, number: DeviceNumber) -> Result<(), HostError>;

    async fn create_class(&self, class: &str) -> Result<(), HostError>;

    async fn destroy_class(&self, class: &str) -> Result<(), HostError>;

    /// Makes `number` discoverable as `name` under `class`.
    async fn publish_node(
        &self,
        class: &str,
        name: &str,
        number: DeviceNumber,
    ) -> Result<(), HostError>;

    async fn unpublish_node(&self, class: &str, number: DeviceNumber) -> Result<(), HostError>;
}
