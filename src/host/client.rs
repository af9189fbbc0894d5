//! # Registry Client
//!
//! Typed, cloneable access to a running [`HostRegistry`](crate::host::HostRegistry).

use crate::host::{DeviceHandle, DeviceHost, DeviceNumber, HostError, HostRequest, ReadHandler};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

/// Client for the host registry actor.
///
/// Holds only a sender, so cloning is cheap. The registry shuts down once
/// every clone is dropped.
#[derive(Clone)]
pub struct RegistryClient {
    sender: mpsc::Sender<HostRequest>,
}

impl RegistryClient {
    pub fn new(sender: mpsc::Sender<HostRequest>) -> Self {
        Self { sender }
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<T, HostError>>) -> HostRequest,
    ) -> Result<T, HostError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| HostError::HostClosed)?;
        response.await.map_err(|_| HostError::HostDropped)?
    }

    /// Looks up a published node by its public name.
    pub async fn resolve(&self, name: &str) -> Result<Option<DeviceNumber>, HostError> {
        let name = name.to_string();
        self.request(|respond_to| HostRequest::Resolve { name, respond_to })
            .await
    }

    /// Opens a published node for reading.
    pub async fn open(&self, name: &str) -> Result<DeviceHandle, HostError> {
        let name = name.to_string();
        self.request(|respond_to| HostRequest::Open { name, respond_to })
            .await
    }
}

#[async_trait]
impl DeviceHost for RegistryClient {
    async fn reserve_region(&self, label: &str) -> Result<DeviceNumber, HostError> {
        let label = label.to_string();
        self.request(|respond_to| HostRequest::ReserveRegion { label, respond_to })
            .await
    }

    async fn release_region(&self, number: DeviceNumber) -> Result<(), HostError> {
        self.request(|respond_to| HostRequest::ReleaseRegion { number, respond_to })
            .await
    }

    async fn bind_handler(
        &self,
        number: DeviceNumber,
        handler: Arc<dyn ReadHandler>,
    ) -> Result<(), HostError> {
        self.request(|respond_to| HostRequest::BindHandler {
            number,
            handler,
            respond_to,
        })
        .await
    }

    async fn unbind_handler(&self, number: DeviceNumber) -> Result<(), HostError> {
        self.request(|respond_to| HostRequest::UnbindHandler { number, respond_to })
            .await
    }

    async fn create_class(&self, class: &str) -> Result<(), HostError> {
        let class = class.to_string();
        self.request(|respond_to| HostRequest::CreateClass { class, respond_to })
            .await
    }

    async fn destroy_class(&self, class: &str) -> Result<(), HostError> {
        let class = class.to_string();
        self.request(|respond_to| HostRequest::DestroyClass { class, respond_to })
            .await
    }

    async fn publish_node(
        &self,
        class: &str,
        name: &str,
        number: DeviceNumber,
    ) -> Result<(), HostError> {
        let class = class.to_string();
        let name = name.to_string();
        self.request(|respond_to| HostRequest::PublishNode {
            class,
            name,
            number,
            respond_to,
        })
        .await
    }

    async fn unpublish_node(&self, class: &str, number: DeviceNumber) -> Result<(), HostError> {
        let class = class.to_string();
        self.request(|respond_to| HostRequest::UnpublishNode {
            class,
            number,
            respond_to,
        })
        .await
    }
}
