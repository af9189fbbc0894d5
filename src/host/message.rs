//! # Host Messages
//!
//! The message types sent from a [`RegistryClient`](crate::host::RegistryClient)
//! to the [`HostRegistry`](crate::host::HostRegistry) actor.

use crate::host::{DeviceHandle, DeviceNumber, HostError, ReadHandler};
use std::fmt;
use std::sync::Arc;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the registry.
pub type Response<T> = oneshot::Sender<Result<T, HostError>>;

/// Requests the registry actor understands.
///
/// The first eight variants come in pairs, one to set up a registration
/// artifact and one to tear it down. `Resolve` and `Open` are what external
/// callers use to find and open a published node.
pub enum HostRequest {
    ReserveRegion {
        label: String,
        respond_to: Response<DeviceNumber>,
    },
    ReleaseRegion {
        number: DeviceNumber,
        respond_to: Response<()>,
    },
    BindHandler {
        number: DeviceNumber,
        handler: Arc<dyn ReadHandler>,
        respond_to: Response<()>,
    },
    UnbindHandler {
        number: DeviceNumber,
        respond_to: Response<()>,
    },
    CreateClass {
        class: String,
        respond_to: Response<()>,
    },
    DestroyClass {
        class: String,
        respond_to: Response<()>,
    },
    PublishNode {
        class: String,
        name: String,
        number: DeviceNumber,
        respond_to: Response<()>,
    },
    UnpublishNode {
        class: String,
        number: DeviceNumber,
        respond_to: Response<()>,
    },
    Resolve {
        name: String,
        respond_to: Response<Option<DeviceNumber>>,
    },
    Open {
        name: String,
        respond_to: Response<DeviceHandle>,
    },
}

impl fmt::Debug for HostRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostRequest::ReserveRegion { label, .. } => {
                f.debug_struct("ReserveRegion").field("label", label).finish()
            }
            HostRequest::ReleaseRegion { number, .. } => {
                f.debug_struct("ReleaseRegion").field("number", number).finish()
            }
            HostRequest::BindHandler { number, .. } => {
                f.debug_struct("BindHandler").field("number", number).finish()
            }
            HostRequest::UnbindHandler { number, .. } => {
                f.debug_struct("UnbindHandler").field("number", number).finish()
            }
            HostRequest::CreateClass { class, .. } => {
                f.debug_struct("CreateClass").field("class", class).finish()
            }
            HostRequest::DestroyClass { class, .. } => {
                f.debug_struct("DestroyClass").field("class", class).finish()
            }
            HostRequest::PublishNode {
                class,
                name,
                number,
                ..
            } => f
                .debug_struct("PublishNode")
                .field("class", class)
                .field("name", name)
                .field("number", number)
                .finish(),
            HostRequest::UnpublishNode { class, number, .. } => f
                .debug_struct("UnpublishNode")
                .field("class", class)
                .field("number", number)
                .finish(),
            HostRequest::Resolve { name, .. } => {
                f.debug_struct("Resolve").field("name", name).finish()
            }
            HostRequest::Open { name, .. } => f.debug_struct("Open").field("name", name).finish(),
        }
    }
}
