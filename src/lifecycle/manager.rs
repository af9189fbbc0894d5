//! # Device Lifecycle
//!
//! Brings the zero device into existence under its configured name and tears
//! it down again.
//!
//! Registration is four host calls, always in this order:
//!
//! 1. reserve a device region (the device's identity)
//! 2. bind the [`ZeroReader`] as the region's read handler
//! 3. create the device class
//! 4. publish the node under the configured name
//!
//! Completed steps are pushed onto a stack. Unwinding, whether after a failed
//! step or from [`DeviceLifecycle::stop`], pops that stack, so steps are
//! undone in exact reverse order and never more than once.

use crate::config::DeviceConfig;
use crate::device::ZeroReader;
use crate::host::{DeviceHost, DeviceNumber, HostError, ReadHandler};
use crate::lifecycle::{SetupError, StepFailure, TeardownError};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// One registration step. Teardown undoes the same steps in reverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationStep {
    ReserveRegion,
    BindHandler,
    CreateClass,
    PublishNode,
}

impl RegistrationStep {
    fn setup_error(self, error: HostError) -> SetupError {
        match self {
            RegistrationStep::ReserveRegion => SetupError::IdentityReservationFailed(error),
            RegistrationStep::BindHandler => SetupError::HandlerBindingFailed(error),
            RegistrationStep::CreateClass | RegistrationStep::PublishNode => {
                SetupError::PublicationFailed(error)
            }
        }
    }
}

impl fmt::Display for RegistrationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RegistrationStep::ReserveRegion => "reserve region",
            RegistrationStep::BindHandler => "bind handler",
            RegistrationStep::CreateClass => "create class",
            RegistrationStep::PublishNode => "publish node",
        };
        f.write_str(name)
    }
}

/// Steps applied once the region is reserved. Reservation itself runs
/// inline in `start` because it produces the device number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SetupStep {
    BindHandler,
    CreateClass,
    PublishNode,
}

impl From<SetupStep> for RegistrationStep {
    fn from(step: SetupStep) -> Self {
        match step {
            SetupStep::BindHandler => RegistrationStep::BindHandler,
            SetupStep::CreateClass => RegistrationStep::CreateClass,
            SetupStep::PublishNode => RegistrationStep::PublishNode,
        }
    }
}

/// Whether the device is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Uninitialized,
    Active,
}

struct Registration {
    name: String,
    class: String,
    number: DeviceNumber,
    completed: Vec<RegistrationStep>,
}

/// Owns the zero device's registration with a [`DeviceHost`].
///
/// # Example
///
/// ```rust
/// use zero_device::config::DeviceConfig;
/// use zero_device::host::HostRegistry;
/// use zero_device::lifecycle::DeviceLifecycle;
///
/// #[tokio::main]
/// async fn main() {
///     let (registry, client) = HostRegistry::new(32);
///     tokio::spawn(registry.run());
///
///     let mut device = DeviceLifecycle::new(client.clone());
///     device.start(&DeviceConfig::new("zeroA")).await.unwrap();
///
///     let handle = client.open("zeroA").await.unwrap();
///     assert_eq!(handle.read_to_vec(4).unwrap(), vec![0; 4]);
///
///     device.stop().await.unwrap();
///     assert!(client.resolve("zeroA").await.unwrap().is_none());
/// }
/// ```
pub struct DeviceLifecycle<H: DeviceHost> {
    host: H,
    reader: Arc<ZeroReader>,
    registration: Option<Registration>,
}

impl<H: DeviceHost> DeviceLifecycle<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            reader: Arc::new(ZeroReader::new()),
            registration: None,
        }
    }

    pub fn state(&self) -> LifecycleState {
        match &self.registration {
            Some(_) => LifecycleState::Active,
            None => LifecycleState::Uninitialized,
        }
    }

    /// Name the device is published under, while active.
    pub fn device_name(&self) -> Option<&str> {
        self.registration.as_ref().map(|reg| reg.name.as_str())
    }

    pub fn device_number(&self) -> Option<DeviceNumber> {
        self.registration.as_ref().map(|reg| reg.number)
    }

    /// Registers and publishes the device.
    ///
    /// On failure every step that had completed is undone before this
    /// returns, and the lifecycle stays `Uninitialized`.
    pub async fn start(&mut self, config: &DeviceConfig) -> Result<(), SetupError> {
        if let Some(reg) = &self.registration {
            return Err(SetupError::AlreadyActive(reg.name.clone()));
        }

        let name = config.validated_name().map_err(|e| {
            error!(error = %e, "zero device: refusing to start");
            SetupError::InvalidConfiguration(e)
        })?;

        let number = self.host.reserve_region(name).await.map_err(|e| {
            error!(device = name, error = %e, "Region reservation failed");
            RegistrationStep::ReserveRegion.setup_error(e)
        })?;

        let mut reg = Registration {
            name: name.to_string(),
            class: config.class_name.clone(),
            number,
            completed: vec![RegistrationStep::ReserveRegion],
        };
        debug!(device = name, step = %RegistrationStep::ReserveRegion, "Setup step done");

        for setup in [
            SetupStep::BindHandler,
            SetupStep::CreateClass,
            SetupStep::PublishNode,
        ] {
            let step = RegistrationStep::from(setup);
            if let Err(e) = self.apply(&reg, setup).await {
                error!(device = name, %step, error = %e, "Setup step failed, unwinding");
                // Unwind failures are logged inside `unwind`.
                let _ = self.unwind(&mut reg).await;
                return Err(step.setup_error(e));
            }
            reg.completed.push(step);
            debug!(device = name, %step, "Setup step done");
        }

        info!(device = name, %number, "zero device loaded");
        self.registration = Some(reg);
        Ok(())
    }

    /// Unpublishes and releases the device.
    ///
    /// Every step is attempted even if an earlier one fails. Calling this when
    /// nothing is registered does nothing.
    pub async fn stop(&mut self) -> Result<(), TeardownError> {
        let Some(mut reg) = self.registration.take() else {
            warn!("stop called with no active device");
            return Ok(());
        };

        let failures = self.unwind(&mut reg).await;
        info!(device = %reg.name, "zero device unloaded");

        if failures.is_empty() {
            Ok(())
        } else {
            Err(TeardownError { failures })
        }
    }

    async fn apply(&self, reg: &Registration, step: SetupStep) -> Result<(), HostError> {
        match step {
            SetupStep::BindHandler => {
                let handler: Arc<dyn ReadHandler> = self.reader.clone();
                self.host.bind_handler(reg.number, handler).await
            }
            SetupStep::CreateClass => self.host.create_class(&reg.class).await,
            SetupStep::PublishNode => {
                self.host
                    .publish_node(&reg.class, &reg.name, reg.number)
                    .await
            }
        }
    }

    async fn undo(&self, reg: &Registration, step: RegistrationStep) -> Result<(), HostError> {
        match step {
            RegistrationStep::ReserveRegion => self.host.release_region(reg.number).await,
            RegistrationStep::BindHandler => self.host.unbind_handler(reg.number).await,
            RegistrationStep::CreateClass => self.host.destroy_class(&reg.class).await,
            RegistrationStep::PublishNode => {
                self.host.unpublish_node(&reg.class, reg.number).await
            }
        }
    }

    /// Pops and undoes completed steps until none are left.
    async fn unwind(&self, reg: &mut Registration) -> Vec<StepFailure> {
        let mut failures = Vec::new();
        while let Some(step) = reg.completed.pop() {
            match self.undo(reg, step).await {
                Ok(()) => debug!(device = %reg.name, %step, "Undone"),
                Err(error) => {
                    warn!(device = %reg.name, %step, error = %error, "Undo failed, continuing");
                    failures.push(StepFailure { step, error });
                }
            }
        }
        failures
    }
}

impl<H: DeviceHost> Drop for DeviceLifecycle<H> {
    fn drop(&mut self) {
        if let Some(reg) = &self.registration {
            warn!(device = %reg.name, "Lifecycle dropped while active; call stop() first");
        }
    }
}
