//! # Host Registry
//!
//! The in-process host environment. `HostRegistry` owns every registration
//! artifact (device regions, handler bindings, device classes, published
//! nodes) and processes [`HostRequest`] messages one at a time, so its tables
//! need no locks.
//!
//! Reads never pass through here: [`HostRequest::Open`] hands back a
//! [`DeviceHandle`] that calls the bound handler directly.

use crate::host::{
    DeviceHandle, DeviceNumber, HostError, HostRequest, ReadHandler, RegistryClient,
    DYNAMIC_MAJOR_FIRST, DYNAMIC_MAJOR_LAST,
};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// A node published under a class.
struct Node {
    class: String,
    number: DeviceNumber,
}

/// The actor that plays the host environment.
///
/// # Usage Pattern
///
/// ```rust
/// use zero_device::host::{DeviceHost, HostRegistry};
///
/// #[tokio::main]
/// async fn main() {
///     let (registry, client) = HostRegistry::new(32);
///     let handle = tokio::spawn(registry.run());
///
///     let number = client.reserve_region("demo").await.unwrap();
///     assert_eq!(number.major, 254);
///
///     drop(client);
///     handle.await.unwrap();
/// }
/// ```
pub struct HostRegistry {
    receiver: mpsc::Receiver<HostRequest>,
    /// Reserved regions by major number, with the label they were reserved under.
    regions: BTreeMap<u32, String>,
    handlers: HashMap<DeviceNumber, Arc<dyn ReadHandler>>,
    classes: HashMap<String, Vec<String>>,
    /// Published nodes by public name.
    nodes: HashMap<String, Node>,
}

impl HostRegistry {
    /// Creates a new `HostRegistry` and a client connected to it.
    ///
    /// `buffer_size` bounds the request channel; callers wait when it is full.
    pub fn new(buffer_size: usize) -> (Self, RegistryClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let registry = Self {
            receiver,
            regions: BTreeMap::new(),
            handlers: HashMap::new(),
            classes: HashMap::new(),
            nodes: HashMap::new(),
        };
        (registry, RegistryClient::new(sender))
    }

    /// Runs the registry until every client has been dropped.
    pub async fn run(mut self) {
        info!("Host registry started");

        while let Some(msg) = self.receiver.recv().await {
            debug!(request = ?msg, "Host request");
            match msg {
                HostRequest::ReserveRegion { label, respond_to } => {
                    let _ = respond_to.send(self.reserve_region(label));
                }
                HostRequest::ReleaseRegion { number, respond_to } => {
                    let _ = respond_to.send(self.release_region(number));
                }
                HostRequest::BindHandler {
                    number,
                    handler,
                    respond_to,
                } => {
                    let _ = respond_to.send(self.bind_handler(number, handler));
                }
                HostRequest::UnbindHandler { number, respond_to } => {
                    let _ = respond_to.send(self.unbind_handler(number));
                }
                HostRequest::CreateClass { class, respond_to } => {
                    let _ = respond_to.send(self.create_class(class));
                }
                HostRequest::DestroyClass { class, respond_to } => {
                    let _ = respond_to.send(self.destroy_class(&class));
                }
                HostRequest::PublishNode {
                    class,
                    name,
                    number,
                    respond_to,
                } => {
                    let _ = respond_to.send(self.publish_node(class, name, number));
                }
                HostRequest::UnpublishNode {
                    class,
                    number,
                    respond_to,
                } => {
                    let _ = respond_to.send(self.unpublish_node(&class, number));
                }
                HostRequest::Resolve { name, respond_to } => {
                    let found = self.nodes.get(&name).map(|node| node.number);
                    debug!(%name, found = found.is_some(), "Resolve");
                    let _ = respond_to.send(Ok(found));
                }
                HostRequest::Open { name, respond_to } => {
                    let _ = respond_to.send(self.open(name));
                }
            }
        }

        info!(
            regions = self.regions.len(),
            nodes = self.nodes.len(),
            "Host registry shutdown"
        );
    }

    fn reserve_region(&mut self, label: String) -> Result<DeviceNumber, HostError> {
        let major = (DYNAMIC_MAJOR_FIRST..=DYNAMIC_MAJOR_LAST)
            .rev()
            .find(|major| !self.regions.contains_key(major))
            .ok_or(HostError::NumbersExhausted {
                first: DYNAMIC_MAJOR_FIRST,
                last: DYNAMIC_MAJOR_LAST,
            })?;
        let number = DeviceNumber::new(major, 0);
        info!(%number, %label, "Region reserved");
        self.regions.insert(major, label);
        Ok(number)
    }

    fn release_region(&mut self, number: DeviceNumber) -> Result<(), HostError> {
        if number.minor != 0 || self.regions.remove(&number.major).is_none() {
            return Err(HostError::NotReserved(number));
        }
        if self.handlers.remove(&number).is_some() {
            warn!(%number, "Region released with handler still bound");
        }
        info!(%number, "Region released");
        Ok(())
    }

    fn bind_handler(
        &mut self,
        number: DeviceNumber,
        handler: Arc<dyn ReadHandler>,
    ) -> Result<(), HostError> {
        if !self.is_reserved(number) {
            return Err(HostError::NotReserved(number));
        }
        if self.handlers.contains_key(&number) {
            return Err(HostError::AlreadyBound(number));
        }
        self.handlers.insert(number, handler);
        info!(%number, "Handler bound");
        Ok(())
    }

    fn unbind_handler(&mut self, number: DeviceNumber) -> Result<(), HostError> {
        self.handlers
            .remove(&number)
            .map(|_| info!(%number, "Handler unbound"))
            .ok_or(HostError::NotBound(number))
    }

    fn create_class(&mut self, class: String) -> Result<(), HostError> {
        if self.classes.contains_key(&class) {
            return Err(HostError::ClassExists(class));
        }
        info!(%class, "Class created");
        self.classes.insert(class, Vec::new());
        Ok(())
    }

    fn destroy_class(&mut self, class: &str) -> Result<(), HostError> {
        let members = self
            .classes
            .remove(class)
            .ok_or_else(|| HostError::ClassNotFound(class.to_string()))?;
        for name in members {
            warn!(%class, %name, "Dropping node left in destroyed class");
            self.nodes.remove(&name);
        }
        info!(%class, "Class destroyed");
        Ok(())
    }

    fn publish_node(
        &mut self,
        class: String,
        name: String,
        number: DeviceNumber,
    ) -> Result<(), HostError> {
        if !self.handlers.contains_key(&number) {
            return Err(HostError::NotBound(number));
        }
        if self.nodes.contains_key(&name) {
            return Err(HostError::NameTaken(name));
        }
        let members = self
            .classes
            .get_mut(&class)
            .ok_or_else(|| HostError::ClassNotFound(class.clone()))?;
        members.push(name.clone());
        info!(%class, %name, %number, "Node published");
        self.nodes.insert(name, Node { class, number });
        Ok(())
    }

    fn unpublish_node(&mut self, class: &str, number: DeviceNumber) -> Result<(), HostError> {
        let name = self
            .nodes
            .iter()
            .find(|(_, node)| node.class == class && node.number == number)
            .map(|(name, _)| name.clone())
            .ok_or(HostError::NotPublished(number))?;
        self.nodes.remove(&name);
        if let Some(members) = self.classes.get_mut(class) {
            members.retain(|member| *member != name);
        }
        info!(%class, %name, %number, "Node unpublished");
        Ok(())
    }

    fn open(&self, name: String) -> Result<DeviceHandle, HostError> {
        let number = match self.nodes.get(&name) {
            Some(node) => node.number,
            None => return Err(HostError::NoSuchDevice(name)),
        };
        let handler = self
            .handlers
            .get(&number)
            .cloned()
            .ok_or(HostError::NotBound(number))?;
        debug!(%name, %number, "Opened");
        Ok(DeviceHandle::new(name, number, handler))
    }

    fn is_reserved(&self, number: DeviceNumber) -> bool {
        number.minor == 0 && self.regions.contains_key(&number.major)
    }
}
