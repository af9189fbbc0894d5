//! `zero-device`: publishes one zero device until interrupted.

use clap::Parser;
use zero_device::config::Cli;
use zero_device::host::HostRegistry;
use zero_device::lifecycle::{setup_tracing, DeviceLifecycle};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();

    let config = Cli::parse().into_config()?;

    let (registry, client) = HostRegistry::new(32);
    let registry_handle = tokio::spawn(registry.run());

    let mut device = DeviceLifecycle::new(client.clone());
    device.start(&config).await?;

    if let Some(name) = device.device_name() {
        info!(device = name, "Ready; press Ctrl-C to unload");
    }
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Cannot wait for Ctrl-C; unloading now");
    }

    if let Err(e) = device.stop().await {
        error!(error = %e, "Teardown incomplete");
    }

    // Dropping every client closes the registry's channel.
    drop(device);
    drop(client);
    registry_handle.await?;

    Ok(())
}
