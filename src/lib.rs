//! # Zero Device
//!
//! A named, read-only device that behaves like an endless source of zero
//! bytes. Every read of `N` bytes gets exactly `N` zeros; there is no
//! end-of-stream.
//!
//! ## Module Tour
//!
//! ### 1. The Read Service ([`device`])
//! - **Role**: Answers read calls. Stateless, so any number of readers can call it at once.
//! - **Key items**: [`ZeroReader`](device::ZeroReader), [`ReadError`](device::ReadError).
//!
//! ### 2. The Orchestrator ([`lifecycle`])
//! - **Role**: Registers the device with its host in four ordered steps and unwinds them in
//!   reverse, on failure or on [`stop`](lifecycle::DeviceLifecycle::stop).
//! - **Key items**: [`DeviceLifecycle`](lifecycle::DeviceLifecycle), [`SetupError`](lifecycle::SetupError).
//!
//! ### 3. The Host ([`host`])
//! - **Role**: The environment the device registers with: device numbers, handler bindings,
//!   classes and published names. [`HostRegistry`](host::HostRegistry) is an in-process actor;
//!   [`MockHost`](host::mock::MockHost) scripts failures for tests.
//! - **Key items**: [`DeviceHost`](host::DeviceHost), [`DeviceHandle`](host::DeviceHandle).
//!
//! ### 4. Configuration ([`config`])
//! - **Role**: The device's public name, from a TOML file, `ZERO_DEVICE_NAME` or a flag.
//!
//! ## Running
//!
//! ```bash
//! RUST_LOG=info cargo run -- --zero-device-name zeroA
//! ```

pub mod config;
pub mod device;
pub mod host;
pub mod lifecycle;
