//! # Observability & Tracing
//!
//! Structured logging for the device and its host, filtered through
//! `RUST_LOG`.
//!
//! ```bash
//! RUST_LOG=info cargo run -- --zero-device-name zeroA    # load/unload events
//! RUST_LOG=debug cargo run -- --zero-device-name zeroA   # every host request and read
//! ```
//!
//! With `RUST_LOG=info` a full load/unload cycle reads:
//!
//! ```text
//! INFO Host registry started
//! INFO Region reserved number=254:0 label=zeroA
//! INFO Handler bound number=254:0
//! INFO Class created class=zero_device_class
//! INFO Node published class=zero_device_class name=zeroA number=254:0
//! INFO zero device loaded device=zeroA number=254:0
//! INFO Node unpublished class=zero_device_class name=zeroA number=254:0
//! INFO Class destroyed class=zero_device_class
//! INFO Handler unbound number=254:0
//! INFO Region released number=254:0
//! INFO zero device unloaded device=zeroA
//! ```

/// Initializes the tracing subscriber. Call once, from the binary.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
