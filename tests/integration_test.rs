use zero_device::config::DeviceConfig;
use zero_device::device::{ReadError, ReadRequest, UserBuffer};
use zero_device::host::{DeviceHost, HostError, HostRegistry, RegistryClient};
use zero_device::lifecycle::{DeviceLifecycle, LifecycleState, SetupError};

fn spawn_registry() -> (RegistryClient, tokio::task::JoinHandle<()>) {
    let (registry, client) = HostRegistry::new(32);
    let handle = tokio::spawn(registry.run());
    (client, handle)
}

/// Full end-to-end cycle against the real registry.
#[tokio::test]
async fn test_start_read_stop_and_restart() {
    let (client, registry_handle) = spawn_registry();
    let mut device = DeviceLifecycle::new(client.clone());

    device.start(&DeviceConfig::new("zeroA")).await.unwrap();
    assert_eq!(device.state(), LifecycleState::Active);
    let number = client.resolve("zeroA").await.unwrap().expect("published");
    assert_eq!(Some(number), device.device_number());

    let handle = client.open("zeroA").await.unwrap();
    let mut raw = [0x5Au8; 100];
    let n = handle
        .read(ReadRequest::new(100), &mut UserBuffer::new(&mut raw))
        .unwrap();
    assert_eq!(n, 100);
    assert!(raw.iter().all(|b| *b == 0));

    device.stop().await.unwrap();
    assert_eq!(client.resolve("zeroA").await.unwrap(), None);
    assert!(matches!(
        client.open("zeroA").await,
        Err(HostError::NoSuchDevice(_))
    ));

    // No residual state blocks reuse of the same name.
    device.start(&DeviceConfig::new("zeroA")).await.unwrap();
    assert!(client.resolve("zeroA").await.unwrap().is_some());
    device.stop().await.unwrap();

    drop(device);
    drop(client);
    registry_handle.await.unwrap();
}

/// Bad names fail and leave no region behind: the next start gets the first
/// dynamic number again.
#[tokio::test]
async fn test_invalid_name_leaves_no_identity_reserved() {
    let (client, _registry) = spawn_registry();
    let mut device = DeviceLifecycle::new(client.clone());

    assert!(matches!(
        device.start(&DeviceConfig::new("")).await,
        Err(SetupError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        device.start(&DeviceConfig::default()).await,
        Err(SetupError::InvalidConfiguration(_))
    ));

    device.start(&DeviceConfig::new("zeroA")).await.unwrap();
    assert_eq!(device.device_number().map(|n| n.major), Some(254));
    device.stop().await.unwrap();
}

/// Publication fails on a name someone else already holds; the second device
/// unwinds cleanly and the first one is untouched.
#[tokio::test]
async fn test_name_clash_unwinds_second_device() {
    let (client, _registry) = spawn_registry();

    let mut first = DeviceLifecycle::new(client.clone());
    first.start(&DeviceConfig::new("zeroA")).await.unwrap();

    let mut second = DeviceLifecycle::new(client.clone());
    let err = second
        .start(&DeviceConfig::new("zeroA").with_class("other_class"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        SetupError::PublicationFailed(HostError::NameTaken(_))
    ));
    assert_eq!(second.state(), LifecycleState::Uninitialized);

    // The second device's region (253) was released, so it is handed out again.
    let reused = client.reserve_region("reuse_check").await.unwrap();
    assert_eq!(reused.major, 253);
    client.release_region(reused).await.unwrap();

    // The other_class class was destroyed during unwinding.
    client.create_class("other_class").await.unwrap();
    client.destroy_class("other_class").await.unwrap();

    let handle = client.open("zeroA").await.unwrap();
    assert_eq!(handle.number(), first.device_number().unwrap());
    first.stop().await.unwrap();
}

/// Same class for two devices: the second fails at class creation.
#[tokio::test]
async fn test_shared_class_fails_publication() {
    let (client, _registry) = spawn_registry();

    let mut first = DeviceLifecycle::new(client.clone());
    first.start(&DeviceConfig::new("zeroA")).await.unwrap();

    let mut second = DeviceLifecycle::new(client.clone());
    let err = second.start(&DeviceConfig::new("zeroB")).await.unwrap_err();
    assert!(matches!(
        err,
        SetupError::PublicationFailed(HostError::ClassExists(_))
    ));
    assert_eq!(client.resolve("zeroB").await.unwrap(), None);

    first.stop().await.unwrap();
}

/// Concurrent readers with different sizes each get their own all-zero buffer.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_reads() {
    let (client, _registry) = spawn_registry();
    let mut device = DeviceLifecycle::new(client.clone());
    device.start(&DeviceConfig::new("zeroA")).await.unwrap();

    let sizes = [0usize, 1, 4096, 1_000_000, 7, 65_537, 0, 1_000_000];
    let mut tasks = Vec::new();
    for (i, size) in sizes.into_iter().enumerate() {
        let handle = client.open("zeroA").await.unwrap();
        tasks.push(tokio::task::spawn_blocking(move || {
            // Pre-fill with junk so a missed byte would show.
            let mut raw = vec![(i as u8) | 0x80; size];
            let n = handle
                .read(ReadRequest::new(size), &mut UserBuffer::new(&mut raw))
                .unwrap();
            (size, n, raw)
        }));
    }

    for task in tasks {
        let (size, n, raw) = task.await.unwrap();
        assert_eq!(n, size);
        assert_eq!(raw.len(), size);
        assert!(raw.iter().all(|b| *b == 0));
    }

    device.stop().await.unwrap();
}

/// Per-call errors stay with the caller and the device keeps serving.
#[tokio::test]
async fn test_read_errors_do_not_affect_the_device() {
    let (client, _registry) = spawn_registry();
    let mut device = DeviceLifecycle::new(client.clone());
    device.start(&DeviceConfig::new("zeroA")).await.unwrap();

    let handle = client.open("zeroA").await.unwrap();
    assert!(matches!(
        handle.read_to_vec(usize::MAX),
        Err(ReadError::OutOfMemory { .. })
    ));

    let mut small = [1u8; 4];
    assert!(matches!(
        handle.read(ReadRequest::new(5), &mut UserBuffer::new(&mut small)),
        Err(ReadError::TransferFault(_))
    ));

    assert_eq!(handle.read_to_vec(5).unwrap(), vec![0; 5]);
    assert!(client.resolve("zeroA").await.unwrap().is_some());
    device.stop().await.unwrap();
}
