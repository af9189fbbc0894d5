use zero_device::config::DeviceConfig;
use zero_device::host::mock::{HostCall, HostOp, MockHost};
use zero_device::host::{DeviceNumber, HostError};
use zero_device::lifecycle::{DeviceLifecycle, LifecycleState, RegistrationStep, SetupError};

const NUMBER: DeviceNumber = DeviceNumber::new(254, 0);

/// Missing and empty names fail before the host is touched at all.
#[tokio::test]
async fn test_invalid_configuration_touches_nothing() {
    let mock = MockHost::new();
    let mut device = DeviceLifecycle::new(mock.clone());

    let err = device.start(&DeviceConfig::default()).await.unwrap_err();
    assert!(matches!(err, SetupError::InvalidConfiguration(_)));

    let err = device.start(&DeviceConfig::new("")).await.unwrap_err();
    assert!(matches!(err, SetupError::InvalidConfiguration(_)));

    assert!(mock.calls().is_empty());
    assert_eq!(device.state(), LifecycleState::Uninitialized);
}

#[tokio::test]
async fn test_reservation_failure_leaves_nothing_to_unwind() {
    let mock = MockHost::new();
    mock.expect_reserve().return_err(HostError::NumbersExhausted {
        first: 234,
        last: 254,
    });

    let mut device = DeviceLifecycle::new(mock.clone());
    let err = device.start(&DeviceConfig::new("zeroA")).await.unwrap_err();

    assert!(matches!(
        err,
        SetupError::IdentityReservationFailed(HostError::NumbersExhausted { .. })
    ));
    assert_eq!(mock.calls(), vec![HostOp::Reserve]);
    mock.verify();
}

/// Binding fails: the reserved region is released exactly once.
#[tokio::test]
async fn test_binding_failure_releases_identity_once() {
    let mock = MockHost::new();
    mock.expect_reserve().return_ok(NUMBER);
    mock.expect_bind().return_err(HostError::AlreadyBound(NUMBER));
    mock.expect_release().return_ok();

    let mut device = DeviceLifecycle::new(mock.clone());
    let err = device.start(&DeviceConfig::new("zeroA")).await.unwrap_err();

    assert!(matches!(
        err,
        SetupError::HandlerBindingFailed(HostError::AlreadyBound(_))
    ));
    assert_eq!(
        mock.calls(),
        vec![HostOp::Reserve, HostOp::Bind, HostOp::Release]
    );
    assert_eq!(
        mock.call_log().last(),
        Some(&HostCall::Release { number: NUMBER })
    );
    assert_eq!(device.state(), LifecycleState::Uninitialized);
    mock.verify();
}

/// Class creation fails: binding then identity are unwound, in that order.
#[tokio::test]
async fn test_class_failure_unwinds_binding_then_identity() {
    let mock = MockHost::new();
    mock.expect_reserve().return_ok(NUMBER);
    mock.expect_bind().return_ok();
    mock.expect_create_class().return_err(HostError::ClassExists("zero_device_class".into()));
    mock.expect_unbind().return_ok();
    mock.expect_release().return_ok();

    let mut device = DeviceLifecycle::new(mock.clone());
    let err = device.start(&DeviceConfig::new("zeroA")).await.unwrap_err();

    assert!(matches!(err, SetupError::PublicationFailed(HostError::ClassExists(_))));
    assert_eq!(
        mock.calls(),
        vec![
            HostOp::Reserve,
            HostOp::Bind,
            HostOp::CreateClass,
            HostOp::Unbind,
            HostOp::Release,
        ]
    );
    assert_eq!(
        mock.call_log()[3..],
        [
            HostCall::Unbind { number: NUMBER },
            HostCall::Release { number: NUMBER },
        ]
    );
    mock.verify();
}

/// Publication fails: class, binding and identity are unwound in reverse.
#[tokio::test]
async fn test_publication_failure_unwinds_everything_in_reverse() {
    let mock = MockHost::new();
    mock.expect_reserve().return_ok(NUMBER);
    mock.expect_bind().return_ok();
    mock.expect_create_class().return_ok();
    mock.expect_publish().return_err(HostError::NameTaken("zeroA".into()));
    mock.expect_destroy_class().return_ok();
    mock.expect_unbind().return_ok();
    mock.expect_release().return_ok();

    let mut device = DeviceLifecycle::new(mock.clone());
    let err = device.start(&DeviceConfig::new("zeroA")).await.unwrap_err();

    assert!(matches!(err, SetupError::PublicationFailed(HostError::NameTaken(_))));
    assert_eq!(
        mock.calls(),
        vec![
            HostOp::Reserve,
            HostOp::Bind,
            HostOp::CreateClass,
            HostOp::Publish,
            HostOp::DestroyClass,
            HostOp::Unbind,
            HostOp::Release,
        ]
    );
    assert_eq!(
        mock.call_log()[4..],
        [
            HostCall::DestroyClass {
                class: "zero_device_class".into()
            },
            HostCall::Unbind { number: NUMBER },
            HostCall::Release { number: NUMBER },
        ]
    );
    assert_eq!(device.state(), LifecycleState::Uninitialized);
    mock.verify();
}

/// A failing unwind step does not stop the remaining ones, and the original
/// setup error is what the caller sees.
#[tokio::test]
async fn test_unwind_continues_past_a_failing_step() {
    let mock = MockHost::new();
    mock.expect_reserve().return_ok(NUMBER);
    mock.expect_bind().return_ok();
    mock.expect_create_class().return_ok();
    mock.expect_publish().return_err(HostError::Refused("no".into()));
    mock.expect_destroy_class().return_err(HostError::ClassNotFound("zero_device_class".into()));
    mock.expect_unbind().return_ok();
    mock.expect_release().return_ok();

    let mut device = DeviceLifecycle::new(mock.clone());
    let err = device.start(&DeviceConfig::new("zeroA")).await.unwrap_err();

    assert!(matches!(err, SetupError::PublicationFailed(HostError::Refused(_))));
    mock.verify();
}

/// Teardown attempts every step and reports each failure.
#[tokio::test]
async fn test_stop_is_best_effort_and_reports_failures() {
    let mock = MockHost::new();
    mock.expect_reserve().return_ok(NUMBER);
    mock.expect_bind().return_ok();
    mock.expect_create_class().return_ok();
    mock.expect_publish().return_ok();
    mock.expect_unpublish().return_err(HostError::NotPublished(NUMBER));
    mock.expect_destroy_class().return_ok();
    mock.expect_unbind().return_err(HostError::NotBound(NUMBER));
    mock.expect_release().return_ok();

    let mut device = DeviceLifecycle::new(mock.clone());
    device.start(&DeviceConfig::new("zeroA")).await.unwrap();

    let err = device.stop().await.unwrap_err();
    let failed: Vec<_> = err.failures.iter().map(|f| f.step).collect();
    assert_eq!(
        failed,
        vec![RegistrationStep::PublishNode, RegistrationStep::BindHandler]
    );
    assert_eq!(device.state(), LifecycleState::Uninitialized);
    mock.verify();

    // Already torn down: a second stop does nothing.
    device.stop().await.unwrap();
    assert_eq!(mock.calls().len(), 8);
}

/// The configured name and class reach every host call that takes them.
#[tokio::test]
async fn test_custom_class_name_is_used() {
    let mock = MockHost::new();
    mock.expect_full_cycle(NUMBER);

    let mut device = DeviceLifecycle::new(mock.clone());
    device
        .start(&DeviceConfig::new("zeroA").with_class("custom_class"))
        .await
        .unwrap();
    device.stop().await.unwrap();

    let class = || "custom_class".to_string();
    assert_eq!(
        mock.call_log(),
        vec![
            HostCall::Reserve {
                label: "zeroA".into()
            },
            HostCall::Bind { number: NUMBER },
            HostCall::CreateClass { class: class() },
            HostCall::Publish {
                class: class(),
                name: "zeroA".into(),
                number: NUMBER,
            },
            HostCall::Unpublish {
                class: class(),
                number: NUMBER,
            },
            HostCall::DestroyClass { class: class() },
            HostCall::Unbind { number: NUMBER },
            HostCall::Release { number: NUMBER },
        ]
    );
    mock.verify();
}
