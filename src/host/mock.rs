//! # Mock Host & Testing Guide
//!
//! [`MockHost`] implements [`DeviceHost`] from a script of expectations. Each
//! call pops the next expectation off the queue; a call that does not match
//! it panics, so a test that scripts the exact sequence also proves the
//! order. [`MockHost::verify`] checks that nothing scripted was left over,
//! which is how a test proves that an unwinding step ran exactly once.
//!
//! | Feature | MockHost | HostRegistry |
//! |---------|----------|--------------|
//! | **Determinism** | Fully scripted | Real tables |
//! | **Error Injection** | Easy (`return_err`) | Needs a crafted state |
//! | **Use Case** | Ordering and unwinding of the lifecycle | Discovery, reuse, concurrent reads |
//!
//! ```rust
//! use zero_device::host::mock::MockHost;
//! use zero_device::host::{DeviceHost, DeviceNumber, HostError};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockHost::new();
//!     mock.expect_reserve().return_ok(DeviceNumber::new(250, 0));
//!     mock.expect_release().return_err(HostError::Refused("busy".into()));
//!
//!     let number = mock.reserve_region("zero").await.unwrap();
//!     assert!(mock.release_region(number).await.is_err());
//!     mock.verify();
//! }
//! ```

use crate::host::{DeviceHost, DeviceNumber, HostError, ReadHandler};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex};

/// The host operations a [`MockHost`] can be scripted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostOp {
    Reserve,
    Release,
    Bind,
    Unbind,
    CreateClass,
    DestroyClass,
    Publish,
    Unpublish,
}

impl fmt::Display for HostOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

enum Expectation {
    Reserve(Result<DeviceNumber, HostError>),
    Unit(HostOp, Result<(), HostError>),
}

type Queue = Arc<Mutex<VecDeque<Expectation>>>;

/// One call made against a [`MockHost`], with the arguments it carried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    Reserve { label: String },
    Release { number: DeviceNumber },
    Bind { number: DeviceNumber },
    Unbind { number: DeviceNumber },
    CreateClass { class: String },
    DestroyClass { class: String },
    Publish { class: String, name: String, number: DeviceNumber },
    Unpublish { class: String, number: DeviceNumber },
}

impl HostCall {
    pub fn op(&self) -> HostOp {
        match self {
            HostCall::Reserve { .. } => HostOp::Reserve,
            HostCall::Release { .. } => HostOp::Release,
            HostCall::Bind { .. } => HostOp::Bind,
            HostCall::Unbind { .. } => HostOp::Unbind,
            HostCall::CreateClass { .. } => HostOp::CreateClass,
            HostCall::DestroyClass { .. } => HostOp::DestroyClass,
            HostCall::Publish { .. } => HostOp::Publish,
            HostCall::Unpublish { .. } => HostOp::Unpublish,
        }
    }
}

/// A scripted host.
///
/// Every call is also recorded, in order, and can be read back with
/// [`MockHost::calls`] (operations only) or [`MockHost::call_log`]
/// (operations with their arguments).
#[derive(Clone, Default)]
pub struct MockHost {
    expectations: Queue,
    calls: Arc<Mutex<Vec<HostCall>>>,
}

impl MockHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expect_reserve(&self) -> ReserveExpectationBuilder {
        ReserveExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    pub fn expect_release(&self) -> ExpectationBuilder {
        self.expect(HostOp::Release)
    }

    pub fn expect_bind(&self) -> ExpectationBuilder {
        self.expect(HostOp::Bind)
    }

    pub fn expect_unbind(&self) -> ExpectationBuilder {
        self.expect(HostOp::Unbind)
    }

    pub fn expect_create_class(&self) -> ExpectationBuilder {
        self.expect(HostOp::CreateClass)
    }

    pub fn expect_destroy_class(&self) -> ExpectationBuilder {
        self.expect(HostOp::DestroyClass)
    }

    pub fn expect_publish(&self) -> ExpectationBuilder {
        self.expect(HostOp::Publish)
    }

    pub fn expect_unpublish(&self) -> ExpectationBuilder {
        self.expect(HostOp::Unpublish)
    }

    fn expect(&self, op: HostOp) -> ExpectationBuilder {
        ExpectationBuilder {
            op,
            expectations: self.expectations.clone(),
        }
    }

    /// Scripts a full successful registration followed by a full teardown.
    pub fn expect_full_cycle(&self, number: DeviceNumber) {
        self.expect_reserve().return_ok(number);
        self.expect_bind().return_ok();
        self.expect_create_class().return_ok();
        self.expect_publish().return_ok();
        self.expect_unpublish().return_ok();
        self.expect_destroy_class().return_ok();
        self.expect_unbind().return_ok();
        self.expect_release().return_ok();
    }

    /// Every host operation made so far, in order.
    pub fn calls(&self) -> Vec<HostOp> {
        self.calls.lock().unwrap().iter().map(HostCall::op).collect()
    }

    /// Every host call made so far, in order, with its arguments.
    pub fn call_log(&self) -> Vec<HostCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!(
                "Not all expectations were met. {} remaining (calls made: {:?})",
                exps.len(),
                self.calls()
            );
        }
    }

    fn next(&self, call: HostCall) -> Expectation {
        let op = call.op();
        self.calls.lock().unwrap().push(call);
        let next = self.expectations.lock().unwrap().pop_front();
        match next {
            Some(exp) => exp,
            None => panic!("Unexpected {op} call: no expectations left"),
        }
    }

    fn answer_unit(&self, call: HostCall) -> Result<(), HostError> {
        let op = call.op();
        match self.next(call) {
            Expectation::Unit(expected, response) if expected == op => response,
            Expectation::Unit(expected, _) => {
                panic!("Expected {expected} call, got {op}")
            }
            Expectation::Reserve(_) => panic!("Expected Reserve call, got {op}"),
        }
    }
}

#[async_trait]
impl DeviceHost for MockHost {
    async fn reserve_region(&self, label: &str) -> Result<DeviceNumber, HostError> {
        let call = HostCall::Reserve {
            label: label.to_string(),
        };
        match self.next(call) {
            Expectation::Reserve(response) => response,
            Expectation::Unit(expected, _) => panic!("Expected {expected} call, got Reserve"),
        }
    }

    async fn release_region(&self, number: DeviceNumber) -> Result<(), HostError> {
        self.answer_unit(HostCall::Release { number })
    }

    async fn bind_handler(
        &self,
        number: DeviceNumber,
        _handler: Arc<dyn ReadHandler>,
    ) -> Result<(), HostError> {
        self.answer_unit(HostCall::Bind { number })
    }

    async fn unbind_handler(&self, number: DeviceNumber) -> Result<(), HostError> {
        self.answer_unit(HostCall::Unbind { number })
    }

    async fn create_class(&self, class: &str) -> Result<(), HostError> {
        self.answer_unit(HostCall::CreateClass {
            class: class.to_string(),
        })
    }

    async fn destroy_class(&self, class: &str) -> Result<(), HostError> {
        self.answer_unit(HostCall::DestroyClass {
            class: class.to_string(),
        })
    }

    async fn publish_node(
        &self,
        class: &str,
        name: &str,
        number: DeviceNumber,
    ) -> Result<(), HostError> {
        self.answer_unit(HostCall::Publish {
            class: class.to_string(),
            name: name.to_string(),
            number,
        })
    }

    async fn unpublish_node(&self, class: &str, number: DeviceNumber) -> Result<(), HostError> {
        self.answer_unit(HostCall::Unpublish {
            class: class.to_string(),
            number,
        })
    }
}

/// Builder for `reserve_region` expectations.
pub struct ReserveExpectationBuilder {
    expectations: Queue,
}

impl ReserveExpectationBuilder {
    pub fn return_ok(self, number: DeviceNumber) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Reserve(Ok(number)));
    }

    pub fn return_err(self, error: HostError) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Reserve(Err(error)));
    }
}

/// Builder for every expectation that answers with `()`.
pub struct ExpectationBuilder {
    op: HostOp,
    expectations: Queue,
}

impl ExpectationBuilder {
    pub fn return_ok(self) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Unit(self.op, Ok(())));
    }

    pub fn return_err(self, error: HostError) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Unit(self.op, Err(error)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_answers_in_order() {
        let mock = MockHost::new();
        let number = DeviceNumber::new(254, 0);
        mock.expect_reserve().return_ok(number);
        mock.expect_create_class().return_err(HostError::ClassExists("cls".into()));

        assert_eq!(mock.reserve_region("zero").await, Ok(number));
        assert_eq!(
            mock.create_class("cls").await,
            Err(HostError::ClassExists("cls".into()))
        );
        assert_eq!(mock.calls(), vec![HostOp::Reserve, HostOp::CreateClass]);
        assert_eq!(
            mock.call_log(),
            vec![
                HostCall::Reserve {
                    label: "zero".into()
                },
                HostCall::CreateClass {
                    class: "cls".into()
                },
            ]
        );
        mock.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "Expected Bind call, got Publish")]
    async fn test_mock_rejects_out_of_order_call() {
        let mock = MockHost::new();
        mock.expect_bind().return_ok();
        let _ = mock.publish_node("cls", "zero", DeviceNumber::new(254, 0)).await;
    }

    #[test]
    #[should_panic(expected = "Not all expectations were met")]
    fn test_verify_catches_leftovers() {
        let mock = MockHost::new();
        mock.expect_release().return_ok();
        mock.verify();
    }
}
