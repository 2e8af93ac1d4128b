//! Integration tests for Store action broadcasting
//!
//! Renderers observe a store by subscribing to the actions its effects
//! produce; these tests pin down what is (and is not) broadcast.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use marquee_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
use marquee_runtime::{Store, StoreConfig, StoreError};
use std::time::Duration;

// ============================================================================
// Test Fixtures
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
enum TestAction {
    /// Start a three-step load with a request id
    StartLoad { id: u64 },
    /// One step of the load finished
    StepCompleted { id: u64, step: u32 },
    /// Load finished (terminal action)
    LoadCompleted { id: u64 },
    /// Command that never produces a terminal action
    Stall,
    /// Simple increment command
    Increment,
    /// Incremented event
    Incremented { value: u32 },
}

#[derive(Debug, Clone, Default)]
struct TestState {
    counter: u32,
    steps: Vec<u32>,
}

#[derive(Clone)]
struct TestEnvironment;

#[derive(Clone)]
struct TestReducer;

impl Reducer for TestReducer {
    type State = TestState;
    type Action = TestAction;
    type Environment = TestEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            TestAction::StartLoad { id } => {
                state.steps.clear();
                smallvec![Effect::Future(Box::pin(async move {
                    tokio::time::sleep(Duration::from_millis(5)).await;
                    Some(TestAction::StepCompleted { id, step: 1 })
                }))]
            },
            TestAction::StepCompleted { id, step } => {
                state.steps.push(step);
                if step < 3 {
                    smallvec![Effect::Future(Box::pin(async move {
                        tokio::time::sleep(Duration::from_millis(5)).await;
                        Some(TestAction::StepCompleted { id, step: step + 1 })
                    }))]
                } else {
                    smallvec![Effect::Future(Box::pin(async move {
                        Some(TestAction::LoadCompleted { id })
                    }))]
                }
            },
            TestAction::LoadCompleted { .. } | TestAction::Stall | TestAction::Incremented { .. } => {
                smallvec![Effect::None]
            },
            TestAction::Increment => {
                state.counter += 1;
                let value = state.counter;
                smallvec![Effect::Future(Box::pin(async move {
                    Some(TestAction::Incremented { value })
                }))]
            },
        }
    }
}

fn new_store() -> Store<TestState, TestAction, TestEnvironment, TestReducer> {
    Store::new(TestState::default(), TestReducer, TestEnvironment)
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_send_and_wait_for_immediate() {
    let store = new_store();

    let result = store
        .send_and_wait_for(
            TestAction::Increment,
            |a| matches!(a, TestAction::Incremented { .. }),
            Duration::from_secs(1),
        )
        .await
        .unwrap();

    assert_eq!(result, TestAction::Incremented { value: 1 });
}

#[tokio::test]
async fn test_send_and_wait_for_multi_step() {
    let store = new_store();

    let result = store
        .send_and_wait_for(
            TestAction::StartLoad { id: 7 },
            |a| matches!(a, TestAction::LoadCompleted { .. }),
            Duration::from_secs(1),
        )
        .await
        .unwrap();

    assert_eq!(result, TestAction::LoadCompleted { id: 7 });
    assert_eq!(store.state(|s| s.steps.clone()).await, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_send_and_wait_for_timeout() {
    let store = new_store();

    let result = store
        .send_and_wait_for(
            TestAction::Stall,
            |a| matches!(a, TestAction::LoadCompleted { .. }),
            Duration::from_millis(20),
        )
        .await;

    assert_eq!(result, Err(StoreError::Timeout));
}

#[tokio::test]
async fn test_subscriber_sees_effect_actions_only() {
    let store = new_store();
    let mut rx = store.subscribe_actions();

    let mut handle = store.send(TestAction::Increment).await.unwrap();
    handle
        .wait_with_timeout(Duration::from_secs(1))
        .await
        .unwrap();

    // The Increment command itself is not broadcast, its result is.
    assert_eq!(rx.recv().await.unwrap(), TestAction::Incremented { value: 1 });
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_multiple_subscribers_receive_same_actions() {
    let store = new_store();
    let mut first = store.subscribe_actions();
    let mut second = store.subscribe_actions();

    let mut handle = store.send(TestAction::Increment).await.unwrap();
    handle
        .wait_with_timeout(Duration::from_secs(1))
        .await
        .unwrap();

    assert_eq!(first.recv().await.unwrap(), TestAction::Incremented { value: 1 });
    assert_eq!(second.recv().await.unwrap(), TestAction::Incremented { value: 1 });
}

#[tokio::test]
async fn test_slow_subscriber_lags() {
    let config = StoreConfig::default().with_broadcast_capacity(2);
    let store = Store::with_config(TestState::default(), TestReducer, TestEnvironment, config);
    let mut rx = store.subscribe_actions();

    for _ in 0..5 {
        let mut handle = store.send(TestAction::Increment).await.unwrap();
        handle
            .wait_with_timeout(Duration::from_secs(1))
            .await
            .unwrap();
    }

    assert!(matches!(
        rx.recv().await,
        Err(tokio::sync::broadcast::error::RecvError::Lagged(_))
    ));
    assert_eq!(store.state(|s| s.counter).await, 5);
}
