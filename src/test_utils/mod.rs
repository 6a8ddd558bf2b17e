//! Test utilities for integration testing.
//!
//! This module provides:
//! - Test data factories for creating valid test fixtures
//! - In-memory repository implementations for mocking persistence
//! - A builder for constructing `AppState` with test dependencies

mod app_state_builder;
mod factories;
mod mocks;

pub use app_state_builder::*;
pub use factories::*;
pub use mocks::*;

/// Give fire-and-forget tasks spawned by the code under test a chance to
/// run to completion on the test runtime.
pub async fn drain_background_tasks() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}
