// Test code uses unwrap/expect for clarity - panics provide good test failure messages
#![allow(clippy::unwrap_used, clippy::expect_used)]

//! End-to-end scenarios: embedded programs run against the built-in
//! capabilities through the public API.
//!
//! # Organization
//!
//! - `common` - host functions shared by the scenarios
//! - `collections` - List, Maybe and Either composition
//! - `state` - state threading
//! - `lazy` - lazy sequences (Fibonacci, counters)
//! - `coroutine` - stepping and racing coroutines
//! - `contract` - capability invariants, reserved names, deep chains
//!
//! ```bash
//! cargo test -p monadic --test scenarios
//! RUST_LOG=monadic_eval=trace cargo test -p monadic --test scenarios coroutine
//! ```

#[path = "scenarios/common.rs"]
mod common;

#[path = "scenarios/collections.rs"]
mod collections;

#[path = "scenarios/state.rs"]
mod state;

#[path = "scenarios/lazy.rs"]
mod lazy;

#[path = "scenarios/coroutine.rs"]
mod coroutine;

#[path = "scenarios/contract.rs"]
mod contract;
