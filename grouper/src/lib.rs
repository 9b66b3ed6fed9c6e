// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rule-driven group membership reconciliation.
//!
//! For every managed scope, each member belongs to exactly the groups
//! implied by applying the scope's classification rules to the member's
//! attributes; manual assignments are preserved, empty managed groups are
//! collected, and every pass is idempotent under concurrent triggers.
//!
//! This crate re-exports the workspace parts:
//!
//! - [`core`]: identifiers, labels, records and other shared data types.
//! - [`store`]: the persistence boundary and an in-memory store.
//! - [`engine`]: classifiers, the reconciliation algorithm and the
//!   trigger-driven [`Manager`](engine::Manager).

pub use grouper_core as core;
pub use grouper_engine as engine;
pub use grouper_store as store;

pub use grouper_engine::{EngineConfig, EngineError, Manager, Trigger, TriggerEvent};
pub use grouper_store::MemoryStore;
