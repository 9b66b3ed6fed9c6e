// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistence boundary of the `grouper` engine.
//!
//! One trait per record kind, all synchronous: a reconciliation pass is a
//! finite sequence of data-store calls driven by an external trigger, and
//! correctness under concurrent triggers relies on idempotent mutations
//! plus the one uniqueness guarantee implementations must provide:
//! (scope, label) is unique among groups.
//!
//! [`MemoryStore`] implements all four traits and is both the reference
//! for implementors and the backend every engine test runs against.

mod memory;
pub mod traits;

pub use memory::MemoryStore;
pub use traits::{
    GroupStore, ManualAssignmentStore, MembershipStore, RuleSetStore, Store, StoreError,
};
