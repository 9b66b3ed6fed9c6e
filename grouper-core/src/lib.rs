// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared data types for the `grouper` membership reconciliation engine.
//!
//! Everything in this crate is plain data: identifiers, the provenance
//! label format of managed groups, read-only member snapshots, the record
//! types persisted through `grouper-store` and the classifier
//! configuration consumed by `grouper-engine`. No I/O happens here.

pub mod classifier;
pub mod identity;
pub mod label;
pub mod member;
pub mod provenance;
pub mod record;

pub use classifier::{ClassifierConfig, ClassifierKind, Delimiter};
pub use identity::{GroupId, MemberId, RoleId, RuleSetId, ScopeId};
pub use label::{GroupLabel, LabelError, LABEL_NAMESPACE};
pub use member::MemberSnapshot;
pub use provenance::Provenance;
pub use record::{GroupRecord, ManualAssignment, RuleSetRecord};
