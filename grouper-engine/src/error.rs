// SPDX-License-Identifier: MIT OR Apache-2.0

use grouper_core::{GroupId, LabelError, MemberId, RuleSetId, ScopeId};
use grouper_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// A member reference could not be resolved through the roster.
    /// Aborts the single reconciliation unit it occurred in, never a whole
    /// fan-out.
    #[error("member {0} is unknown to the roster")]
    InvalidMember(MemberId),

    /// A scope reference could not be resolved through the roster.
    #[error("scope {0} is unknown to the roster")]
    InvalidScope(ScopeId),

    /// A group reference did not resolve to a stored group.
    #[error("group {0} does not exist")]
    InvalidGroup(GroupId),

    #[error("rule set {0} does not exist")]
    UnknownRuleSet(RuleSetId),

    /// The current design allows at most one rule set per scope.
    #[error("scope {0} already has a rule set")]
    RuleSetExists(ScopeId),

    /// A classifier configuration failed validation against the module's
    /// declared option set. Raised by administrative operations only; a
    /// persisted config that turns invalid later classifies nothing
    /// instead.
    #[error("invalid classifier configuration: field {0:?} is not an available option")]
    InvalidClassifierConfig(String),

    #[error(transparent)]
    Label(#[from] LabelError),

    /// Persistence failure, propagated to the trigger caller. The engine
    /// performs no internal retry; redelivery belongs to the trigger
    /// collaborator.
    #[error(transparent)]
    Store(#[from] StoreError),
}
