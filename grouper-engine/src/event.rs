// SPDX-License-Identifier: MIT OR Apache-2.0

use grouper_core::{GroupId, MemberId, Provenance, RoleId, ScopeId};
use serde::{Deserialize, Serialize};

/// Trigger kinds delivered by the host's event mechanism.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    /// A member was enrolled or granted a role in a scope.
    RoleAssigned {
        /// Scope the role was granted in.
        scope: ScopeId,

        /// Member the role was granted to.
        member: MemberId,
    },
    /// A membership was added through a path other than this engine.
    MembershipAdded {
        /// Group the member was added to.
        group: GroupId,

        /// Member that was added.
        member: MemberId,
    },
    /// A membership was removed through a path other than this engine.
    MembershipRemoved {
        /// Group the member was removed from.
        group: GroupId,

        /// Member that was removed.
        member: MemberId,
    },
    /// A member's attributes changed. Scope-agnostic.
    ProfileUpdated {
        /// Member whose attributes changed.
        member: MemberId,
    },
    /// A group was created or renamed outside this engine.
    GroupChanged {
        /// Group that changed.
        group: GroupId,
    },
    /// A group was deleted.
    GroupDeleted {
        /// Group that was deleted.
        group: GroupId,
    },
    /// A role definition was deleted.
    RoleDeleted {
        /// Role that was deleted.
        role: RoleId,
    },
    /// A scope was created, or restored from an archive.
    ScopeCreated {
        /// The new scope.
        scope: ScopeId,

        /// Whether the scope was restored rather than freshly created.
        restored: bool,
    },
}

/// An inbound trigger with the provenance of the mutation that caused it.
///
/// Events echoing the engine's own writes carry [`Provenance::engine`] and
/// are dropped at dispatch, so reconciliation can never re-trigger itself.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TriggerEvent {
    pub trigger: Trigger,

    /// Origin of the mutation this event reports, when the host knows it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provenance: Option<Provenance>,
}

impl TriggerEvent {
    /// An event with no known origin, treated as external.
    pub fn external(trigger: Trigger) -> Self {
        Self {
            trigger,
            provenance: None,
        }
    }

    pub fn with_provenance(trigger: Trigger, provenance: Provenance) -> Self {
        Self {
            trigger,
            provenance: Some(provenance),
        }
    }

    /// Whether this event reports one of the engine's own mutations.
    pub fn is_self_triggered(&self) -> bool {
        self.provenance
            .as_ref()
            .is_some_and(Provenance::is_engine)
    }
}
