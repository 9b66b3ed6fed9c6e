// SPDX-License-Identifier: MIT OR Apache-2.0

use grouper_core::{GroupId, MemberId, ScopeId};

/// Optional collaborator notified when reconciliation moves a member
/// between managed groups.
///
/// Hosts register one on the [`crate::Manager`] to repoint scope-specific
/// cross-references (a discussion-forum group pointer, say) from the group
/// a member just left to the group that now holds them. Reconciliation is
/// complete without it.
pub trait MoveHook {
    fn membership_moved(&mut self, scope: ScopeId, member: MemberId, from: GroupId, to: GroupId);
}
