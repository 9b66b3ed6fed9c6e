// SPDX-License-Identifier: MIT OR Apache-2.0

use grouper_core::{MemberId, MemberSnapshot, RoleId, ScopeId};

/// The host's enrolment relation and attribute sources.
///
/// The engine never owns members or scopes; everything it knows about who
/// participates where, with which roles and which attributes, flows
/// through this trait. All lookups are read-only snapshots taken at the
/// start of the reconciliation unit that needs them.
pub trait Roster {
    /// Whether the scope exists at all. Used to reject administrative
    /// operations against dangling scope ids.
    fn scope_exists(&self, scope: ScopeId) -> bool;

    /// Members currently eligible to participate in a scope.
    fn members_of(&self, scope: ScopeId) -> Vec<MemberId>;

    /// Scopes a member participates in.
    fn scopes_of(&self, member: MemberId) -> Vec<ScopeId>;

    /// Roles a member holds within a scope.
    fn roles(&self, scope: ScopeId, member: MemberId) -> Vec<RoleId>;

    /// The member's current attribute snapshot, or `None` for a member
    /// the roster does not know.
    fn snapshot(&self, member: MemberId) -> Option<MemberSnapshot>;
}
