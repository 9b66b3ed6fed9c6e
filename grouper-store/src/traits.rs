// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::BTreeSet;

use grouper_core::{
    ClassifierConfig, GroupId, GroupRecord, ManualAssignment, MemberId, Provenance, RoleId,
    RuleSetId, RuleSetRecord, ScopeId,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The (scope, label) uniqueness constraint was hit on insert.
    ///
    /// Callers racing on group creation are expected to treat this as
    /// "someone else won", re-read and adopt the existing row.
    #[error("a group labeled {label:?} already exists in scope {scope}")]
    LabelExists { scope: ScopeId, label: String },

    /// An update or delete referenced a record that is not in the store.
    #[error("{0} record with id {1} not found")]
    NotFound(&'static str, u64),

    /// Failure of the underlying persistence technology.
    #[error("storage backend error: {0}")]
    Backend(String),
}

pub trait RuleSetStore {
    /// Insert a rule set, assigning its identity.
    fn insert_rule_set(
        &mut self,
        scope: ScopeId,
        config: ClassifierConfig,
        eligible_roles: BTreeSet<RoleId>,
    ) -> Result<RuleSetRecord, StoreError>;

    fn rule_set(&self, id: RuleSetId) -> Result<Option<RuleSetRecord>, StoreError>;

    fn rule_sets_in_scope(&self, scope: ScopeId) -> Result<Vec<RuleSetRecord>, StoreError>;

    fn all_rule_sets(&self) -> Result<Vec<RuleSetRecord>, StoreError>;

    fn update_rule_set(&mut self, record: &RuleSetRecord) -> Result<(), StoreError>;

    /// Delete a rule set.
    ///
    /// Returns `true` when the removal occurred and `false` when the rule
    /// set was not found in the store.
    fn delete_rule_set(&mut self, id: RuleSetId) -> Result<bool, StoreError>;
}

pub trait GroupStore {
    /// Insert a group, assigning its identity.
    ///
    /// Implementations must enforce (scope, label) uniqueness for labeled
    /// groups and report a conflict as [`StoreError::LabelExists`].
    fn insert_group(
        &mut self,
        scope: ScopeId,
        label: Option<&str>,
        name: &str,
    ) -> Result<GroupRecord, StoreError>;

    fn group(&self, id: GroupId) -> Result<Option<GroupRecord>, StoreError>;

    fn group_by_label(
        &self,
        scope: ScopeId,
        label: &str,
    ) -> Result<Option<GroupRecord>, StoreError>;

    fn groups_in_scope(&self, scope: ScopeId) -> Result<Vec<GroupRecord>, StoreError>;

    fn update_group(&mut self, record: &GroupRecord) -> Result<(), StoreError>;

    /// Delete a group and its membership rows.
    ///
    /// Returns `true` when the removal occurred and `false` when the group
    /// was not found in the store.
    fn delete_group(&mut self, id: GroupId) -> Result<bool, StoreError>;
}

pub trait MembershipStore {
    /// Add a member to a group.
    ///
    /// Returns `true` when the insert occurred, or `false` when the
    /// membership already existed and no insertion occurred.
    fn add_member(
        &mut self,
        group: GroupId,
        member: MemberId,
        provenance: &Provenance,
    ) -> Result<bool, StoreError>;

    /// Remove a member from a group.
    ///
    /// Returns `true` when the removal occurred and `false` when the
    /// membership was not present.
    fn remove_member(
        &mut self,
        group: GroupId,
        member: MemberId,
        provenance: &Provenance,
    ) -> Result<bool, StoreError>;

    fn is_member(&self, group: GroupId, member: MemberId) -> Result<bool, StoreError>;

    fn members(&self, group: GroupId) -> Result<Vec<MemberId>, StoreError>;

    fn member_count(&self, group: GroupId) -> Result<usize, StoreError>;
}

pub trait ManualAssignmentStore {
    /// Record a manual assignment.
    ///
    /// Returns `true` when the record was created, `false` when it already
    /// existed.
    fn record_manual(&mut self, member: MemberId, group: GroupId) -> Result<bool, StoreError>;

    /// Clear a manual assignment.
    ///
    /// Returns `true` when a record was removed.
    fn clear_manual(&mut self, member: MemberId, group: GroupId) -> Result<bool, StoreError>;

    fn is_manual(&self, member: MemberId, group: GroupId) -> Result<bool, StoreError>;

    /// Manual assignments recorded against a group.
    fn manual_for_group(&self, group: GroupId) -> Result<Vec<ManualAssignment>, StoreError>;

    /// Drop every manual assignment referencing a group. Returns how many
    /// records were removed.
    fn purge_manual_for_group(&mut self, group: GroupId) -> Result<usize, StoreError>;
}

/// Everything a reconciliation pass needs from persistence.
pub trait Store: RuleSetStore + GroupStore + MembershipStore + ManualAssignmentStore {}

impl<T> Store for T where T: RuleSetStore + GroupStore + MembershipStore + ManualAssignmentStore {}
