// SPDX-License-Identifier: MIT OR Apache-2.0

//! Managed group lifecycle.
//!
//! All mutations here are idempotent: triggers arrive at-least-once and
//! possibly concurrently, so every operation reads current state
//! immediately before mutating and treats "already done" as success.

use grouper_core::label;
use grouper_core::{GroupId, GroupLabel, GroupRecord, MemberId, Provenance, RuleSetRecord};
use grouper_store::{
    GroupStore, ManualAssignmentStore, MembershipStore, RuleSetStore, Store, StoreError,
};
use tracing::debug;

use crate::error::EngineError;

/// What a population or revalidation check did to a group.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PopulationOutcome {
    Kept,
    Removed,
    Disassociated,
}

/// Find the managed group for a classification value under a rule set,
/// creating it on first demand.
///
/// The label is the uniqueness key: a concurrent creator losing the race
/// on (scope, label) adopts the row the winner persisted. A display name
/// that drifted from the freshly computed one (after a config change,
/// say) is refreshed in passing.
pub fn find_or_create<S>(
    store: &mut S,
    rule_set: &RuleSetRecord,
    raw_value: &str,
) -> Result<GroupRecord, EngineError>
where
    S: GroupStore,
{
    let encoded = GroupLabel::new(rule_set.id, raw_value)?.encode();
    let name = label::display_name(raw_value);

    if let Some(mut group) = store.group_by_label(rule_set.scope, &encoded)? {
        if group.name != name {
            group.name = name;
            store.update_group(&group)?;
        }
        return Ok(group);
    }

    match store.insert_group(rule_set.scope, Some(&encoded), &name) {
        Ok(group) => {
            debug!(group = %group.id, label = %encoded, "created managed group");
            Ok(group)
        }
        // Lost a creation race; the row exists now, adopt it.
        Err(StoreError::LabelExists { .. }) => {
            store.group_by_label(rule_set.scope, &encoded)?.ok_or_else(|| {
                EngineError::Store(StoreError::Backend(format!(
                    "group labeled {encoded:?} vanished between conflict and re-read"
                )))
            })
        }
        Err(err) => Err(err.into()),
    }
}

/// Whether a group is a live managed group: its label decodes to a
/// positive rule set id that still exists and still targets the group's
/// scope.
pub fn is_valid_auto_group<S>(store: &S, group: &GroupRecord) -> Result<bool, EngineError>
where
    S: RuleSetStore,
{
    let Some(decoded) = group.decoded_label() else {
        return Ok(false);
    };
    Ok(store
        .rule_set(decoded.rule_set())?
        .is_some_and(|rule_set| rule_set.scope == group.scope))
}

/// Idempotent add. Returns whether a change actually happened.
pub fn ensure_member<S>(store: &mut S, group: GroupId, member: MemberId) -> Result<bool, EngineError>
where
    S: MembershipStore,
{
    Ok(store.add_member(group, member, &Provenance::engine())?)
}

/// Idempotent remove. Returns whether a change actually happened.
pub fn ensure_not_member<S>(
    store: &mut S,
    group: GroupId,
    member: MemberId,
) -> Result<bool, EngineError>
where
    S: MembershipStore,
{
    Ok(store.remove_member(group, member, &Provenance::engine())?)
}

/// Delete a managed group and its manual-assignment records.
///
/// A group whose label no longer carries the managed marker was repurposed
/// by an administrator and is never deleted here. Returns whether the
/// group was removed.
pub fn remove<S>(store: &mut S, group: &GroupRecord) -> Result<bool, EngineError>
where
    S: GroupStore + ManualAssignmentStore,
{
    if !group.has_managed_marker() {
        return Ok(false);
    }

    let removed = store.delete_group(group.id)?;
    if removed {
        store.purge_manual_for_group(group.id)?;
        debug!(group = %group.id, name = %group.name, "removed empty managed group");
    }
    Ok(removed)
}

/// Clear the managed label, keeping the group and its memberships intact.
pub fn disassociate<S>(store: &mut S, mut group: GroupRecord) -> Result<(), EngineError>
where
    S: GroupStore,
{
    debug!(group = %group.id, label = ?group.label, "disassociating group from management");
    group.label = None;
    store.update_group(&group)?;
    Ok(())
}

/// Population check, run after any membership removal.
///
/// An empty group that still carries the managed marker is deleted. A
/// group whose marker survives but whose label no longer validates is
/// orphaned: deleted when empty, disassociated (membership data kept)
/// when not.
pub fn check_population<S>(store: &mut S, group_id: GroupId) -> Result<PopulationOutcome, EngineError>
where
    S: Store,
{
    let Some(group) = store.group(group_id)? else {
        // A concurrent pass already collected it.
        return Ok(PopulationOutcome::Kept);
    };

    if !group.has_managed_marker() {
        return Ok(PopulationOutcome::Kept);
    }

    let populated = store.member_count(group.id)? > 0;
    if is_valid_auto_group(store, &group)? {
        if populated {
            return Ok(PopulationOutcome::Kept);
        }
        remove(store, &group)?;
        return Ok(PopulationOutcome::Removed);
    }

    if populated {
        disassociate(store, group)?;
        Ok(PopulationOutcome::Disassociated)
    } else {
        remove(store, &group)?;
        Ok(PopulationOutcome::Removed)
    }
}

/// Re-check a group after an external create or rename.
///
/// A label carrying the managed marker must still decode to a live rule
/// set for this scope; if it does not, the group is demoted (label
/// cleared) while members remain, or deleted when empty. Valid and
/// unmanaged groups are left alone.
pub fn revalidate<S>(store: &mut S, group_id: GroupId) -> Result<PopulationOutcome, EngineError>
where
    S: Store,
{
    let Some(group) = store.group(group_id)? else {
        return Ok(PopulationOutcome::Kept);
    };

    if !group.has_managed_marker() || is_valid_auto_group(store, &group)? {
        return Ok(PopulationOutcome::Kept);
    }

    if store.member_count(group.id)? > 0 {
        disassociate(store, group)?;
        Ok(PopulationOutcome::Disassociated)
    } else {
        remove(store, &group)?;
        Ok(PopulationOutcome::Removed)
    }
}
