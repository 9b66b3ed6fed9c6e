// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::BTreeSet;
use std::fmt;

use grouper_core::{GroupId, GroupRecord, MemberId, RuleSetId, RuleSetRecord, ScopeId};
use grouper_store::Store;
use tracing::debug;

use crate::classifier::{self, Classifier};
use crate::error::EngineError;
use crate::group;
use crate::traits::{MoveHook, Roster};

/// A rule set: one classifier plus eligibility criteria, managing the
/// groups its classification values imply within one scope.
pub struct RuleSet {
    record: RuleSetRecord,
    classifier: Box<dyn Classifier>,
}

impl RuleSet {
    pub fn from_record(record: RuleSetRecord) -> Self {
        let classifier = classifier::build(&record.config);
        Self { record, classifier }
    }

    pub fn id(&self) -> RuleSetId {
        self.record.id
    }

    pub fn scope(&self) -> ScopeId {
        self.record.scope
    }

    pub fn record(&self) -> &RuleSetRecord {
        &self.record
    }

    /// Eligibility: the member holds at least one allow-listed role in
    /// this scope.
    fn is_eligible<R: Roster>(&self, roster: &R, member: MemberId) -> bool {
        roster
            .roles(self.record.scope, member)
            .iter()
            .any(|role| self.record.eligible_roles.contains(role))
    }

    /// Whether this rule set owns a group (its label decodes to this rule
    /// set's id).
    fn owns(&self, group: &GroupRecord) -> bool {
        group
            .decoded_label()
            .is_some_and(|label| label.rule_set() == self.record.id)
    }

    /// Reconcile one member against this rule set.
    ///
    /// After the pass the member belongs to exactly the groups implied by
    /// their classification values, plus any membership protected by a
    /// manual-assignment record while `preserve_manual` is on. Groups are
    /// created on first demand and collected once a removal empties them.
    ///
    /// Idempotent: a second pass with no intervening state change mutates
    /// nothing.
    pub fn verify_member<S, R>(
        &self,
        store: &mut S,
        roster: &R,
        mut hook: Option<&mut (dyn MoveHook + 'static)>,
        member: MemberId,
        preserve_manual: bool,
    ) -> Result<bool, EngineError>
    where
        S: Store,
        R: Roster,
    {
        let values = if self.is_eligible(roster, member) {
            let snapshot = roster
                .snapshot(member)
                .ok_or(EngineError::InvalidMember(member))?;
            self.classifier.classify(&snapshot)
        } else {
            // Ineligible members classify into nothing; the removal sweep
            // below strips whatever auto-membership they still have.
            Vec::new()
        };

        let mut valid: BTreeSet<GroupId> = BTreeSet::new();
        let mut target: Option<GroupId> = None;
        for value in &values {
            let group = group::find_or_create(store, &self.record, value)?;
            group::ensure_member(store, group.id, member)?;
            // First valid group of the pass becomes the migration target
            // for any membership moves.
            if target.is_none() {
                target = Some(group.id);
            }
            valid.insert(group.id);
        }

        for stale in store.groups_in_scope(self.record.scope)? {
            if !self.owns(&stale) || valid.contains(&stale.id) {
                continue;
            }
            if !store.is_member(stale.id, member)? {
                continue;
            }
            if preserve_manual && store.is_manual(member, stale.id)? {
                debug!(%member, group = %stale.id, "manual assignment preserved");
                continue;
            }

            let removed = group::ensure_not_member(store, stale.id, member)?;
            if removed {
                if let (Some(hook), Some(target)) = (hook.as_deref_mut(), target) {
                    hook.membership_moved(self.record.scope, member, stale.id, target);
                }
                group::check_population(store, stale.id)?;
            }
        }

        Ok(true)
    }
}

impl fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleSet")
            .field("record", &self.record)
            .finish_non_exhaustive()
    }
}
