// SPDX-License-Identifier: MIT OR Apache-2.0

use grouper_core::{MemberId, ScopeId};
use grouper_store::{RuleSetStore, Store};
use tracing::warn;

use crate::error::EngineError;
use crate::rule_set::RuleSet;
use crate::traits::{MoveHook, Roster};

/// Scope aggregate: the rule sets of one scope, fanning member-level
/// reconciliation out across all of them.
#[derive(Debug)]
pub struct Scope {
    id: ScopeId,
    rule_sets: Vec<RuleSet>,
}

impl Scope {
    pub fn load<S: RuleSetStore>(store: &S, id: ScopeId) -> Result<Self, EngineError> {
        let rule_sets = store
            .rule_sets_in_scope(id)?
            .into_iter()
            .map(RuleSet::from_record)
            .collect();
        Ok(Self { id, rule_sets })
    }

    pub fn id(&self) -> ScopeId {
        self.id
    }

    pub fn has_rule_sets(&self) -> bool {
        !self.rule_sets.is_empty()
    }

    pub fn rule_sets(&self) -> &[RuleSet] {
        &self.rule_sets
    }

    /// Reconcile one member against every rule set of this scope.
    ///
    /// Best-effort: a failing rule set is logged and does not block its
    /// siblings. The returned flag reports whether the whole pass ran
    /// without incident.
    pub fn verify_member<S, R>(
        &self,
        store: &mut S,
        roster: &R,
        mut hook: Option<&mut (dyn MoveHook + 'static)>,
        member: MemberId,
        preserve_manual: bool,
    ) -> bool
    where
        S: Store,
        R: Roster,
    {
        let mut ok = true;
        for rule_set in &self.rule_sets {
            match rule_set.verify_member(store, roster, hook.as_deref_mut(), member, preserve_manual)
            {
                Ok(result) => ok &= result,
                Err(error) => {
                    warn!(
                        %member,
                        scope = %self.id,
                        rule_set = %rule_set.id(),
                        %error,
                        "membership verification failed",
                    );
                    ok = false;
                }
            }
        }
        ok
    }

    /// Reconcile every currently-eligible member of this scope. Used on
    /// scope-wide triggers (role table changes, rule reconfiguration).
    pub fn verify_all_members<S, R>(
        &self,
        store: &mut S,
        roster: &R,
        mut hook: Option<&mut (dyn MoveHook + 'static)>,
        preserve_manual: bool,
    ) -> bool
    where
        S: Store,
        R: Roster,
    {
        let mut ok = true;
        for member in roster.members_of(self.id) {
            ok &= self.verify_member(store, roster, hook.as_deref_mut(), member, preserve_manual);
        }
        ok
    }
}
