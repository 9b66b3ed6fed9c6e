// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::BTreeSet;

use grouper_core::{
    ClassifierConfig, GroupRecord, MemberId, RoleId, RuleSetId, RuleSetRecord, ScopeId,
};
use grouper_store::Store;
use tracing::{debug, warn};

use crate::classifier;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::event::{Trigger, TriggerEvent};
use crate::group;
use crate::member;
use crate::scope::Scope;
use crate::traits::{AttributeProvider, MoveHook, Roster};

/// Create and manage rule sets, and drive reconciliation from inbound
/// triggers.
///
/// Owns the store and roster collaborators plus the injected engine
/// configuration. Routes every trigger to the member, scope or group it
/// concerns; exposes the operations an administrative wrapper calls.
///
/// One instance per hosting process is enough; nothing here holds state
/// beyond the collaborators themselves, so a pass either completes or
/// surfaces an error to its caller, who decides on redelivery.
pub struct Manager<S, R> {
    store: S,
    roster: R,
    config: EngineConfig,
    move_hook: Option<Box<dyn MoveHook>>,
}

impl<S, R> Manager<S, R>
where
    S: Store,
    R: Roster + AttributeProvider,
{
    pub fn new(store: S, roster: R, config: EngineConfig) -> Self {
        Self {
            store,
            roster,
            config,
            move_hook: None,
        }
    }

    /// Register the optional collaborator notified when reconciliation
    /// moves a member between managed groups.
    pub fn with_move_hook(mut self, hook: Box<dyn MoveHook>) -> Self {
        self.move_hook = Some(hook);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the store, for hosts sharing it with their own
    /// mutation channels.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn roster(&self) -> &R {
        &self.roster
    }

    pub fn roster_mut(&mut self) -> &mut R {
        &mut self.roster
    }

    /// Dispatch one inbound trigger.
    ///
    /// Events echoing the engine's own mutations are dropped on entry.
    /// The returned flag reports best-effort success of any fan-out the
    /// trigger caused; store failures propagate.
    pub fn handle(&mut self, event: TriggerEvent) -> Result<bool, EngineError> {
        if event.is_self_triggered() {
            debug!(trigger = ?event.trigger, "ignoring self-triggered event");
            return Ok(true);
        }

        match event.trigger {
            Trigger::RoleAssigned { scope, member } => {
                if !self.config.listen_role_changes {
                    return Ok(true);
                }
                self.verify_member_in_scope(member, scope)
            }
            Trigger::MembershipAdded { group, member } => {
                if !self.config.listen_group_membership {
                    return Ok(true);
                }
                let record = self
                    .store
                    .group(group)?
                    .ok_or(EngineError::InvalidGroup(group))?;
                if group::is_valid_auto_group(&self.store, &record)? {
                    self.store.record_manual(member, group)?;
                    debug!(%member, %group, "recorded manual assignment");
                }
                self.verify_member_in_scope(member, record.scope)
            }
            Trigger::MembershipRemoved { group, member } => {
                if !self.config.listen_group_membership {
                    return Ok(true);
                }
                self.store.clear_manual(member, group)?;
                let scope = self.store.group(group)?.map(|record| record.scope);
                group::check_population(&mut self.store, group)?;
                match scope {
                    Some(scope) => self.verify_member_in_scope(member, scope),
                    // The group is already gone; clearing the manual
                    // record was all there was to do.
                    None => Ok(true),
                }
            }
            Trigger::ProfileUpdated { member } => {
                if !self.config.listen_profile_changes {
                    return Ok(true);
                }
                self.verify_member(member)
            }
            Trigger::GroupChanged { group } => {
                if !self.config.listen_group_changes {
                    return Ok(true);
                }
                group::revalidate(&mut self.store, group)?;
                Ok(true)
            }
            Trigger::GroupDeleted { group } => {
                self.store.purge_manual_for_group(group)?;
                Ok(true)
            }
            Trigger::RoleDeleted { role } => {
                for mut record in self.store.all_rule_sets()? {
                    if record.eligible_roles.remove(&role) {
                        self.store.update_rule_set(&record)?;
                    }
                }
                Ok(true)
            }
            Trigger::ScopeCreated { scope, restored } => {
                let enabled = if restored {
                    self.config.add_to_restored_scopes
                } else {
                    self.config.add_to_new_scopes
                };
                if !enabled || !self.store.rule_sets_in_scope(scope)?.is_empty() {
                    return Ok(true);
                }

                let config = self.config.default_classifier.clone();
                let roles: BTreeSet<RoleId> =
                    self.config.default_eligible_roles.iter().copied().collect();
                match self.create_rule_set(scope, config, roles) {
                    Ok(_) => Ok(true),
                    Err(EngineError::InvalidClassifierConfig(field)) => {
                        warn!(
                            %scope,
                            %field,
                            "default classifier configuration is invalid; scope left unmanaged",
                        );
                        Ok(false)
                    }
                    Err(err) => Err(err),
                }
            }
        }
    }

    /// Reconcile one member within one scope.
    pub fn verify_member_in_scope(
        &mut self,
        member: MemberId,
        scope: ScopeId,
    ) -> Result<bool, EngineError> {
        let scope = Scope::load(&self.store, scope)?;
        Ok(scope.verify_member(
            &mut self.store,
            &self.roster,
            self.move_hook.as_deref_mut(),
            member,
            self.config.preserve_manual,
        ))
    }

    /// Reconcile every eligible member of a scope.
    pub fn verify_scope(&mut self, scope: ScopeId) -> Result<bool, EngineError> {
        let scope = Scope::load(&self.store, scope)?;
        Ok(scope.verify_all_members(
            &mut self.store,
            &self.roster,
            self.move_hook.as_deref_mut(),
            self.config.preserve_manual,
        ))
    }

    /// Reconcile one member across all their scopes.
    pub fn verify_member(&mut self, member: MemberId) -> Result<bool, EngineError> {
        Ok(member::verify_everywhere(
            &mut self.store,
            &self.roster,
            self.move_hook.as_deref_mut(),
            member,
            self.config.preserve_manual,
        ))
    }

    pub fn rule_sets_in_scope(&self, scope: ScopeId) -> Result<Vec<RuleSetRecord>, EngineError> {
        Ok(self.store.rule_sets_in_scope(scope)?)
    }

    /// Create a rule set for a scope and run full verification.
    ///
    /// Rejects unknown scopes, invalid classifier configs and scopes that
    /// already have a rule set.
    pub fn create_rule_set(
        &mut self,
        scope: ScopeId,
        config: ClassifierConfig,
        eligible_roles: BTreeSet<RoleId>,
    ) -> Result<RuleSetRecord, EngineError> {
        if !self.roster.scope_exists(scope) {
            return Err(EngineError::InvalidScope(scope));
        }
        self.validate_config(&config)?;
        if !self.store.rule_sets_in_scope(scope)?.is_empty() {
            return Err(EngineError::RuleSetExists(scope));
        }

        let record = self.store.insert_rule_set(scope, config, eligible_roles)?;
        debug!(rule_set = %record.id, %scope, "created rule set");
        self.verify_scope(scope)?;
        Ok(record)
    }

    /// Persist an edited rule set and re-verify its scope.
    pub fn save_rule_set(&mut self, record: &RuleSetRecord) -> Result<(), EngineError> {
        self.validate_config(&record.config)?;
        self.store.update_rule_set(record)?;
        self.verify_scope(record.scope)?;
        Ok(())
    }

    /// Replace a rule set's classifier configuration.
    pub fn set_classifier(
        &mut self,
        id: RuleSetId,
        config: ClassifierConfig,
    ) -> Result<(), EngineError> {
        self.validate_config(&config)?;
        let mut record = self
            .store
            .rule_set(id)?
            .ok_or(EngineError::UnknownRuleSet(id))?;
        record.config = config;
        self.store.update_rule_set(&record)?;
        self.verify_scope(record.scope)?;
        Ok(())
    }

    /// Replace a rule set's eligibility allow-list.
    pub fn set_eligible_roles(
        &mut self,
        id: RuleSetId,
        eligible_roles: BTreeSet<RoleId>,
    ) -> Result<(), EngineError> {
        let mut record = self
            .store
            .rule_set(id)?
            .ok_or(EngineError::UnknownRuleSet(id))?;
        record.eligible_roles = eligible_roles;
        self.store.update_rule_set(&record)?;
        self.verify_scope(record.scope)?;
        Ok(())
    }

    /// Delete a rule set.
    ///
    /// With `cleanup_groups` its groups are removed; without, they are
    /// disassociated: labels cleared, entities and memberships kept.
    pub fn delete_rule_set(
        &mut self,
        id: RuleSetId,
        cleanup_groups: bool,
    ) -> Result<(), EngineError> {
        let record = self
            .store
            .rule_set(id)?
            .ok_or(EngineError::UnknownRuleSet(id))?;

        let owned: Vec<GroupRecord> = self
            .store
            .groups_in_scope(record.scope)?
            .into_iter()
            .filter(|candidate| {
                candidate
                    .decoded_label()
                    .is_some_and(|label| label.rule_set() == id)
            })
            .collect();

        for group in owned {
            if cleanup_groups {
                group::remove(&mut self.store, &group)?;
            } else {
                group::disassociate(&mut self.store, group)?;
            }
        }

        self.store.delete_rule_set(id)?;
        debug!(rule_set = %id, cleanup_groups, "deleted rule set");
        Ok(())
    }

    fn validate_config(&self, config: &ClassifierConfig) -> Result<(), EngineError> {
        if classifier::build(config).validate(&self.roster) {
            Ok(())
        } else {
            Err(EngineError::InvalidClassifierConfig(config.field.clone()))
        }
    }
}
