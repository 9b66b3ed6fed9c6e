// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::{BTreeMap, BTreeSet, HashMap};

use grouper_core::{
    ClassifierConfig, GroupId, GroupRecord, ManualAssignment, MemberId, Provenance, RoleId,
    RuleSetId, RuleSetRecord, ScopeId,
};

use crate::traits::{
    GroupStore, ManualAssignmentStore, MembershipStore, RuleSetStore, StoreError,
};

/// In-memory store backing hosts without a database and every test.
#[derive(Debug, Default)]
pub struct MemoryStore {
    next_rule_set_id: u64,
    next_group_id: u64,
    rule_sets: BTreeMap<RuleSetId, RuleSetRecord>,
    groups: BTreeMap<GroupId, GroupRecord>,
    memberships: HashMap<GroupId, BTreeSet<MemberId>>,
    manual: BTreeSet<(MemberId, GroupId)>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RuleSetStore for MemoryStore {
    fn insert_rule_set(
        &mut self,
        scope: ScopeId,
        config: ClassifierConfig,
        eligible_roles: BTreeSet<RoleId>,
    ) -> Result<RuleSetRecord, StoreError> {
        self.next_rule_set_id += 1;
        let record = RuleSetRecord {
            id: RuleSetId::new(self.next_rule_set_id),
            scope,
            config,
            eligible_roles,
        };
        self.rule_sets.insert(record.id, record.clone());
        Ok(record)
    }

    fn rule_set(&self, id: RuleSetId) -> Result<Option<RuleSetRecord>, StoreError> {
        Ok(self.rule_sets.get(&id).cloned())
    }

    fn rule_sets_in_scope(&self, scope: ScopeId) -> Result<Vec<RuleSetRecord>, StoreError> {
        Ok(self
            .rule_sets
            .values()
            .filter(|record| record.scope == scope)
            .cloned()
            .collect())
    }

    fn all_rule_sets(&self) -> Result<Vec<RuleSetRecord>, StoreError> {
        Ok(self.rule_sets.values().cloned().collect())
    }

    fn update_rule_set(&mut self, record: &RuleSetRecord) -> Result<(), StoreError> {
        match self.rule_sets.get_mut(&record.id) {
            Some(existing) => {
                *existing = record.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound("rule set", record.id.as_u64())),
        }
    }

    fn delete_rule_set(&mut self, id: RuleSetId) -> Result<bool, StoreError> {
        Ok(self.rule_sets.remove(&id).is_some())
    }
}

impl GroupStore for MemoryStore {
    fn insert_group(
        &mut self,
        scope: ScopeId,
        label: Option<&str>,
        name: &str,
    ) -> Result<GroupRecord, StoreError> {
        if let Some(label) = label {
            let conflict = self
                .groups
                .values()
                .any(|group| group.scope == scope && group.label.as_deref() == Some(label));
            if conflict {
                return Err(StoreError::LabelExists {
                    scope,
                    label: label.to_string(),
                });
            }
        }

        self.next_group_id += 1;
        let record = GroupRecord {
            id: GroupId::new(self.next_group_id),
            scope,
            label: label.map(str::to_string),
            name: name.to_string(),
        };
        self.groups.insert(record.id, record.clone());
        Ok(record)
    }

    fn group(&self, id: GroupId) -> Result<Option<GroupRecord>, StoreError> {
        Ok(self.groups.get(&id).cloned())
    }

    fn group_by_label(
        &self,
        scope: ScopeId,
        label: &str,
    ) -> Result<Option<GroupRecord>, StoreError> {
        Ok(self
            .groups
            .values()
            .find(|group| group.scope == scope && group.label.as_deref() == Some(label))
            .cloned())
    }

    fn groups_in_scope(&self, scope: ScopeId) -> Result<Vec<GroupRecord>, StoreError> {
        Ok(self
            .groups
            .values()
            .filter(|group| group.scope == scope)
            .cloned()
            .collect())
    }

    fn update_group(&mut self, record: &GroupRecord) -> Result<(), StoreError> {
        match self.groups.get_mut(&record.id) {
            Some(existing) => {
                *existing = record.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound("group", record.id.as_u64())),
        }
    }

    fn delete_group(&mut self, id: GroupId) -> Result<bool, StoreError> {
        self.memberships.remove(&id);
        Ok(self.groups.remove(&id).is_some())
    }
}

impl MembershipStore for MemoryStore {
    fn add_member(
        &mut self,
        group: GroupId,
        member: MemberId,
        _provenance: &Provenance,
    ) -> Result<bool, StoreError> {
        if !self.groups.contains_key(&group) {
            return Err(StoreError::NotFound("group", group.as_u64()));
        }
        Ok(self.memberships.entry(group).or_default().insert(member))
    }

    fn remove_member(
        &mut self,
        group: GroupId,
        member: MemberId,
        _provenance: &Provenance,
    ) -> Result<bool, StoreError> {
        Ok(self
            .memberships
            .get_mut(&group)
            .is_some_and(|members| members.remove(&member)))
    }

    fn is_member(&self, group: GroupId, member: MemberId) -> Result<bool, StoreError> {
        Ok(self
            .memberships
            .get(&group)
            .is_some_and(|members| members.contains(&member)))
    }

    fn members(&self, group: GroupId) -> Result<Vec<MemberId>, StoreError> {
        Ok(self
            .memberships
            .get(&group)
            .map(|members| members.iter().copied().collect())
            .unwrap_or_default())
    }

    fn member_count(&self, group: GroupId) -> Result<usize, StoreError> {
        Ok(self.memberships.get(&group).map_or(0, BTreeSet::len))
    }
}

impl ManualAssignmentStore for MemoryStore {
    fn record_manual(&mut self, member: MemberId, group: GroupId) -> Result<bool, StoreError> {
        Ok(self.manual.insert((member, group)))
    }

    fn clear_manual(&mut self, member: MemberId, group: GroupId) -> Result<bool, StoreError> {
        Ok(self.manual.remove(&(member, group)))
    }

    fn is_manual(&self, member: MemberId, group: GroupId) -> Result<bool, StoreError> {
        Ok(self.manual.contains(&(member, group)))
    }

    fn manual_for_group(&self, group: GroupId) -> Result<Vec<ManualAssignment>, StoreError> {
        Ok(self
            .manual
            .iter()
            .filter(|(_, g)| *g == group)
            .map(|(member, group)| ManualAssignment {
                member: *member,
                group: *group,
            })
            .collect())
    }

    fn purge_manual_for_group(&mut self, group: GroupId) -> Result<usize, StoreError> {
        let before = self.manual.len();
        self.manual.retain(|(_, g)| *g != group);
        Ok(before - self.manual.len())
    }
}
