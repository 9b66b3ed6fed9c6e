// SPDX-License-Identifier: MIT OR Apache-2.0

use std::cell::Cell;
use std::collections::BTreeSet;
use std::rc::Rc;
use std::sync::Mutex;

use assert_matches::assert_matches;
use grouper_core::{
    ClassifierConfig, Delimiter, GroupId, GroupRecord, MemberId, Provenance, RoleId, RuleSetId,
    RuleSetRecord, ScopeId,
};
use grouper_store::{
    GroupStore, ManualAssignmentStore, MembershipStore, MemoryStore, RuleSetStore, StoreError,
};

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::event::{Trigger, TriggerEvent};
use crate::group::{self, PopulationOutcome};
use crate::manager::Manager;
use crate::rule_set::RuleSet;
use crate::test_utils::TestRoster;
use crate::traits::MoveHook;

const SCOPE: ScopeId = ScopeId::new(100);
const OTHER_SCOPE: ScopeId = ScopeId::new(200);
const ALICE: MemberId = MemberId::new(1);
const BOB: MemberId = MemberId::new(2);
const STUDENT: RoleId = RoleId::new(10);
const TEACHER: RoleId = RoleId::new(11);

/// Hook recording every membership move, shareable with the test body.
#[derive(Clone, Default)]
struct RecordingHook {
    moves: Rc<Mutex<Vec<(ScopeId, MemberId, GroupId, GroupId)>>>,
}

impl RecordingHook {
    fn moves(&self) -> Vec<(ScopeId, MemberId, GroupId, GroupId)> {
        self.moves.lock().unwrap().clone()
    }
}

impl MoveHook for RecordingHook {
    fn membership_moved(&mut self, scope: ScopeId, member: MemberId, from: GroupId, to: GroupId) {
        self.moves.lock().unwrap().push((scope, member, from, to));
    }
}

fn department_roster() -> TestRoster {
    let mut roster = TestRoster::new();
    roster.add_field("department", "Department");
    roster.add_field("teams", "Teams");
    roster.enrol(SCOPE, ALICE, STUDENT);
    roster.enrol(SCOPE, BOB, STUDENT);
    roster.set_attribute(ALICE, "department", "Engineering");
    roster.set_attribute(BOB, "department", "Sales");
    roster
}

fn manager(roster: TestRoster, config: EngineConfig) -> Manager<MemoryStore, TestRoster> {
    Manager::new(MemoryStore::new(), roster, config)
}

fn student_rule_set(
    manager: &mut Manager<MemoryStore, TestRoster>,
    config: ClassifierConfig,
) -> RuleSetRecord {
    manager
        .create_rule_set(SCOPE, config, BTreeSet::from([STUDENT]))
        .unwrap()
}

/// Labeled groups of a scope with their member sets, in id order.
fn scope_state(
    store: &MemoryStore,
    scope: ScopeId,
) -> Vec<(GroupId, Option<String>, Vec<MemberId>)> {
    store
        .groups_in_scope(scope)
        .unwrap()
        .into_iter()
        .map(|group| {
            let members = store.members(group.id).unwrap();
            (group.id, group.label, members)
        })
        .collect()
}

fn group_for_value(store: &MemoryStore, rule_set: RuleSetId, value: &str) -> Option<GroupRecord> {
    let label = format!("grouper|{rule_set}|{value}");
    store.group_by_label(SCOPE, &label).unwrap()
}

#[test]
fn members_end_up_in_exactly_their_classified_groups() {
    let mut manager = manager(department_roster(), EngineConfig::default());
    let rule_set = student_rule_set(&mut manager, ClassifierConfig::profile_field("department"));

    let engineering = group_for_value(manager.store(), rule_set.id, "engineering").unwrap();
    let sales = group_for_value(manager.store(), rule_set.id, "sales").unwrap();

    assert_eq!(engineering.name, "Engineering");
    assert!(manager.store().is_member(engineering.id, ALICE).unwrap());
    assert!(!manager.store().is_member(engineering.id, BOB).unwrap());
    assert!(manager.store().is_member(sales.id, BOB).unwrap());
    assert!(!manager.store().is_member(sales.id, ALICE).unwrap());
    assert_eq!(manager.store().groups_in_scope(SCOPE).unwrap().len(), 2);
}

#[test]
fn verification_is_idempotent() {
    let hook = RecordingHook::default();
    let mut manager = manager(department_roster(), EngineConfig::default())
        .with_move_hook(Box::new(hook.clone()));
    student_rule_set(&mut manager, ClassifierConfig::profile_field("department"));

    let before = scope_state(manager.store(), SCOPE);
    assert!(manager.verify_scope(SCOPE).unwrap());
    assert_eq!(scope_state(manager.store(), SCOPE), before);
    // No membership was moved, so the hook never fired.
    assert!(hook.moves().is_empty());
}

#[test]
fn delimited_attribute_classifies_into_several_groups() {
    let mut roster = department_roster();
    roster.set_attribute(ALICE, "department", "Engineering, Sales");
    let mut manager = manager(roster, EngineConfig::default());
    let rule_set = student_rule_set(
        &mut manager,
        ClassifierConfig::delimited("department", Delimiter::Comma),
    );

    let engineering = group_for_value(manager.store(), rule_set.id, "engineering").unwrap();
    let sales = group_for_value(manager.store(), rule_set.id, "sales").unwrap();
    assert!(manager.store().is_member(engineering.id, ALICE).unwrap());
    assert!(manager.store().is_member(sales.id, ALICE).unwrap());

    // Bob's single value shares the sales group; no further group exists.
    assert!(manager.store().is_member(sales.id, BOB).unwrap());
    assert_eq!(manager.store().groups_in_scope(SCOPE).unwrap().len(), 2);
}

#[test]
fn values_differing_only_in_case_collapse_to_one_group() {
    let mut roster = department_roster();
    roster.set_attribute(ALICE, "department", "SALES");
    let mut manager = manager(roster, EngineConfig::default());
    let rule_set = student_rule_set(&mut manager, ClassifierConfig::profile_field("department"));

    let sales = group_for_value(manager.store(), rule_set.id, "sales").unwrap();
    assert!(manager.store().is_member(sales.id, ALICE).unwrap());
    assert!(manager.store().is_member(sales.id, BOB).unwrap());
    assert_eq!(manager.store().groups_in_scope(SCOPE).unwrap().len(), 1);
}

#[test]
fn ineligible_members_are_classified_into_nothing() {
    let mut roster = department_roster();
    roster.set_roles(SCOPE, ALICE, vec![TEACHER]);
    let mut manager = manager(roster, EngineConfig::default());
    let rule_set = student_rule_set(&mut manager, ClassifierConfig::profile_field("department"));

    // Alice holds only the teacher role: her department never produced a
    // group, only Bob's did.
    assert!(group_for_value(manager.store(), rule_set.id, "engineering").is_none());
    let sales = group_for_value(manager.store(), rule_set.id, "sales").unwrap();
    assert_eq!(manager.store().members(sales.id).unwrap(), vec![BOB]);
}

#[test]
fn losing_eligibility_strips_auto_memberships() {
    let mut manager = manager(department_roster(), EngineConfig::default());
    let rule_set = student_rule_set(&mut manager, ClassifierConfig::profile_field("department"));
    let engineering = group_for_value(manager.store(), rule_set.id, "engineering").unwrap();
    assert!(manager.store().is_member(engineering.id, ALICE).unwrap());

    manager.roster_mut().set_roles(SCOPE, ALICE, vec![TEACHER]);
    manager.verify_member_in_scope(ALICE, SCOPE).unwrap();

    // The engineering group emptied out and was collected.
    assert!(manager.store().group(engineering.id).unwrap().is_none());
}

#[test]
fn attribute_change_moves_the_member_and_fires_the_hook() {
    let hook = RecordingHook::default();
    let mut manager = manager(department_roster(), EngineConfig::default())
        .with_move_hook(Box::new(hook.clone()));
    let rule_set = student_rule_set(&mut manager, ClassifierConfig::profile_field("department"));
    let engineering = group_for_value(manager.store(), rule_set.id, "engineering").unwrap();

    manager.roster_mut().set_attribute(ALICE, "department", "Sales");
    assert!(manager
        .handle(TriggerEvent::external(Trigger::ProfileUpdated {
            member: ALICE
        }))
        .unwrap());

    let sales = group_for_value(manager.store(), rule_set.id, "sales").unwrap();
    assert!(manager.store().is_member(sales.id, ALICE).unwrap());
    // The old group emptied out and was collected, and the move was
    // reported with the new group as target.
    assert!(manager.store().group(engineering.id).unwrap().is_none());
    assert_eq!(hook.moves(), vec![(SCOPE, ALICE, engineering.id, sales.id)]);
}

#[test]
fn manual_assignment_suppresses_removal_while_enabled() {
    let mut manager = manager(department_roster(), EngineConfig::default());
    let rule_set = student_rule_set(&mut manager, ClassifierConfig::profile_field("department"));
    let sales = group_for_value(manager.store(), rule_set.id, "sales").unwrap();

    // An admin drags Alice into the sales group out-of-band.
    manager
        .store_mut()
        .add_member(sales.id, ALICE, &Provenance::external("admin_ui"))
        .unwrap();
    assert!(manager
        .handle(TriggerEvent::with_provenance(
            Trigger::MembershipAdded {
                group: sales.id,
                member: ALICE,
            },
            Provenance::external("admin_ui"),
        ))
        .unwrap());
    assert!(manager.store().is_manual(ALICE, sales.id).unwrap());

    // Repeated passes keep the protected membership.
    manager.verify_scope(SCOPE).unwrap();
    manager.verify_scope(SCOPE).unwrap();
    assert!(manager.store().is_member(sales.id, ALICE).unwrap());
}

#[test]
fn disabling_preserve_manual_allows_removal_again() {
    let mut store = MemoryStore::new();
    let roster = department_roster();
    let record = store
        .insert_rule_set(
            SCOPE,
            ClassifierConfig::profile_field("department"),
            BTreeSet::from([STUDENT]),
        )
        .unwrap();
    let rule_set = RuleSet::from_record(record.clone());

    rule_set
        .verify_member(&mut store, &roster, None, ALICE, true)
        .unwrap();
    let sales = group::find_or_create(&mut store, &record, "Sales").unwrap();
    store
        .add_member(sales.id, ALICE, &Provenance::external("admin_ui"))
        .unwrap();
    store.record_manual(ALICE, sales.id).unwrap();

    rule_set
        .verify_member(&mut store, &roster, None, ALICE, true)
        .unwrap();
    assert!(store.is_member(sales.id, ALICE).unwrap());

    rule_set
        .verify_member(&mut store, &roster, None, ALICE, false)
        .unwrap();
    assert!(!store.is_member(sales.id, ALICE).unwrap());
}

#[test]
fn self_triggered_events_are_dropped() {
    let mut manager = manager(department_roster(), EngineConfig::default());
    let rule_set = student_rule_set(&mut manager, ClassifierConfig::profile_field("department"));
    let sales = group_for_value(manager.store(), rule_set.id, "sales").unwrap();

    assert!(manager
        .handle(TriggerEvent::with_provenance(
            Trigger::MembershipAdded {
                group: sales.id,
                member: BOB,
            },
            Provenance::engine(),
        ))
        .unwrap());

    // The engine's own add echoed back: no manual record was taken.
    assert!(!manager.store().is_manual(BOB, sales.id).unwrap());
}

#[test]
fn external_removal_clears_manual_record_and_collects_the_group() {
    let mut manager = manager(department_roster(), EngineConfig::default());
    let rule_set = student_rule_set(&mut manager, ClassifierConfig::profile_field("department"));
    let engineering = group_for_value(manager.store(), rule_set.id, "engineering").unwrap();

    // Alice leaves the scope, then an admin removes her from the group
    // externally.
    manager.roster_mut().set_roles(SCOPE, ALICE, vec![]);
    manager
        .store_mut()
        .remove_member(engineering.id, ALICE, &Provenance::external("admin_ui"))
        .unwrap();
    assert!(manager
        .handle(TriggerEvent::external(Trigger::MembershipRemoved {
            group: engineering.id,
            member: ALICE,
        }))
        .unwrap());

    // The emptied managed group was collected by the population check.
    assert!(manager.store().group(engineering.id).unwrap().is_none());
}

#[test]
fn empty_group_is_deleted_only_with_managed_marker() {
    let mut manager = manager(department_roster(), EngineConfig::default());
    student_rule_set(&mut manager, ClassifierConfig::profile_field("department"));

    // A plain group an admin created stays, however empty.
    let plain = manager
        .store_mut()
        .insert_group(SCOPE, None, "Tutor Group B")
        .unwrap();
    assert_eq!(
        group::check_population(manager.store_mut(), plain.id).unwrap(),
        PopulationOutcome::Kept
    );
    assert!(manager.store().group(plain.id).unwrap().is_some());
}

#[test]
fn orphaned_group_is_deleted_when_empty_and_demoted_when_populated() {
    let mut store = MemoryStore::new();

    // Labels decode to rule set 7, which does not exist.
    let empty = store
        .insert_group(SCOPE, Some("grouper|7|legacy"), "Legacy")
        .unwrap();
    let populated = store
        .insert_group(SCOPE, Some("grouper|7|veterans"), "Veterans")
        .unwrap();
    store
        .add_member(populated.id, ALICE, &Provenance::external("import"))
        .unwrap();

    assert!(!group::is_valid_auto_group(&store, &empty).unwrap());
    assert!(!group::is_valid_auto_group(&store, &populated).unwrap());

    assert_eq!(
        group::check_population(&mut store, empty.id).unwrap(),
        PopulationOutcome::Removed
    );
    assert!(store.group(empty.id).unwrap().is_none());

    assert_eq!(
        group::check_population(&mut store, populated.id).unwrap(),
        PopulationOutcome::Disassociated
    );
    let populated = store.group(populated.id).unwrap().unwrap();
    assert_eq!(populated.label, None);
    assert!(store.is_member(populated.id, ALICE).unwrap());
}

#[test]
fn label_validity_requires_the_owning_scope() {
    let mut store = MemoryStore::new();
    let record = store
        .insert_rule_set(
            SCOPE,
            ClassifierConfig::profile_field("department"),
            BTreeSet::new(),
        )
        .unwrap();

    // A group in another scope claiming this rule set is not valid.
    let foreign = store
        .insert_group(
            OTHER_SCOPE,
            Some(&format!("grouper|{}|stray", record.id)),
            "Stray",
        )
        .unwrap();
    assert!(!group::is_valid_auto_group(&store, &foreign).unwrap());
}

#[test]
fn deleting_a_rule_set_without_cleanup_disassociates_its_groups() {
    let mut manager = manager(department_roster(), EngineConfig::default());
    let rule_set = student_rule_set(&mut manager, ClassifierConfig::profile_field("department"));
    let engineering = group_for_value(manager.store(), rule_set.id, "engineering").unwrap();

    manager.delete_rule_set(rule_set.id, false).unwrap();

    let engineering = manager.store().group(engineering.id).unwrap().unwrap();
    assert_eq!(engineering.label, None);
    assert!(manager.store().is_member(engineering.id, ALICE).unwrap());
    assert!(manager.rule_sets_in_scope(SCOPE).unwrap().is_empty());
}

#[test]
fn deleting_a_rule_set_with_cleanup_removes_its_groups() {
    let mut manager = manager(department_roster(), EngineConfig::default());
    let rule_set = student_rule_set(&mut manager, ClassifierConfig::profile_field("department"));
    let engineering = group_for_value(manager.store(), rule_set.id, "engineering").unwrap();

    manager.delete_rule_set(rule_set.id, true).unwrap();

    assert!(manager.store().group(engineering.id).unwrap().is_none());
    assert!(manager.store().groups_in_scope(SCOPE).unwrap().is_empty());
}

#[test]
fn group_changed_demotes_or_deletes_invalid_labels() {
    let mut manager = manager(department_roster(), EngineConfig::default());
    student_rule_set(&mut manager, ClassifierConfig::profile_field("department"));

    // Simulate the rule set disappearing behind the engine's back.
    let rule_set_id = manager.rule_sets_in_scope(SCOPE).unwrap()[0].id;
    manager.store_mut().delete_rule_set(rule_set_id).unwrap();

    let groups = manager.store().groups_in_scope(SCOPE).unwrap();
    for group in groups {
        assert!(manager
            .handle(TriggerEvent::external(Trigger::GroupChanged {
                group: group.id
            }))
            .unwrap());
        let survivor = manager.store().group(group.id).unwrap();
        match survivor {
            // Populated groups were demoted, keeping their members.
            Some(record) => {
                assert_eq!(record.label, None);
                assert!(manager.store().member_count(record.id).unwrap() > 0);
            }
            // Empty ones were deleted.
            None => {}
        }
    }
}

#[test]
fn group_deleted_purges_manual_records() {
    let mut manager = manager(department_roster(), EngineConfig::default());
    let rule_set = student_rule_set(&mut manager, ClassifierConfig::profile_field("department"));
    let sales = group_for_value(manager.store(), rule_set.id, "sales").unwrap();
    manager.store_mut().record_manual(ALICE, sales.id).unwrap();
    assert_eq!(manager.store().manual_for_group(sales.id).unwrap().len(), 1);

    assert!(manager
        .handle(TriggerEvent::external(Trigger::GroupDeleted {
            group: sales.id
        }))
        .unwrap());
    assert!(!manager.store().is_manual(ALICE, sales.id).unwrap());
    assert!(manager.store().manual_for_group(sales.id).unwrap().is_empty());
}

#[test]
fn role_deleted_purges_eligibility_entries() {
    let mut manager = manager(department_roster(), EngineConfig::default());
    let rule_set = manager
        .create_rule_set(
            SCOPE,
            ClassifierConfig::profile_field("department"),
            BTreeSet::from([STUDENT, TEACHER]),
        )
        .unwrap();

    assert!(manager
        .handle(TriggerEvent::external(Trigger::RoleDeleted {
            role: TEACHER
        }))
        .unwrap());

    let record = manager.store().rule_set(rule_set.id).unwrap().unwrap();
    assert_eq!(record.eligible_roles, BTreeSet::from([STUDENT]));
}

#[test]
fn role_assignment_trigger_reconciles_the_member() {
    let mut roster = department_roster();
    roster.set_roles(SCOPE, ALICE, vec![]);
    let mut manager = manager(roster, EngineConfig::default());
    let rule_set = student_rule_set(&mut manager, ClassifierConfig::profile_field("department"));
    assert!(group_for_value(manager.store(), rule_set.id, "engineering").is_none());

    manager.roster_mut().set_roles(SCOPE, ALICE, vec![STUDENT]);
    assert!(manager
        .handle(TriggerEvent::external(Trigger::RoleAssigned {
            scope: SCOPE,
            member: ALICE,
        }))
        .unwrap());

    let engineering = group_for_value(manager.store(), rule_set.id, "engineering").unwrap();
    assert!(manager.store().is_member(engineering.id, ALICE).unwrap());
}

#[test]
fn scope_creation_instantiates_the_default_rule_set() {
    let mut roster = department_roster();
    roster.set_attribute(ALICE, "city", "Utrecht");
    let config = EngineConfig {
        add_to_new_scopes: true,
        default_classifier: ClassifierConfig::builtin("city"),
        default_eligible_roles: vec![STUDENT],
        ..EngineConfig::default()
    };
    let mut manager = manager(roster, config);

    assert!(manager
        .handle(TriggerEvent::external(Trigger::ScopeCreated {
            scope: SCOPE,
            restored: false,
        }))
        .unwrap());

    let rule_sets = manager.rule_sets_in_scope(SCOPE).unwrap();
    assert_eq!(rule_sets.len(), 1);
    let utrecht = group_for_value(manager.store(), rule_sets[0].id, "utrecht").unwrap();
    assert!(manager.store().is_member(utrecht.id, ALICE).unwrap());

    // Redelivery finds the rule set in place and changes nothing.
    assert!(manager
        .handle(TriggerEvent::external(Trigger::ScopeCreated {
            scope: SCOPE,
            restored: false,
        }))
        .unwrap());
    assert_eq!(manager.rule_sets_in_scope(SCOPE).unwrap().len(), 1);
}

#[test]
fn scope_creation_respects_the_feature_flags() {
    let mut manager = manager(
        department_roster(),
        EngineConfig {
            add_to_new_scopes: false,
            add_to_restored_scopes: false,
            ..EngineConfig::default()
        },
    );

    assert!(manager
        .handle(TriggerEvent::external(Trigger::ScopeCreated {
            scope: SCOPE,
            restored: false,
        }))
        .unwrap());
    assert!(manager
        .handle(TriggerEvent::external(Trigger::ScopeCreated {
            scope: SCOPE,
            restored: true,
        }))
        .unwrap());
    assert!(manager.rule_sets_in_scope(SCOPE).unwrap().is_empty());
}

#[test]
fn administrative_validation_rejects_bad_input() {
    let mut manager = manager(department_roster(), EngineConfig::default());

    assert_matches!(
        manager.create_rule_set(
            ScopeId::new(999),
            ClassifierConfig::profile_field("department"),
            BTreeSet::from([STUDENT]),
        ),
        Err(EngineError::InvalidScope(_))
    );

    assert_matches!(
        manager.create_rule_set(
            SCOPE,
            ClassifierConfig::profile_field("shoe_size"),
            BTreeSet::from([STUDENT]),
        ),
        Err(EngineError::InvalidClassifierConfig(field)) if field == "shoe_size"
    );

    student_rule_set(&mut manager, ClassifierConfig::profile_field("department"));
    assert_matches!(
        manager.create_rule_set(
            SCOPE,
            ClassifierConfig::profile_field("department"),
            BTreeSet::from([STUDENT]),
        ),
        Err(EngineError::RuleSetExists(_))
    );

    assert_matches!(
        manager.set_classifier(
            RuleSetId::new(999),
            ClassifierConfig::profile_field("department")
        ),
        Err(EngineError::UnknownRuleSet(_))
    );
}

#[test]
fn reconfiguring_the_classifier_reverifies_the_scope() {
    let mut manager = manager(department_roster(), EngineConfig::default());
    let rule_set = student_rule_set(&mut manager, ClassifierConfig::profile_field("department"));
    let engineering = group_for_value(manager.store(), rule_set.id, "engineering").unwrap();

    manager.roster_mut().set_attribute(ALICE, "teams", "Platform");
    manager.roster_mut().set_attribute(BOB, "teams", "Platform");
    manager
        .set_classifier(rule_set.id, ClassifierConfig::profile_field("teams"))
        .unwrap();

    let platform = group_for_value(manager.store(), rule_set.id, "platform").unwrap();
    assert_eq!(
        manager.store().members(platform.id).unwrap(),
        vec![ALICE, BOB]
    );
    // Department groups emptied out and were collected.
    assert!(manager.store().group(engineering.id).unwrap().is_none());
}

/// Store shim that hides a group from the first label lookup, simulating
/// a concurrent creator winning the race between read and insert.
struct RacyStore {
    inner: MemoryStore,
    hide_next_lookup: Cell<bool>,
}

impl GroupStore for RacyStore {
    fn insert_group(
        &mut self,
        scope: ScopeId,
        label: Option<&str>,
        name: &str,
    ) -> Result<GroupRecord, StoreError> {
        self.inner.insert_group(scope, label, name)
    }

    fn group(&self, id: GroupId) -> Result<Option<GroupRecord>, StoreError> {
        self.inner.group(id)
    }

    fn group_by_label(
        &self,
        scope: ScopeId,
        label: &str,
    ) -> Result<Option<GroupRecord>, StoreError> {
        if self.hide_next_lookup.replace(false) {
            return Ok(None);
        }
        self.inner.group_by_label(scope, label)
    }

    fn groups_in_scope(&self, scope: ScopeId) -> Result<Vec<GroupRecord>, StoreError> {
        self.inner.groups_in_scope(scope)
    }

    fn update_group(&mut self, record: &GroupRecord) -> Result<(), StoreError> {
        self.inner.update_group(record)
    }

    fn delete_group(&mut self, id: GroupId) -> Result<bool, StoreError> {
        self.inner.delete_group(id)
    }
}

#[test]
fn losing_a_creation_race_adopts_the_existing_group() {
    let mut inner = MemoryStore::new();
    let record = inner
        .insert_rule_set(
            SCOPE,
            ClassifierConfig::profile_field("department"),
            BTreeSet::new(),
        )
        .unwrap();
    // The concurrent winner's row.
    let existing = inner
        .insert_group(
            SCOPE,
            Some(&format!("grouper|{}|sales", record.id)),
            "Sales",
        )
        .unwrap();

    let mut store = RacyStore {
        inner,
        hide_next_lookup: Cell::new(true),
    };
    let adopted = group::find_or_create(&mut store, &record, "Sales").unwrap();
    assert_eq!(adopted.id, existing.id);
}

#[test]
fn find_or_create_refreshes_a_drifted_display_name() {
    let mut store = MemoryStore::new();
    let record = store
        .insert_rule_set(
            SCOPE,
            ClassifierConfig::profile_field("department"),
            BTreeSet::new(),
        )
        .unwrap();

    let group = group::find_or_create(&mut store, &record, "sales").unwrap();
    assert_eq!(group.name, "Sales");

    let mut renamed = group.clone();
    renamed.name = "Renamed by hand".to_string();
    store.update_group(&renamed).unwrap();

    let refreshed = group::find_or_create(&mut store, &record, "sales").unwrap();
    assert_eq!(refreshed.id, group.id);
    assert_eq!(refreshed.name, "Sales");
}

#[test]
fn config_and_events_round_trip_through_serde() {
    let config = EngineConfig {
        default_classifier: ClassifierConfig::delimited("teams", Delimiter::Semicolon),
        default_eligible_roles: vec![STUDENT],
        ..EngineConfig::default()
    };
    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(serde_json::from_str::<EngineConfig>(&json).unwrap(), config);

    let event = TriggerEvent::external(Trigger::ProfileUpdated { member: ALICE });
    let value = serde_json::to_value(&event).unwrap();
    assert_eq!(
        value,
        serde_json::json!({ "trigger": { "profile_updated": { "member": 1 } } })
    );
    assert_eq!(
        serde_json::from_value::<TriggerEvent>(value).unwrap(),
        event
    );
}
