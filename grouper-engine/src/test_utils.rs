// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use grouper_core::{MemberId, MemberSnapshot, RoleId, ScopeId};

use crate::traits::{AttributeProvider, Roster};

/// In-memory roster and attribute source for tests and examples.
#[derive(Debug, Default)]
pub struct TestRoster {
    scopes: BTreeSet<ScopeId>,
    enrolments: BTreeMap<(ScopeId, MemberId), Vec<RoleId>>,
    attributes: HashMap<MemberId, Vec<(String, String)>>,
    members: BTreeSet<MemberId>,
    fields: Vec<(String, String)>,
}

impl TestRoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_scope(&mut self, scope: ScopeId) {
        self.scopes.insert(scope);
    }

    /// Enrol a member in a scope with a role.
    pub fn enrol(&mut self, scope: ScopeId, member: MemberId, role: RoleId) {
        self.scopes.insert(scope);
        self.members.insert(member);
        self.enrolments.entry((scope, member)).or_default().push(role);
    }

    /// Replace a member's roles in a scope.
    pub fn set_roles(&mut self, scope: ScopeId, member: MemberId, roles: Vec<RoleId>) {
        self.scopes.insert(scope);
        self.members.insert(member);
        self.enrolments.insert((scope, member), roles);
    }

    /// Set a member attribute, replacing any previous value of the field.
    pub fn set_attribute(
        &mut self,
        member: MemberId,
        field: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.members.insert(member);
        let field = field.into();
        let attributes = self.attributes.entry(member).or_default();
        attributes.retain(|(existing, _)| *existing != field);
        attributes.push((field, value.into()));
    }

    /// Declare a custom attribute field available to classifiers.
    pub fn add_field(&mut self, field: impl Into<String>, display: impl Into<String>) {
        self.fields.push((field.into(), display.into()));
    }
}

impl Roster for TestRoster {
    fn scope_exists(&self, scope: ScopeId) -> bool {
        self.scopes.contains(&scope)
    }

    fn members_of(&self, scope: ScopeId) -> Vec<MemberId> {
        self.enrolments
            .keys()
            .filter(|(enrolled_scope, _)| *enrolled_scope == scope)
            .map(|(_, member)| *member)
            .collect()
    }

    fn scopes_of(&self, member: MemberId) -> Vec<ScopeId> {
        self.enrolments
            .keys()
            .filter(|(_, enrolled_member)| *enrolled_member == member)
            .map(|(scope, _)| *scope)
            .collect()
    }

    fn roles(&self, scope: ScopeId, member: MemberId) -> Vec<RoleId> {
        self.enrolments
            .get(&(scope, member))
            .cloned()
            .unwrap_or_default()
    }

    fn snapshot(&self, member: MemberId) -> Option<MemberSnapshot> {
        if !self.members.contains(&member) {
            return None;
        }
        let mut snapshot = MemberSnapshot::new(member);
        if let Some(attributes) = self.attributes.get(&member) {
            for (field, value) in attributes {
                snapshot = snapshot.with_attribute(field.clone(), value.clone());
            }
        }
        Some(snapshot)
    }
}

impl AttributeProvider for TestRoster {
    fn attribute_fields(&self) -> Vec<(String, String)> {
        self.fields.clone()
    }
}

#[cfg(feature = "test_utils")]
pub fn setup_logging() {
    if std::env::var("RUST_LOG").is_ok() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    }
}
