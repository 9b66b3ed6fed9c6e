// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::HashMap;

use crate::identity::MemberId;

/// Read-only snapshot of a member's attributes for one reconciliation pass.
///
/// The engine never owns member lifecycle; a snapshot is assembled by the
/// roster collaborator from whatever attribute sources the host has
/// (profile fields, custom fields) and consumed only through
/// [`MemberSnapshot::attribute`].
#[derive(Clone, Debug, Default)]
pub struct MemberSnapshot {
    id: MemberId,
    attributes: HashMap<String, String>,
}

impl MemberSnapshot {
    pub fn new(id: MemberId) -> Self {
        Self {
            id,
            attributes: HashMap::new(),
        }
    }

    /// Attach an attribute value, consuming and returning the snapshot.
    pub fn with_attribute(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(field.into(), value.into());
        self
    }

    pub fn id(&self) -> MemberId {
        self.id
    }

    /// Look up an attribute by field identifier.
    pub fn attribute(&self, field: &str) -> Option<&str> {
        self.attributes.get(field).map(String::as_str)
    }
}
