// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persisted record types.
//!
//! Identity is assigned by the store on insert; records fetched from a
//! store always carry theirs.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::classifier::ClassifierConfig;
use crate::identity::{GroupId, MemberId, RoleId, RuleSetId, ScopeId};
use crate::label::GroupLabel;

/// A rule set: one classification choice plus eligibility criteria,
/// owned by a scope.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RuleSetRecord {
    pub id: RuleSetId,

    /// Scope this rule set manages groups in.
    pub scope: ScopeId,

    pub config: ClassifierConfig,

    /// Allow-list of roles a member must hold (at least one) within the
    /// scope to be classified at all.
    pub eligible_roles: BTreeSet<RoleId>,
}

/// A group row. Membership is kept in separate records.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroupRecord {
    pub id: GroupId,

    pub scope: ScopeId,

    /// Raw provenance label. `None` for groups this engine does not
    /// manage, including groups it disassociated. The raw string is kept
    /// as stored: a label may carry the managed marker yet fail to decode
    /// (e.g. after its rule set was deleted), which is exactly the
    /// orphan condition lifecycle checks look for.
    pub label: Option<String>,

    pub name: String,
}

impl GroupRecord {
    /// Whether the label carries the managed-namespace marker, decodable
    /// or not.
    pub fn has_managed_marker(&self) -> bool {
        self.label
            .as_deref()
            .is_some_and(GroupLabel::has_managed_marker)
    }

    /// The decoded label, if it decodes.
    pub fn decoded_label(&self) -> Option<GroupLabel> {
        self.label.as_deref().and_then(|raw| raw.parse().ok())
    }
}

/// Record of a membership added by an external actor to a managed group.
///
/// While the preserve-manual setting is enabled, existence of this record
/// suppresses automatic removal of the membership regardless of
/// classification outcome.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct ManualAssignment {
    pub member: MemberId,
    pub group: GroupId,
}
