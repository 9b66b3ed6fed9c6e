// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provenance labels of managed groups.
//!
//! A managed group carries a label of the form
//! `grouper|<rule-set-id>|<classification-value>`. The label is both the
//! uniqueness key of the group within its scope and the marker
//! distinguishing managed ("auto") groups from groups an administrator
//! created or repurposed by hand.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::identity::RuleSetId;

/// Namespace marker prefixing every managed group label.
pub const LABEL_NAMESPACE: &str = "grouper";

const SEPARATOR: char = '|';

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LabelError {
    #[error("classification value is empty after trimming")]
    EmptyValue,

    #[error("label {0:?} does not carry the managed-namespace marker")]
    MissingNamespace(String),

    #[error("label {0:?} is not of the form namespace|rule-set|value")]
    Malformed(String),

    #[error("label rule set id {0:?} is not a positive integer")]
    InvalidRuleSetId(String),
}

/// Decoded provenance label of a managed group.
///
/// The classification value is stored trimmed and lowercased, so values
/// differing only in case or surrounding whitespace map to the same label
/// and therefore to the same group.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct GroupLabel {
    rule_set: RuleSetId,
    value: String,
}

impl GroupLabel {
    /// Build the label for a classification value under a rule set.
    pub fn new(rule_set: RuleSetId, raw_value: &str) -> Result<Self, LabelError> {
        let value = raw_value.trim().to_lowercase();
        if value.is_empty() {
            return Err(LabelError::EmptyValue);
        }

        Ok(Self { rule_set, value })
    }

    /// Rule set this label claims ownership by.
    pub fn rule_set(&self) -> RuleSetId {
        self.rule_set
    }

    /// Normalized classification value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Wire form of the label, used as the persisted uniqueness key.
    pub fn encode(&self) -> String {
        format!("{LABEL_NAMESPACE}{SEPARATOR}{}{SEPARATOR}{}", self.rule_set, self.value)
    }

    /// Display name derived from the normalized classification value.
    ///
    /// Prefer [`display_name`] on the raw value where it is still around;
    /// this variant has only the lowercased form to work from.
    pub fn display_name(&self) -> String {
        display_name(&self.value)
    }

    /// Whether a raw label string carries the managed-namespace marker.
    ///
    /// A `true` here does not mean the label decodes: a group renamed by an
    /// administrator may keep the marker while the rule set id no longer
    /// parses. Use [`GroupLabel::from_str`] to find out.
    pub fn has_managed_marker(raw: &str) -> bool {
        raw.split(SEPARATOR).next() == Some(LABEL_NAMESPACE)
    }
}

/// Display name for a classification value: trimmed, first character
/// uppercased.
pub fn display_name(raw_value: &str) -> String {
    let mut chars = raw_value.trim().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl FromStr for GroupLabel {
    type Err = LabelError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let mut parts = raw.splitn(3, SEPARATOR);

        let namespace = parts.next().unwrap_or_default();
        if namespace != LABEL_NAMESPACE {
            return Err(LabelError::MissingNamespace(raw.to_string()));
        }

        let (Some(rule_set), Some(value)) = (parts.next(), parts.next()) else {
            return Err(LabelError::Malformed(raw.to_string()));
        };

        let rule_set: u64 = rule_set
            .parse()
            .map_err(|_| LabelError::InvalidRuleSetId(rule_set.to_string()))?;
        if rule_set == 0 {
            return Err(LabelError::InvalidRuleSetId(rule_set.to_string()));
        }

        if value.trim().is_empty() {
            return Err(LabelError::EmptyValue);
        }

        Ok(Self {
            rule_set: RuleSetId::new(rule_set),
            value: value.to_string(),
        })
    }
}

impl fmt::Display for GroupLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.encode())
    }
}
