// SPDX-License-Identifier: MIT OR Apache-2.0

use grouper_core::{ClassifierConfig, MemberSnapshot};

use crate::traits::AttributeProvider;

use super::Classifier;

/// The fixed option set of the built-in attribute module.
pub const BUILTIN_FIELDS: [(&str, &str); 4] = [
    ("department", "Department"),
    ("institution", "Institution"),
    ("city", "City"),
    ("lang", "Preferred language"),
];

/// Classifies by one enumerated built-in attribute.
#[derive(Debug)]
pub struct BuiltinAttribute {
    field: String,
}

impl BuiltinAttribute {
    pub fn new(config: &ClassifierConfig) -> Self {
        Self {
            field: config.field.clone(),
        }
    }

    fn display_name(&self) -> Option<&'static str> {
        BUILTIN_FIELDS
            .iter()
            .find(|(field, _)| *field == self.field)
            .map(|(_, display)| *display)
    }
}

impl Classifier for BuiltinAttribute {
    fn options(&self, _provider: &dyn AttributeProvider) -> Vec<(String, String)> {
        BUILTIN_FIELDS
            .iter()
            .map(|(field, display)| (field.to_string(), display.to_string()))
            .collect()
    }

    fn validate(&self, _provider: &dyn AttributeProvider) -> bool {
        self.display_name().is_some()
    }

    fn classify(&self, member: &MemberSnapshot) -> Vec<String> {
        if self.display_name().is_none() {
            return Vec::new();
        }

        match member.attribute(&self.field).map(str::trim) {
            Some(value) if !value.is_empty() => vec![value.to_string()],
            _ => Vec::new(),
        }
    }

    fn describe_grouping(&self, _provider: &dyn AttributeProvider) -> Option<String> {
        self.display_name().map(str::to_string)
    }
}
