// SPDX-License-Identifier: MIT OR Apache-2.0

use grouper_core::{ClassifierConfig, MemberSnapshot};

use crate::traits::AttributeProvider;

use super::Classifier;

/// Classifies by one externally-defined custom attribute field.
#[derive(Debug)]
pub struct ProfileField {
    field: String,
}

impl ProfileField {
    pub fn new(config: &ClassifierConfig) -> Self {
        Self {
            field: config.field.clone(),
        }
    }
}

impl Classifier for ProfileField {
    fn options(&self, provider: &dyn AttributeProvider) -> Vec<(String, String)> {
        provider.attribute_fields()
    }

    fn validate(&self, provider: &dyn AttributeProvider) -> bool {
        provider
            .attribute_fields()
            .iter()
            .any(|(field, _)| *field == self.field)
    }

    fn classify(&self, member: &MemberSnapshot) -> Vec<String> {
        match member.attribute(&self.field).map(str::trim) {
            Some(value) if !value.is_empty() => vec![value.to_string()],
            _ => Vec::new(),
        }
    }

    fn describe_grouping(&self, provider: &dyn AttributeProvider) -> Option<String> {
        provider
            .attribute_fields()
            .into_iter()
            .find(|(field, _)| *field == self.field)
            .map(|(_, display)| display)
    }
}
