// SPDX-License-Identifier: MIT OR Apache-2.0

use grouper_core::{ClassifierConfig, Delimiter, MemberSnapshot};

use crate::traits::AttributeProvider;

use super::Classifier;

/// Classifies by a custom attribute field holding several delimited
/// values.
///
/// Each part of the raw string is an independent classification value;
/// parts are trimmed and empty parts dropped, so `"a, ,b"` classifies into
/// two values.
#[derive(Debug)]
pub struct DelimitedField {
    field: String,
    delimiter: Option<Delimiter>,
}

impl DelimitedField {
    pub fn new(config: &ClassifierConfig) -> Self {
        Self {
            field: config.field.clone(),
            delimiter: config.delimiter,
        }
    }
}

impl Classifier for DelimitedField {
    fn options(&self, provider: &dyn AttributeProvider) -> Vec<(String, String)> {
        provider.attribute_fields()
    }

    fn validate(&self, provider: &dyn AttributeProvider) -> bool {
        self.delimiter.is_some()
            && provider
                .attribute_fields()
                .iter()
                .any(|(field, _)| *field == self.field)
    }

    fn classify(&self, member: &MemberSnapshot) -> Vec<String> {
        let Some(delimiter) = self.delimiter else {
            return Vec::new();
        };
        let Some(raw) = member.attribute(&self.field) else {
            return Vec::new();
        };

        raw.split(delimiter.as_char())
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect()
    }

    fn describe_grouping(&self, provider: &dyn AttributeProvider) -> Option<String> {
        self.delimiter?;
        provider
            .attribute_fields()
            .into_iter()
            .find(|(field, _)| *field == self.field)
            .map(|(_, display)| display)
    }
}
