// SPDX-License-Identifier: MIT OR Apache-2.0

//! Classifier configuration data.
//!
//! The behavior lives in `grouper-engine::classifier`; these types are the
//! persisted shape of a rule set's classification choice.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which classification module a rule set uses.
///
/// This is a closed set: modules are resolved through a static registry,
/// there is no dynamic discovery of implementations.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierKind {
    /// One enumerated built-in attribute with a fixed option set.
    BuiltinAttribute,
    /// One externally-defined custom attribute field.
    ProfileField,
    /// A custom attribute field holding several delimited values.
    DelimitedField,
}

/// Delimiter accepted by the multi-value classifier.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Delimiter {
    Comma,
    Pipe,
    Semicolon,
}

impl Delimiter {
    pub const fn as_char(&self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Pipe => '|',
            Delimiter::Semicolon => ';',
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Persisted classification choice of a rule set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    pub kind: ClassifierKind,

    /// Attribute field the module reads, one of the module's declared
    /// options.
    pub field: String,

    /// Required by [`ClassifierKind::DelimitedField`], ignored otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<Delimiter>,
}

impl ClassifierConfig {
    pub fn builtin(field: impl Into<String>) -> Self {
        Self {
            kind: ClassifierKind::BuiltinAttribute,
            field: field.into(),
            delimiter: None,
        }
    }

    pub fn profile_field(field: impl Into<String>) -> Self {
        Self {
            kind: ClassifierKind::ProfileField,
            field: field.into(),
            delimiter: None,
        }
    }

    pub fn delimited(field: impl Into<String>, delimiter: Delimiter) -> Self {
        Self {
            kind: ClassifierKind::DelimitedField,
            field: field.into(),
            delimiter: Some(delimiter),
        }
    }
}
