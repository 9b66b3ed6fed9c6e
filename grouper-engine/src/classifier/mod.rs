// SPDX-License-Identifier: MIT OR Apache-2.0

//! Classification modules.
//!
//! A classifier maps a member's attributes to zero or more classification
//! values; each value implies membership of one managed group. The set of
//! modules is closed: [`build`] is a static registry keyed by
//! [`ClassifierKind`], there is no runtime discovery of implementations.

mod builtin;
mod delimited;
mod profile_field;

use grouper_core::{ClassifierConfig, ClassifierKind, MemberSnapshot};

use crate::traits::AttributeProvider;

pub use builtin::{BuiltinAttribute, BUILTIN_FIELDS};
pub use delimited::DelimitedField;
pub use profile_field::ProfileField;

/// A configured classification module.
///
/// A module never errors on a bad configuration: an invalid or missing
/// config makes [`Classifier::classify`] return nothing, so the member is
/// simply eligible for no managed group under the rule. Configuration
/// validity is enforced up front, when an administrative operation tries
/// to persist the config.
pub trait Classifier {
    /// Valid configuration choices for this module: field identifier and
    /// display name.
    fn options(&self, provider: &dyn AttributeProvider) -> Vec<(String, String)>;

    /// Whether the configured field is one of the declared options.
    fn validate(&self, provider: &dyn AttributeProvider) -> bool;

    /// Classification values for a member, in attribute order.
    fn classify(&self, member: &MemberSnapshot) -> Vec<String>;

    /// Display label of the configured grouping, if the config resolves.
    fn describe_grouping(&self, provider: &dyn AttributeProvider) -> Option<String>;
}

/// Static module registry: resolve a persisted config to its module.
pub fn build(config: &ClassifierConfig) -> Box<dyn Classifier> {
    match config.kind {
        ClassifierKind::BuiltinAttribute => Box::new(BuiltinAttribute::new(config)),
        ClassifierKind::ProfileField => Box::new(ProfileField::new(config)),
        ClassifierKind::DelimitedField => Box::new(DelimitedField::new(config)),
    }
}
