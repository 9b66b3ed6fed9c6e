// SPDX-License-Identifier: MIT OR Apache-2.0

use grouper_core::{ClassifierConfig, RoleId};
use serde::{Deserialize, Serialize};

/// Global engine configuration.
///
/// Injected into [`crate::Manager`] at construction and read at trigger
/// time; there is no global configuration access anywhere in the engine.
/// Lifecycle is process start to shutdown.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// React to role grants and enrolments.
    pub listen_role_changes: bool,

    /// React to externally added or removed group memberships.
    pub listen_group_membership: bool,

    /// React to member attribute changes.
    pub listen_profile_changes: bool,

    /// React to external group creation and renaming.
    pub listen_group_changes: bool,

    /// Instantiate a default rule set in newly created scopes.
    pub add_to_new_scopes: bool,

    /// Instantiate a default rule set in restored scopes.
    pub add_to_restored_scopes: bool,

    /// Protect memberships added by external actors from automatic
    /// removal.
    pub preserve_manual: bool,

    /// Classifier used when instantiating a default rule set.
    pub default_classifier: ClassifierConfig,

    /// Eligibility allow-list of a default rule set.
    pub default_eligible_roles: Vec<RoleId>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            listen_role_changes: true,
            listen_group_membership: true,
            listen_profile_changes: true,
            listen_group_changes: true,
            add_to_new_scopes: false,
            add_to_restored_scopes: false,
            preserve_manual: true,
            default_classifier: ClassifierConfig::builtin("department"),
            default_eligible_roles: Vec::new(),
        }
    }
}
