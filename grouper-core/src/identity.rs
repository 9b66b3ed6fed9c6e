// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integer identifier newtypes.
//!
//! All identities are assigned by the persistence layer; the engine never
//! invents them. The newtypes exist so a scope id can't silently stand in
//! for a group id somewhere deep in a reconciliation pass.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_type {
    ($(#[$attr:meta])* $name:ident) => {
        $(#[$attr])*
        #[derive(
            Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            pub const fn as_u64(&self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> u64 {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_type!(
    /// Identity of a member (e.g. a user). Not owned by this engine.
    MemberId
);

id_type!(
    /// Identity of a scope (e.g. a course) within which reconciliation runs.
    ScopeId
);

id_type!(
    /// Identity of a persisted group.
    GroupId
);

id_type!(
    /// Identity of a persisted rule set.
    RuleSetId
);

id_type!(
    /// Identity of a role a member can hold within a scope.
    RoleId
);
