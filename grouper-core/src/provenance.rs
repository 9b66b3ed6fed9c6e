// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt;

use serde::{Deserialize, Serialize};

/// Tag the engine attaches to every membership mutation it performs.
const ENGINE_TAG: &str = "grouper_engine";

/// Origin of a membership mutation or of the trigger event echoing it.
///
/// Every mutation request the engine issues carries
/// [`Provenance::engine`]; inbound triggers are checked against it by
/// exact tag equality before any action runs, so the engine's own writes
/// can never re-trigger it.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Provenance(String);

impl Provenance {
    /// Provenance of mutations performed by this engine.
    pub fn engine() -> Self {
        Self(ENGINE_TAG.to_string())
    }

    /// Provenance of an external actor (an admin UI, an import job, ...).
    pub fn external(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn is_engine(&self) -> bool {
        self.0 == ENGINE_TAG
    }

    pub fn tag(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
