// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Emitter identifier type.

use std::fmt;

use uuid::Uuid;

/// Unique identifier of an [`Emitter`](crate::Emitter).
///
/// An event's target is recorded as an `EmitterId` rather than a reference,
/// so events never keep emitters alive.
///
/// # Examples
///
/// ```
/// use emitter_lib::event::EmitterId;
///
/// let id = EmitterId::new();
/// println!("Emitter: {}", id);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct EmitterId(Uuid);

impl EmitterId {
    /// Creates a new unique emitter identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for EmitterId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EmitterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let short = &self.0.simple().to_string()[..8];
        write!(f, "EmitterId({short})")
    }
}

impl fmt::Display for EmitterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for EmitterId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}
