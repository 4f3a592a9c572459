// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Emitter builder.

use std::sync::Arc;

use tokio::runtime::Handle;

use crate::category::CategoryHierarchy;
use crate::event::EmitterId;

use super::Emitter;

/// Builder for [`Emitter`].
///
/// The runtime handle is the scheduler on which every callback registered
/// with the emitter is spawned. It is always passed explicitly.
///
/// # Examples
///
/// ```
/// use emitter_lib::Emitter;
/// use emitter_lib::category::HierarchyBuilder;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> emitter_lib::Result<()> {
/// let hierarchy = HierarchyBuilder::new("BaseEvent").build()?;
/// let emitter = Emitter::builder(hierarchy, tokio::runtime::Handle::current())
///     .with_name("connection")
///     .build();
///
/// assert_eq!(emitter.name(), Some("connection"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct EmitterBuilder {
    hierarchy: Arc<CategoryHierarchy>,
    runtime: Handle,
    name: Option<String>,
    id: Option<EmitterId>,
}

impl EmitterBuilder {
    pub(crate) fn new(hierarchy: Arc<CategoryHierarchy>, runtime: Handle) -> Self {
        Self {
            hierarchy,
            runtime,
            name: None,
            id: None,
        }
    }

    /// Sets a human-readable name, used in log records.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Uses a fixed identity instead of a freshly generated one.
    #[must_use]
    pub fn with_id(mut self, id: EmitterId) -> Self {
        self.id = Some(id);
        self
    }

    /// Builds the emitter.
    #[must_use]
    pub fn build(self) -> Emitter {
        Emitter::from_parts(
            self.id.unwrap_or_default(),
            self.name,
            self.hierarchy,
            self.runtime,
        )
    }
}
