// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event categories and the hierarchy that relates them.
//!
//! Categories form a directed acyclic graph rooted at a single root category
//! (conventionally `BaseEvent`). A category may have several parents, so
//! diamond shapes are legal: a listener on a shared ancestor still matches an
//! event exactly once.
//!
//! # Examples
//!
//! ```
//! use emitter_lib::category::HierarchyBuilder;
//!
//! let hierarchy = HierarchyBuilder::new("BaseEvent")
//!     .category("Connection", &[])
//!     .category("Opened", &["Connection"])
//!     .category("Closed", &["Connection"])
//!     .build()?;
//!
//! let opened = hierarchy.lookup("Opened").unwrap();
//! let connection = hierarchy.lookup("Connection").unwrap();
//! assert!(hierarchy.is_descendant_of(opened, connection));
//! assert!(hierarchy.is_descendant_of(opened, hierarchy.root()));
//! # Ok::<(), emitter_lib::Error>(())
//! ```

mod definition;
mod event_category;
mod hierarchy;

pub use definition::{CategoryDefinition, HierarchyDefinition};
pub use event_category::EventCategory;
pub use hierarchy::{CategoryHierarchy, HierarchyBuilder};
