// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the emitter library.
//!
//! Structural mistakes (emitting an unknown category, declaring a cyclic
//! hierarchy, entering a subscription scope twice) are reported synchronously
//! at the call site. Failures inside callbacks are never represented here:
//! they stay inside the spawned task that ran the callback.

use thiserror::Error;

use crate::category::EventCategory;
use crate::subscription::SubscriptionId;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// An event was emitted whose category is not part of the emitter's hierarchy.
    #[error("invalid event: category {category} is not part of this emitter's hierarchy")]
    InvalidEvent {
        /// The unrecognized category.
        category: EventCategory,
    },

    /// A listener was registered for a category outside the emitter's hierarchy.
    #[error("invalid category: {0} is not part of this emitter's hierarchy")]
    InvalidCategory(EventCategory),

    /// Two emitters built on different hierarchies cannot proxy each other.
    #[error("cannot proxy between emitters with different category hierarchies")]
    HierarchyMismatch,

    /// A subscription scope was entered while already active.
    #[error("cannot double-enter the scope of subscription {0}")]
    DoubleScopeEntry(SubscriptionId),

    /// The category hierarchy declaration is malformed.
    #[error("hierarchy error: {0}")]
    Hierarchy(#[from] HierarchyError),

    /// A hierarchy definition document could not be parsed.
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Errors detected while building a category hierarchy.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HierarchyError {
    /// A category name is empty or whitespace.
    #[error("category names must not be empty")]
    EmptyName,

    /// The same category name was declared more than once.
    #[error("category {0:?} is declared more than once")]
    DuplicateCategory(String),

    /// A category lists a parent that was never declared.
    #[error("category {category:?} names unknown parent {parent:?}")]
    UnknownParent {
        /// The category declaring the parent.
        category: String,
        /// The missing parent name.
        parent: String,
    },

    /// Following parent edges from this category leads back to it.
    #[error("category {0:?} is part of a parent cycle")]
    Cycle(String),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hierarchy_error_display() {
        let err = HierarchyError::UnknownParent {
            category: "Opened".to_string(),
            parent: "Connection".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "category \"Opened\" names unknown parent \"Connection\""
        );
    }

    #[test]
    fn error_from_hierarchy_error() {
        let err: Error = HierarchyError::Cycle("A".to_string()).into();
        assert!(matches!(err, Error::Hierarchy(HierarchyError::Cycle(ref n)) if n == "A"));
    }

    #[test]
    fn error_from_json_error() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: Error = json_err.into();
        assert!(err.to_string().starts_with("config error:"));
    }
}
