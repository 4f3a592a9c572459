// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event category identifier.

use std::fmt;

/// Identifies one category node inside a [`CategoryHierarchy`].
///
/// Categories are cheap `Copy` handles. Each one remembers which hierarchy
/// produced it, so a category from one hierarchy is never mistaken for a
/// category of another.
///
/// [`CategoryHierarchy`]: super::CategoryHierarchy
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventCategory {
    hierarchy: u64,
    index: usize,
}

impl EventCategory {
    pub(crate) fn new(hierarchy: u64, index: usize) -> Self {
        Self { hierarchy, index }
    }

    pub(crate) fn hierarchy(self) -> u64 {
        self.hierarchy
    }

    pub(crate) fn index(self) -> usize {
        self.index
    }
}

impl fmt::Debug for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventCategory({}:{})", self.hierarchy, self.index)
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Category({}:{})", self.hierarchy, self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_from_different_hierarchies_differ() {
        assert_ne!(EventCategory::new(1, 0), EventCategory::new(2, 0));
        assert_eq!(EventCategory::new(1, 3), EventCategory::new(1, 3));
    }

    #[test]
    fn display_includes_hierarchy_and_index() {
        assert_eq!(EventCategory::new(7, 2).to_string(), "Category(7:2)");
    }
}
