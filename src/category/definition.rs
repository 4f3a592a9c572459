// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Serializable hierarchy definitions.
//!
//! Applications that keep their event taxonomy in configuration can describe
//! it as JSON and turn it into a [`CategoryHierarchy`]:
//!
//! ```json
//! {
//!   "root": "BaseEvent",
//!   "categories": [
//!     { "name": "Connection" },
//!     { "name": "Opened", "parents": ["Connection"] }
//!   ]
//! }
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Result;

use super::{CategoryHierarchy, HierarchyBuilder};

const DEFAULT_ROOT: &str = "BaseEvent";

fn default_root() -> String {
    DEFAULT_ROOT.to_string()
}

/// One category entry of a [`HierarchyDefinition`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDefinition {
    /// Category name, unique within the hierarchy.
    pub name: String,
    /// Parent category names. Empty means a direct child of the root.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parents: Vec<String>,
}

/// A declarative description of a category hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyDefinition {
    /// Name of the root category. Defaults to `BaseEvent`.
    #[serde(default = "default_root")]
    pub root: String,
    /// Non-root categories in any order.
    #[serde(default)]
    pub categories: Vec<CategoryDefinition>,
}

impl HierarchyDefinition {
    /// Parses a definition from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::Error::Config) if the document is not
    /// valid JSON or does not match the expected shape.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the definition as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::Error::Config) if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Converts the definition into a builder.
    #[must_use]
    pub fn into_builder(self) -> HierarchyBuilder {
        self.categories
            .into_iter()
            .fold(HierarchyBuilder::new(self.root), |builder, def| {
                builder.category_owned(def.name, def.parents)
            })
    }

    /// Builds the hierarchy described by this definition.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Hierarchy`](crate::Error::Hierarchy) if the
    /// definition is malformed.
    pub fn build(self) -> Result<Arc<CategoryHierarchy>> {
        Ok(self.into_builder().build()?)
    }
}

impl Default for HierarchyDefinition {
    fn default() -> Self {
        Self {
            root: default_root(),
            categories: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, HierarchyError};

    #[test]
    fn parses_json_with_default_root() {
        let def = HierarchyDefinition::from_json(
            r#"{ "categories": [
                { "name": "Connection" },
                { "name": "Opened", "parents": ["Connection"] }
            ] }"#,
        )
        .unwrap();

        assert_eq!(def.root, "BaseEvent");
        assert_eq!(def.categories.len(), 2);
        assert!(def.categories[0].parents.is_empty());

        let h = def.build().unwrap();
        let opened = h.lookup("Opened").unwrap();
        let connection = h.lookup("Connection").unwrap();
        assert!(h.is_descendant_of(opened, connection));
        assert_eq!(h.name(h.root()), Some("BaseEvent"));
    }

    #[test]
    fn invalid_json_is_config_error() {
        let err = HierarchyDefinition::from_json("{ categories: ").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn cyclic_definition_is_hierarchy_error() {
        let def = HierarchyDefinition {
            root: "Root".to_string(),
            categories: vec![
                CategoryDefinition {
                    name: "X".to_string(),
                    parents: vec!["Y".to_string()],
                },
                CategoryDefinition {
                    name: "Y".to_string(),
                    parents: vec!["X".to_string()],
                },
            ],
        };
        let err = def.build().unwrap_err();
        assert!(matches!(err, Error::Hierarchy(HierarchyError::Cycle(_))));
    }

    #[test]
    fn json_output_parses_back() {
        let def = HierarchyDefinition {
            root: "Root".to_string(),
            categories: vec![CategoryDefinition {
                name: "Child".to_string(),
                parents: Vec::new(),
            }],
        };
        let json = def.to_json().unwrap();
        assert!(!json.contains("parents"));
        assert_eq!(HierarchyDefinition::from_json(&json).unwrap(), def);
    }
}
