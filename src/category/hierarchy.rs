// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Category hierarchy and its builder.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::HierarchyError;

use super::EventCategory;

/// Source of process-unique hierarchy identities.
static NEXT_HIERARCHY_ID: AtomicU64 = AtomicU64::new(1);

/// An immutable DAG of event categories.
///
/// Built once through [`HierarchyBuilder`] and then shared (as an `Arc`) by
/// every emitter that uses it. Only parent edges are stored; ancestor sets
/// are walked on demand with a visited set, so memory stays linear in the
/// number of edges however deep the hierarchy is.
pub struct CategoryHierarchy {
    id: u64,
    names: Vec<String>,
    parents: Vec<Vec<EventCategory>>,
    by_name: HashMap<String, EventCategory>,
}

impl CategoryHierarchy {
    /// Returns the root category, an ancestor of every category.
    #[must_use]
    pub fn root(&self) -> EventCategory {
        EventCategory::new(self.id, 0)
    }

    /// Looks up a category by its declared name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<EventCategory> {
        self.by_name.get(name).copied()
    }

    /// Returns `true` if the category belongs to this hierarchy.
    #[must_use]
    pub fn contains(&self, category: EventCategory) -> bool {
        category.hierarchy() == self.id && category.index() < self.names.len()
    }

    /// Returns the declared name of a category, if it belongs to this hierarchy.
    #[must_use]
    pub fn name(&self, category: EventCategory) -> Option<&str> {
        if !self.contains(category) {
            return None;
        }
        Some(self.names[category.index()].as_str())
    }

    /// Returns the direct parents of a category.
    ///
    /// The root has no parents. Unknown categories yield an empty slice.
    #[must_use]
    pub fn parents(&self, category: EventCategory) -> &[EventCategory] {
        if !self.contains(category) {
            return &[];
        }
        &self.parents[category.index()]
    }

    /// Returns every category reachable through parent edges, including the
    /// category itself and the root.
    ///
    /// Returns `None` for a category from another hierarchy.
    #[must_use]
    pub fn ancestors(&self, category: EventCategory) -> Option<HashSet<EventCategory>> {
        if !self.contains(category) {
            return None;
        }
        let mut visited = HashSet::new();
        let mut pending = vec![category];
        while let Some(next) = pending.pop() {
            if visited.insert(next) {
                pending.extend(self.parents[next.index()].iter().copied());
            }
        }
        Some(visited)
    }

    /// Returns `true` if `ancestor` is among the ancestors of `category`.
    ///
    /// Every category is a descendant of itself.
    #[must_use]
    pub fn is_descendant_of(&self, category: EventCategory, ancestor: EventCategory) -> bool {
        if !self.contains(category) || !self.contains(ancestor) {
            return false;
        }
        let mut visited = HashSet::new();
        let mut pending = vec![category];
        while let Some(next) = pending.pop() {
            if next == ancestor {
                return true;
            }
            if visited.insert(next) {
                pending.extend(self.parents[next.index()].iter().copied());
            }
        }
        false
    }

    /// Returns the number of categories, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always `false`: a hierarchy contains at least its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterates over all categories in declaration order, root first.
    pub fn categories(&self) -> impl Iterator<Item = EventCategory> + '_ {
        (0..self.names.len()).map(|index| EventCategory::new(self.id, index))
    }

    pub(crate) fn id(&self) -> u64 {
        self.id
    }
}

impl fmt::Debug for CategoryHierarchy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CategoryHierarchy")
            .field("id", &self.id)
            .field("categories", &self.names)
            .finish()
    }
}

/// Builder for [`CategoryHierarchy`].
///
/// Declarations may reference parents declared later; names are resolved in
/// [`build`](Self::build), which also rejects duplicates, unknown parents and
/// cycles.
///
/// # Examples
///
/// ```
/// use emitter_lib::category::HierarchyBuilder;
///
/// // A diamond: D has two parents that share the ancestor A.
/// let hierarchy = HierarchyBuilder::new("A")
///     .category("B", &["A"])
///     .category("C", &["A"])
///     .category("D", &["B", "C"])
///     .build()?;
///
/// let d = hierarchy.lookup("D").unwrap();
/// assert_eq!(hierarchy.ancestors(d).unwrap().len(), 4);
/// # Ok::<(), emitter_lib::error::HierarchyError>(())
/// ```
#[derive(Debug, Clone)]
pub struct HierarchyBuilder {
    root: String,
    declarations: Vec<(String, Vec<String>)>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

impl HierarchyBuilder {
    /// Creates a builder whose root category has the given name.
    #[must_use]
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            declarations: Vec::new(),
        }
    }

    /// Declares a category with the given parents.
    ///
    /// An empty parent list makes the category a direct child of the root.
    #[must_use]
    pub fn category(mut self, name: impl Into<String>, parents: &[&str]) -> Self {
        self.declarations.push((
            name.into(),
            parents.iter().map(|p| (*p).to_string()).collect(),
        ));
        self
    }

    /// Declares a category from owned parent names.
    #[must_use]
    pub fn category_owned(mut self, name: impl Into<String>, parents: Vec<String>) -> Self {
        self.declarations.push((name.into(), parents));
        self
    }

    /// Resolves all declarations into an immutable hierarchy.
    ///
    /// # Errors
    ///
    /// Returns [`HierarchyError`] if a name is empty or duplicated, a parent
    /// is unknown, or the parent edges form a cycle.
    pub fn build(self) -> Result<Arc<CategoryHierarchy>, HierarchyError> {
        let id = NEXT_HIERARCHY_ID.fetch_add(1, Ordering::Relaxed);

        let mut names = Vec::with_capacity(self.declarations.len() + 1);
        let mut by_name = HashMap::with_capacity(self.declarations.len() + 1);
        for name in std::iter::once(&self.root).chain(self.declarations.iter().map(|(n, _)| n)) {
            if name.trim().is_empty() {
                return Err(HierarchyError::EmptyName);
            }
            let category = EventCategory::new(id, names.len());
            if by_name.insert(name.clone(), category).is_some() {
                return Err(HierarchyError::DuplicateCategory(name.clone()));
            }
            names.push(name.clone());
        }

        let root = EventCategory::new(id, 0);
        let mut parents: Vec<Vec<EventCategory>> = Vec::with_capacity(names.len());
        parents.push(Vec::new());
        for (name, declared) in &self.declarations {
            let mut resolved = Vec::with_capacity(declared.len().max(1));
            for parent in declared {
                let category =
                    by_name
                        .get(parent)
                        .copied()
                        .ok_or_else(|| HierarchyError::UnknownParent {
                            category: name.clone(),
                            parent: parent.clone(),
                        })?;
                if !resolved.contains(&category) {
                    resolved.push(category);
                }
            }
            if resolved.is_empty() {
                resolved.push(root);
            }
            parents.push(resolved);
        }

        check_acyclic(&parents, &names)?;

        tracing::debug!(hierarchy = id, categories = names.len(), "Built category hierarchy");

        Ok(Arc::new(CategoryHierarchy {
            id,
            names,
            parents,
            by_name,
        }))
    }
}

/// Depth-first walk over parent edges with an explicit stack.
///
/// A node reached again while still in progress closes a cycle. Each stack
/// frame holds the node and the position of the next parent edge to follow.
fn check_acyclic(parents: &[Vec<EventCategory>], names: &[String]) -> Result<(), HierarchyError> {
    let mut marks = vec![Mark::Unvisited; parents.len()];
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for start in 0..parents.len() {
        if marks[start] != Mark::Unvisited {
            continue;
        }
        marks[start] = Mark::InProgress;
        stack.push((start, 0));

        while let Some(frame) = stack.last_mut() {
            let (node, edge) = *frame;
            let Some(parent) = parents[node].get(edge) else {
                marks[node] = Mark::Done;
                stack.pop();
                continue;
            };
            frame.1 += 1;

            let parent = parent.index();
            match marks[parent] {
                Mark::Done => {}
                Mark::InProgress => return Err(HierarchyError::Cycle(names[parent].clone())),
                Mark::Unvisited => {
                    marks[parent] = Mark::InProgress;
                    stack.push((parent, 0));
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> Arc<CategoryHierarchy> {
        HierarchyBuilder::new("A")
            .category("B", &["A"])
            .category("C", &["A"])
            .category("D", &["B", "C"])
            .build()
            .unwrap()
    }

    #[test]
    fn root_is_its_own_only_ancestor() {
        let h = HierarchyBuilder::new("BaseEvent").build().unwrap();
        let root = h.root();
        assert_eq!(h.len(), 1);
        assert_eq!(h.ancestors(root).unwrap().len(), 1);
        assert!(h.ancestors(root).unwrap().contains(&root));
        assert_eq!(h.name(root), Some("BaseEvent"));
    }

    #[test]
    fn diamond_ancestors_are_deduplicated() {
        let h = diamond();
        let d = h.lookup("D").unwrap();
        let ancestors = h.ancestors(d).unwrap();

        let expected: HashSet<_> = ["A", "B", "C", "D"]
            .iter()
            .map(|n| h.lookup(n).unwrap())
            .collect();
        assert_eq!(ancestors, expected);
    }

    #[test]
    fn descendant_relation_is_directional() {
        let h = diamond();
        let a = h.lookup("A").unwrap();
        let b = h.lookup("B").unwrap();
        let c = h.lookup("C").unwrap();
        let d = h.lookup("D").unwrap();

        assert!(h.is_descendant_of(d, a));
        assert!(h.is_descendant_of(d, b));
        assert!(h.is_descendant_of(d, d));
        assert!(!h.is_descendant_of(a, d));
        assert!(!h.is_descendant_of(b, c));
    }

    #[test]
    fn empty_parents_default_to_root() {
        let h = HierarchyBuilder::new("BaseEvent")
            .category("Opened", &[])
            .build()
            .unwrap();
        let opened = h.lookup("Opened").unwrap();
        assert_eq!(h.parents(opened), &[h.root()]);
    }

    #[test]
    fn forward_parent_references_resolve() {
        let h = HierarchyBuilder::new("Base")
            .category("Leaf", &["Middle"])
            .category("Middle", &[])
            .build()
            .unwrap();
        let leaf = h.lookup("Leaf").unwrap();
        let middle = h.lookup("Middle").unwrap();
        assert!(h.is_descendant_of(leaf, middle));
        assert!(h.is_descendant_of(leaf, h.root()));
    }

    #[test]
    fn duplicate_parents_collapse() {
        let h = HierarchyBuilder::new("Base")
            .category("X", &["Base", "Base"])
            .build()
            .unwrap();
        let x = h.lookup("X").unwrap();
        assert_eq!(h.parents(x).len(), 1);
    }

    #[test]
    fn rejects_cycles() {
        let err = HierarchyBuilder::new("Base")
            .category("X", &["Y"])
            .category("Y", &["X"])
            .build()
            .unwrap_err();
        assert!(matches!(err, HierarchyError::Cycle(_)));
    }

    #[test]
    fn rejects_self_parent() {
        let err = HierarchyBuilder::new("Base")
            .category("X", &["X"])
            .build()
            .unwrap_err();
        assert_eq!(err, HierarchyError::Cycle("X".to_string()));
    }

    #[test]
    fn rejects_unknown_parent() {
        let err = HierarchyBuilder::new("Base")
            .category("X", &["Missing"])
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            HierarchyError::UnknownParent {
                category: "X".to_string(),
                parent: "Missing".to_string(),
            }
        );
    }

    #[test]
    fn rejects_duplicate_and_empty_names() {
        let dup = HierarchyBuilder::new("Base")
            .category("Base", &[])
            .build()
            .unwrap_err();
        assert_eq!(dup, HierarchyError::DuplicateCategory("Base".to_string()));

        let empty = HierarchyBuilder::new("Base")
            .category("  ", &[])
            .build()
            .unwrap_err();
        assert_eq!(empty, HierarchyError::EmptyName);
    }

    #[test]
    fn foreign_categories_are_not_contained() {
        let first = diamond();
        let second = diamond();
        let foreign = second.lookup("D").unwrap();

        assert!(!first.contains(foreign));
        assert!(first.ancestors(foreign).is_none());
        assert!(first.name(foreign).is_none());
        assert!(!first.is_descendant_of(foreign, second.root()));
    }

    /// `C{n}` has parent `C{n-1}`, declared leaf first.
    fn reverse_chain(depth: usize) -> HierarchyBuilder {
        (0..depth).rev().fold(HierarchyBuilder::new("Base"), |builder, n| {
            let parent = if n == 0 {
                "Base".to_string()
            } else {
                format!("C{}", n - 1)
            };
            builder.category_owned(format!("C{n}"), vec![parent])
        })
    }

    #[test]
    fn deep_chain_declared_in_reverse_builds() {
        let h = reverse_chain(100_000).build().unwrap();
        let leaf = h.lookup("C99999").unwrap();

        assert_eq!(h.len(), 100_001);
        assert!(h.is_descendant_of(leaf, h.root()));
        assert!(!h.is_descendant_of(h.root(), leaf));
        assert_eq!(h.ancestors(leaf).unwrap().len(), 100_001);
    }

    #[test]
    fn deep_cycle_is_rejected() {
        let depth = 50_000;
        let builder = (0..depth).rev().fold(HierarchyBuilder::new("Base"), |builder, n| {
            let parent = format!("C{}", (n + depth - 1) % depth);
            builder.category_owned(format!("C{n}"), vec![parent])
        });

        let err = builder.build().map(|_| ()).unwrap_err();
        assert!(matches!(err, HierarchyError::Cycle(_)));
    }

    #[test]
    fn categories_iterate_root_first() {
        let h = diamond();
        let names: Vec<_> = h.categories().filter_map(|c| h.name(c)).collect();
        assert_eq!(names, vec!["A", "B", "C", "D"]);
    }
}
