//! Selection: which elements the student has picked.
//!
//! Every selected id carries an explicit [`ElementKind`]; the kind of a hit is
//! decided by the hit-tester, never inferred from the id's spelling.

#[cfg(test)]
#[path = "selection_test.rs"]
mod selection_test;

use std::collections::BTreeSet;

use crate::doc::ObjectId;

/// Kind of a selectable element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ElementKind {
    Point,
    Edge,
    Face,
    Label,
}

/// An element id tagged with its kind.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementRef {
    pub id: ObjectId,
    pub kind: ElementKind,
}

impl ElementRef {
    #[must_use]
    pub fn new(id: impl Into<ObjectId>, kind: ElementKind) -> Self {
        Self { id: id.into(), kind }
    }
}

/// Set of selected elements.
///
/// Pointer interaction only ever produces an empty or singleton set; the set
/// type exists so hosts can restore richer selections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    items: BTreeSet<ElementRef>,
}

impl SelectionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Click-select `target`.
    ///
    /// If `target` is already the only selected element, the selection is
    /// cleared. Otherwise the selection becomes exactly `{target}`. Returns
    /// true when `target` ends up selected.
    pub fn toggle_single(&mut self, target: ElementRef) -> bool {
        if self.items.len() == 1 && self.items.contains(&target) {
            self.items.clear();
            return false;
        }
        self.replace(target);
        true
    }

    /// Make the selection exactly `{target}`.
    pub fn replace(&mut self, target: ElementRef) {
        self.items.clear();
        self.items.insert(target);
    }

    /// Add `target` without disturbing the rest of the selection.
    pub fn insert(&mut self, target: ElementRef) {
        self.items.insert(target);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    #[must_use]
    pub fn contains(&self, id: &str, kind: ElementKind) -> bool {
        self.items.iter().any(|r| r.kind == kind && r.id == id)
    }

    /// The single selected element, if exactly one is selected.
    #[must_use]
    pub fn single(&self) -> Option<&ElementRef> {
        if self.items.len() == 1 { self.items.iter().next() } else { None }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ElementRef> {
        self.items.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
