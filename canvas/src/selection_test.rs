use super::*;

fn point(id: &str) -> ElementRef {
    ElementRef::new(id, ElementKind::Point)
}

fn edge(id: &str) -> ElementRef {
    ElementRef::new(id, ElementKind::Edge)
}

// =============================================================
// toggle_single
// =============================================================

#[test]
fn toggle_selects_into_empty_set() {
    let mut sel = SelectionSet::new();
    assert!(sel.toggle_single(point("A")));
    assert_eq!(sel.single(), Some(&point("A")));
}

#[test]
fn toggle_same_target_clears() {
    let mut sel = SelectionSet::new();
    sel.toggle_single(point("A"));
    assert!(!sel.toggle_single(point("A")));
    assert!(sel.is_empty());
}

#[test]
fn toggle_other_target_replaces() {
    let mut sel = SelectionSet::new();
    sel.toggle_single(point("A"));
    assert!(sel.toggle_single(edge("AB")));
    assert_eq!(sel.len(), 1);
    assert!(sel.contains("AB", ElementKind::Edge));
    assert!(!sel.contains("A", ElementKind::Point));
}

#[test]
fn toggle_same_id_different_kind_replaces() {
    let mut sel = SelectionSet::new();
    sel.toggle_single(point("A"));
    assert!(sel.toggle_single(ElementRef::new("A", ElementKind::Label)));
    assert!(sel.contains("A", ElementKind::Label));
    assert!(!sel.contains("A", ElementKind::Point));
}

#[test]
fn toggle_member_of_larger_set_narrows_to_it() {
    let mut sel = SelectionSet::new();
    sel.insert(point("A"));
    sel.insert(point("B"));
    assert!(sel.toggle_single(point("A")));
    assert_eq!(sel.single(), Some(&point("A")));
}

// =============================================================
// Queries
// =============================================================

#[test]
fn contains_checks_kind() {
    let mut sel = SelectionSet::new();
    sel.replace(edge("AB"));
    assert!(sel.contains("AB", ElementKind::Edge));
    assert!(!sel.contains("AB", ElementKind::Face));
    assert!(!sel.contains("A", ElementKind::Edge));
}

#[test]
fn single_is_none_for_multiple() {
    let mut sel = SelectionSet::new();
    sel.insert(point("A"));
    sel.insert(point("B"));
    assert!(sel.single().is_none());
    assert_eq!(sel.iter().count(), 2);
}

#[test]
fn insert_is_idempotent() {
    let mut sel = SelectionSet::new();
    sel.insert(point("A"));
    sel.insert(point("A"));
    assert_eq!(sel.len(), 1);
}

#[test]
fn clear_empties() {
    let mut sel = SelectionSet::new();
    sel.replace(point("A"));
    sel.clear();
    assert!(sel.is_empty());
    assert!(sel.single().is_none());
}
