//! Depth-first flattening of the menu tree into display order.

use crate::item::MenuItem;

/// Index path from the model's top level down to an item: `[2, 0]` is the
/// first child of the third top-level item.
pub type ItemPath = Vec<usize>;

/// One row of a flattened tree.
#[derive(Clone, Debug)]
pub struct FlatEntry<'a> {
    pub item: &'a MenuItem,
    pub parent: Option<&'a MenuItem>,
    pub path: ItemPath,
}

impl FlatEntry<'_> {
    /// Zero for top-level items.
    pub fn depth(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// Path of the parent; empty for top-level items.
    pub fn parent_path(&self) -> &[usize] {
        &self.path[..self.path.len().saturating_sub(1)]
    }

    pub fn is_sibling_of(&self, other: &FlatEntry<'_>) -> bool {
        self.parent_path() == other.parent_path()
    }
}

/// Depth-first pre-order list of the items the view would show: children
/// of collapsed items are omitted, as are items that are not shown (along
/// with their subtree).
pub fn flatten(items: &[MenuItem]) -> Vec<FlatEntry<'_>> {
    let mut out = Vec::new();
    walk(items, None, &mut Vec::new(), &mut out, &|item| item.is_shown(), &|item| {
        item.is_expanded()
    });
    out
}

/// Like [`flatten`] but keeps items that are not shown. This is the
/// editor's view of the tree.
pub fn flatten_outline(items: &[MenuItem]) -> Vec<FlatEntry<'_>> {
    let mut out = Vec::new();
    walk(items, None, &mut Vec::new(), &mut out, &|_| true, &|item| item.is_expanded());
    out
}

/// Depth-first pre-order list of every item regardless of `expanded` or
/// `shown`.
pub fn flatten_all(items: &[MenuItem]) -> Vec<FlatEntry<'_>> {
    let mut out = Vec::new();
    walk(items, None, &mut Vec::new(), &mut out, &|_| true, &|_| true);
    out
}

fn walk<'a>(
    items: &'a [MenuItem],
    parent: Option<&'a MenuItem>,
    prefix: &mut Vec<usize>,
    out: &mut Vec<FlatEntry<'a>>,
    include: &dyn Fn(&MenuItem) -> bool,
    descend: &dyn Fn(&MenuItem) -> bool,
) {
    for (i, item) in items.iter().enumerate() {
        if !include(item) {
            continue;
        }
        prefix.push(i);
        out.push(FlatEntry {
            item,
            parent,
            path: prefix.clone(),
        });
        if item.has_children() && descend(item) {
            walk(item.children(), Some(item), prefix, out, include, descend);
        }
        prefix.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Vec<MenuItem> {
        vec![
            MenuItem::new("Home"),
            MenuItem::new("Profile")
                .with_expanded(true)
                .with_child(MenuItem::new("Settings").with_child(MenuItem::new("Theme")))
                .with_child(MenuItem::new("Privacy").with_shown(false)),
            MenuItem::new("Help").with_child(MenuItem::new("About")),
        ]
    }

    fn texts(entries: &[FlatEntry<'_>]) -> Vec<String> {
        entries.iter().map(|e| e.item.text().to_string()).collect()
    }

    #[test]
    fn flatten_follows_expanded_and_shown() {
        let items = tree();
        let flat = flatten(&items);
        assert_eq!(texts(&flat), ["Home", "Profile", "Settings", "Help"]);
        assert_eq!(flat[2].path, vec![1, 0]);
        assert_eq!(flat[2].depth(), 1);
        assert_eq!(flat[2].parent.map(MenuItem::text), Some("Profile"));
    }

    #[test]
    fn outline_keeps_hidden_items() {
        let items = tree();
        assert_eq!(
            texts(&flatten_outline(&items)),
            ["Home", "Profile", "Settings", "Privacy", "Help"]
        );
    }

    #[test]
    fn flatten_all_lists_everything() {
        let items = tree();
        let flat = flatten_all(&items);
        assert_eq!(
            texts(&flat),
            ["Home", "Profile", "Settings", "Theme", "Privacy", "Help", "About"]
        );
        assert_eq!(flat[3].path, vec![1, 0, 0]);
        assert!(flat[2].is_sibling_of(&flat[4]));
        assert!(!flat[2].is_sibling_of(&flat[3]));
        assert!(flat[0].is_sibling_of(&flat[5]));
        assert!(flat[0].parent_path().is_empty());
    }
}
