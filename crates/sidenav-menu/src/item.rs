//! [`MenuItem`]: one node of the menu tree.

use std::fmt;
use std::rc::Rc;

use crate::icon::Icon;

/// Callback run when a leaf item is activated. Receives the item's text.
pub type Action = Rc<dyn Fn(&str)>;

/// A node in the menu tree.
///
/// Two items compare equal when their texts are equal; lookups by value
/// (`MenuModel::index_of`, `MenuModel::remove`) inherit that.
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MenuItem {
    text: String,
    icon: Option<Icon>,
    tooltip: Option<String>,
    enabled: bool,
    shown: bool,
    expanded: bool,
    /// Nesting depth; always `parent.level + 1`.
    level: usize,
    children: Vec<MenuItem>,
    user_data: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip))]
    action: Option<Action>,
}

impl Default for MenuItem {
    fn default() -> Self {
        Self {
            text: String::new(),
            icon: None,
            tooltip: None,
            enabled: true,
            shown: true,
            expanded: false,
            level: 0,
            children: Vec::new(),
            user_data: None,
            action: None,
        }
    }
}

impl MenuItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    // -- Builders --

    pub fn with_icon(mut self, icon: Icon) -> Self {
        self.icon = Some(icon);
        self
    }

    /// Resolve `path` with [`Icon::load`] and use it as the icon.
    pub fn with_icon_path(self, path: &str) -> Self {
        self.with_icon(Icon::load(path))
    }

    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_shown(mut self, shown: bool) -> Self {
        self.shown = shown;
        self
    }

    pub fn with_expanded(mut self, expanded: bool) -> Self {
        self.expanded = expanded;
        self
    }

    pub fn with_user_data(mut self, data: impl Into<String>) -> Self {
        self.user_data = Some(data.into());
        self
    }

    pub fn with_child(mut self, child: MenuItem) -> Self {
        self.add_child(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = MenuItem>) -> Self {
        for child in children {
            self.add_child(child);
        }
        self
    }

    pub fn on_activate(mut self, f: impl Fn(&str) + 'static) -> Self {
        self.action = Some(Rc::new(f));
        self
    }

    // -- Accessors --

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn icon(&self) -> Option<&Icon> {
        self.icon.as_ref()
    }

    pub fn tooltip(&self) -> Option<&str> {
        self.tooltip.as_deref()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_shown(&self) -> bool {
        self.shown
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn level(&self) -> usize {
        self.level
    }

    /// Derived from the child list, so it can never disagree with it.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn children(&self) -> &[MenuItem] {
        &self.children
    }

    pub fn child(&self, index: usize) -> Option<&MenuItem> {
        self.children.get(index)
    }

    pub fn child_mut(&mut self, index: usize) -> Option<&mut MenuItem> {
        self.children.get_mut(index)
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn user_data(&self) -> Option<&str> {
        self.user_data.as_deref()
    }

    pub fn has_action(&self) -> bool {
        self.action.is_some()
    }

    // -- Setters --

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn set_icon(&mut self, icon: Option<Icon>) {
        self.icon = icon;
    }

    pub fn set_tooltip(&mut self, tooltip: Option<String>) {
        self.tooltip = tooltip;
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn set_shown(&mut self, shown: bool) {
        self.shown = shown;
    }

    /// Only this node's flag; descendants keep theirs.
    pub fn set_expanded(&mut self, expanded: bool) {
        self.expanded = expanded;
    }

    pub fn toggle_expanded(&mut self) {
        self.expanded = !self.expanded;
    }

    pub fn set_user_data(&mut self, data: Option<String>) {
        self.user_data = data;
    }

    pub fn set_action(&mut self, action: Option<Action>) {
        self.action = action;
    }

    /// Set this node's depth and re-stamp the whole subtree below it.
    pub fn set_level(&mut self, level: usize) {
        self.level = level;
        for child in &mut self.children {
            child.set_level(level + 1);
        }
    }

    // -- Tree --

    /// Append `child`, stamping its whole subtree with depths below this
    /// node.
    pub fn add_child(&mut self, mut child: MenuItem) {
        child.set_level(self.level + 1);
        self.children.push(child);
    }

    /// Insert `child` at `index` (`index == child_count()` appends).
    /// Returns `false` and leaves the tree alone when out of range.
    pub fn insert_child(&mut self, index: usize, mut child: MenuItem) -> bool {
        if index > self.children.len() {
            return false;
        }
        child.set_level(self.level + 1);
        self.children.insert(index, child);
        true
    }

    pub fn remove_child(&mut self, index: usize) -> Option<MenuItem> {
        (index < self.children.len()).then(|| self.children.remove(index))
    }

    /// Remove the first child equal to `item` (same text).
    pub fn remove_child_like(&mut self, item: &MenuItem) -> Option<MenuItem> {
        let index = self.children.iter().position(|c| c == item)?;
        Some(self.children.remove(index))
    }

    /// Move the child at `from` so it ends up at `to`. Out-of-range indices
    /// leave the list untouched.
    pub fn move_child(&mut self, from: usize, to: usize) -> bool {
        move_within(&mut self.children, from, to)
    }

    /// Depth-first, pre-order search of this subtree (self included).
    pub fn find_by_text(&self, text: &str) -> Option<&MenuItem> {
        if self.text == text {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_by_text(text))
    }

    pub fn find_by_text_mut(&mut self, text: &str) -> Option<&mut MenuItem> {
        if self.text == text {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_by_text_mut(text))
    }

    /// Run the bound action with this item's text. Returns whether an
    /// action was bound.
    pub fn execute_action(&self) -> bool {
        match &self.action {
            Some(action) => {
                action(&self.text);
                true
            }
            None => false,
        }
    }
}

pub(crate) fn move_within<T>(list: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= list.len() || to >= list.len() {
        return false;
    }
    if from != to {
        let item = list.remove(from);
        list.insert(to, item);
    }
    true
}

impl PartialEq for MenuItem {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for MenuItem {}

impl fmt::Debug for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuItem")
            .field("text", &self.text)
            .field("icon", &self.icon)
            .field("tooltip", &self.tooltip)
            .field("enabled", &self.enabled)
            .field("shown", &self.shown)
            .field("expanded", &self.expanded)
            .field("level", &self.level)
            .field("children", &self.children)
            .field("user_data", &self.user_data)
            .field("action", &self.action.is_some())
            .finish()
    }
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
