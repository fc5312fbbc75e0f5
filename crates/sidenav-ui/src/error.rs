use sidenav_menu::ItemPath;
use thiserror::Error;

use crate::editor::Column;
use crate::properties::PropertyKind;

/// A node that cannot be turned into a row. The row is skipped and the
/// rest of the tree still renders.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RowError {
    #[error("item at {path:?} has control characters in its text")]
    ControlText { path: ItemPath },
}

/// A rejected editor operation. Shown to the user as a warning; the working
/// copy is left untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("no row {0}")]
    NoRow(usize),
    #[error("items can only be moved within their own level (level {from} to level {to})")]
    CrossLevel { from: usize, to: usize },
    #[error("items can only be moved among siblings of the same parent")]
    CrossParent,
    #[error("no sibling to move past")]
    AtEdge,
    #[error("the {0} column cannot be edited on this row")]
    NotEditable(Column),
    #[error("the {0} column does not take that kind of value")]
    WrongValue(Column),
}

/// A rejected property write.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PropertyError {
    #[error("unknown property {0:?}")]
    Unknown(String),
    #[error("property {name:?} expects a {expected} value")]
    TypeMismatch { name: String, expected: PropertyKind },
    #[error("property {0:?} is edited through the model editor")]
    ReadOnly(String),
    #[error("property {name:?}: {reason}")]
    Invalid { name: String, reason: String },
}
