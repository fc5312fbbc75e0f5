//! The data side of the side menu: a tree of [`MenuItem`]s held by an
//! observable [`MenuModel`], plus icon resolution, expand-aware flattening
//! and initializer code generation.

pub mod codegen;
mod error;
mod flatten;
mod icon;
mod item;
mod model;

pub use error::IconError;
pub use flatten::{FlatEntry, ItemPath, flatten, flatten_all, flatten_outline};
pub use icon::{Icon, PLACEHOLDER_GLYPH};
pub use item::{Action, MenuItem};
pub use model::MenuModel;
