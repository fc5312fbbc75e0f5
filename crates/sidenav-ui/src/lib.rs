//! Widgets for the side navigation menu: the collapsible [`SideMenu`], its
//! [`ItemView`] rows, the design-time [`ModelEditor`], and the small
//! building blocks they share.

mod box_;
mod editor;
mod error;
mod item_view;
mod properties;
mod side_menu;
mod text_input;

pub use box_::{Alignment, BoxDecor};
pub use editor::{CellValue, Column, EditorAction, EditorConfig, EditorKeys, EditorStyle, ModelEditor};
pub use error::{EditError, PropertyError, RowError};
pub use item_view::{ClickIntent, ItemView, RowLook};
pub use properties::{BeanDescriptor, PropertyDescriptor, PropertyKind, PropertyValue};
pub use side_menu::{SideMenu, SideMenuAction, SideMenuConfig, SideMenuKeys, SideMenuStyle};
pub use text_input::{TextInput, TextInputAction, TextInputConfig, TextInputKeys, TextInputStyle};
