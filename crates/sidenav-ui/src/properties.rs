//! Named property access for property-sheet style tools.
//!
//! Each configurable aspect of a [`SideMenu`] is described by a
//! [`PropertyDescriptor`] and can be read and written by name through
//! [`PropertyValue`]s.

use std::fmt;

use sidenav_core::{AttrMask, Color};
use sidenav_menu::Icon;

use crate::error::PropertyError;
use crate::side_menu::SideMenu;

/// The kind of value a property holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    Model,
    Bool,
    /// Pixels, strictly positive.
    Width,
    Color,
    Font,
    /// An optional icon.
    Icon,
    Text,
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Model => "model",
            Self::Bool => "boolean",
            Self::Width => "width",
            Self::Color => "color",
            Self::Font => "font",
            Self::Icon => "icon",
            Self::Text => "text",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    /// Summary of the menu model, see [`sidenav_menu::MenuModel::description`].
    Model(String),
    Bool(bool),
    Width(i32),
    Color(Color),
    Font(AttrMask),
    Icon(Option<Icon>),
    Text(String),
}

impl PropertyValue {
    pub fn kind(&self) -> PropertyKind {
        match self {
            Self::Model(_) => PropertyKind::Model,
            Self::Bool(_) => PropertyKind::Bool,
            Self::Width(_) => PropertyKind::Width,
            Self::Color(_) => PropertyKind::Color,
            Self::Font(_) => PropertyKind::Font,
            Self::Icon(_) => PropertyKind::Icon,
            Self::Text(_) => PropertyKind::Text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyDescriptor {
    pub name: &'static str,
    pub display_name: &'static str,
    pub short_description: &'static str,
    pub kind: PropertyKind,
}

/// Describes the component as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BeanDescriptor {
    pub display_name: &'static str,
    pub short_description: &'static str,
}

const fn prop(
    name: &'static str,
    display_name: &'static str,
    short_description: &'static str,
    kind: PropertyKind,
) -> PropertyDescriptor {
    PropertyDescriptor {
        name,
        display_name,
        short_description,
        kind,
    }
}

const PROPERTIES: &[PropertyDescriptor] = &[
    prop("model", "Menu Model", "Items shown in the menu", PropertyKind::Model),
    prop("expanded", "Expanded", "Whether the menu is expanded or collapsed", PropertyKind::Bool),
    prop("collapsedWidth", "Collapsed Width", "Menu width while collapsed", PropertyKind::Width),
    prop("expandedWidth", "Expanded Width", "Menu width while expanded", PropertyKind::Width),
    prop("backgroundColor", "Background Color", "Background of the whole menu", PropertyKind::Color),
    prop(
        "defaultHamburgerIconColor",
        "Hamburger Color",
        "Color of the toggle button glyph",
        PropertyKind::Color,
    ),
    prop("contentFont", "Content Font", "Text attributes of the item labels", PropertyKind::Font),
    prop("hamburgerIcon", "Hamburger Icon", "Toggle glyph while collapsed", PropertyKind::Icon),
    prop("closeIcon", "Close Icon", "Toggle glyph while expanded", PropertyKind::Icon),
    prop("logoIcon", "Logo Icon", "Logo shown in the header; replaces the logo text", PropertyKind::Icon),
    prop("logoText", "Logo Text", "Header text shown when there is no logo icon", PropertyKind::Text),
    prop("hoverColor", "Hover Color", "Row background under the mouse", PropertyKind::Color),
    prop("textHoverColor", "Text Hover Color", "Row text color under the mouse", PropertyKind::Color),
    prop("textColor", "Text Color", "Row text color", PropertyKind::Color),
];

const BEAN: BeanDescriptor = BeanDescriptor {
    display_name: "Side Menu Component",
    short_description: "Collapsible side menu backed by a menu model",
};

impl SideMenu {
    pub fn property_descriptors() -> &'static [PropertyDescriptor] {
        PROPERTIES
    }

    pub fn bean_descriptor() -> BeanDescriptor {
        BEAN
    }

    pub fn property(&self, name: &str) -> Result<PropertyValue, PropertyError> {
        let st = self.style();
        Ok(match name {
            "model" => PropertyValue::Model(self.model().description()),
            "expanded" => PropertyValue::Bool(self.is_expanded()),
            "collapsedWidth" => PropertyValue::Width(self.collapsed_width()),
            "expandedWidth" => PropertyValue::Width(self.expanded_width()),
            "backgroundColor" => PropertyValue::Color(st.background),
            "defaultHamburgerIconColor" => PropertyValue::Color(st.hamburger_color),
            "contentFont" => PropertyValue::Font(st.font),
            "hamburgerIcon" => PropertyValue::Icon(Some(st.hamburger_icon.clone())),
            "closeIcon" => PropertyValue::Icon(Some(st.close_icon.clone())),
            "logoIcon" => PropertyValue::Icon(st.logo_icon.clone()),
            "logoText" => PropertyValue::Text(st.logo_text.clone()),
            "hoverColor" => PropertyValue::Color(st.hover),
            "textHoverColor" => PropertyValue::Color(st.text_hover),
            "textColor" => PropertyValue::Color(st.text),
            _ => return Err(PropertyError::Unknown(name.to_string())),
        })
    }

    /// Write a property by name. Setting `expanded` may start the width
    /// animation; its effect is returned through [`SideMenu::take_effect`].
    pub fn set_property(&mut self, name: &str, value: PropertyValue) -> Result<(), PropertyError> {
        let desc = PROPERTIES
            .iter()
            .find(|d| d.name == name)
            .ok_or_else(|| PropertyError::Unknown(name.to_string()))?;
        if desc.kind == PropertyKind::Model {
            return Err(PropertyError::ReadOnly(name.to_string()));
        }
        if value.kind() != desc.kind {
            return Err(PropertyError::TypeMismatch {
                name: name.to_string(),
                expected: desc.kind,
            });
        }

        let mut st = self.style().clone();
        match (name, value) {
            ("expanded", PropertyValue::Bool(b)) => {
                if let Some(effect) = self.set_expanded(b) {
                    self.queue_effect(effect);
                }
                return Ok(());
            }
            (_, PropertyValue::Width(px)) if px <= 0 => {
                return Err(PropertyError::Invalid {
                    name: name.to_string(),
                    reason: format!("width must be positive, got {px}"),
                });
            }
            ("collapsedWidth", PropertyValue::Width(px)) => {
                self.set_collapsed_width(px);
                return Ok(());
            }
            ("expandedWidth", PropertyValue::Width(px)) => {
                self.set_expanded_width(px);
                return Ok(());
            }
            ("hamburgerIcon" | "closeIcon", PropertyValue::Icon(None)) => {
                return Err(PropertyError::Invalid {
                    name: name.to_string(),
                    reason: "the toggle button needs an icon".to_string(),
                });
            }
            ("hamburgerIcon", PropertyValue::Icon(Some(icon))) => st.hamburger_icon = icon,
            ("closeIcon", PropertyValue::Icon(Some(icon))) => st.close_icon = icon,
            ("logoIcon", PropertyValue::Icon(icon)) => st.logo_icon = icon,
            ("logoText", PropertyValue::Text(text)) => st.logo_text = text,
            ("contentFont", PropertyValue::Font(font)) => st.font = font,
            (name, PropertyValue::Color(c)) => match name {
                "backgroundColor" => st.background = c,
                "defaultHamburgerIconColor" => st.hamburger_color = c,
                "hoverColor" => st.hover = c,
                "textHoverColor" => st.text_hover = c,
                _ => st.text = c,
            },
            _ => return Err(PropertyError::Unknown(name.to_string())),
        }
        self.set_style(st);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::side_menu::SideMenuConfig;

    fn menu() -> SideMenu {
        SideMenu::new(SideMenuConfig::default())
    }

    #[test]
    fn every_descriptor_is_readable() {
        let menu = menu();
        assert_eq!(SideMenu::property_descriptors().len(), 14);
        for desc in SideMenu::property_descriptors() {
            let value = menu.property(desc.name).unwrap();
            assert_eq!(value.kind(), desc.kind, "{}", desc.name);
        }
        assert_eq!(SideMenu::bean_descriptor().display_name, "Side Menu Component");
    }

    #[test]
    fn defaults() {
        let menu = menu();
        assert_eq!(menu.property("collapsedWidth"), Ok(PropertyValue::Width(60)));
        assert_eq!(menu.property("expandedWidth"), Ok(PropertyValue::Width(250)));
        assert_eq!(menu.property("hoverColor"), Ok(PropertyValue::Color(Color::CYAN)));
        assert_eq!(menu.property("contentFont"), Ok(PropertyValue::Font(AttrMask::BOLD)));
        assert_eq!(
            menu.property("model"),
            Ok(PropertyValue::Model("MenuModel[5 items]".into()))
        );
    }

    #[test]
    fn writes() {
        let mut menu = menu();
        let red = Color::from_rgb(255, 0, 0);
        menu.set_property("textColor", PropertyValue::Color(red)).unwrap();
        assert_eq!(menu.style().text, red);
        menu.set_property("logoIcon", PropertyValue::Icon(Some(Icon::glyph('★'))))
            .unwrap();
        assert_eq!(menu.style().logo_icon, Some(Icon::glyph('★')));
        menu.set_property("collapsedWidth", PropertyValue::Width(80)).unwrap();
        assert_eq!(menu.width(), 80);

        menu.set_property("expanded", PropertyValue::Bool(true)).unwrap();
        assert!(menu.is_expanded());
        assert!(menu.take_effect().is_some());
    }

    #[test]
    fn rejected_writes() {
        let mut menu = menu();
        assert_eq!(
            menu.set_property("nope", PropertyValue::Bool(true)),
            Err(PropertyError::Unknown("nope".into()))
        );
        assert_eq!(
            menu.set_property("model", PropertyValue::Model(String::new())),
            Err(PropertyError::ReadOnly("model".into()))
        );
        assert_eq!(
            menu.set_property("textColor", PropertyValue::Bool(true)),
            Err(PropertyError::TypeMismatch {
                name: "textColor".into(),
                expected: PropertyKind::Color
            })
        );
        assert!(matches!(
            menu.set_property("expandedWidth", PropertyValue::Width(0)),
            Err(PropertyError::Invalid { .. })
        ));
        assert!(matches!(
            menu.set_property("closeIcon", PropertyValue::Icon(None)),
            Err(PropertyError::Invalid { .. })
        ));
        assert_eq!(menu.expanded_width(), 250);
    }
}
