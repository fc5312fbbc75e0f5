//! Initializer source generation.
//!
//! [`initializer`] renders a [`MenuModel`] as a Rust builder expression
//! which, evaluated with this crate in scope, rebuilds the same tree. Only
//! non-default attributes are emitted. Activation callbacks cannot be
//! expressed as source and are left out.

use std::fmt::Write;

use crate::icon::Icon;
use crate::item::MenuItem;
use crate::model::MenuModel;

const INDENT: &str = "    ";

/// Builder expression for `model`.
pub fn initializer(model: &MenuModel) -> String {
    if model.is_empty() {
        return "MenuModel::new()".to_string();
    }
    let mut out = String::from("MenuModel::from_items(vec![\n");
    write_items(&mut out, model.items(), 1);
    out.push_str("])");
    out
}

fn write_items(out: &mut String, items: &[MenuItem], depth: usize) {
    for item in items {
        write_item(out, item, depth);
        out.push_str(",\n");
    }
}

fn write_item(out: &mut String, item: &MenuItem, depth: usize) {
    let pad = INDENT.repeat(depth);
    let _ = write!(out, "{pad}MenuItem::new({})", string_literal(item.text()));
    let mut chain = |call: String| {
        let _ = write!(out, "\n{pad}{INDENT}.{call}");
    };
    if let Some(icon) = item.icon() {
        chain(icon_call(icon));
    }
    if let Some(tip) = item.tooltip() {
        chain(format!("with_tooltip({})", string_literal(tip)));
    }
    if !item.is_enabled() {
        chain("with_enabled(false)".into());
    }
    if !item.is_shown() {
        chain("with_shown(false)".into());
    }
    if item.is_expanded() {
        chain("with_expanded(true)".into());
    }
    if let Some(data) = item.user_data() {
        chain(format!("with_user_data({})", string_literal(data)));
    }
    if item.has_children() {
        let _ = write!(out, "\n{pad}{INDENT}.with_children(vec![\n");
        write_items(out, item.children(), depth + 2);
        let _ = write!(out, "{pad}{INDENT}])");
    }
}

fn icon_call(icon: &Icon) -> String {
    match icon.path() {
        Some(path) => format!("with_icon_path({})", string_literal(path)),
        None => format!("with_icon(Icon::glyph({}))", char_literal(icon.ch())),
    }
}

/// `s` as a double-quoted Rust string literal.
pub fn string_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            _ => escape_common(&mut out, c),
        }
    }
    out.push('"');
    out
}

fn char_literal(c: char) -> String {
    let mut out = String::from("'");
    match c {
        '\'' => out.push_str("\\'"),
        _ => escape_common(&mut out, c),
    }
    out.push('\'');
    out
}

fn escape_common(out: &mut String, c: char) {
    match c {
        '\\' => out.push_str("\\\\"),
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        c if c.is_control() => {
            let _ = write!(out, "\\u{{{:x}}}", c as u32);
        }
        c => out.push(c),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_model() {
        assert_eq!(initializer(&MenuModel::new()), "MenuModel::new()");
    }

    #[test]
    fn escapes() {
        assert_eq!(string_literal(r#"say "hi"\"#), r#""say \"hi\"\\""#);
        assert_eq!(string_literal("a\nb\rc\td"), r#""a\nb\rc\td""#);
        assert_eq!(string_literal("bell\u{7}"), r#""bell\u{7}""#);
        assert_eq!(string_literal("it's"), r#""it's""#);
        assert_eq!(char_literal('\''), r"'\''");
        assert_eq!(char_literal('⌂'), "'⌂'");
    }

    #[test]
    fn nested_tree() {
        let model = MenuModel::from_items(vec![
            MenuItem::new("Home").with_icon(Icon::glyph('⌂')).with_tooltip("Go \"home\""),
            MenuItem::new("Profile")
                .with_expanded(true)
                .with_child(MenuItem::new("Settings").with_enabled(false).with_shown(false)),
        ]);
        let expected = r#"MenuModel::from_items(vec![
    MenuItem::new("Home")
        .with_icon(Icon::glyph('⌂'))
        .with_tooltip("Go \"home\""),
    MenuItem::new("Profile")
        .with_expanded(true)
        .with_children(vec![
            MenuItem::new("Settings")
                .with_enabled(false)
                .with_shown(false),
        ]),
])"#;
        assert_eq!(initializer(&model), expected);
    }

    #[test]
    fn icon_paths_are_kept() {
        let model = MenuModel::from_items(vec![MenuItem::new("Help").with_icon_path("/icons/help.png")]);
        assert!(initializer(&model).contains(".with_icon_path(\"/icons/help.png\")"));
    }
}
