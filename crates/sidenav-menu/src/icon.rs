//! Icon references and their resolution to a drawable glyph.

use std::path::Path;

use crate::error::IconError;

/// Drawn for items without an icon, or whose icon failed to load.
pub const PLACEHOLDER_GLYPH: char = '●';

/// Glyphs shipped with the widget, keyed by resource path.
const BUNDLED: &[(&str, char)] = &[
    ("/icons/home.png", '⌂'),
    ("/icons/profile.png", '☺'),
    ("/icons/messages.png", '✉'),
    ("/icons/settings.png", '⚙'),
    ("/icons/help.png", '?'),
    ("/icons/menu.png", '☰'),
    ("/icons/close.png", '×'),
];

/// An icon: the glyph drawn in the cell grid and, when it came from a
/// resource, the path it was resolved from.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Icon {
    path: Option<String>,
    glyph: char,
}

impl Icon {
    /// An icon drawn as `glyph`, with no backing resource.
    pub const fn glyph(glyph: char) -> Self {
        Self { path: None, glyph }
    }

    pub const fn placeholder() -> Self {
        Self::glyph(PLACEHOLDER_GLYPH)
    }

    /// Resolve `path`, falling back to the placeholder glyph on failure.
    /// The path is kept either way so it survives cloning and codegen.
    pub fn load(path: &str) -> Self {
        match Self::try_load(path) {
            Ok(icon) => icon,
            Err(e) => {
                log::warn!("{e}; drawing placeholder");
                Self {
                    path: Some(path.to_string()),
                    glyph: PLACEHOLDER_GLYPH,
                }
            }
        }
    }

    /// Resolve `path` against the bundled resources first, then the local
    /// filesystem. A file icon is the first printable character of the file.
    pub fn try_load(path: &str) -> Result<Self, IconError> {
        if let Some(glyph) = bundled(path) {
            return Ok(Self {
                path: Some(path.to_string()),
                glyph,
            });
        }
        if !Path::new(path).is_file() {
            return Err(IconError::NotFound(path.to_string()));
        }
        let content = std::fs::read_to_string(path).map_err(|source| IconError::Io {
            path: path.to_string(),
            source,
        })?;
        let glyph = content
            .chars()
            .find(|c| !c.is_whitespace() && !c.is_control())
            .ok_or_else(|| IconError::Empty(path.to_string()))?;
        log::debug!("loaded icon `{path}` from disk");
        Ok(Self {
            path: Some(path.to_string()),
            glyph,
        })
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// The character drawn for this icon.
    pub fn ch(&self) -> char {
        self.glyph
    }
}

fn bundled(path: &str) -> Option<char> {
    let wanted = path.trim_start_matches('/');
    BUNDLED
        .iter()
        .find(|(p, _)| p.trim_start_matches('/') == wanted)
        .map(|&(_, glyph)| glyph)
}
