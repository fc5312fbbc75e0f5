use std::io;

/// Why an icon path could not be resolved.
#[derive(Debug, thiserror::Error)]
pub enum IconError {
    #[error("icon `{0}` is neither a bundled resource nor a file")]
    NotFound(String),
    #[error("failed to read icon `{path}`: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("icon file `{0}` holds no printable glyph")]
    Empty(String),
}
