use std::io;

/// Errors raised while laying out or serializing a report.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A table row does not carry one value per column.
    #[error("row {row} has {found} cells, table has {expected} columns")]
    ArityMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("page index {index} out of range ({count} pages buffered)")]
    PageOutOfRange { index: usize, count: usize },

    #[error("no page is active; start a page before drawing")]
    NoActivePage,

    #[error("invalid page geometry: {0}")]
    InvalidGeometry(String),

    #[error("image error: {0}")]
    Image(String),
}

pub type Result<T> = std::result::Result<T, RenderError>;
