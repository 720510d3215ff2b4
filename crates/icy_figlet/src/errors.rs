use thiserror::Error;

#[derive(Error, Debug)]
pub enum FigError {
    #[error("Invalid FIG header: {0}")]
    InvalidHeader(String),

    #[error("Invalid FIG header hard blank")]
    InvalidHeaderHardBlank,

    #[error("Invalid FIG header field {field} ({value})")]
    InvalidHeaderField { field: &'static str, value: String },

    #[error("Invalid FIG header height ({0})")]
    InvalidHeaderHeight(i64),

    #[error("Unexpected end of font data in header comment")]
    TruncatedComment,

    #[error("Unexpected end of font data while reading glyph {0:?}")]
    TruncatedGlyph(Option<char>),

    #[error("Invalid character line without EOL")]
    InvalidCharLine,

    #[error("Invalid character tag ({0})")]
    InvalidCharTag(String),

    #[error("Character tag out of range ({0})")]
    InvalidCodePoint(i64),

    #[error("Invalid FIGLET ZIP archive: {0}")]
    InvalidZIP(String),

    #[error("No glyph for character {0:?}")]
    MissingGlyph(char),

    #[error("Unknown font: {0}")]
    UnknownFont(String),

    #[error("Character index out of bounds: {column}, {row} (size {width}x{height})")]
    OutOfBounds { column: usize, row: usize, width: usize, height: usize },

    #[error("Row must be between 0 and {} (was {row})", .height.saturating_sub(1))]
    RowOutOfBounds { row: usize, height: usize },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Coarse classification of [`FigError`] values.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The font data is malformed.
    Format,
    /// A glyph or font that was asked for does not exist.
    Lookup,
    /// A glyph cell outside of the glyph grid was accessed.
    Bounds,
    Io,
}

impl FigError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FigError::InvalidHeader(_)
            | FigError::InvalidHeaderHardBlank
            | FigError::InvalidHeaderField { .. }
            | FigError::InvalidHeaderHeight(_)
            | FigError::TruncatedComment
            | FigError::TruncatedGlyph(_)
            | FigError::InvalidCharLine
            | FigError::InvalidCharTag(_)
            | FigError::InvalidCodePoint(_)
            | FigError::InvalidZIP(_) => ErrorKind::Format,
            FigError::MissingGlyph(_) | FigError::UnknownFont(_) => ErrorKind::Lookup,
            FigError::OutOfBounds { .. } | FigError::RowOutOfBounds { .. } => ErrorKind::Bounds,
            FigError::IoError(_) => ErrorKind::Io,
        }
    }
}

impl From<zip::result::ZipError> for FigError {
    fn from(err: zip::result::ZipError) -> Self {
        FigError::InvalidZIP(err.to_string())
    }
}
