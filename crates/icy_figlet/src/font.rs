use std::{
    collections::HashMap,
    fmt, fs,
    io::{BufRead, Cursor, Read},
    path::Path,
};

use crate::{FigError, FontParser, Glyph, Header, LayoutMask, PrintDirection, Result};

/// Code points every FIGfont defines after printable ASCII, in file order.
pub const DEUTSCH_CODE_POINTS: [char; 7] = ['Ä', 'Ö', 'Ü', 'ä', 'ö', 'ü', 'ß'];

const ZIP_SIGNATURE: &[u8] = b"PK\x03\x04";

/// An immutable FIGfont: header metadata plus the glyph table.
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    name: String,
    header: Header,
    glyphs: HashMap<char, Glyph>,
}

impl Font {
    /// Loads a `.flf` file (plain or zipped) from disk. The file name becomes the font name.
    pub fn load(file_name: &Path) -> Result<Self> {
        let data = fs::read(file_name)?;
        let mut font = Font::from_bytes(&data)?;
        if let Some(name) = file_name.file_stem() {
            font.name = name.to_string_lossy().to_string();
        }
        Ok(font)
    }

    /// Parses font data. Data starting with a zip signature is treated as a
    /// zipped font and the first archive entry is parsed.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.starts_with(ZIP_SIGNATURE) {
            let mut archive = zip::ZipArchive::new(Cursor::new(data))?;
            if archive.is_empty() {
                return Err(FigError::InvalidZIP("archive is empty".to_string()));
            }
            let mut file = archive.by_index(0)?;
            log::debug!("reading zipped font entry {}", file.name());
            let mut buffer = Vec::new();
            file.read_to_end(&mut buffer)?;
            return FontParser::new(Cursor::new(buffer)).read_font();
        }
        FontParser::new(data).read_font()
    }

    pub fn read<R: BufRead>(reader: R) -> Result<Self> {
        FontParser::new(reader).read_font()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn hard_blank_char(&self) -> char {
        self.header.hard_blank_char
    }

    pub fn height(&self) -> usize {
        self.header.height
    }

    pub fn baseline(&self) -> i32 {
        self.header.baseline
    }

    pub fn max_length(&self) -> i32 {
        self.header.max_length
    }

    pub fn old_layout(&self) -> i32 {
        self.header.old_layout
    }

    pub fn full_layout(&self) -> LayoutMask {
        self.header.full_layout
    }

    pub fn comment_lines(&self) -> usize {
        self.header.comment_lines
    }

    pub fn comment(&self) -> &str {
        &self.header.comment
    }

    pub fn print_direction(&self) -> PrintDirection {
        self.header.print_direction
    }

    pub fn codetag_count(&self) -> Option<u32> {
        self.header.codetag_count
    }

    pub fn has_char(&self, ch: char) -> bool {
        self.glyphs.contains_key(&ch)
    }

    pub fn glyph(&self, ch: char) -> Result<&Glyph> {
        self.glyphs.get(&ch).ok_or(FigError::MissingGlyph(ch))
    }

    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    /// All defined characters in code point order.
    pub fn chars(&self) -> Vec<char> {
        let mut chars: Vec<char> = self.glyphs.keys().copied().collect();
        chars.sort_unstable();
        chars
    }
}

impl fmt::Display for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ch in self.chars() {
            writeln!(f, "{ch}:")?;
            writeln!(f, "{}", self.glyphs[&ch])?;
        }
        Ok(())
    }
}

/// Mutable staging area the parser fills before the font is frozen.
#[derive(Default)]
pub struct FontBuilder {
    name: String,
    header: Header,
    glyphs: HashMap<char, Glyph>,
}

impl FontBuilder {
    pub fn new(header: Header) -> Self {
        Self {
            name: String::new(),
            header,
            glyphs: HashMap::new(),
        }
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.header.comment = comment.into();
        self.header.comment_lines = if self.header.comment.is_empty() { 0 } else { self.header.comment.split('\n').count() };
        self
    }

    pub fn with_full_layout(mut self, layout: LayoutMask) -> Self {
        self.header.full_layout = layout;
        self.header.old_layout = layout.to_old_layout();
        self
    }

    pub fn with_print_direction(mut self, print_direction: PrintDirection) -> Self {
        self.header.print_direction = print_direction;
        self
    }

    pub fn with_glyph(mut self, ch: char, glyph: Glyph) -> Self {
        self.set_glyph(ch, glyph);
        self
    }

    pub fn set_comment(&mut self, comment: String) {
        self.header.comment = comment;
    }

    pub fn set_glyph(&mut self, ch: char, glyph: Glyph) {
        self.glyphs.insert(ch, glyph);
    }

    pub fn build(self) -> Font {
        Font {
            name: self.name,
            header: self.header,
            glyphs: self.glyphs,
        }
    }
}
