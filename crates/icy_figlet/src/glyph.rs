use std::fmt;

use crate::{FigError, Result};

/// One FIGcharacter: a `width` x `height` grid of characters.
///
/// Cells hold visible characters, spaces or the font's hard blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    width: usize,
    lines: Vec<Vec<char>>,
    description: Option<String>,
}

impl Glyph {
    /// Builds a glyph from its rows. Shorter rows are padded with spaces so
    /// every row has the width of the widest one.
    pub fn new(mut lines: Vec<Vec<char>>) -> Self {
        let width = lines.iter().map(Vec::len).max().unwrap_or(0);
        for line in &mut lines {
            if line.len() < width {
                line.resize(width, ' ');
            }
        }
        Self {
            width,
            lines,
            description: None,
        }
    }

    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Self {
        Self::new(rows.iter().map(|row| row.as_ref().chars().collect()).collect())
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.lines.len()
    }

    /// Text following the code point on a code tag line, if any.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn char_at(&self, column: usize, row: usize) -> Result<char> {
        if column >= self.width || row >= self.height() {
            return Err(FigError::OutOfBounds {
                column,
                row,
                width: self.width,
                height: self.height(),
            });
        }
        Ok(self.lines[row][column])
    }

    pub fn row(&self, row: usize) -> Result<&[char]> {
        match self.lines.get(row) {
            Some(line) => Ok(line),
            None => Err(FigError::RowOutOfBounds { row, height: self.height() }),
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[char]> {
        self.lines.iter().map(Vec::as_slice)
    }
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            let row: String = line.iter().collect();
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cells() {
        let glyph = Glyph::from_rows(&[" _ ", "|_|"]);
        assert_eq!(glyph.width(), 3);
        assert_eq!(glyph.height(), 2);
        assert_eq!(glyph.char_at(1, 0).unwrap(), '_');
        assert_eq!(glyph.char_at(0, 1).unwrap(), '|');
        assert_eq!(glyph.row(1).unwrap(), &['|', '_', '|']);
    }

    #[test]
    fn test_out_of_bounds() {
        let glyph = Glyph::from_rows(&["ab", "cd"]);
        assert!(matches!(glyph.char_at(2, 0), Err(FigError::OutOfBounds { column: 2, row: 0, .. })));
        assert!(matches!(glyph.char_at(0, 2), Err(FigError::OutOfBounds { .. })));
        assert!(matches!(glyph.row(2), Err(FigError::RowOutOfBounds { row: 2, height: 2 })));
        assert_eq!(glyph.row(2).unwrap_err().kind(), crate::ErrorKind::Bounds);
    }

    #[test]
    fn test_ragged_rows_are_padded() {
        let glyph = Glyph::from_rows(&["a", "abc", ""]);
        assert_eq!(glyph.width(), 3);
        assert_eq!(glyph.row(0).unwrap(), &['a', ' ', ' ']);
        assert_eq!(glyph.row(2).unwrap(), &[' ', ' ', ' ']);
    }

    #[test]
    fn test_display() {
        let glyph = Glyph::from_rows(&["/\\", "\\/"]);
        assert_eq!(glyph.to_string(), "/\\\n\\/\n");
    }
}
