use crate::{Font, Glyph, LayoutMask, PrintDirection, Result};

/// What to do with characters the font has no glyph for.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum MissingGlyph {
    /// Abort rendering with [`crate::FigError::MissingGlyph`].
    #[default]
    Fail,
    /// Leave the character out.
    Skip,
    /// Render this character instead.
    Replace(char),
}

/// Lays out text with a [`Font`].
///
/// Smush mode and print direction start out as the font's defaults and can be
/// overridden per renderer.
#[derive(Debug, Clone)]
pub struct Renderer<'a> {
    font: &'a Font,
    smush_mode: LayoutMask,
    print_direction: PrintDirection,
    missing_glyph: MissingGlyph,
}

impl<'a> Renderer<'a> {
    pub fn new(font: &'a Font) -> Self {
        Self {
            font,
            smush_mode: font.full_layout(),
            print_direction: font.print_direction(),
            missing_glyph: MissingGlyph::default(),
        }
    }

    pub fn font(&self) -> &'a Font {
        self.font
    }

    pub fn smush_mode(&self) -> LayoutMask {
        self.smush_mode
    }

    pub fn set_smush_mode(&mut self, smush_mode: LayoutMask) {
        self.smush_mode = smush_mode;
    }

    pub fn print_direction(&self) -> PrintDirection {
        self.print_direction
    }

    pub fn set_print_direction(&mut self, print_direction: PrintDirection) {
        self.print_direction = print_direction;
    }

    pub fn missing_glyph(&self) -> MissingGlyph {
        self.missing_glyph
    }

    pub fn set_missing_glyph(&mut self, missing_glyph: MissingGlyph) {
        self.missing_glyph = missing_glyph;
    }

    /// Renders `text`; every `\n` starts a new block of `height` rows.
    ///
    /// Blocks are separated by a single newline and the result has no trailing
    /// newline. Hard blanks are printed as spaces.
    pub fn render(&self, text: &str) -> Result<String> {
        let mut result = String::new();
        let mut rows: Vec<Vec<char>> = vec![Vec::new(); self.font.height()];
        let mut previous_char = None;

        for ch in text.chars() {
            let ch = match ch {
                '\t' | ' ' => ' ',
                '\n' => {
                    self.flush_rows(&mut rows, &mut result);
                    result.push('\n');
                    previous_char = None;
                    continue;
                }
                ch if ch < ' ' || ch == '\x7F' => continue,
                ch => ch,
            };

            let Some((ch, glyph)) = self.lookup(ch)? else {
                continue;
            };

            let smush_amount = self
                .font
                .calculate_overlap_amount(previous_char, Some(ch), self.smush_mode, self.print_direction)?
                .min(glyph.width())
                .min(rows.iter().map(Vec::len).min().unwrap_or(0));

            for (y, row) in rows.iter_mut().enumerate() {
                self.place_row(row, glyph, y, smush_amount)?;
            }
            previous_char = Some(ch);
        }
        self.flush_rows(&mut rows, &mut result);
        Ok(result)
    }

    /// Like [`Renderer::render`] but split into lines with blank lines removed.
    pub fn render_lines(&self, text: &str) -> Result<Vec<String>> {
        Ok(self
            .render(text)?
            .split('\n')
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Renders `text` and writes every line to the log at info level.
    pub fn log(&self, text: &str) -> Result<()> {
        for line in self.render_lines(text)? {
            log::info!("{line}");
        }
        Ok(())
    }

    fn lookup(&self, ch: char) -> Result<Option<(char, &'a Glyph)>> {
        if self.font.has_char(ch) {
            return Ok(Some((ch, self.font.glyph(ch)?)));
        }
        match self.missing_glyph {
            MissingGlyph::Fail => Err(crate::FigError::MissingGlyph(ch)),
            MissingGlyph::Skip => {
                log::debug!("skipping {ch:?}, no glyph in font {}", self.font.name());
                Ok(None)
            }
            MissingGlyph::Replace(replacement) => Ok(Some((replacement, self.font.glyph(replacement)?))),
        }
    }

    fn place_row(&self, row: &mut Vec<char>, glyph: &Glyph, y: usize, smush_amount: usize) -> Result<()> {
        let glyph_row = glyph.row(y)?;
        if row.is_empty() {
            row.extend_from_slice(glyph_row);
            return Ok(());
        }

        match self.print_direction {
            PrintDirection::LeftToRight => {
                for column in 0..smush_amount {
                    let index = row.len() - (column + 1);
                    row[index] = self.smush(row[index], glyph.char_at(smush_amount - (column + 1), y)?);
                }
                row.extend_from_slice(&glyph_row[smush_amount..]);
            }
            PrintDirection::RightToLeft => {
                let keep = glyph.width() - smush_amount;
                for column in 0..smush_amount {
                    row[column] = self.smush(row[column], glyph.char_at(keep + column, y)?);
                }
                let mut new_row = glyph_row[..keep].to_vec();
                new_row.append(row);
                *row = new_row;
            }
        }
        Ok(())
    }

    /// Merges two cells that end up in the same column. Overlap is only
    /// granted where smushing succeeds, a failed pair keeps the placed cell.
    fn smush(&self, placed: char, incoming: char) -> char {
        self.font
            .smush_characters(placed, incoming, self.smush_mode, self.print_direction)
            .unwrap_or(placed)
    }

    fn flush_rows(&self, rows: &mut [Vec<char>], result: &mut String) {
        let hard_blank = self.font.hard_blank_char();
        for (i, row) in rows.iter_mut().enumerate() {
            if i > 0 {
                result.push('\n');
            }
            result.extend(row.iter().map(|&ch| if ch == hard_blank { ' ' } else { ch }));
            row.clear();
        }
    }
}
