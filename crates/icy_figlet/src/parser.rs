use std::io::BufRead;

use regex::Regex;

use crate::{header::decode_int, FigError, Font, FontBuilder, Glyph, Header, Result, DEUTSCH_CODE_POINTS};

lazy_static::lazy_static! {
    static ref CODE_TAG : Regex = Regex::new(r"^\s*(\S+)(?:\s+(.*?))?\s*$").unwrap();
}

/// Reads FIGfont text into a [`Font`].
///
/// Lines are decoded as UTF-8; lines that aren't valid UTF-8 are taken as
/// Latin-1, which is what most older fonts use.
pub struct FontParser<R: BufRead> {
    reader: R,
    line_number: usize,
}

impl<R: BufRead> FontParser<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, line_number: 0 }
    }

    /// Number of lines consumed so far.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    pub fn read_font(mut self) -> Result<Font> {
        let Some(line) = self.read_line()? else {
            return Err(FigError::InvalidHeader(String::new()));
        };
        let header = Header::parse(&line)?;
        log::debug!(
            "FIGfont header: height {} hard blank {:?} layout {:?} direction {:?}",
            header.height(),
            header.hard_blank_char(),
            header.full_layout(),
            header.print_direction()
        );

        let mut comment = Vec::with_capacity(header.comment_lines());
        for _ in 0..header.comment_lines() {
            match self.read_line()? {
                Some(line) => comment.push(line),
                None => return Err(FigError::TruncatedComment),
            }
        }

        let height = header.height();
        let mut builder = FontBuilder::new(header);
        builder.set_comment(comment.join("\n"));

        for ch in (' '..='~').chain(DEUTSCH_CODE_POINTS) {
            let lines = self.read_glyph_lines(height, Some(ch))?;
            builder.set_glyph(ch, Glyph::new(lines));
        }

        while let Some(line) = self.read_line()? {
            if line.trim().is_empty() {
                continue;
            }
            let (code, description) = parse_code_tag(&line)?;
            let lines = self.read_glyph_lines(height, None)?;
            let Some(ch) = code else {
                log::warn!("ignoring glyph with negative code tag in line {}", self.line_number);
                continue;
            };
            let mut glyph = Glyph::new(lines);
            if let Some(description) = description {
                glyph = glyph.with_description(description);
            }
            builder.set_glyph(ch, glyph);
        }

        let font = builder.build();
        log::debug!("read FIGfont with {} glyphs", font.glyph_count());
        Ok(font)
    }

    fn read_glyph_lines(&mut self, height: usize, ch: Option<char>) -> Result<Vec<Vec<char>>> {
        let mut lines = Vec::with_capacity(height);
        for _ in 0..height {
            let Some(line) = self.read_line()? else {
                return Err(FigError::TruncatedGlyph(ch));
            };
            lines.push(trim_end_marker(&line)?);
        }
        if lines.iter().any(|line| line.len() != lines[0].len()) {
            log::warn!("glyph {:?} ending in line {} has rows of different width", ch, self.line_number);
        }
        Ok(lines)
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut data = Vec::new();
        if self.reader.read_until(b'\n', &mut data)? == 0 {
            return Ok(None);
        }
        self.line_number += 1;
        if data.ends_with(b"\r\n") {
            data.pop();
            data.pop();
        } else if data.ends_with(b"\n") {
            data.pop();
        }
        Ok(Some(match String::from_utf8(data) {
            Ok(line) => line,
            Err(err) => err.into_bytes().into_iter().map(char::from).collect(),
        }))
    }
}

/// Recovers the pixel data of one glyph row.
///
/// The last non whitespace character is the end marker; it and every
/// repetition of it directly before are removed together with the whitespace
/// after it. Whitespace in front of the marker run is pixel data.
pub(crate) fn trim_end_marker(line: &str) -> Result<Vec<char>> {
    let mut line: Vec<char> = line.chars().collect();
    while line.last().is_some_and(|ch| ch.is_whitespace()) {
        line.pop();
    }
    let Some(&end_marker) = line.last() else {
        return Err(FigError::InvalidCharLine);
    };
    while line.last() == Some(&end_marker) {
        line.pop();
    }
    Ok(line)
}

/// Splits a code tag line into the code point and its description.
/// Negative code points are valid in the format but have no glyph to render.
fn parse_code_tag(line: &str) -> Result<(Option<char>, Option<String>)> {
    let Some(caps) = CODE_TAG.captures(line) else {
        return Err(FigError::InvalidCharTag(line.to_string()));
    };
    let Some(code) = decode_int(&caps[1]) else {
        return Err(FigError::InvalidCharTag(line.to_string()));
    };
    let description = caps.get(2).map(|m| m.as_str().to_string()).filter(|d| !d.is_empty());
    if code < 0 {
        return Ok((None, description));
    }
    let ch = u32::try_from(code).ok().and_then(char::from_u32).ok_or(FigError::InvalidCodePoint(code))?;
    Ok((Some(ch), description))
}
