use crate::{FigError, LayoutMask, LayoutMode, PrintDirection, Result};

pub const FONT_MAGIC: &str = "flf2";

/// Signature written by [`Header::generate_string`]; `a` is the only sub version in use.
const FONT_SIGNATURE: &str = "flf2a";

#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub(crate) hard_blank_char: char,
    pub(crate) height: usize,
    pub(crate) baseline: i32,
    pub(crate) max_length: i32,
    pub(crate) old_layout: i32,
    pub(crate) full_layout: LayoutMask,
    pub(crate) comment_lines: usize,
    pub(crate) comment: String,
    pub(crate) print_direction: PrintDirection,
    pub(crate) codetag_count: Option<u32>,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            hard_blank_char: '$',
            height: 1,
            baseline: 1,
            max_length: 0,
            old_layout: 0,
            full_layout: LayoutMask::empty(),
            comment_lines: 0,
            comment: String::new(),
            print_direction: PrintDirection::LeftToRight,
            codetag_count: None,
        }
    }
}

impl Header {
    /// Parses the first line of a FIGfont.
    ///
    /// Everything after the height is optional, a short header leaves the
    /// remaining fields at their defaults. The comment itself is read by the
    /// font parser, this only records how many lines it spans.
    pub fn parse(line: &str) -> Result<Self> {
        let mut fields = line.split_whitespace();
        let Some(signature) = fields.next() else {
            return Err(FigError::InvalidHeader(line.to_string()));
        };
        if !signature.starts_with(FONT_MAGIC) {
            return Err(FigError::InvalidHeader(line.to_string()));
        }
        if signature.chars().count() <= FONT_MAGIC.len() {
            return Err(FigError::InvalidHeaderHardBlank);
        }
        let Some(hard_blank_char) = signature.chars().last() else {
            return Err(FigError::InvalidHeaderHardBlank);
        };

        let mut header = Header {
            hard_blank_char,
            ..Default::default()
        };

        let Some(height) = fields.next() else {
            return Err(FigError::InvalidHeader(line.to_string()));
        };
        let height = parse_field("height", height)?;
        if height < 1 {
            return Err(FigError::InvalidHeaderHeight(height));
        }
        header.height = height as usize;
        header.baseline = header.height as i32;

        if let Some(baseline) = fields.next() {
            header.baseline = to_i32("baseline", parse_field("baseline", baseline)?)?;
        }
        if let Some(max_length) = fields.next() {
            header.max_length = to_i32("max_length", parse_field("max_length", max_length)?)?;
        }
        if let Some(old_layout) = fields.next() {
            header.old_layout = to_i32("old_layout", parse_field("old_layout", old_layout)?)?;
            header.full_layout = LayoutMask::from_old_layout(header.old_layout);
        }
        if let Some(comment_lines) = fields.next() {
            let value = parse_field("comment_lines", comment_lines)?;
            header.comment_lines = usize::try_from(value).map_err(|_| FigError::InvalidHeaderField {
                field: "comment_lines",
                value: comment_lines.to_string(),
            })?;
        }
        if let Some(print_direction) = fields.next() {
            header.print_direction = PrintDirection::from_header(parse_field("print_direction", print_direction)?);
        }
        if let Some(full_layout) = fields.next() {
            let value = parse_field("full_layout", full_layout)?;
            let bits = u32::try_from(value).map_err(|_| FigError::InvalidHeaderField {
                field: "full_layout",
                value: full_layout.to_string(),
            })?;
            header.full_layout = LayoutMask::from_bits_retain(bits);
        }
        if let Some(codetag_count) = fields.next() {
            let value = parse_field("codetag_count", codetag_count)?;
            header.codetag_count = Some(u32::try_from(value).map_err(|_| FigError::InvalidHeaderField {
                field: "codetag_count",
                value: codetag_count.to_string(),
            })?);
        }
        Ok(header)
    }

    pub fn hard_blank_char(&self) -> char {
        self.hard_blank_char
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn baseline(&self) -> i32 {
        self.baseline
    }

    pub fn max_length(&self) -> i32 {
        self.max_length
    }

    pub fn old_layout(&self) -> i32 {
        self.old_layout
    }

    pub fn full_layout(&self) -> LayoutMask {
        self.full_layout
    }

    pub fn horiz_layout(&self) -> LayoutMode {
        self.full_layout.horizontal_mode()
    }

    pub fn comment_lines(&self) -> usize {
        self.comment_lines
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn print_direction(&self) -> PrintDirection {
        self.print_direction
    }

    pub fn codetag_count(&self) -> Option<u32> {
        self.codetag_count
    }

    pub(crate) fn generate_string(&self) -> String {
        format!(
            "{}{} {} {} {} {} {} {} {}{}{}",
            FONT_SIGNATURE,
            self.hard_blank_char,
            self.height,
            self.baseline,
            self.max_length,
            self.old_layout,
            self.comment_lines,
            self.print_direction.to_header(),
            self.full_layout.bits(),
            if let Some(count) = &self.codetag_count {
                format!(" {}", count)
            } else {
                String::new()
            },
            if self.comment_lines > 0 {
                format!("\n{}", self.comment)
            } else {
                String::new()
            }
        )
    }
}

fn parse_field(field: &'static str, value: &str) -> Result<i64> {
    decode_int(value).ok_or_else(|| FigError::InvalidHeaderField {
        field,
        value: value.to_string(),
    })
}

fn to_i32(field: &'static str, value: i64) -> Result<i32> {
    i32::try_from(value).map_err(|_| FigError::InvalidHeaderField {
        field,
        value: value.to_string(),
    })
}

/// Parses an integer the way FIGfont files write them: optional sign, then
/// decimal, `0x`/`#` prefixed hex or `0` prefixed octal.
pub(crate) fn decode_int(text: &str) -> Option<i64> {
    let (negative, digits) = match text.as_bytes().first()? {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };
    let value = if let Some(hex) = digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")).or_else(|| digits.strip_prefix('#')) {
        i64::from_str_radix(hex, 16).ok()?
    } else if digits.len() > 1 && digits.starts_with('0') {
        i64::from_str_radix(&digits[1..], 8).ok()?
    } else {
        digits.parse::<i64>().ok()?
    };
    // from_str_radix accepts its own sign, reject "--1" and "0x-1"
    if digits.starts_with(['-', '+']) || value < 0 {
        return None;
    }
    Some(if negative { -value } else { value })
}
