use crate::{Font, Glyph, DEUTSCH_CODE_POINTS};

const END_MARKERS: &str = "@#%&*!|~^+=";

impl Font {
    /// Writes the font as FIGfont text.
    ///
    /// Required characters the font lacks are written as empty glyphs so the
    /// positional part of the file stays intact.
    pub fn to_flf(&self) -> String {
        let mut result = self.header().generate_string();
        result.push('\n');

        let empty = Glyph::new(vec![Vec::new(); self.height()]);
        for ch in (' '..='~').chain(DEUTSCH_CODE_POINTS) {
            write_glyph(&mut result, self.glyph(ch).unwrap_or(&empty));
        }

        for ch in self.chars() {
            if (' '..='~').contains(&ch) || DEUTSCH_CODE_POINTS.contains(&ch) {
                continue;
            }
            let Ok(glyph) = self.glyph(ch) else {
                continue;
            };
            result.push_str(&u32::from(ch).to_string());
            if let Some(description) = glyph.description() {
                result.push_str("  ");
                result.push_str(description);
            }
            result.push('\n');
            write_glyph(&mut result, glyph);
        }
        result
    }
}

fn write_glyph(result: &mut String, glyph: &Glyph) {
    let end_marker = END_MARKERS
        .chars()
        .chain('\u{A1}'..='\u{FF}')
        .find(|marker| !glyph.rows().any(|row| row.contains(marker)))
        .unwrap_or_else(|| {
            log::warn!("no free end marker for glyph, it won't read back");
            '@'
        });

    let height = glyph.height();
    for (i, row) in glyph.rows().enumerate() {
        result.extend(row.iter());
        result.push(end_marker);
        if i + 1 == height {
            result.push(end_marker);
        }
        result.push('\n');
    }
}
