#![allow(dead_code)]

use icy_figlet::DEUTSCH_CODE_POINTS;

/// Builds FIGfont text with all required glyphs.
///
/// Glyphs not listed in `glyphs` are one column wide and show the character
/// itself on every row; space is drawn with the hard blank `$`.
pub fn font_source(header: &str, height: usize, glyphs: &[(char, &[&str])]) -> String {
    let mut result = String::new();
    result.push_str(header);
    result.push('\n');
    for ch in (' '..='~').chain(DEUTSCH_CODE_POINTS) {
        let rows = match glyphs.iter().find(|(c, _)| *c == ch) {
            Some((_, rows)) => rows.iter().map(|r| r.to_string()).collect::<Vec<_>>(),
            None if ch == ' ' => vec!["$".to_string(); height],
            None => vec![ch.to_string(); height],
        };
        push_glyph(&mut result, &rows);
    }
    result
}

pub fn push_glyph(result: &mut String, rows: &[String]) {
    let marker = if rows.iter().any(|r| r.contains('@')) { '#' } else { '@' };
    for (i, row) in rows.iter().enumerate() {
        result.push_str(row);
        result.push(marker);
        if i + 1 == rows.len() {
            result.push(marker);
        }
        result.push('\n');
    }
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
