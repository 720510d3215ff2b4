use crate::{Font, LayoutMask, PrintDirection, Result};

const UNDERSCORE_PARTNERS: &str = "|/\\[]{}()<>";

/// Hierarchy classes, lowest first. A character yields to one of a later class.
const HIERARCHY: [&str; 6] = ["|", "/\\", "[]", "{}", "()", "<>"];

impl Font {
    /// Number of columns the glyph of `second` may be moved into the glyph of `first`.
    ///
    /// `None` stands for "no character", e.g. the start of a line, and never overlaps.
    /// The result is the tightest value over all rows and never exceeds the
    /// width of the glyph being placed, which is `second` in both directions.
    pub fn calculate_overlap_amount(&self, first: Option<char>, second: Option<char>, smush_mode: LayoutMask, print_direction: PrintDirection) -> Result<usize> {
        if !smush_mode.allows_overlap() {
            return Ok(0);
        }
        let (Some(first), Some(second)) = (first, second) else {
            return Ok(0);
        };

        let placed_width = self.glyph(second)?.width();
        let (left, right) = match print_direction {
            PrintDirection::LeftToRight => (self.glyph(first)?, self.glyph(second)?),
            PrintDirection::RightToLeft => (self.glyph(second)?, self.glyph(first)?),
        };

        if right.width() < 2 || left.width() < 2 {
            return Ok(0);
        }

        let mut smush_amount = placed_width;
        for row in 0..self.height().min(left.height()).min(right.height()) {
            let left_row = left.row(row)?;
            let right_row = right.row(row)?;

            let mut left_boundary = left.width() - 1;
            while left_row[left_boundary] == ' ' && left_boundary > 0 {
                left_boundary -= 1;
            }

            let mut right_boundary = 0;
            while right_row[right_boundary] == ' ' && right_boundary < right.width() - 1 {
                right_boundary += 1;
            }

            let mut row_smush_amount = placed_width.min(left.width() - (left_boundary + 1) + right_boundary);

            let left_ch = left_row[left_boundary];
            if left_ch == ' ' || self.smush_characters(left_ch, right_row[right_boundary], smush_mode, print_direction).is_some() {
                row_smush_amount += 1;
            }

            smush_amount = smush_amount.min(row_smush_amount);
        }

        Ok(smush_amount)
    }

    /// Merges two overlapping cells. `None` means the pair can't be smushed.
    ///
    /// Rules are tried in a fixed order: spaces always give way, then universal
    /// smushing or the selected sub rules.
    pub fn smush_characters(&self, first: char, second: char, mode: LayoutMask, print_direction: PrintDirection) -> Option<char> {
        if first == ' ' {
            return Some(second);
        }
        if second == ' ' {
            return Some(first);
        }

        if !mode.contains(LayoutMask::SMUSHING) {
            return None;
        }

        let hard_blank = self.hard_blank_char();
        if mode.is_universal_smushing() {
            if first == hard_blank {
                return Some(second);
            }
            if second == hard_blank {
                return Some(first);
            }
            return match print_direction {
                PrintDirection::LeftToRight => Some(second),
                PrintDirection::RightToLeft => Some(first),
            };
        }

        if mode.contains(LayoutMask::HARDBLANK) && first == hard_blank && second == hard_blank {
            return Some(first);
        }

        if first == hard_blank || second == hard_blank {
            return None;
        }

        if mode.contains(LayoutMask::EQUAL_CHARACTER) && first == second {
            return Some(first);
        }

        if mode.contains(LayoutMask::UNDERSCORE) {
            if first == '_' && UNDERSCORE_PARTNERS.contains(second) {
                return Some(second);
            }
            if second == '_' && UNDERSCORE_PARTNERS.contains(first) {
                return Some(first);
            }
        }

        if mode.contains(LayoutMask::HIERARCHY) {
            for (i, class) in HIERARCHY.iter().enumerate() {
                let higher = &HIERARCHY[i + 1..];
                if class.contains(first) && higher.iter().any(|h| h.contains(second)) {
                    return Some(second);
                }
                if class.contains(second) && higher.iter().any(|h| h.contains(first)) {
                    return Some(first);
                }
            }
        }

        if mode.contains(LayoutMask::OPPOSITE_PAIR) {
            match (first, second) {
                ('[', ']') | (']', '[') | ('{', '}') | ('}', '{') | ('(', ')') | (')', '(') => return Some('|'),
                _ => {}
            }
        }

        if mode.contains(LayoutMask::BIG_X) {
            match (first, second) {
                ('/', '\\') => return Some('|'),
                ('\\', '/') => return Some('Y'),
                ('>', '<') => return Some('X'),
                _ => {}
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use crate::{FontBuilder, Glyph, Header};

    use super::*;

    const LTR: PrintDirection = PrintDirection::LeftToRight;

    fn font() -> Font {
        FontBuilder::new(Header {
            height: 2,
            ..Default::default()
        })
        .with_glyph('a', Glyph::from_rows(&["/ ", "| "]))
        .with_glyph('b', Glyph::from_rows(&[" \\", " |"]))
        .with_glyph('c', Glyph::from_rows(&["  ", "  "]))
        .with_glyph('d', Glyph::from_rows(&["$x", "$x"]))
        .with_glyph('e', Glyph::from_rows(&["ab", "cd"]))
        .with_glyph('n', Glyph::from_rows(&["n", "n"]))
        .with_glyph('w', Glyph::from_rows(&["    ", "    "]))
        .build()
    }

    fn smush(first: char, second: char, mode: LayoutMask) -> Option<char> {
        font().smush_characters(first, second, mode, LTR)
    }

    #[test]
    fn test_spaces_give_way() {
        assert_eq!(smush(' ', 'x', LayoutMask::empty()), Some('x'));
        assert_eq!(smush('x', ' ', LayoutMask::empty()), Some('x'));
        assert_eq!(smush(' ', '$', LayoutMask::SMUSHING | LayoutMask::BIG_X), Some('$'));
    }

    #[test]
    fn test_fitting_never_merges() {
        assert_eq!(smush('|', '|', LayoutMask::FITTING | LayoutMask::EQUAL_CHARACTER), None);
    }

    #[test]
    fn test_universal_smushing() {
        let mode = LayoutMask::SMUSHING;
        assert_eq!(smush('a', 'b', mode), Some('b'));
        assert_eq!(font().smush_characters('a', 'b', mode, PrintDirection::RightToLeft), Some('a'));
        assert_eq!(smush('$', 'b', mode), Some('b'));
        assert_eq!(smush('a', '$', mode), Some('a'));
    }

    #[test]
    fn test_hardblank_rule() {
        assert_eq!(smush('$', '$', LayoutMask::SMUSHING | LayoutMask::HARDBLANK), Some('$'));
        assert_eq!(smush('$', '$', LayoutMask::SMUSHING | LayoutMask::EQUAL_CHARACTER), None);
        assert_eq!(smush('$', '|', LayoutMask::SMUSHING | LayoutMask::HARDBLANK), None);
    }

    #[test]
    fn test_equal_character_rule() {
        let mode = LayoutMask::SMUSHING | LayoutMask::EQUAL_CHARACTER;
        assert_eq!(smush('|', '|', mode), Some('|'));
        assert_eq!(smush('|', '/', mode), None);
    }

    #[test]
    fn test_underscore_rule() {
        let mode = LayoutMask::SMUSHING | LayoutMask::UNDERSCORE;
        assert_eq!(smush('_', '|', mode), Some('|'));
        assert_eq!(smush('>', '_', mode), Some('>'));
        assert_eq!(smush('_', 'x', mode), None);
    }

    #[test]
    fn test_hierarchy_rule() {
        let mode = LayoutMask::SMUSHING | LayoutMask::HIERARCHY;
        assert_eq!(smush('|', '/', mode), Some('/'));
        assert_eq!(smush('}', '/', mode), Some('}'));
        assert_eq!(smush('[', '<', mode), Some('<'));
        assert_eq!(smush(')', '{', mode), Some(')'));
        assert_eq!(smush('[', ']', mode), None);
        assert_eq!(smush('/', '\\', mode), None);
    }

    #[test]
    fn test_opposite_pair_rule() {
        let mode = LayoutMask::SMUSHING | LayoutMask::OPPOSITE_PAIR;
        assert_eq!(smush('[', ']', mode), Some('|'));
        assert_eq!(smush('}', '{', mode), Some('|'));
        assert_eq!(smush('(', ')', mode), Some('|'));
        assert_eq!(smush('(', ']', mode), None);
    }

    #[test]
    fn test_big_x_rule_is_asymmetric() {
        let mode = LayoutMask::SMUSHING | LayoutMask::BIG_X;
        assert_eq!(smush('/', '\\', mode), Some('|'));
        assert_eq!(smush('\\', '/', mode), Some('Y'));
        assert_eq!(smush('>', '<', mode), Some('X'));
        assert_eq!(smush('<', '>', mode), None);
    }

    #[test]
    fn test_overlap_disabled() {
        let font = font();
        assert_eq!(font.calculate_overlap_amount(Some('a'), Some('b'), LayoutMask::empty(), LTR).unwrap(), 0);
        assert_eq!(font.calculate_overlap_amount(None, Some('b'), LayoutMask::SMUSHING, LTR).unwrap(), 0);
    }

    #[test]
    fn test_overlap_narrow_glyph() {
        let font = font();
        assert_eq!(font.calculate_overlap_amount(Some('a'), Some('n'), LayoutMask::SMUSHING, LTR).unwrap(), 0);
    }

    #[test]
    fn test_overlap_fitting() {
        let font = font();
        // "/ " + " \" closes both gaps, the touching characters stay apart
        assert_eq!(font.calculate_overlap_amount(Some('a'), Some('b'), LayoutMask::FITTING, LTR).unwrap(), 2);
    }

    #[test]
    fn test_overlap_smushing() {
        let font = font();
        let mode = LayoutMask::SMUSHING | LayoutMask::EQUAL_CHARACTER | LayoutMask::BIG_X;
        // row 0 smushes "/\" to "|", row 1 "||" to "|"; both may overlap one more column
        assert_eq!(font.calculate_overlap_amount(Some('a'), Some('b'), mode, LTR).unwrap(), 2);
        // "a" followed by "e": row 0 "/" vs "a" can't be smushed
        assert_eq!(font.calculate_overlap_amount(Some('a'), Some('e'), mode, LTR).unwrap(), 1);
    }

    #[test]
    fn test_overlap_is_capped_by_width() {
        let font = font();
        assert_eq!(font.calculate_overlap_amount(Some('c'), Some('c'), LayoutMask::SMUSHING, LTR).unwrap(), 2);
    }

    #[test]
    fn test_overlap_hard_blank_blocks() {
        let font = font();
        let mode = LayoutMask::SMUSHING | LayoutMask::EQUAL_CHARACTER;
        // "e" ends with visible "b"/"d", "d" starts with hard blanks
        assert_eq!(font.calculate_overlap_amount(Some('e'), Some('d'), mode, LTR).unwrap(), 0);
    }

    #[test]
    fn test_overlap_right_to_left() {
        let font = font();
        // in right to left mode the new glyph is placed on the left side
        assert_eq!(font.calculate_overlap_amount(Some('b'), Some('a'), LayoutMask::FITTING, PrintDirection::RightToLeft).unwrap(), 2);
    }

    #[test]
    fn test_overlap_missing_glyph() {
        let font = font();
        assert!(font.calculate_overlap_amount(Some('a'), Some('Z'), LayoutMask::SMUSHING, LTR).is_err());
    }

    #[test]
    fn test_overlap_right_to_left_narrow_glyph_after_wide() {
        let font = font();
        let rtl = PrintDirection::RightToLeft;
        // the wide blank glyph was placed first, the overlap must still fit into "e"
        assert_eq!(font.calculate_overlap_amount(Some('w'), Some('e'), LayoutMask::SMUSHING, rtl).unwrap(), 2);
        assert_eq!(font.calculate_overlap_amount(Some('e'), Some('w'), LayoutMask::SMUSHING, rtl).unwrap(), 4);
        assert_eq!(font.calculate_overlap_amount(Some('w'), Some('e'), LayoutMask::SMUSHING, LTR).unwrap(), 2);
    }

    #[test]
    fn test_overlap_bound() {
        let font = font();
        let modes = [
            LayoutMask::empty(),
            LayoutMask::FITTING,
            LayoutMask::SMUSHING,
            LayoutMask::SMUSHING | LayoutMask::RULES,
        ];
        for first in font.chars() {
            for second in font.chars() {
                for mode in modes {
                    for direction in [LTR, PrintDirection::RightToLeft] {
                        let amount = font.calculate_overlap_amount(Some(first), Some(second), mode, direction).unwrap();
                        assert!(amount <= font.glyph(second).unwrap().width(), "{first:?} {second:?} {mode:?} {direction:?}");
                    }
                }
            }
        }
    }
}
