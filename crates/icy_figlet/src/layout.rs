#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum PrintDirection {
    #[default]
    LeftToRight,
    RightToLeft,
}

impl PrintDirection {
    /// Header encoding: `0` is left to right, everything else right to left.
    pub fn from_header(value: i64) -> Self {
        if value == 0 {
            PrintDirection::LeftToRight
        } else {
            PrintDirection::RightToLeft
        }
    }

    pub fn to_header(self) -> i32 {
        match self {
            PrintDirection::LeftToRight => 0,
            PrintDirection::RightToLeft => 1,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LayoutMode {
    Full,
    Fitting,
    Smushing,
}

bitflags::bitflags! {
    /// The FIGfont "full layout" bit mask (horizontal part).
    ///
    /// Bits outside of the named flags (the vertical layout bits) are kept
    /// untouched so a mask read from a header can be written back unchanged.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
    pub struct LayoutMask: u32 {
        const EQUAL_CHARACTER =   1;
        const UNDERSCORE      =   2;
        const HIERARCHY       =   4;
        const OPPOSITE_PAIR   =   8;
        const BIG_X           =  16;
        const HARDBLANK       =  32;
        const FITTING         =  64;
        const SMUSHING        = 128;
    }
}

impl LayoutMask {
    /// All horizontal smushing sub-rules.
    pub const RULES: LayoutMask = LayoutMask::EQUAL_CHARACTER
        .union(LayoutMask::UNDERSCORE)
        .union(LayoutMask::HIERARCHY)
        .union(LayoutMask::OPPOSITE_PAIR)
        .union(LayoutMask::BIG_X)
        .union(LayoutMask::HARDBLANK);

    /// Translates the legacy `old_layout` header value.
    ///
    /// `-1` selects full width, `0` kerning (fitting) and a positive value the
    /// listed smushing rules.
    pub fn from_old_layout(old_layout: i32) -> Self {
        if old_layout < 0 {
            LayoutMask::empty()
        } else if old_layout == 0 {
            LayoutMask::FITTING
        } else {
            LayoutMask::from_bits_retain(old_layout as u32 & LayoutMask::RULES.bits()) | LayoutMask::SMUSHING
        }
    }

    /// The legacy encoding of this mask, as written to the header.
    pub fn to_old_layout(self) -> i32 {
        match self.horizontal_mode() {
            LayoutMode::Full => -1,
            LayoutMode::Fitting => 0,
            LayoutMode::Smushing => (self & LayoutMask::RULES).bits() as i32,
        }
    }

    pub fn horizontal_mode(self) -> LayoutMode {
        if self.contains(LayoutMask::SMUSHING) {
            LayoutMode::Smushing
        } else if self.contains(LayoutMask::FITTING) {
            LayoutMode::Fitting
        } else {
            LayoutMode::Full
        }
    }

    /// True if glyphs may be moved into each other at all.
    pub fn allows_overlap(self) -> bool {
        self.intersects(LayoutMask::SMUSHING | LayoutMask::FITTING)
    }

    /// Smushing without any sub rule selected.
    pub fn is_universal_smushing(self) -> bool {
        !self.intersects(LayoutMask::RULES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_old_layout_translation() {
        assert_eq!(LayoutMask::from_old_layout(-1), LayoutMask::empty());
        assert_eq!(LayoutMask::from_old_layout(0), LayoutMask::FITTING);
        assert_eq!(
            LayoutMask::from_old_layout(15),
            LayoutMask::SMUSHING | LayoutMask::EQUAL_CHARACTER | LayoutMask::UNDERSCORE | LayoutMask::HIERARCHY | LayoutMask::OPPOSITE_PAIR
        );
        assert_eq!(LayoutMask::from_old_layout(15).bits(), 143);
    }

    #[test]
    fn test_horizontal_mode() {
        assert_eq!(LayoutMask::empty().horizontal_mode(), LayoutMode::Full);
        assert_eq!(LayoutMask::FITTING.horizontal_mode(), LayoutMode::Fitting);
        assert_eq!((LayoutMask::FITTING | LayoutMask::SMUSHING).horizontal_mode(), LayoutMode::Smushing);
        assert!(!LayoutMask::BIG_X.allows_overlap());
    }

    #[test]
    fn test_old_layout_roundtrip() {
        for old in [-1, 0, 1, 15, 24, 63] {
            assert_eq!(LayoutMask::from_old_layout(old).to_old_layout(), old);
        }
    }

    #[test]
    fn test_vertical_bits_are_kept() {
        let mask = LayoutMask::from_bits_retain(24463);
        assert_eq!(mask.bits(), 24463);
        assert_eq!(mask.horizontal_mode(), LayoutMode::Smushing);
    }

    #[test]
    fn test_print_direction() {
        assert_eq!(PrintDirection::from_header(0), PrintDirection::LeftToRight);
        assert_eq!(PrintDirection::from_header(1), PrintDirection::RightToLeft);
        assert_eq!(PrintDirection::from_header(7), PrintDirection::RightToLeft);
    }
}
