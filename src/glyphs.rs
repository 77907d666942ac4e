//! The glyphs a seven-segment digit can render, and their segment patterns.
//!
//! Bit *i* of a pattern drives segment line *i*:
//!
//! ```text
//!        A
//!       ===
//!   F ||   || B
//!       =G=
//!   E ||   || C
//!       ===
//!        D    . DP
//! ```

/// The number of segment lines per digit (A-G plus the decimal point).
pub const SEGMENT_COUNT: usize = 8;

/// One past the highest valid raw symbol code.
pub const GLYPH_COUNT: u8 = 18;

/// A renderable glyph: the decimal digits, a blank, and a small alphabet
/// for status words such as `Err` or a temperature readout.
///
/// Discriminants are the raw symbol codes accepted by
/// [`SegMux::set_value`](crate::SegMux::set_value). They are stable and
/// never renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Glyph {
    Digit0 = 0,
    Digit1 = 1,
    Digit2 = 2,
    Digit3 = 3,
    Digit4 = 4,
    Digit5 = 5,
    Digit6 = 6,
    Digit7 = 7,
    Digit8 = 8,
    Digit9 = 9,
    #[default]
    Blank = 10,
    LowerH = 11,
    UpperC = 12,
    UpperE = 13,
    UpperF = 14,
    LowerR = 15,
    Degree = 16,
    Minus = 17,
}

/// Glyphs by raw symbol code.
const GLYPHS: [Glyph; GLYPH_COUNT as usize] = [
    Glyph::Digit0,
    Glyph::Digit1,
    Glyph::Digit2,
    Glyph::Digit3,
    Glyph::Digit4,
    Glyph::Digit5,
    Glyph::Digit6,
    Glyph::Digit7,
    Glyph::Digit8,
    Glyph::Digit9,
    Glyph::Blank,
    Glyph::LowerH,
    Glyph::UpperC,
    Glyph::UpperE,
    Glyph::UpperF,
    Glyph::LowerR,
    Glyph::Degree,
    Glyph::Minus,
];

/// Segment patterns by raw symbol code.
const PATTERNS: [u8; GLYPH_COUNT as usize] = [
    0b_0011_1111, // Digit 0
    0b_0000_0110, // Digit 1
    0b_0101_1011, // Digit 2
    0b_0100_1111, // Digit 3
    0b_0110_0110, // Digit 4
    0b_0110_1101, // Digit 5
    0b_0111_1101, // Digit 6
    0b_0000_0111, // Digit 7
    0b_0111_1111, // Digit 8
    0b_0110_1111, // Digit 9
    0b_0000_0000, // Blank
    0b_0111_0100, // h
    0b_0011_1001, // C
    0b_0111_1001, // E
    0b_0111_0001, // F
    0b_0101_0000, // r
    0b_0110_0011, // degree
    0b_0100_0000, // minus
];

impl Glyph {
    /// Glyphs for the decimal digits, indexed 0-9.
    pub const DIGITS: [Self; 10] = [
        Self::Digit0,
        Self::Digit1,
        Self::Digit2,
        Self::Digit3,
        Self::Digit4,
        Self::Digit5,
        Self::Digit6,
        Self::Digit7,
        Self::Digit8,
        Self::Digit9,
    ];

    /// Looks up the glyph for a raw symbol code.
    ///
    /// Returns `None` for any code at or beyond [`GLYPH_COUNT`].
    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        GLYPHS.get(code as usize).copied()
    }

    /// The raw symbol code of this glyph.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// The segment pattern of this glyph.
    #[must_use]
    #[expect(
        clippy::indexing_slicing,
        reason = "Discriminants are indices into the pattern table"
    )]
    pub const fn pattern(self) -> u8 {
        PATTERNS[self as usize]
    }
}
