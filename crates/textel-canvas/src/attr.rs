#![forbid(unsafe_code)]

//! Packed attributes and colorspace conversions.
//!
//! An [`Attr`] packs everything a backend needs to style one cell into
//! **32 bits**, so a full attribute plane is one `u32` per cell and a
//! quantized 16-color view and a truecolor view are both derivable from
//! the same stored value at render time.
//!
//! # Layout (32 bits, MSB → LSB)
//!
//! ```text
//! [31-29: bg alpha][28-25: bg red][24-21: bg green][20-18: bg blue]
//! [17-15: fg alpha][14-11: fg red][10-7:  fg green][6-4:   fg blue]
//! [3-0: style flags (bold, italics, underline, blink)]
//! ```
//!
//! Each 14-bit color field holds either a truecolor ARGB value
//! down-projected from 16 bits, or an ANSI palette index tagged with a
//! fixed `0x40` offset so the two encodings cannot collide. Values below
//! `0x10` are style-flags-only attributes: applied to a cell or to the
//! canvas default, they merge onto the existing color bits instead of
//! replacing them (see [`Attr::apply`]).
//!
//! All conversions are pure and never fail; range validation happens at
//! the encoding boundary ([`Attr::with_ansi`], [`Attr::with_argb`]) and
//! nowhere else.

use bitflags::bitflags;
use textel_core::{Error, Result};

/// ANSI palette indices and the two out-of-palette sentinels.
///
/// Indices `0x00..=0x0f` are the classic 16-color palette. [`DEFAULT`]
/// stands for the medium's default color and [`TRANSPARENT`] for no color
/// at all; both survive quantization unchanged.
pub mod ansi {
    /// Black.
    pub const BLACK: u8 = 0x00;
    /// Blue.
    pub const BLUE: u8 = 0x01;
    /// Green.
    pub const GREEN: u8 = 0x02;
    /// Cyan.
    pub const CYAN: u8 = 0x03;
    /// Red.
    pub const RED: u8 = 0x04;
    /// Magenta.
    pub const MAGENTA: u8 = 0x05;
    /// Brown.
    pub const BROWN: u8 = 0x06;
    /// Light gray.
    pub const LIGHT_GRAY: u8 = 0x07;
    /// Dark gray.
    pub const DARK_GRAY: u8 = 0x08;
    /// Light blue.
    pub const LIGHT_BLUE: u8 = 0x09;
    /// Light green.
    pub const LIGHT_GREEN: u8 = 0x0a;
    /// Light cyan.
    pub const LIGHT_CYAN: u8 = 0x0b;
    /// Light red.
    pub const LIGHT_RED: u8 = 0x0c;
    /// Light magenta.
    pub const LIGHT_MAGENTA: u8 = 0x0d;
    /// Yellow.
    pub const YELLOW: u8 = 0x0e;
    /// White.
    pub const WHITE: u8 = 0x0f;
    /// The medium's default color (sentinel).
    pub const DEFAULT: u8 = 0x10;
    /// No color at all (sentinel).
    pub const TRANSPARENT: u8 = 0x20;
    /// Highest accepted index.
    pub const MAX: u8 = 0x20;
}

bitflags! {
    /// 4-bit cell style flags, stored in the low nibble of an [`Attr`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Style: u32 {
        /// Bold / increased intensity.
        const BOLD      = 0b0001;
        /// Italic text.
        const ITALICS   = 0b0010;
        /// Underlined text.
        const UNDERLINE = 0b0100;
        /// Blinking text.
        const BLINK     = 0b1000;
    }
}

/// Offset tagging an ANSI palette index inside a 14-bit color field.
const ANSI_TAG: u16 = 0x40;

/// Combined magnitude below which a 14-bit color counts as transparent.
const TOO_TRANSPARENT: u16 = 0x0fff;

/// RGB colors for the ANSI palette, 16 bits (4-4-4-4 ARGB). There is no
/// real standard, so these are the same values as gnome-terminal. The 7th
/// color (brown) is a bit special: 0xfa50 instead of 0xfaa0.
const ANSITAB16: [u16; 16] = [
    0xf000, 0xf00a, 0xf0a0, 0xf0aa, 0xfa00, 0xfa0a, 0xfa50, 0xfaaa,
    0xf555, 0xf55f, 0xf5f5, 0xf5ff, 0xff55, 0xff5f, 0xfff5, 0xffff,
];

/// Same palette, on 14 bits (3-4-4-3).
const ANSITAB14: [u16; 16] = [
    0x3800, 0x3805, 0x3850, 0x3855, 0x3d00, 0x3d05, 0x3d28, 0x3d55,
    0x3aaa, 0x3aaf, 0x3afa, 0x3aff, 0x3faa, 0x3faf, 0x3ffa, 0x3fff,
];

/// A packed 32-bit cell attribute.
///
/// The canonical wire format for cell styling: every conversion in this
/// module reads from or writes to this exact bit layout, so all backends
/// agree on color choices without per-cell recomputation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Attr(u32);

impl Attr {
    /// Default-foreground on transparent-background, no styles.
    pub const DEFAULT: Self = Self(
        (((ansi::TRANSPARENT as u32) | 0x40) << 18) | (((ansi::DEFAULT as u32) | 0x40) << 4),
    );

    /// Reconstruct from a raw 32-bit value.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw 32-bit value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Extract the style flags from the low nibble.
    #[inline]
    pub const fn style(self) -> Style {
        Style::from_bits_truncate(self.0 & 0xf)
    }

    /// Return a copy with different style flags, colors untouched.
    #[inline]
    #[must_use]
    pub const fn with_style(self, style: Style) -> Self {
        Self((self.0 & 0xffff_fff0) | style.bits())
    }

    /// Apply this attribute on top of `base`.
    ///
    /// Values below `0x10` carry style flags only and merge onto `base`'s
    /// color bits; anything else replaces `base` wholesale. This is the
    /// one merge rule shared by cell writes and the canvas default
    /// attribute.
    #[inline]
    #[must_use]
    pub const fn apply(self, base: Self) -> Self {
        if self.0 < 0x10 {
            Self((base.0 & 0xffff_fff0) | self.0)
        } else {
            self
        }
    }

    /// Return a copy with the given ANSI color pair, preserving the
    /// current style flags.
    ///
    /// `fg` and `bg` are palette indices in `0x00..=0x20` (the palette
    /// plus the [`ansi::DEFAULT`] and [`ansi::TRANSPARENT`] sentinels).
    /// Anything above `0x20` is rejected with no change.
    pub const fn with_ansi(self, fg: u8, bg: u8) -> Result<Self> {
        if fg > ansi::MAX || bg > ansi::MAX {
            return Err(Error::InvalidArgument("ansi color index > 0x20"));
        }

        let color = (((bg as u32) | 0x40) << 18) | (((fg as u32) | 0x40) << 4);
        Ok(Self((self.0 & 0x0000_000f) | color))
    }

    /// Return a copy with the given ARGB color pair, preserving the
    /// current style flags.
    ///
    /// Colors are 16-bit ARGB values, 4 bits per channel: `0xf088` is
    /// solid dark cyan, `0x8fff` is white with 50% alpha. Values above
    /// `0xffff` are rejected. Values below `0x100` are shorthand for
    /// fully opaque colors and are normalized by adding `0x100` so they
    /// round correctly.
    pub const fn with_argb(self, fg: u32, bg: u32) -> Result<Self> {
        if fg > 0xffff || bg > 0xffff {
            return Err(Error::InvalidArgument("argb color > 0xffff"));
        }

        let mut fg = fg;
        let mut bg = bg;

        if fg < 0x100 {
            fg += 0x100;
        }
        if bg < 0x100 {
            bg += 0x100;
        }

        // 16-bit 4-4-4-4 down to the stored 14-bit 3-4-4-3: halve the low
        // 11 bits and reinsert the top alpha bit above them.
        let fg = ((fg >> 1) & 0x7ff) | ((fg >> 13) << 11);
        let bg = ((bg >> 1) & 0x7ff) | ((bg >> 13) << 11);

        Ok(Self((self.0 & 0x0000_000f) | (bg << 18) | (fg << 4)))
    }

    /// The raw 14-bit foreground color field.
    #[inline]
    const fn fg14(self) -> u16 {
        ((self.0 >> 4) & 0x3fff) as u16
    }

    /// The raw 14-bit background color field.
    #[inline]
    const fn bg14(self) -> u16 {
        (self.0 >> 18) as u16
    }

    /// Nearest ANSI palette index for the foreground.
    ///
    /// Palette values and the two sentinels pass through unchanged;
    /// truecolor values are quantized to the nearest palette entry.
    #[inline]
    pub fn ansi_fg(self) -> u8 {
        nearest_ansi(self.fg14())
    }

    /// Nearest ANSI palette index for the background.
    #[inline]
    pub fn ansi_bg(self) -> u8 {
        nearest_ansi(self.bg14())
    }

    /// Both quantized colors as one byte: foreground in the low nibble,
    /// background in the high nibble, sentinels resolved to light gray
    /// (fg) and black (bg) for media with no sentinel support.
    pub fn ansi8(self) -> u8 {
        let mut fg = self.ansi_fg();
        let mut bg = self.ansi_bg();

        if fg == ansi::DEFAULT || fg == ansi::TRANSPARENT {
            fg = ansi::LIGHT_GRAY;
        }
        if bg == ansi::DEFAULT || bg == ansi::TRANSPARENT {
            bg = ansi::BLACK;
        }

        fg | (bg << 4)
    }

    /// 12-bit RGB foreground (4 bits per channel).
    ///
    /// Palette and sentinel values map through the 16-entry RGB16 palette
    /// (sentinels resolve to light gray); truecolor values are upshifted
    /// from the 14-bit storage precision.
    pub const fn rgb12_fg(self) -> u16 {
        let fg = self.fg14();

        if fg >= ANSI_TAG && fg < (0x10 | ANSI_TAG) {
            return ANSITAB16[(fg ^ ANSI_TAG) as usize] & 0x0fff;
        }

        if fg == (ansi::DEFAULT as u16 | ANSI_TAG) || fg == (ansi::TRANSPARENT as u16 | ANSI_TAG) {
            return ANSITAB16[ansi::LIGHT_GRAY as usize] & 0x0fff;
        }

        (fg << 1) & 0x0fff
    }

    /// 12-bit RGB background; sentinels resolve to black.
    pub const fn rgb12_bg(self) -> u16 {
        let bg = self.bg14();

        if bg >= ANSI_TAG && bg < (0x10 | ANSI_TAG) {
            return ANSITAB16[(bg ^ ANSI_TAG) as usize] & 0x0fff;
        }

        if bg == (ansi::DEFAULT as u16 | ANSI_TAG) || bg == (ansi::TRANSPARENT as u16 | ANSI_TAG) {
            return ANSITAB16[ansi::BLACK as usize] & 0x0fff;
        }

        (bg << 1) & 0x0fff
    }

    /// 24-bit RGB foreground (8 bits per channel).
    #[inline]
    pub const fn rgb24_fg(self) -> u32 {
        rgb12_to_24(self.rgb12_fg())
    }

    /// 24-bit RGB background (8 bits per channel).
    #[inline]
    pub const fn rgb24_bg(self) -> u32 {
        rgb12_to_24(self.rgb12_bg())
    }

    /// Both colors as eight ARGB4 nibbles, most significant first:
    /// `[bgA, bgR, bgG, bgB, fgA, fgR, fgG, fgB]`.
    ///
    /// Unlike the RGB projections this keeps alpha: the transparent
    /// sentinel emits zero alpha rather than resolving to a palette
    /// color.
    pub const fn argb4(self) -> [u8; 8] {
        let mut fg = self.fg14();
        let mut bg = self.bg14();

        if bg >= ANSI_TAG && bg < (0x10 | ANSI_TAG) {
            bg = ANSITAB16[(bg ^ ANSI_TAG) as usize];
        } else if bg == (ansi::DEFAULT as u16 | ANSI_TAG) {
            bg = ANSITAB16[ansi::BLACK as usize];
        } else if bg == (ansi::TRANSPARENT as u16 | ANSI_TAG) {
            bg = 0x0fff;
        } else {
            bg = ((bg << 2) & 0xf000) | ((bg << 1) & 0x0fff);
        }

        if fg >= ANSI_TAG && fg < (0x10 | ANSI_TAG) {
            fg = ANSITAB16[(fg ^ ANSI_TAG) as usize];
        } else if fg == (ansi::DEFAULT as u16 | ANSI_TAG) {
            fg = ANSITAB16[ansi::LIGHT_GRAY as usize];
        } else if fg == (ansi::TRANSPARENT as u16 | ANSI_TAG) {
            fg = 0x0fff;
        } else {
            fg = ((fg << 2) & 0xf000) | ((fg << 1) & 0x0fff);
        }

        [
            (bg >> 12) as u8,
            ((bg >> 8) & 0xf) as u8,
            ((bg >> 4) & 0xf) as u8,
            (bg & 0xf) as u8,
            (fg >> 12) as u8,
            ((fg >> 8) & 0xf) as u8,
            ((fg >> 4) & 0xf) as u8,
            (fg & 0xf) as u8,
        ]
    }
}

impl Default for Attr {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Expand 12-bit RGB to 24-bit by replicating each nibble into a byte.
const fn rgb12_to_24(c: u16) -> u32 {
    (((c as u32 & 0xf00) >> 8) * 0x110000)
        | (((c as u32 & 0x0f0) >> 4) * 0x001100)
        | ((c as u32 & 0x00f) * 0x000011)
}

/// Quantize a 14-bit color field to an ANSI palette index.
///
/// Tie-breaking is load-bearing: the scan runs over indices 0..15 in
/// ascending order and only replaces the best match on a strictly smaller
/// distance, so equidistant inputs always resolve to the lowest palette
/// index. Output parity with prior behavior depends on this exact order.
fn nearest_ansi(argb14: u16) -> u8 {
    // A tagged palette index passes through unchanged. Untagged fields
    // this small fall through to the transparency collapse below.
    if argb14 >= ANSI_TAG && argb14 < (0x10 | ANSI_TAG) {
        return (argb14 ^ ANSI_TAG) as u8;
    }

    if argb14 == (ansi::DEFAULT as u16 | ANSI_TAG)
        || argb14 == (ansi::TRANSPARENT as u16 | ANSI_TAG)
    {
        return (argb14 ^ ANSI_TAG) as u8;
    }

    if argb14 < TOO_TRANSPARENT {
        return ansi::TRANSPARENT;
    }

    let mut best = ansi::DEFAULT;
    let mut dist = 0x3fffu32;

    for (i, &entry) in ANSITAB14.iter().enumerate() {
        let mut d = 0u32;

        let a = ((entry >> 7) & 0xf) as i32;
        let b = ((argb14 >> 7) & 0xf) as i32;
        d += ((a - b) * (a - b)) as u32;

        let a = ((entry >> 3) & 0xf) as i32;
        let b = ((argb14 >> 3) & 0xf) as i32;
        d += ((a - b) * (a - b)) as u32;

        let a = ((entry << 1) & 0xf) as i32;
        let b = ((argb14 << 1) & 0xf) as i32;
        d += ((a - b) * (a - b)) as u32;

        if d < dist {
            dist = d;
            best = i as u8;
        }
    }

    best
}


#[cfg(test)]
mod attr_proptests {
    use super::{Attr, ansi};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn quantization_is_deterministic(raw in any::<u32>()) {
            let attr = Attr::from_raw(raw);
            prop_assert_eq!(attr.ansi_fg(), attr.ansi_fg());
            prop_assert_eq!(attr.ansi_bg(), attr.ansi_bg());
        }

        #[test]
        fn quantization_always_lands_in_the_palette_or_sentinels(raw in any::<u32>()) {
            let fg = Attr::from_raw(raw).ansi_fg();
            prop_assert!(fg <= 0x20, "fg={fg:#x}");
        }

        #[test]
        fn ansi8_matches_sentinel_resolved_components(raw in any::<u32>()) {
            let attr = Attr::from_raw(raw);
            let fg = attr.ansi_fg();
            let bg = attr.ansi_bg();
            let fg = if fg > 0x0f { ansi::LIGHT_GRAY } else { fg };
            let bg = if bg > 0x0f { ansi::BLACK } else { bg };
            prop_assert_eq!(attr.ansi8(), fg | (bg << 4));
        }

        #[test]
        fn rgb12_stays_in_12_bits(raw in any::<u32>()) {
            let attr = Attr::from_raw(raw);
            prop_assert_eq!(attr.rgb12_fg() & !0x0fff, 0);
            prop_assert_eq!(attr.rgb12_bg() & !0x0fff, 0);
        }

        #[test]
        fn rgb24_channels_replicate_rgb12_nibbles(raw in any::<u32>()) {
            let attr = Attr::from_raw(raw);
            let c12 = attr.rgb12_fg() as u32;
            let c24 = attr.rgb24_fg();
            prop_assert_eq!((c24 >> 16) & 0xff, ((c12 >> 8) & 0xf) * 0x11);
            prop_assert_eq!((c24 >> 8) & 0xff, ((c12 >> 4) & 0xf) * 0x11);
            prop_assert_eq!(c24 & 0xff, (c12 & 0xf) * 0x11);
        }

        #[test]
        fn with_ansi_round_trips_palette_indices(fg in 0u8..=0x0f, bg in 0u8..=0x0f) {
            let attr = Attr::DEFAULT.with_ansi(fg, bg).unwrap();
            prop_assert_eq!(attr.ansi_fg(), fg);
            prop_assert_eq!(attr.ansi_bg(), bg);
        }

        #[test]
        fn with_argb_accepts_the_full_16_bit_range(fg in 0u32..=0xffff, bg in 0u32..=0xffff) {
            let attr = Attr::DEFAULT.with_argb(fg, bg).unwrap();
            // The resulting attribute quantizes without panicking and
            // stays inside the index space.
            prop_assert!(attr.ansi_fg() <= ansi::MAX);
            prop_assert!(attr.ansi_bg() <= ansi::MAX);
        }
    }
}
