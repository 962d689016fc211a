#![forbid(unsafe_code)]

//! The cell grid.
//!
//! A [`Canvas`] owns two parallel row-major planes — glyphs and packed
//! attributes — plus a cursor position and the current drawing attribute.
//! Cells are addressed as `index = x + y * width` and the planes always
//! hold exactly `width * height` entries each.
//!
//! # Out-of-range semantics
//!
//! Coordinates are `i32` and out-of-bounds access is never an error:
//! reads return a deterministic fallback (space / the current attribute)
//! and writes are silent no-ops, so callers never bounds-check.
//!
//! # Fullwidth coupling
//!
//! A fullwidth glyph occupies two adjacent cells, modeled structurally as
//! a [`Glyph::WideHead`] followed by a [`Glyph::WideTail`]. The pair is
//! written atomically, always carries identical attributes on both
//! halves, and is dissolved (the surviving half becomes a space) before
//! any write lands on either half.

use unicode_width::UnicodeWidthChar;

use crate::attr::Attr;
use textel_core::{Error, Result};

/// One cell's glyph content.
///
/// The tag replaces the magic continuation code point traditionally used
/// for fullwidth pairing, so the invariant is visible in the type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Glyph {
    /// A single-width code point.
    Simple(char),
    /// The left half of a fullwidth glyph; owns the code point.
    WideHead(char),
    /// The right half of a fullwidth glyph; owns nothing.
    WideTail,
}

impl Glyph {
    /// The blank cell every canvas starts from.
    pub const SPACE: Self = Self::Simple(' ');

    /// Number of cells this glyph's code point occupies (1 or 2);
    /// a tail reports 0 since its head already accounts for it.
    #[must_use]
    pub const fn width(self) -> usize {
        match self {
            Self::Simple(_) => 1,
            Self::WideHead(_) => 2,
            Self::WideTail => 0,
        }
    }
}

impl Default for Glyph {
    fn default() -> Self {
        Self::SPACE
    }
}

/// Display width of a code point in cells (1 or 2).
///
/// Zero-width and control characters still occupy one cell here: the
/// canvas is a grid, not a shaping engine.
fn char_cells(c: char) -> usize {
    match c.width() {
        Some(2) => 2,
        _ => 1,
    }
}

/// A rectangular grid of glyph/attribute cells.
///
/// # Example
///
/// ```
/// use textel_canvas::Canvas;
///
/// let mut cv = Canvas::new(80, 24).unwrap();
/// cv.put_char(0, 0, 'H');
/// cv.put_char(1, 0, 'i');
/// assert_eq!(cv.get_char(1, 0), 'i');
/// ```
#[derive(Debug, Clone)]
pub struct Canvas {
    width: usize,
    height: usize,
    glyphs: Vec<Glyph>,
    attrs: Vec<Attr>,
    cursor_x: i32,
    cursor_y: i32,
    curattr: Attr,
}

impl Canvas {
    /// Create a canvas of the given size, filled with spaces in the
    /// default attribute.
    ///
    /// Zero dimensions are a construction error.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidSize { width, height });
        }

        let cells = width * height;
        Ok(Self {
            width,
            height,
            glyphs: vec![Glyph::SPACE; cells],
            attrs: vec![Attr::DEFAULT; cells],
            cursor_x: 0,
            cursor_y: 0,
            curattr: Attr::DEFAULT,
        })
    }

    /// Canvas width in cells.
    #[inline]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Canvas height in cells.
    #[inline]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// The current drawing attribute.
    #[inline]
    pub const fn attr(&self) -> Attr {
        self.curattr
    }

    /// Read-only view of the glyph plane, row-major.
    #[inline]
    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    /// Read-only view of the attribute plane, row-major.
    #[inline]
    pub fn attrs(&self) -> &[Attr] {
        &self.attrs
    }

    /// Convert coordinates to a linear index, `None` when out of bounds.
    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x < self.width && y < self.height {
            Some(y * self.width + x)
        } else {
            None
        }
    }

    /// Move the cursor. The position is not clamped; any value is kept
    /// verbatim and only matters to callers that read it back.
    pub fn gotoxy(&mut self, x: i32, y: i32) {
        self.cursor_x = x;
        self.cursor_y = y;
    }

    /// Cursor column as last set.
    #[inline]
    pub const fn cursor_x(&self) -> i32 {
        self.cursor_x
    }

    /// Cursor row as last set.
    #[inline]
    pub const fn cursor_y(&self) -> i32 {
        self.cursor_y
    }

    /// The glyph at the given coordinates; out of bounds reads a space.
    pub fn get_glyph(&self, x: i32, y: i32) -> Glyph {
        match self.index(x, y) {
            Some(idx) => self.glyphs[idx],
            None => Glyph::SPACE,
        }
    }

    /// The code point at the given coordinates.
    ///
    /// Out of bounds reads a space. On the tail half of a fullwidth pair
    /// this reports the owning head's code point, since that is the glyph
    /// occupying the cell.
    pub fn get_char(&self, x: i32, y: i32) -> char {
        match self.get_glyph(x, y) {
            Glyph::Simple(c) | Glyph::WideHead(c) => c,
            Glyph::WideTail => match self.get_glyph(x - 1, y) {
                Glyph::WideHead(c) => c,
                _ => ' ',
            },
        }
    }

    /// The attribute at the given coordinates; out of bounds reads the
    /// current drawing attribute.
    pub fn get_attr(&self, x: i32, y: i32) -> Attr {
        match self.index(x, y) {
            Some(idx) => self.attrs[idx],
            None => self.curattr,
        }
    }

    /// Write one code point at the given coordinates using the current
    /// drawing attribute.
    ///
    /// Out-of-bounds writes are silently dropped. A fullwidth code point
    /// writes a head/tail pair atomically: if the second cell does not
    /// fit, nothing is written. Overwriting either half of an existing
    /// pair dissolves the pair first, so no dangling tail survives.
    pub fn put_char(&mut self, x: i32, y: i32, c: char) {
        if char_cells(c) == 2 {
            self.put_wide(x, y, c);
            return;
        }

        let Some(idx) = self.index(x, y) else { return };
        self.dissolve_pair(idx, x, y);
        self.glyphs[idx] = Glyph::Simple(c);
        self.attrs[idx] = self.curattr;
    }

    /// Write a fullwidth code point across `(x, y)` and `(x + 1, y)`.
    fn put_wide(&mut self, x: i32, y: i32, c: char) {
        // The tail column must not wrap at the coordinate limit.
        let Some(tx) = x.checked_add(1) else { return };
        let (Some(head), Some(tail)) = (self.index(x, y), self.index(tx, y)) else {
            return;
        };

        self.dissolve_pair(head, x, y);
        self.dissolve_pair(tail, tx, y);

        self.glyphs[head] = Glyph::WideHead(c);
        self.glyphs[tail] = Glyph::WideTail;
        self.attrs[head] = self.curattr;
        self.attrs[tail] = self.curattr;
    }

    /// If the cell at `idx` is half of a fullwidth pair, turn the other
    /// half into a space (keeping its attribute) so the pair invariant
    /// holds after `idx` is overwritten.
    fn dissolve_pair(&mut self, idx: usize, x: i32, y: i32) {
        match self.glyphs[idx] {
            Glyph::WideHead(_) => {
                if let Some(tail) = self.index(x + 1, y)
                    && self.glyphs[tail] == Glyph::WideTail
                {
                    self.glyphs[tail] = Glyph::SPACE;
                }
            }
            Glyph::WideTail => {
                if let Some(head) = self.index(x - 1, y)
                    && matches!(self.glyphs[head], Glyph::WideHead(_))
                {
                    self.glyphs[head] = Glyph::SPACE;
                }
            }
            Glyph::Simple(_) => {}
        }
    }

    /// Write a string left to right starting at `(x, y)`, advancing by
    /// each glyph's display width. Clipping follows [`put_char`] rules
    /// cell by cell.
    ///
    /// [`put_char`]: Canvas::put_char
    pub fn put_str(&mut self, x: i32, y: i32, s: &str) {
        let mut cx = x;
        for c in s.chars() {
            // Past the right edge nothing further can land.
            if cx >= self.width as i32 {
                break;
            }
            self.put_char(cx, y, c);
            cx += char_cells(c) as i32;
        }
    }

    /// Set the attribute of one cell without touching its glyph.
    ///
    /// Out of bounds is a silent no-op. Attributes below `0x10` merge
    /// onto the cell's existing color bits (see [`Attr::apply`]). If the
    /// cell is half of a fullwidth pair, both halves receive the same
    /// attribute.
    pub fn put_attr(&mut self, x: i32, y: i32, attr: Attr) {
        let Some(idx) = self.index(x, y) else { return };

        let merged = attr.apply(self.attrs[idx]);
        self.attrs[idx] = merged;

        match self.glyphs[idx] {
            Glyph::WideHead(_) => {
                if let Some(tail) = self.index(x + 1, y)
                    && self.glyphs[tail] == Glyph::WideTail
                {
                    self.attrs[tail] = merged;
                }
            }
            Glyph::WideTail => {
                if let Some(head) = self.index(x - 1, y)
                    && matches!(self.glyphs[head], Glyph::WideHead(_))
                {
                    self.attrs[head] = merged;
                }
            }
            Glyph::Simple(_) => {}
        }
    }

    /// Set the current drawing attribute.
    ///
    /// Attributes below `0x10` merge their style flags onto the current
    /// attribute's color bits instead of replacing them.
    pub fn set_attr(&mut self, attr: Attr) {
        self.curattr = attr.apply(self.curattr);
    }

    /// Set the current ANSI color pair, preserving the current style
    /// flags. Indices above `0x20` are rejected with no change.
    pub fn set_color_ansi(&mut self, fg: u8, bg: u8) -> Result<()> {
        self.curattr = self.curattr.with_ansi(fg, bg)?;
        Ok(())
    }

    /// Set the current ARGB color pair (16-bit, 4 bits per channel),
    /// preserving the current style flags. Values above `0xffff` are
    /// rejected with no change.
    pub fn set_color_argb(&mut self, fg: u32, bg: u32) -> Result<()> {
        self.curattr = self.curattr.with_argb(fg, bg)?;
        Ok(())
    }

    /// Resize the canvas, reallocating both planes together.
    ///
    /// Content in the overlapping rectangle is preserved at identical
    /// coordinates; newly exposed cells are spaces in the current
    /// attribute. A fullwidth pair severed by the new right edge
    /// degrades to a space. The cursor is left unclamped: after a
    /// shrink, callers may observe a cursor outside the new bounds.
    pub fn set_size(&mut self, width: usize, height: usize) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidSize { width, height });
        }

        let cells = width * height;
        let mut glyphs = vec![Glyph::SPACE; cells];
        let mut attrs = vec![self.curattr; cells];

        for y in 0..self.height.min(height) {
            for x in 0..self.width.min(width) {
                glyphs[y * width + x] = self.glyphs[y * self.width + x];
                attrs[y * width + x] = self.attrs[y * self.width + x];
            }
        }

        // A head whose tail fell off the new right edge becomes a space.
        if width < self.width {
            for y in 0..self.height.min(height) {
                let last = y * width + (width - 1);
                if matches!(glyphs[last], Glyph::WideHead(_)) {
                    glyphs[last] = Glyph::SPACE;
                }
            }
        }

        self.width = width;
        self.height = height;
        self.glyphs = glyphs;
        self.attrs = attrs;
        Ok(())
    }

    /// Reset every cell to a space in the current attribute. The cursor
    /// and the current attribute itself are untouched.
    pub fn clear(&mut self) {
        self.glyphs.fill(Glyph::SPACE);
        self.attrs.fill(self.curattr);
    }
}
