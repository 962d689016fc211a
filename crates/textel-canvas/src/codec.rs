#![forbid(unsafe_code)]

//! Textual import and export.
//!
//! Plain export is lossless for glyph content; ANSI export carries the
//! attribute plane as in-band SGR escapes for terminals and logs.

use std::fmt::Write as _;

use unicode_width::UnicodeWidthChar;

use crate::attr::{Attr, Style};
use crate::canvas::{Canvas, Glyph};
use textel_core::Result;

/// Export the glyph plane as UTF-8 text, one `'\n'`-terminated line per
/// row. The tail half of a fullwidth pair contributes nothing since its
/// head already prints as two columns.
#[must_use]
pub fn export_plain(canvas: &Canvas) -> String {
    let mut out = String::with_capacity((canvas.width() + 1) * canvas.height());
    for row in canvas.glyphs().chunks(canvas.width()) {
        for glyph in row {
            match glyph {
                Glyph::Simple(c) | Glyph::WideHead(c) => out.push(*c),
                Glyph::WideTail => {}
            }
        }
        out.push('\n');
    }
    out
}

/// Export glyphs and attributes as UTF-8 text with SGR escapes.
///
/// An escape is emitted only when the attribute differs from the
/// previous printed cell's. Every row ends with a reset and a newline,
/// so each line renders independently.
#[must_use]
pub fn export_ansi(canvas: &Canvas) -> String {
    let mut out = String::with_capacity((canvas.width() + 8) * canvas.height());
    let width = canvas.width();

    for y in 0..canvas.height() {
        let mut prev: Option<Attr> = None;
        for x in 0..width {
            let idx = y * width + x;
            let glyph = canvas.glyphs()[idx];
            if glyph == Glyph::WideTail {
                continue;
            }

            let attr = canvas.attrs()[idx];
            if prev != Some(attr) {
                write_sgr(&mut out, attr);
                prev = Some(attr);
            }
            match glyph {
                Glyph::Simple(c) | Glyph::WideHead(c) => out.push(c),
                Glyph::WideTail => {}
            }
        }
        out.push_str("\x1b[0m\n");
    }
    out
}

/// Library palette order (VGA) to terminal SGR color order.
const SGR_COLOR: [u8; 8] = [0, 4, 2, 6, 1, 5, 3, 7];

/// Append one full SGR sequence describing `attr`.
///
/// The sequence always starts from a reset so the emitted state never
/// depends on what the terminal was showing before.
fn write_sgr(out: &mut String, attr: Attr) {
    out.push_str("\x1b[0");

    let style = attr.style();
    if style.contains(Style::BOLD) {
        out.push_str(";1");
    }
    if style.contains(Style::ITALICS) {
        out.push_str(";3");
    }
    if style.contains(Style::UNDERLINE) {
        out.push_str(";4");
    }
    if style.contains(Style::BLINK) {
        out.push_str(";5");
    }

    let fg = attr.ansi_fg();
    if fg < 0x08 {
        let _ = write!(out, ";{}", 30 + SGR_COLOR[fg as usize]);
    } else if fg < 0x10 {
        let _ = write!(out, ";{}", 90 + SGR_COLOR[(fg & 0x7) as usize]);
    }
    // DEFAULT and TRANSPARENT keep the reset's implicit default color.

    let bg = attr.ansi_bg();
    if bg < 0x08 {
        let _ = write!(out, ";{}", 40 + SGR_COLOR[bg as usize]);
    } else if bg < 0x10 {
        let _ = write!(out, ";{}", 100 + SGR_COLOR[(bg & 0x7) as usize]);
    }

    out.push('m');
}

/// Build a canvas from plain text.
///
/// The canvas is sized to the text: width is the longest line in display
/// columns, height the number of lines, each floored at one cell. All
/// cells carry the default attribute; short lines are padded with
/// spaces.
pub fn import_plain(text: &str) -> Result<Canvas> {
    let width = text
        .lines()
        .map(|line| line.chars().map(|c| c.width().unwrap_or(1).max(1)).sum())
        .max()
        .unwrap_or(0);
    let height = text.lines().count();

    let mut canvas = Canvas::new(width.max(1), height.max(1))?;
    for (y, line) in text.lines().enumerate() {
        canvas.put_str(0, y as i32, line);
    }
    Ok(canvas)
}
