#![forbid(unsafe_code)]

//! Canvas: the cell grid, packed attributes, and colorspace conversions.
//!
//! The two central types are [`attr::Attr`], a packed 32-bit visual
//! attribute with pure conversion methods to every supported colorspace,
//! and [`canvas::Canvas`], the grid of glyph/attribute cells all backends
//! render from. The [`codec`] module is the textual import/export boundary.

pub mod attr;
pub mod canvas;
pub mod codec;

pub use attr::{Attr, Style, ansi};
pub use canvas::{Canvas, Glyph};
