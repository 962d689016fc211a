#![forbid(unsafe_code)]

//! Textel public facade crate.
//!
//! Re-exports the canvas, attribute, codec, and driver surface from the
//! internal crates and offers a lightweight prelude for day-to-day
//! usage.
//!
//! ```no_run
//! use textel::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let mut canvas = Canvas::new(80, 25)?;
//!     let mut driver = driver_for(None, &mut canvas)?;
//!
//!     canvas.set_color_ansi(ansi::WHITE, ansi::BLUE)?;
//!     canvas.put_str(2, 1, "hello");
//!     driver.draw(&canvas)?;
//!
//!     while let Some(event) = driver.poll_event(&mut canvas) {
//!         if let Event::Resize { .. } = event {
//!             driver.handle_resize(&mut canvas);
//!         }
//!     }
//!     Ok(())
//! }
//! ```

// --- Core re-exports -------------------------------------------------------

pub use textel_core::event::{Event, KeyCode, KeyEvent, Modifiers, MouseButton};
pub use textel_core::{Error, Result};

// --- Canvas re-exports -----------------------------------------------------

pub use textel_canvas::attr::{Attr, Style, ansi};
pub use textel_canvas::canvas::{Canvas, Glyph};
pub use textel_canvas::codec::{export_ansi, export_plain, import_plain};

// --- Driver re-exports -----------------------------------------------------

pub use textel_driver::{
    Driver, Mailbox, MemoryDriver, NullDriver, driver_for, parse_geometry,
};
#[cfg(not(target_arch = "wasm32"))]
pub use textel_driver::TerminalDriver;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Attr, Canvas, Driver, Error, Event, Glyph, KeyCode, KeyEvent, Modifiers, Result, Style,
        ansi, driver_for,
    };

    // The `core` alias stays out of the prelude: a glob import must not
    // shadow the standard `core` crate in the user's scope.
    pub use crate::{canvas, driver};
}

pub use textel_canvas as canvas;
pub use textel_core as core;
pub use textel_driver as driver;
