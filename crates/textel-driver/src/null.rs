#![forbid(unsafe_code)]

//! Headless backend. Accepts every call and reports no events.

use textel_canvas::Canvas;
use textel_core::{Event, Result};

use crate::Driver;

/// A driver with no surface and no input source.
///
/// Useful for tests and batch runs where the canvas is consumed through
/// the export codec instead of a display.
#[derive(Debug)]
pub struct NullDriver {
    width: u16,
    height: u16,
}

impl NullDriver {
    /// Adopt the canvas's current size as the surface size.
    #[must_use]
    pub fn new(canvas: &Canvas) -> Self {
        Self {
            width: canvas.width() as u16,
            height: canvas.height() as u16,
        }
    }
}

impl Driver for NullDriver {
    fn name(&self) -> &'static str {
        "null"
    }

    fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn draw(&mut self, _canvas: &Canvas) -> Result<()> {
        Ok(())
    }

    fn poll_event(&mut self, _canvas: &mut Canvas) -> Option<Event> {
        None
    }

    fn handle_resize(&mut self, _canvas: &mut Canvas) {}
}
