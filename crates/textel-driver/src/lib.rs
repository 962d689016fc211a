#![forbid(unsafe_code)]

//! Display driver contract and backends.
//!
//! A [`Driver`] owns one output surface and one input source for a
//! [`Canvas`]. Construction is initialization and may fail with
//! [`Error::Unavailable`] when the backend's host resource is missing;
//! dropping the driver releases the surface. There is no runtime
//! lifecycle state to check: a live driver is always usable.
//!
//! Backends:
//!
//! - [`NullDriver`] — headless, accepts everything, reports nothing.
//! - [`MemoryDriver`] — host-driven in-memory frame, events pushed by
//!   the embedding host.
//! - [`TerminalDriver`] — crossterm-backed terminal output.
//!
//! The model is single-threaded and cooperative: one driver/canvas pair,
//! `poll_event` never blocks, and blocking is confined to construction.

pub mod mailbox;
pub mod memory;
pub mod null;
#[cfg(not(target_arch = "wasm32"))]
pub mod terminal;

pub use mailbox::Mailbox;
pub use memory::MemoryDriver;
pub use null::NullDriver;
#[cfg(not(target_arch = "wasm32"))]
pub use terminal::TerminalDriver;

use textel_canvas::Canvas;
use textel_core::{Error, Event, Result};

/// One output surface plus one input source.
///
/// `draw` never mutates the canvas; `poll_event` and `handle_resize`
/// may resize it. Pending resizes are reported before buffered input,
/// and the size notification a backend delivers immediately after
/// construction is swallowed (it is the initial size report, not a user
/// resize).
pub trait Driver {
    /// Backend name, usable as a `driver_for` key.
    fn name(&self) -> &'static str;

    /// Current surface size in cells.
    fn size(&self) -> (u16, u16);

    /// Set the window or surface title. Best-effort.
    fn set_title(&mut self, _title: &str) {}

    /// Present the full canvas on the surface.
    fn draw(&mut self, canvas: &Canvas) -> Result<()>;

    /// Return at most one pending event without blocking.
    ///
    /// A pending resize is reported (as [`Event::Resize`]) before any
    /// buffered input. The canvas is only mutated through
    /// [`handle_resize`]; callers decide when to apply a reported size.
    ///
    /// [`handle_resize`]: Driver::handle_resize
    fn poll_event(&mut self, canvas: &mut Canvas) -> Option<Event>;

    /// Apply the most recent pending resize to the canvas, if any.
    fn handle_resize(&mut self, canvas: &mut Canvas);

    /// Show or hide the pointing device cursor. Best-effort.
    fn set_mouse_visible(&mut self, _visible: bool) {}
}

/// Parse a `"WIDTHxHEIGHT"` geometry hint.
///
/// Both dimensions must be positive decimal integers; anything else is
/// ignored rather than reported.
#[must_use]
pub fn parse_geometry(hint: &str) -> Option<(usize, usize)> {
    let (w, h) = hint.split_once('x')?;
    let w = w.trim().parse::<usize>().ok()?;
    let h = h.trim().parse::<usize>().ok()?;
    if w == 0 || h == 0 {
        return None;
    }
    Some((w, h))
}

/// Construct a driver by name, or probe the environment when unnamed.
///
/// Named selection (`"null"`, `"memory"`, `"terminal"`) tries exactly
/// that backend. Unnamed selection consults `TEXTEL_DRIVER`, then tries
/// the terminal, then falls back to the null backend so headless runs
/// always get a driver. No global state is involved; callers own the
/// returned driver.
pub fn driver_for(name: Option<&str>, canvas: &mut Canvas) -> Result<Box<dyn Driver>> {
    let env_name = std::env::var("TEXTEL_DRIVER").ok();
    let chosen = name.or(env_name.as_deref());

    match chosen {
        Some("null") => Ok(Box::new(NullDriver::new(canvas))),
        Some("memory") => Ok(Box::new(MemoryDriver::new(canvas))),
        #[cfg(not(target_arch = "wasm32"))]
        Some("terminal") => Ok(Box::new(TerminalDriver::new(canvas)?)),
        Some(_) => Err(Error::InvalidArgument("unknown driver name")),
        None => {
            #[cfg(not(target_arch = "wasm32"))]
            match TerminalDriver::new(canvas) {
                Ok(driver) => return Ok(Box::new(driver)),
                Err(Error::Unavailable(_)) => {}
                Err(e) => return Err(e),
            }
            Ok(Box::new(NullDriver::new(canvas)))
        }
    }
}
