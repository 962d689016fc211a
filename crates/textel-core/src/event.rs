#![forbid(unsafe_code)]

//! Normalized input events.
//!
//! Every driver reports input through this one vocabulary, regardless of
//! where the events originate (terminal escape sequences, a host event
//! pump, or a test harness pushing events by hand).
//!
//! # Design Notes
//!
//! - Mouse coordinates are 0-indexed canvas cell coordinates, not pixels;
//!   the driver owns the pixel-to-cell division.
//! - `Modifiers` use bitflags for easy combination.
//! - `Resize` carries the new canvas size in cells. Observing a `Resize`
//!   does not change the canvas; the caller applies it through the
//!   driver's `handle_resize`.

use bitflags::bitflags;

/// Canonical input event.
///
/// At most one event is returned per `poll_event` call; drivers never
/// coalesce distinct events into one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A keyboard event.
    Key(KeyEvent),

    /// A mouse button was pressed at the given cell.
    MousePress {
        /// Column of the cell under the pointer.
        x: u16,
        /// Row of the cell under the pointer.
        y: u16,
        /// Which button was pressed.
        button: MouseButton,
    },

    /// The pointer moved to a new cell.
    MouseMotion {
        /// Column of the cell under the pointer.
        x: u16,
        /// Row of the cell under the pointer.
        y: u16,
    },

    /// The display surface was resized.
    Resize {
        /// New canvas width in cells.
        width: u16,
        /// New canvas height in cells.
        height: u16,
    },

    /// The host asked the application to quit (window close, hangup).
    Quit,
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Create a new key event with no modifiers.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
        }
    }

    /// Attach modifiers to this event.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Check if this is a specific character key.
    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        matches!(self.code, KeyCode::Char(ch) if ch == c)
    }

    /// Check if Ctrl modifier is held.
    #[must_use]
    pub const fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }
}

/// Key codes for keyboard events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A regular character key.
    Char(char),

    /// Enter/Return key.
    Enter,

    /// Escape key.
    Escape,

    /// Backspace key.
    Backspace,

    /// Tab key.
    Tab,

    /// Delete key.
    Delete,

    /// Insert key.
    Insert,

    /// Home key.
    Home,

    /// End key.
    End,

    /// Page Up key.
    PageUp,

    /// Page Down key.
    PageDown,

    /// Up arrow key.
    Up,

    /// Down arrow key.
    Down,

    /// Left arrow key.
    Left,

    /// Right arrow key.
    Right,

    /// Function key (F1-F12).
    F(u8),
}

bitflags! {
    /// Modifier keys that can be held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left button.
    Left,
    /// Middle button (wheel click).
    Middle,
    /// Right button.
    Right,
}
