#![forbid(unsafe_code)]

//! Core: error taxonomy, normalized input events, and logging shims.

pub mod error;
pub mod event;
pub mod logging;

pub use error::{Error, Result};
pub use event::{Event, KeyCode, KeyEvent, Modifiers, MouseButton};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, error, info, trace, warn};
