// src/frontend/mod.rs

//! Terminal frontend: raw-mode console I/O and key decoding.
//!
//! The frontend owns everything byte-shaped. It reads stdin, decodes escape
//! sequences into [`KeyEvent`]s, and writes fully composed ANSI frames. No
//! editing logic lives here.

use crate::keys::KeyEvent;

pub mod console;
pub mod input;

pub use console::ConsoleIo;
pub use input::KeyDecoder;

/// Fallback terminal dimensions when the size ioctl reports zero cells.
pub const DEFAULT_TERM_WIDTH_CELLS: u16 = 80;
pub const DEFAULT_TERM_HEIGHT_CELLS: u16 = 24;

/// An event produced by polling the console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrontendEvent {
    /// A decoded key press.
    Key(KeyEvent),
    /// Stdin reached end of file; the controlling terminal went away.
    CloseRequested,
}
