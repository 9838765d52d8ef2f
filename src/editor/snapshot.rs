// src/editor/snapshot.rs

//! Immutable view of the editor handed to the renderer.
//!
//! The renderer never touches live editor state; it works from an
//! [`EditorSnapshot`] taken after each command so drawing and editing cannot
//! observe each other mid-update.

use crate::canvas::Canvas;
use crate::color::PaletteColor;
use crate::editor::tools::Tool;

/// A cell position on the canvas grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

/// Severity of a transient status message, used to pick its border color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    /// Neutral notice, e.g. nothing to load.
    Info,
    /// A completed save or load.
    Success,
    /// A failed save or load.
    Error,
}

/// A transient message shown in a box over the canvas until it expires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
}

/// Everything the renderer needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorSnapshot {
    /// Full copy of the canvas contents.
    pub grid: Canvas,
    /// Cursor cell position.
    pub cursor: Point,
    /// Currently selected palette color.
    pub active_color: PaletteColor,
    /// Currently selected tool.
    pub active_tool: Tool,
    /// Whether movement paints continuously.
    pub brush_locked: bool,
    /// 1-based position of the current snapshot in history.
    pub history_position: usize,
    /// Total number of history snapshots.
    pub history_len: usize,
    /// Message to overlay on the frame, if one is live.
    pub status: Option<StatusMessage>,
}

impl EditorSnapshot {
    /// Color of the cell at `point`, or `None` outside the grid.
    pub fn cell(&self, point: Point) -> Option<PaletteColor> {
        self.grid.get(point.x as i32, point.y as i32).ok()
    }
}
