// src/editor/command.rs

//! Commands accepted by the editor and the actions it emits back.
//!
//! Every input event the frontend understands is translated into at most one
//! [`Command`] before it reaches the editor, so the state machine never sees
//! raw bytes or key codes.

use crate::editor::tools::Tool;

/// Cursor movement direction on the canvas grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Orientation for cycling through the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleDirection {
    Forward,
    Backward,
}

/// A single editing command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move the cursor one cell, clamped to the canvas bounds.
    Move(Direction),
    /// Apply the active tool at the cursor position.
    Commit,
    /// Select the next or previous palette color.
    CycleColor(CycleDirection),
    /// Select the next tool in cycling order.
    CycleTool,
    /// Select a specific tool directly.
    SelectTool(Tool),
    /// Toggle continuous painting while the cursor moves.
    ToggleBrushLock,
    /// Reset every cell to the background color.
    Clear,
    /// Step one snapshot back in history.
    Undo,
    /// Step one snapshot forward in history.
    Redo,
    /// Write the canvas to a new timestamped record.
    Save,
    /// Replace the canvas with the most recent saved record.
    Load,
    /// Leave the editor.
    Quit,
}

/// Actions the editor asks the application loop to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    /// Shut down cleanly with a zero exit status.
    Quit,
}
