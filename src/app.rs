// src/app.rs

//! Application loop glue: key bindings, poll timing, and redraw policy.
//!
//! Each cycle blocks on the console until input arrives or the live status
//! message is due to expire, translates key events into editor commands,
//! and redraws only when something actually changed.

use std::time::Instant;

use anyhow::{Context, Result};
use log::{info, warn};

use crate::editor::{Command, CycleDirection, Direction, EditorAction, EditorState, Tool};
use crate::frontend::{ConsoleIo, FrontendEvent};
use crate::keys::{KeyEvent, KeySymbol, Modifiers};
use crate::renderer;

/// Outcome of one event cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppStatus {
    Running,
    Shutdown,
}

/// Maps a key event to the editor command it is bound to, if any.
///
/// Letters bind case-insensitively. Ctrl-C arrives as a decoded control
/// byte because raw mode disables signal generation, and quits like `q`.
pub fn command_for_key(event: KeyEvent) -> Option<Command> {
    if event.modifiers.contains(Modifiers::CONTROL) {
        return match event.symbol {
            KeySymbol::Char('c') => Some(Command::Quit),
            _ => None,
        };
    }
    match event.symbol {
        KeySymbol::Up => Some(Command::Move(Direction::Up)),
        KeySymbol::Down => Some(Command::Move(Direction::Down)),
        KeySymbol::Left => Some(Command::Move(Direction::Left)),
        KeySymbol::Right => Some(Command::Move(Direction::Right)),
        KeySymbol::Enter => Some(Command::Commit),
        KeySymbol::Tab if event.modifiers.contains(Modifiers::SHIFT) => {
            Some(Command::CycleColor(CycleDirection::Backward))
        }
        KeySymbol::Tab => Some(Command::CycleColor(CycleDirection::Forward)),
        KeySymbol::Escape => Some(Command::Quit),
        KeySymbol::Char(c) => match c.to_ascii_lowercase() {
            ' ' => Some(Command::Commit),
            't' => Some(Command::CycleTool),
            'b' => Some(Command::ToggleBrushLock),
            'c' => Some(Command::Clear),
            'u' => Some(Command::Undo),
            'r' => Some(Command::Redo),
            's' => Some(Command::Save),
            'l' => Some(Command::Load),
            'q' => Some(Command::Quit),
            digit @ '1'..='5' => Tool::from_digit(digit).map(Command::SelectTool),
            _ => None,
        },
        _ => None,
    }
}

/// Owns the console and the editor and runs the event loop one cycle at a
/// time.
pub struct App {
    console: ConsoleIo,
    editor: EditorState,
    term_cols: u16,
    term_rows: u16,
}

impl App {
    /// Wires the console to the editor and checks that the terminal is big
    /// enough for the frame layout. A too-small terminal still runs; the
    /// bottom bars just overdraw the grid.
    pub fn new(mut console: ConsoleIo, editor: EditorState) -> Result<Self> {
        let (term_cols, term_rows) = match console.size_cells() {
            Ok(size) => size,
            Err(e) => {
                warn!("Could not determine terminal size: {}. Assuming 80x24.", e);
                (80, 24)
            }
        };
        info!("Terminal size: {}x{} cells.", term_cols, term_rows);

        let snapshot = editor.get_render_snapshot();
        let needed_cols = (snapshot.grid.width() * 2) as u16;
        let needed_rows = (snapshot.grid.height() + 10) as u16;
        if term_cols < needed_cols || term_rows < needed_rows {
            warn!(
                "Terminal is {}x{} cells but the layout wants at least {}x{}.",
                term_cols, term_rows, needed_cols, needed_rows
            );
        }

        console.set_title("cellpaint");

        Ok(App {
            console,
            editor,
            term_cols,
            term_rows,
        })
    }

    /// Composes and writes a frame for the current editor state.
    pub fn draw(&mut self) -> Result<()> {
        let snapshot = self.editor.get_render_snapshot();
        let frame = renderer::compose_frame(&snapshot, self.term_cols, self.term_rows);
        self.console
            .write_frame(&frame)
            .context("Failed to write frame")
    }

    /// Re-checks the terminal size so a resize mid-session moves the
    /// bottom-anchored bars instead of leaving them at stale rows.
    /// Returns true if the size changed. Keeps the last known size if the
    /// query fails.
    fn refresh_terminal_size(&mut self) -> bool {
        match self.console.size_cells() {
            Ok((cols, rows)) => {
                if cols != self.term_cols || rows != self.term_rows {
                    info!(
                        "Terminal resized from {}x{} to {}x{} cells.",
                        self.term_cols, self.term_rows, cols, rows
                    );
                    self.term_cols = cols;
                    self.term_rows = rows;
                    return true;
                }
                false
            }
            Err(e) => {
                warn!("Failed to get terminal size: {}. Using last known.", e);
                false
            }
        }
    }

    /// Runs one cycle: wait for input or a status expiry, apply the
    /// resulting commands, and redraw if anything changed.
    pub fn process_event_cycle(&mut self) -> Result<AppStatus> {
        // Wake exactly when the status message should disappear; block
        // indefinitely when there is none.
        let timeout = self
            .editor
            .status_deadline()
            .map(|deadline| deadline.saturating_duration_since(Instant::now()));

        let events = self
            .console
            .poll_input(timeout)
            .context("Failed to poll console input")?;

        let mut dirty = self.refresh_terminal_size();
        for event in events {
            match event {
                FrontendEvent::CloseRequested => return Ok(AppStatus::Shutdown),
                FrontendEvent::Key(key) => {
                    if let Some(command) = command_for_key(key) {
                        if self.editor.apply(command) == Some(EditorAction::Quit) {
                            return Ok(AppStatus::Shutdown);
                        }
                        dirty = true;
                    }
                }
            }
        }

        if self.editor.expire_status_before(Instant::now()) {
            dirty = true;
        }

        if dirty {
            self.draw()?;
        }
        Ok(AppStatus::Running)
    }

    /// Restores the console to its pre-launch state.
    pub fn shutdown(&mut self) -> Result<()> {
        self.console.cleanup()
    }
}
