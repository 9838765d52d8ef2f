// src/editor/mod.rs

//! The editor state machine.
//!
//! [`EditorState`] owns the canvas, cursor, tool selection, history, and the
//! drawing store. The application loop feeds it [`Command`]s and renders the
//! [`EditorSnapshot`] it produces; the only action flowing back out is a
//! request to quit.

use std::time::{Duration, Instant};

use log::{debug, trace, warn};

use crate::canvas::Canvas;
use crate::color::PaletteColor;
use crate::config::Config;
use crate::error::EditorError;
use crate::history::History;
use crate::raster;
use crate::storage::DrawingStore;

pub mod command;
pub mod snapshot;
pub mod tools;

pub use command::{Command, CycleDirection, Direction, EditorAction};
pub use snapshot::{EditorSnapshot, Point, StatusKind, StatusMessage};
pub use tools::{Gesture, Tool};

/// A status message together with the instant it disappears.
#[derive(Debug, Clone)]
struct LiveStatus {
    message: StatusMessage,
    expires_at: Instant,
}

/// The complete editing state.
///
/// Mutation happens only through [`EditorState::apply`]; everything the
/// renderer sees comes out of [`EditorState::get_render_snapshot`].
pub struct EditorState {
    canvas: Canvas,
    cursor: Point,
    color: PaletteColor,
    tool: Tool,
    gesture: Gesture,
    brush_locked: bool,
    history: History,
    store: DrawingStore,
    status: Option<LiveStatus>,
    status_duration: Duration,
}

impl EditorState {
    /// Creates a fresh editor: blank canvas, cursor at the origin, green
    /// selected, single-cell tool active, history seeded with the blank state.
    pub fn new(config: &Config) -> Self {
        let canvas = Canvas::new(config.canvas.width, config.canvas.height);
        let history = History::new(canvas.clone(), config.history.capacity);
        EditorState {
            canvas,
            cursor: Point::default(),
            color: PaletteColor::Green,
            tool: Tool::default(),
            gesture: Gesture::default(),
            brush_locked: false,
            history,
            store: DrawingStore::new(config.storage.directory.clone()),
            status: None,
            status_duration: Duration::from_millis(config.status.message_duration_ms),
        }
    }

    /// Applies one command, returning an action for the application loop to
    /// carry out if the command produced one.
    pub fn apply(&mut self, command: Command) -> Option<EditorAction> {
        trace!("Applying command: {:?}", command);
        match command {
            Command::Move(direction) => self.handle_move(direction),
            Command::Commit => self.handle_commit(),
            Command::CycleColor(direction) => self.handle_cycle_color(direction),
            Command::CycleTool => self.select_tool(self.tool.next()),
            Command::SelectTool(tool) => self.select_tool(tool),
            Command::ToggleBrushLock => {
                self.brush_locked = !self.brush_locked;
                debug!("Brush lock {}", if self.brush_locked { "on" } else { "off" });
            }
            Command::Clear => self.handle_clear(),
            Command::Undo => self.handle_undo(),
            Command::Redo => self.handle_redo(),
            Command::Save => self.handle_save(),
            Command::Load => self.handle_load(),
            Command::Quit => return Some(EditorAction::Quit),
        }
        None
    }

    /// A copy of everything the renderer needs for one frame.
    pub fn get_render_snapshot(&self) -> EditorSnapshot {
        EditorSnapshot {
            grid: self.canvas.clone(),
            cursor: self.cursor,
            active_color: self.color,
            active_tool: self.tool,
            brush_locked: self.brush_locked,
            history_position: self.history.position(),
            history_len: self.history.len(),
            status: self.status.as_ref().map(|live| live.message.clone()),
        }
    }

    /// Deadline of the live status message, if one is showing. The
    /// application loop uses this to wake up exactly when a redraw is due.
    pub fn status_deadline(&self) -> Option<Instant> {
        self.status.as_ref().map(|live| live.expires_at)
    }

    /// Drops the live status message if its deadline is at or before `now`.
    /// Returns true when a message was removed and the frame is stale.
    pub fn expire_status_before(&mut self, now: Instant) -> bool {
        match &self.status {
            Some(live) if live.expires_at <= now => {
                self.status = None;
                true
            }
            _ => false,
        }
    }

    fn handle_move(&mut self, direction: Direction) {
        match direction {
            Direction::Up if self.cursor.y > 0 => self.cursor.y -= 1,
            Direction::Down if self.cursor.y + 1 < self.canvas.height() => self.cursor.y += 1,
            Direction::Left if self.cursor.x > 0 => self.cursor.x -= 1,
            Direction::Right if self.cursor.x + 1 < self.canvas.width() => self.cursor.x += 1,
            _ => {}
        }
        if self.brush_locked && self.tool == Tool::Single {
            // Paints the landing cell even when the move was clamped at an
            // edge. Locked strokes are folded into the next commit's
            // history entry rather than recorded per cell.
            self.canvas
                .set(self.cursor.x as i32, self.cursor.y as i32, self.color);
        }
    }

    fn handle_commit(&mut self) {
        match self.tool {
            Tool::Single => {
                self.canvas
                    .set(self.cursor.x as i32, self.cursor.y as i32, self.color);
                self.push_snapshot();
            }
            Tool::Fill => self.commit_fill(),
            Tool::Line | Tool::Rectangle | Tool::Circle => match self.gesture {
                Gesture::Idle => {
                    debug!(
                        "Armed {:?} at ({}, {})",
                        self.tool, self.cursor.x, self.cursor.y
                    );
                    self.gesture = Gesture::Armed {
                        anchor: self.cursor,
                    };
                }
                Gesture::Armed { anchor } => self.commit_shape(anchor),
            },
        }
    }

    fn commit_shape(&mut self, anchor: Point) {
        let (ax, ay) = (anchor.x as i32, anchor.y as i32);
        let (cx, cy) = (self.cursor.x as i32, self.cursor.y as i32);
        let points = match self.tool {
            Tool::Line => raster::line_points(ax, ay, cx, cy),
            Tool::Rectangle => raster::rectangle_points(ax, ay, cx, cy),
            Tool::Circle => raster::circle_points(ax, ay, cx, cy),
            // Single and Fill never arm a gesture.
            Tool::Single | Tool::Fill => Vec::new(),
        };
        debug!("Committing {:?} with {} points", self.tool, points.len());
        for (x, y) in points {
            self.canvas.set(x, y, self.color);
        }
        self.gesture = Gesture::Idle;
        self.push_snapshot();
    }

    fn commit_fill(&mut self) {
        let (x, y) = (self.cursor.x as i32, self.cursor.y as i32);
        match raster::flood_fill_points(&self.canvas, x, y, self.color) {
            Ok(points) if points.is_empty() => {
                trace!("Fill at ({}, {}) changed nothing", x, y);
            }
            Ok(points) => {
                debug!("Filling {} cells from ({}, {})", points.len(), x, y);
                for (px, py) in points {
                    self.canvas.set(px, py, self.color);
                }
                self.push_snapshot();
            }
            Err(e) => warn!("Fill skipped: {}", e),
        }
    }

    fn handle_cycle_color(&mut self, direction: CycleDirection) {
        self.color = match direction {
            CycleDirection::Forward => self.color.next(),
            CycleDirection::Backward => self.color.prev(),
        };
        trace!("Selected color {}", self.color.name());
    }

    fn select_tool(&mut self, tool: Tool) {
        if self.gesture != Gesture::Idle {
            debug!("Discarding armed anchor on tool selection");
            self.gesture = Gesture::Idle;
        }
        self.tool = tool;
    }

    fn handle_clear(&mut self) {
        self.canvas.clear();
        self.push_snapshot();
    }

    fn handle_undo(&mut self) {
        if let Some(snapshot) = self.history.undo() {
            self.canvas = snapshot.clone();
        }
    }

    fn handle_redo(&mut self) {
        if let Some(snapshot) = self.history.redo() {
            self.canvas = snapshot.clone();
        }
    }

    fn handle_save(&mut self) {
        match self.store.save(&self.canvas) {
            Ok(filename) => {
                self.set_status(StatusKind::Success, format!("Saved as {}", filename));
            }
            Err(e) => {
                warn!("Save failed: {}", e);
                self.set_status(StatusKind::Error, format!("Save failed: {}", e));
            }
        }
    }

    fn handle_load(&mut self) {
        match self.store.load_latest() {
            Ok((filename, record)) => {
                record.apply_to(&mut self.canvas);
                self.push_snapshot();
                self.set_status(StatusKind::Success, format!("Loaded {}", filename));
            }
            Err(EditorError::NoSavedRecords) => {
                self.set_status(StatusKind::Info, "No saved drawings found".to_string());
            }
            Err(e) => {
                warn!("Load failed: {}", e);
                self.set_status(StatusKind::Error, format!("Load failed: {}", e));
            }
        }
    }

    fn push_snapshot(&mut self) {
        self.history.push(self.canvas.clone());
    }

    fn set_status(&mut self, kind: StatusKind, text: String) {
        self.status = Some(LiveStatus {
            message: StatusMessage { text, kind },
            expires_at: Instant::now() + self.status_duration,
        });
    }
}

#[cfg(test)]
mod state_tests;
