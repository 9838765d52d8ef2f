// src/editor/tools.rs

//! Drawing tools and the two-point gesture state they share.

use serde::{Deserialize, Serialize};

use crate::editor::snapshot::Point;

/// The active drawing tool.
///
/// Variant order is the cycling order used by [`Tool::next`] and by the
/// toolbar display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Paint the cell under the cursor.
    #[default]
    Single,
    /// Straight line between two committed points.
    Line,
    /// Axis-aligned rectangle outline between two committed corners.
    Rectangle,
    /// Circle outline centered on the first committed point.
    Circle,
    /// Flood fill of the connected same-color region under the cursor.
    Fill,
}

impl Tool {
    /// All tools in cycling order.
    pub const ALL: [Tool; 5] = [
        Tool::Single,
        Tool::Line,
        Tool::Rectangle,
        Tool::Circle,
        Tool::Fill,
    ];

    /// The next tool in cycling order, wrapping after the last.
    pub fn next(self) -> Self {
        match self {
            Tool::Single => Tool::Line,
            Tool::Line => Tool::Rectangle,
            Tool::Rectangle => Tool::Circle,
            Tool::Circle => Tool::Fill,
            Tool::Fill => Tool::Single,
        }
    }

    /// Maps the direct-selection digits '1'..'5' to a tool.
    pub fn from_digit(digit: char) -> Option<Self> {
        match digit {
            '1' => Some(Tool::Single),
            '2' => Some(Tool::Line),
            '3' => Some(Tool::Rectangle),
            '4' => Some(Tool::Circle),
            '5' => Some(Tool::Fill),
            _ => None,
        }
    }

    /// Glyph drawn at the cursor cell while this tool is active.
    pub fn cursor_glyph(self) -> char {
        match self {
            Tool::Single => '●',
            Tool::Line => '_',
            Tool::Rectangle => '#',
            Tool::Circle => 'O',
            Tool::Fill => '█',
        }
    }

    /// Toolbar label, glyph first.
    pub fn label(self) -> &'static str {
        match self {
            Tool::Single => "● Brush",
            Tool::Line => "─ Line",
            Tool::Rectangle => "# Rectangle",
            Tool::Circle => "O Circle",
            Tool::Fill => "█ Fill",
        }
    }

    /// Upper-case mode name shown in the status bar.
    pub fn mode_name(self) -> &'static str {
        match self {
            Tool::Single => "SINGLE",
            Tool::Line => "LINE",
            Tool::Rectangle => "RECTANGLE",
            Tool::Circle => "CIRCLE",
            Tool::Fill => "FILL",
        }
    }
}

/// Progress of a two-point tool gesture.
///
/// Single-point tools never leave [`Gesture::Idle`]. Switching tools resets
/// an armed gesture so a stale anchor cannot leak into the next shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Gesture {
    /// No anchor captured; the next commit on a two-point tool arms one.
    #[default]
    Idle,
    /// An anchor has been captured; the next commit draws the shape.
    Armed { anchor: Point },
}
