// src/renderer.rs

//! Composes one full ANSI frame per editor snapshot.
//!
//! Every frame is rebuilt from scratch: clear the screen, draw the title
//! bar, the canvas grid, the palette and toolbar lines, then the status and
//! controls bars anchored to the bottom of the terminal, and finally any
//! live message box on top. Painting in that order gives the same stacking
//! the UI needs when the terminal is too small for everything at once.
//!
//! Each canvas cell is two columns wide so the grid reads roughly square.
//! The cursor is a tool-specific glyph drawn over its cell, black on
//! painted cells and white on background ones.

use crate::color::PaletteColor;
use crate::editor::{EditorSnapshot, StatusKind};

const SGR_PREFIX: &str = "\x1b[";
const SGR_SUFFIX: char = 'm';
const SGR_SEPARATOR: char = ';';
const SGR_RESET_ALL: u16 = 0;
const SGR_BOLD: u16 = 1;
const CLEAR_SCREEN_AND_HOME: &str = "\x1b[2J\x1b[H";

const FG_BLACK: u16 = 30;
const FG_RED: u16 = 31;
const FG_GREEN: u16 = 32;
const FG_YELLOW: u16 = 33;
const FG_CYAN: u16 = 36;
const FG_WHITE: u16 = 37;
const BG_BLACK: u16 = 40;
const BG_BLUE: u16 = 44;
const BG_WHITE: u16 = 47;

const TITLE: &str = "CELLPAINT - Terminal Pixel Editor";
/// Grid rows start below the title bar and one blank spacer row.
const GRID_TOP: usize = 2;

/// Composes the complete frame for `snapshot` on a `term_cols` by
/// `term_rows` terminal, ready to write to stdout in one piece.
pub fn compose_frame(snapshot: &EditorSnapshot, term_cols: u16, term_rows: u16) -> String {
    let cols = term_cols as usize;
    let rows = term_rows as usize;
    let mut frame = String::with_capacity(8 * 1024);

    frame.push_str(CLEAR_SCREEN_AND_HOME);
    push_title(&mut frame, cols);
    push_grid(&mut frame, snapshot);
    push_palette(&mut frame, snapshot);
    push_toolbar(&mut frame, snapshot);
    push_status_bar(&mut frame, snapshot, cols, rows);
    push_controls(&mut frame, rows);
    if let Some(message) = &snapshot.status {
        push_message_box(&mut frame, &message.text, message.kind, cols, rows);
    }
    push_sgr(&mut frame, &[SGR_RESET_ALL]);
    frame
}

fn push_title(frame: &mut String, cols: usize) {
    frame.push_str(&cursor_position(1, 1));
    push_sgr(frame, &[SGR_RESET_ALL, SGR_BOLD, FG_WHITE, BG_BLUE]);
    frame.push_str(&center_to_width(TITLE, cols));
}

fn push_grid(frame: &mut String, snapshot: &EditorSnapshot) {
    for y in 0..snapshot.grid.height() {
        frame.push_str(&cursor_position(GRID_TOP + y + 1, 1));
        for (x, &cell) in snapshot.grid.row(y).iter().enumerate() {
            let under_cursor = x == snapshot.cursor.x && y == snapshot.cursor.y;
            if under_cursor {
                let glyph_fg = if cell == PaletteColor::Black {
                    FG_WHITE
                } else {
                    FG_BLACK
                };
                push_sgr(frame, &[SGR_RESET_ALL, glyph_fg, cell.sgr_bg()]);
                frame.push(snapshot.active_tool.cursor_glyph());
                frame.push(' ');
            } else {
                push_sgr(frame, &[SGR_RESET_ALL, cell.sgr_bg()]);
                frame.push_str("  ");
            }
        }
    }
}

fn push_palette(frame: &mut String, snapshot: &EditorSnapshot) {
    frame.push_str(&cursor_position(snapshot.grid.height() + 4, 1));
    push_sgr(frame, &[SGR_RESET_ALL, FG_WHITE, BG_BLACK]);
    frame.push_str("Colors: ");
    for index in 0..crate::color::PALETTE_LEN {
        let color = PaletteColor::from_index(index);
        let marker = if color == snapshot.active_color {
            '●'
        } else {
            '○'
        };
        push_sgr(frame, &[SGR_RESET_ALL, color.sgr_fg(), BG_BLACK]);
        frame.push(marker);
        push_sgr(frame, &[SGR_RESET_ALL]);
        frame.push(' ');
    }
}

fn push_toolbar(frame: &mut String, snapshot: &EditorSnapshot) {
    frame.push_str(&cursor_position(snapshot.grid.height() + 6, 1));
    push_sgr(frame, &[SGR_RESET_ALL, FG_CYAN, BG_BLACK]);
    frame.push_str("Tools: ");
    for tool in crate::editor::Tool::ALL {
        if tool == snapshot.active_tool {
            frame.push('[');
            frame.push_str(tool.label());
            frame.push(']');
        } else {
            frame.push_str(tool.label());
        }
        frame.push_str("  ");
    }
}

fn push_status_bar(frame: &mut String, snapshot: &EditorSnapshot, cols: usize, rows: usize) {
    let text = format!(
        "Position: ({}, {}) | Color: {} | Mode: {} | History: {}/{} | Brush: {}",
        snapshot.cursor.x,
        snapshot.cursor.y,
        snapshot.active_color.name(),
        snapshot.active_tool.mode_name(),
        snapshot.history_position,
        snapshot.history_len,
        if snapshot.brush_locked {
            "Locked"
        } else {
            "Unlocked"
        },
    );
    frame.push_str(&cursor_position(rows.saturating_sub(3).max(1), 1));
    push_sgr(frame, &[SGR_RESET_ALL, FG_BLACK, BG_WHITE]);
    frame.push_str(&pad_to_width(&text, cols));
}

fn push_controls(frame: &mut String, rows: usize) {
    let header_row = rows.saturating_sub(2).max(1);

    frame.push_str(&cursor_position(header_row, 1));
    push_sgr(frame, &[SGR_RESET_ALL, SGR_BOLD, FG_WHITE, BG_BLACK]);
    frame.push_str("CONTROLS:");

    push_labeled_line(
        frame,
        header_row + 1,
        &[
            ("Movement:", "↑↓←→"),
            ("Paint:", "Space/Enter"),
            ("Colors:", "Tab/Shift+Tab"),
            ("Clear:", "C"),
            ("Brush Lock:", "B"),
        ],
    );
    push_labeled_line(
        frame,
        header_row + 2,
        &[
            ("Tools:", "T (cycle)"),
            ("Undo:", "U"),
            ("Redo:", "R"),
            ("Save:", "S"),
            ("Load:", "L"),
            ("Quit:", "Q/Esc"),
        ],
    );
}

/// One controls line: cyan labels, white values, pipe separators.
fn push_labeled_line(frame: &mut String, row: usize, pairs: &[(&str, &str)]) {
    frame.push_str(&cursor_position(row, 1));
    for (i, (label, value)) in pairs.iter().enumerate() {
        if i > 0 {
            push_sgr(frame, &[SGR_RESET_ALL, FG_WHITE, BG_BLACK]);
            frame.push_str(" | ");
        }
        push_sgr(frame, &[SGR_RESET_ALL, FG_CYAN, BG_BLACK]);
        frame.push_str(label);
        push_sgr(frame, &[SGR_RESET_ALL, FG_WHITE, BG_BLACK]);
        frame.push(' ');
        frame.push_str(value);
    }
}

/// A bordered box centered on the terminal, colored by message kind.
fn push_message_box(frame: &mut String, text: &str, kind: StatusKind, cols: usize, rows: usize) {
    let fg = match kind {
        StatusKind::Info => FG_YELLOW,
        StatusKind::Success => FG_GREEN,
        StatusKind::Error => FG_RED,
    };
    let text_width = text.chars().count();
    let box_width = text_width + 4;
    let inner_width = box_width - 2;
    let left = cols.saturating_sub(box_width) / 2 + 1;
    let top = rows.saturating_sub(3) / 2 + 1;

    let horizontal: String = std::iter::repeat('─').take(inner_width).collect();

    frame.push_str(&cursor_position(top, left));
    push_sgr(frame, &[SGR_RESET_ALL, fg, BG_BLACK]);
    frame.push('┌');
    frame.push_str(&horizontal);
    frame.push('┐');

    frame.push_str(&cursor_position(top + 1, left));
    push_sgr(frame, &[SGR_RESET_ALL, fg, BG_BLACK]);
    frame.push('│');
    frame.push_str(&center_to_width(text, inner_width));
    frame.push('│');

    frame.push_str(&cursor_position(top + 2, left));
    push_sgr(frame, &[SGR_RESET_ALL, fg, BG_BLACK]);
    frame.push('└');
    frame.push_str(&horizontal);
    frame.push('┘');
}

/// Appends one SGR sequence for `codes`.
fn push_sgr(frame: &mut String, codes: &[u16]) {
    frame.push_str(SGR_PREFIX);
    frame.push_str(
        &codes
            .iter()
            .map(u16::to_string)
            .collect::<Vec<_>>()
            .join(&SGR_SEPARATOR.to_string()),
    );
    frame.push(SGR_SUFFIX);
}

/// ANSI CUP sequence; row and column are 1-based.
fn cursor_position(row_1_based: usize, col_1_based: usize) -> String {
    format!("\x1b[{};{}H", row_1_based, col_1_based)
}

/// Pads `text` with trailing spaces to exactly `width` columns, truncating
/// if it is longer.
fn pad_to_width(text: &str, width: usize) -> String {
    let mut out: String = text.chars().take(width).collect();
    let used = out.chars().count();
    out.extend(std::iter::repeat(' ').take(width - used));
    out
}

/// Centers `text` in `width` columns, padding both sides with spaces.
fn center_to_width(text: &str, width: usize) -> String {
    let text_width = text.chars().count();
    if text_width >= width {
        return text.chars().take(width).collect();
    }
    let left = (width - text_width) / 2;
    let mut out = String::new();
    out.extend(std::iter::repeat(' ').take(left));
    out.push_str(text);
    out.extend(std::iter::repeat(' ').take(width - text_width - left));
    out
}
