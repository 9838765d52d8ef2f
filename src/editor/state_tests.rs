// src/editor/state_tests.rs

use std::time::{Duration, Instant};

use tempfile::TempDir;

use crate::color::{PaletteColor, BACKGROUND};
use crate::config::Config;
use crate::editor::{
    Command, CycleDirection, Direction, EditorAction, EditorState, Point, StatusKind, Tool,
};

fn test_config(width: usize, height: usize) -> Config {
    let mut config = Config::default();
    config.canvas.width = width;
    config.canvas.height = height;
    config
}

fn editor(width: usize, height: usize) -> EditorState {
    EditorState::new(&test_config(width, height))
}

// Editor whose drawing store lives in a fresh temporary directory. The
// TempDir must stay alive for as long as the editor saves or loads.
fn editor_with_store(width: usize, height: usize) -> (EditorState, TempDir) {
    let dir = TempDir::new().unwrap();
    let mut config = test_config(width, height);
    config.storage.directory = dir.path().to_path_buf();
    (EditorState::new(&config), dir)
}

fn cell(editor: &EditorState, x: usize, y: usize) -> PaletteColor {
    editor.get_render_snapshot().cell(Point { x, y }).unwrap()
}

fn move_cursor(editor: &mut EditorState, direction: Direction, times: usize) {
    for _ in 0..times {
        editor.apply(Command::Move(direction));
    }
}

#[test_log::test]
fn initial_state_matches_startup_defaults() {
    let editor = editor(30, 15);
    let snapshot = editor.get_render_snapshot();

    assert_eq!(snapshot.cursor.x, 0);
    assert_eq!(snapshot.cursor.y, 0);
    assert_eq!(snapshot.active_color, PaletteColor::Green);
    assert_eq!(snapshot.active_tool, Tool::Single);
    assert!(!snapshot.brush_locked);
    assert_eq!(snapshot.history_position, 1);
    assert_eq!(snapshot.history_len, 1);
    assert!(snapshot.status.is_none());
    for y in 0..15 {
        for x in 0..30 {
            assert_eq!(snapshot.grid.get(x, y).unwrap(), BACKGROUND);
        }
    }
}

#[test_log::test]
fn movement_clamps_at_every_edge() {
    let mut editor = editor(3, 2);

    move_cursor(&mut editor, Direction::Left, 2);
    move_cursor(&mut editor, Direction::Up, 2);
    let snapshot = editor.get_render_snapshot();
    assert_eq!((snapshot.cursor.x, snapshot.cursor.y), (0, 0));

    move_cursor(&mut editor, Direction::Right, 5);
    move_cursor(&mut editor, Direction::Down, 5);
    let snapshot = editor.get_render_snapshot();
    assert_eq!((snapshot.cursor.x, snapshot.cursor.y), (2, 1));
}

#[test_log::test]
fn commit_paints_cursor_cell_and_records_history() {
    let mut editor = editor(5, 5);

    assert_eq!(editor.apply(Command::Commit), None);

    assert_eq!(cell(&editor, 0, 0), PaletteColor::Green);
    let snapshot = editor.get_render_snapshot();
    assert_eq!(snapshot.history_position, 2);
    assert_eq!(snapshot.history_len, 2);
}

#[test_log::test]
fn undo_then_redo_restores_the_painted_cell() {
    let mut editor = editor(5, 5);
    editor.apply(Command::Move(Direction::Right));
    editor.apply(Command::Commit);

    editor.apply(Command::Undo);
    assert_eq!(cell(&editor, 1, 0), BACKGROUND);
    assert_eq!(editor.get_render_snapshot().history_position, 1);

    editor.apply(Command::Redo);
    assert_eq!(cell(&editor, 1, 0), PaletteColor::Green);
    assert_eq!(editor.get_render_snapshot().history_position, 2);
}

#[test_log::test]
fn line_tool_draws_between_anchor_and_cursor() {
    let mut editor = editor(10, 10);
    editor.apply(Command::SelectTool(Tool::Line));

    // First commit arms the anchor and paints nothing.
    editor.apply(Command::Commit);
    assert_eq!(editor.get_render_snapshot().history_len, 1);

    move_cursor(&mut editor, Direction::Right, 4);
    move_cursor(&mut editor, Direction::Down, 4);
    editor.apply(Command::Commit);

    for i in 0..5 {
        assert_eq!(cell(&editor, i, i), PaletteColor::Green, "cell ({i}, {i})");
    }
    let snapshot = editor.get_render_snapshot();
    assert_eq!(snapshot.history_len, 2, "one entry for the whole line");

    // The gesture disarmed: another commit arms again without painting.
    move_cursor(&mut editor, Direction::Right, 1);
    editor.apply(Command::Commit);
    assert_eq!(editor.get_render_snapshot().history_len, 2);
}

#[test_log::test]
fn undo_removes_a_whole_line_at_once() {
    let mut editor = editor(10, 10);
    editor.apply(Command::SelectTool(Tool::Line));
    editor.apply(Command::Commit);
    move_cursor(&mut editor, Direction::Right, 4);
    editor.apply(Command::Commit);

    editor.apply(Command::Undo);
    for x in 0..5 {
        assert_eq!(cell(&editor, x, 0), BACKGROUND);
    }
}

#[test_log::test]
fn rectangle_tool_paints_the_outline_only() {
    let mut editor = editor(5, 5);
    editor.apply(Command::SelectTool(Tool::Rectangle));
    editor.apply(Command::Commit);
    move_cursor(&mut editor, Direction::Right, 4);
    move_cursor(&mut editor, Direction::Down, 4);
    editor.apply(Command::Commit);

    let snapshot = editor.get_render_snapshot();
    let mut painted = 0;
    for y in 0..5 {
        for x in 0..5 {
            let on_edge = x == 0 || x == 4 || y == 0 || y == 4;
            let color = snapshot.grid.get(x, y).unwrap();
            if on_edge {
                assert_eq!(color, PaletteColor::Green, "edge cell ({x}, {y})");
                painted += 1;
            } else {
                assert_eq!(color, BACKGROUND, "interior cell ({x}, {y})");
            }
        }
    }
    assert_eq!(painted, 16);
    assert_eq!(snapshot.history_position, 2);
}

#[test_log::test]
fn fill_floods_the_whole_blank_canvas() {
    let mut editor = editor(5, 5);
    editor.apply(Command::SelectTool(Tool::Fill));
    editor.apply(Command::Commit);

    for y in 0..5 {
        for x in 0..5 {
            assert_eq!(cell(&editor, x, y), PaletteColor::Green);
        }
    }
    assert_eq!(editor.get_render_snapshot().history_len, 2);
}

#[test_log::test]
fn fill_over_its_own_color_records_no_history() {
    let mut editor = editor(4, 4);
    editor.apply(Command::SelectTool(Tool::Fill));
    editor.apply(Command::Commit);
    assert_eq!(editor.get_render_snapshot().history_len, 2);

    // Everything already matches the active color; nothing to record.
    editor.apply(Command::Commit);
    assert_eq!(editor.get_render_snapshot().history_len, 2);
}

#[test_log::test]
fn switching_tools_discards_the_armed_anchor() {
    let mut editor = editor(6, 6);
    editor.apply(Command::SelectTool(Tool::Line));
    editor.apply(Command::Commit); // anchor at (0, 0)
    move_cursor(&mut editor, Direction::Right, 3);
    move_cursor(&mut editor, Direction::Down, 3);

    editor.apply(Command::SelectTool(Tool::Rectangle));

    // The rectangle must arm fresh rather than reuse the line anchor.
    editor.apply(Command::Commit);
    let snapshot = editor.get_render_snapshot();
    assert_eq!(snapshot.history_len, 1, "arming paints nothing");
    for y in 0..6 {
        for x in 0..6 {
            assert_eq!(snapshot.grid.get(x, y).unwrap(), BACKGROUND);
        }
    }

    move_cursor(&mut editor, Direction::Right, 1);
    move_cursor(&mut editor, Direction::Down, 1);
    editor.apply(Command::Commit);

    assert_eq!(cell(&editor, 3, 3), PaletteColor::Green);
    assert_eq!(cell(&editor, 4, 4), PaletteColor::Green);
    assert_eq!(cell(&editor, 1, 1), BACKGROUND, "no line from the old anchor");
}

#[test_log::test]
fn brush_lock_paints_moves_and_folds_into_one_history_entry() {
    let mut editor = editor(10, 3);
    editor.apply(Command::ToggleBrushLock);
    move_cursor(&mut editor, Direction::Right, 3);

    // The trail is painted but not yet recorded.
    for x in 1..=3 {
        assert_eq!(cell(&editor, x, 0), PaletteColor::Green);
    }
    assert_eq!(cell(&editor, 0, 0), BACKGROUND, "lock paints landing cells only");
    assert_eq!(editor.get_render_snapshot().history_len, 1);

    editor.apply(Command::Commit);
    assert_eq!(editor.get_render_snapshot().history_len, 2);

    // One undo reverts the commit and the trail together.
    editor.apply(Command::Undo);
    for x in 0..4 {
        assert_eq!(cell(&editor, x, 0), BACKGROUND);
    }
}

#[test_log::test]
fn brush_lock_paints_in_place_when_clamped() {
    let mut editor = editor(4, 4);
    editor.apply(Command::ToggleBrushLock);
    editor.apply(Command::Move(Direction::Left));

    let snapshot = editor.get_render_snapshot();
    assert_eq!((snapshot.cursor.x, snapshot.cursor.y), (0, 0));
    assert_eq!(snapshot.grid.get(0, 0).unwrap(), PaletteColor::Green);
}

#[test_log::test]
fn clear_wipes_the_canvas_and_is_undoable() {
    let mut editor = editor(5, 5);
    editor.apply(Command::Commit);
    move_cursor(&mut editor, Direction::Right, 2);
    editor.apply(Command::Commit);

    editor.apply(Command::Clear);
    assert_eq!(cell(&editor, 0, 0), BACKGROUND);
    assert_eq!(cell(&editor, 2, 0), BACKGROUND);
    assert_eq!(editor.get_render_snapshot().history_len, 4);

    editor.apply(Command::Undo);
    assert_eq!(cell(&editor, 0, 0), PaletteColor::Green);
    assert_eq!(cell(&editor, 2, 0), PaletteColor::Green);
}

#[test_log::test]
fn color_cycling_wraps_in_both_directions() {
    let mut editor = editor(4, 4);

    editor.apply(Command::CycleColor(CycleDirection::Forward));
    assert_eq!(
        editor.get_render_snapshot().active_color,
        PaletteColor::Yellow
    );

    for _ in 0..3 {
        editor.apply(Command::CycleColor(CycleDirection::Backward));
    }
    assert_eq!(
        editor.get_render_snapshot().active_color,
        PaletteColor::Black
    );

    editor.apply(Command::CycleColor(CycleDirection::Backward));
    assert_eq!(
        editor.get_render_snapshot().active_color,
        PaletteColor::White
    );

    editor.apply(Command::CycleColor(CycleDirection::Forward));
    assert_eq!(
        editor.get_render_snapshot().active_color,
        PaletteColor::Black
    );

    // Selection changes never touch history.
    assert_eq!(editor.get_render_snapshot().history_len, 1);
}

#[test_log::test]
fn commit_after_undo_discards_the_redo_branch() {
    let mut editor = editor(6, 6);
    editor.apply(Command::Commit); // (0, 0)
    move_cursor(&mut editor, Direction::Right, 1);
    editor.apply(Command::Commit); // (1, 0)

    editor.apply(Command::Undo);
    move_cursor(&mut editor, Direction::Right, 1);
    editor.apply(Command::Commit); // (2, 0) replaces the redo branch

    let snapshot = editor.get_render_snapshot();
    assert_eq!(snapshot.history_len, 3);
    assert_eq!(snapshot.history_position, 3);
    assert_eq!(snapshot.grid.get(1, 0).unwrap(), BACKGROUND);
    assert_eq!(snapshot.grid.get(2, 0).unwrap(), PaletteColor::Green);

    editor.apply(Command::Redo);
    assert_eq!(
        editor.get_render_snapshot().grid.get(1, 0).unwrap(),
        BACKGROUND,
        "redo has nothing to restore"
    );
}

#[test_log::test]
fn save_then_load_round_trips_the_canvas() {
    let (mut editor, _dir) = editor_with_store(6, 4);
    editor.apply(Command::Commit);
    editor.apply(Command::CycleColor(CycleDirection::Forward));
    move_cursor(&mut editor, Direction::Right, 1);
    move_cursor(&mut editor, Direction::Down, 1);
    editor.apply(Command::Commit);
    let drawn = editor.get_render_snapshot().grid;

    editor.apply(Command::Save);
    let status = editor.get_render_snapshot().status.expect("save status");
    assert_eq!(status.kind, StatusKind::Success);
    assert!(status.text.starts_with("Saved as drawing-"), "{}", status.text);
    assert!(status.text.ends_with(".json"), "{}", status.text);

    editor.apply(Command::Clear);
    assert_ne!(editor.get_render_snapshot().grid, drawn);

    editor.apply(Command::Load);
    let snapshot = editor.get_render_snapshot();
    assert_eq!(snapshot.grid, drawn);
    let status = snapshot.status.expect("load status");
    assert_eq!(status.kind, StatusKind::Success);
    assert!(status.text.starts_with("Loaded drawing-"), "{}", status.text);

    // Loading recorded a snapshot, so it can be undone back to the
    // cleared canvas.
    editor.apply(Command::Undo);
    assert_eq!(editor.get_render_snapshot().grid.get(0, 0).unwrap(), BACKGROUND);
}

#[test_log::test]
fn load_with_no_records_reports_info_and_changes_nothing() {
    let (mut editor, _dir) = editor_with_store(4, 4);

    editor.apply(Command::Load);

    let snapshot = editor.get_render_snapshot();
    let status = snapshot.status.expect("load status");
    assert_eq!(status.kind, StatusKind::Info);
    assert_eq!(status.text, "No saved drawings found");
    assert_eq!(snapshot.history_len, 1);
    assert_eq!(snapshot.grid.get(0, 0).unwrap(), BACKGROUND);
}

#[test_log::test]
fn save_failure_surfaces_as_an_error_status() {
    let dir = TempDir::new().unwrap();
    let blocked = dir.path().join("blocked");
    std::fs::write(&blocked, b"not a directory").unwrap();

    let mut config = test_config(4, 4);
    config.storage.directory = blocked;
    let mut editor = EditorState::new(&config);

    editor.apply(Command::Save);

    let status = editor.get_render_snapshot().status.expect("save status");
    assert_eq!(status.kind, StatusKind::Error);
    assert!(status.text.starts_with("Save failed:"), "{}", status.text);
}

#[test_log::test]
fn quit_is_the_only_command_that_produces_an_action() {
    let mut editor = editor(4, 4);
    assert_eq!(editor.apply(Command::Move(Direction::Right)), None);
    assert_eq!(editor.apply(Command::Commit), None);
    assert_eq!(editor.apply(Command::CycleTool), None);
    assert_eq!(editor.apply(Command::Quit), Some(EditorAction::Quit));
}

#[test_log::test]
fn status_message_expires_at_its_deadline() {
    let (mut editor, _dir) = editor_with_store(4, 4);
    editor.apply(Command::Save);
    assert!(editor.get_render_snapshot().status.is_some());
    assert!(editor.status_deadline().is_some());

    // The default lifetime is two seconds, so "now" is too early.
    assert!(!editor.expire_status_before(Instant::now()));
    assert!(editor.get_render_snapshot().status.is_some());

    assert!(editor.expire_status_before(Instant::now() + Duration::from_secs(3)));
    assert!(editor.get_render_snapshot().status.is_none());
    assert!(editor.status_deadline().is_none());
}

#[test_log::test]
fn history_capacity_bounds_the_snapshot_count() {
    let mut config = test_config(8, 8);
    config.history.capacity = 3;
    let mut editor = EditorState::new(&config);

    for _ in 0..10 {
        editor.apply(Command::Commit);
        editor.apply(Command::Move(Direction::Right));
    }

    let snapshot = editor.get_render_snapshot();
    assert_eq!(snapshot.history_len, 3);
    assert_eq!(snapshot.history_position, 3);
}

#[test_log::test]
fn undo_at_oldest_and_redo_at_newest_are_noops() {
    let mut editor = editor(4, 4);

    editor.apply(Command::Undo);
    let snapshot = editor.get_render_snapshot();
    assert_eq!(snapshot.history_position, 1);
    assert_eq!(snapshot.grid.get(0, 0).unwrap(), BACKGROUND);

    editor.apply(Command::Redo);
    assert_eq!(editor.get_render_snapshot().history_position, 1);
}
