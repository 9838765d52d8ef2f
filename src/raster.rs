// src/raster.rs

//! Pure rasterization: converts two-point gestures into coordinate sequences.
//!
//! Every function here is stateless and emits points unfiltered by canvas
//! bounds; clipping is `Canvas::set`'s job. The one exception is flood fill,
//! which must read the grid to discover the connected component, but it still
//! only *produces* coordinates and leaves all writes to the caller.

use crate::canvas::Canvas;
use crate::color::PaletteColor;
use crate::error::EditorResult;
use std::collections::HashSet;

/// A cell coordinate emitted by a rasterization pass. Signed so off-canvas
/// points (negative included) survive until clipping.
pub type Point = (i32, i32);

/// Integer Bresenham line from (x1, y1) to (x2, y2), both endpoints included
/// exactly once. A zero-length line emits a single point.
pub fn line_points(x1: i32, y1: i32, x2: i32, y2: i32) -> Vec<Point> {
    let dx = (x2 - x1).abs();
    let dy = (y2 - y1).abs();
    let sx = if x1 < x2 { 1 } else { -1 };
    let sy = if y1 < y2 { 1 } else { -1 };
    let mut err = dx - dy;

    let mut points = Vec::new();
    let (mut x, mut y) = (x1, y1);
    loop {
        points.push((x, y));
        if x == x2 && y == y2 {
            break;
        }
        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            y += sy;
        }
    }
    points
}

/// Axis-aligned rectangle outline spanned by two opposite corners, in any
/// order. Interior cells are never emitted. Corners appear twice in the
/// output (once per edge pass); writes are idempotent so this is harmless.
pub fn rectangle_points(x1: i32, y1: i32, x2: i32, y2: i32) -> Vec<Point> {
    let min_x = x1.min(x2);
    let max_x = x1.max(x2);
    let min_y = y1.min(y2);
    let max_y = y1.max(y2);

    let mut points = Vec::new();
    for x in min_x..=max_x {
        points.push((x, min_y));
        points.push((x, max_y));
    }
    for y in min_y..=max_y {
        points.push((min_x, y));
        points.push((max_x, y));
    }
    points
}

/// Circle centered at (cx, cy) whose radius is the rounded Euclidean distance
/// to (px, py), sampled at 2-degree steps from 0 to 358 inclusive.
///
/// The polar sampling is deliberate: it can leave gaps at small radii and
/// emit duplicate points at large ones, and saved art depends on exactly that
/// output. Do not swap in a midpoint-circle algorithm.
pub fn circle_points(cx: i32, cy: i32, px: i32, py: i32) -> Vec<Point> {
    let dx = (px - cx) as f64;
    let dy = (py - cy) as f64;
    let radius = (dx * dx + dy * dy).sqrt().round();

    let mut points = Vec::new();
    for angle_deg in (0..360).step_by(2) {
        let theta = (angle_deg as f64).to_radians();
        let x = (cx as f64 + radius * theta.cos()).round() as i32;
        let y = (cy as f64 + radius * theta.sin()).round() as i32;
        points.push((x, y));
    }
    points
}

/// 4-connected flood fill component starting at (x, y), to be recolored with
/// `replacement`. Returns every cell of the region whose color matches the
/// start cell's; returns an empty set when the start cell already has the
/// replacement color (recoloring would be an infinite toggle otherwise).
///
/// Uses an explicit stack and a visited set: neighbors are pushed
/// unconditionally and filtered on pop (visited, bounds, color), which
/// guarantees termination even on backtracking expansion paths.
///
/// Fails with `OutOfBounds` when the start coordinate is off-canvas, which
/// callers driven by a clamped cursor should never trigger.
pub fn flood_fill_points(
    canvas: &Canvas,
    x: i32,
    y: i32,
    replacement: PaletteColor,
) -> EditorResult<Vec<Point>> {
    let target = canvas.get(x, y)?;
    if target == replacement {
        return Ok(Vec::new());
    }

    let mut stack = vec![(x, y)];
    let mut visited: HashSet<Point> = HashSet::new();
    let mut points = Vec::new();

    while let Some((cx, cy)) = stack.pop() {
        if visited.contains(&(cx, cy)) {
            continue;
        }
        match canvas.get(cx, cy) {
            Ok(color) if color == target => {}
            _ => continue, // off-canvas or different color
        }

        visited.insert((cx, cy));
        points.push((cx, cy));

        stack.push((cx + 1, cy));
        stack.push((cx - 1, cy));
        stack.push((cx, cy + 1));
        stack.push((cx, cy - 1));
    }
    Ok(points)
}
