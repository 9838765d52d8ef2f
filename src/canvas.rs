// src/canvas.rs

//! The fixed-size grid of painted cells and its bounds-checked access.

use crate::color::{PaletteColor, BACKGROUND};
use crate::error::{EditorError, EditorResult};
use log::trace;

/// A dense `width x height` grid of palette colors. Dimensions are fixed at
/// creation; every in-bounds coordinate always holds a defined cell. Cloning
/// a `Canvas` is the snapshot operation used by the undo history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<PaletteColor>,
}

impl Canvas {
    /// Creates a canvas with every cell set to the background color.
    pub fn new(width: usize, height: usize) -> Self {
        Canvas {
            width,
            height,
            cells: vec![BACKGROUND; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// True when (x, y) lies inside `[0,width) x [0,height)`.
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && (x as usize) < self.width && y >= 0 && (y as usize) < self.height
    }

    /// Reads the cell at (x, y).
    ///
    /// Out-of-bounds coordinates are an error: rasterized writes are clipped
    /// before they get here, so a failing `get` means a caller bug rather
    /// than user input.
    pub fn get(&self, x: i32, y: i32) -> EditorResult<PaletteColor> {
        if !self.in_bounds(x, y) {
            return Err(EditorError::OutOfBounds { x, y });
        }
        Ok(self.cells[y as usize * self.width + x as usize])
    }

    /// Writes `color` at (x, y). Out-of-bounds writes are silently dropped:
    /// rasterization may emit off-canvas points (circle sampling in
    /// particular) and clipping them is this method's job.
    pub fn set(&mut self, x: i32, y: i32, color: PaletteColor) {
        if !self.in_bounds(x, y) {
            trace!("Canvas::set clipped off-canvas point ({}, {})", x, y);
            return;
        }
        self.cells[y as usize * self.width + x as usize] = color;
    }

    /// Resets every cell to the background color.
    pub fn clear(&mut self) {
        self.cells.fill(BACKGROUND);
    }

    /// Borrows one row of cells, for rendering and serialization.
    ///
    /// # Panics
    /// Panics if `y >= height`.
    pub fn row(&self, y: usize) -> &[PaletteColor] {
        let start = y * self.width;
        &self.cells[start..start + self.width]
    }
}
