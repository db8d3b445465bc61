//! Coarse occupancy grid over the building footprint.
//!
//! A cell is claimed by a rectangle when the cell's center lies inside it, so
//! two rectangles that only touch never claim the same cell. The grid is a fast
//! rejection pass; exact rectangle tests still run afterwards.
use crate::geometry::Rect;

#[derive(Clone, Debug)]
pub struct OccupancyGrid {
    cell_size: f32,
    cols: usize,
    rows: usize,
    cells: Vec<bool>,
}

impl OccupancyGrid {
    /// Create an empty grid covering `width x depth`.
    pub fn new(width: f32, depth: f32, cell_size: f32) -> Self {
        let cell_size = if cell_size.is_finite() && cell_size > 0.0 {
            cell_size
        } else {
            1.0
        };
        let cols = cells_along(width, cell_size);
        let rows = cells_along(depth, cell_size);
        Self {
            cell_size,
            cols,
            rows,
            cells: vec![false; cols * rows],
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Claim every cell whose center lies inside `rect`.
    pub fn mark(&mut self, rect: &Rect) {
        let (xs, ys) = self.cell_span(rect);
        for iy in ys {
            let row = iy * self.cols;
            for ix in xs.clone() {
                self.cells[row + ix] = true;
            }
        }
    }

    /// Whether none of the cells `rect` would claim are taken.
    pub fn is_free(&self, rect: &Rect) -> bool {
        let (xs, ys) = self.cell_span(rect);
        for iy in ys {
            let row = iy * self.cols;
            if self.cells[row + xs.start..row + xs.end].iter().any(|c| *c) {
                return false;
            }
        }
        true
    }

    pub fn is_occupied(&self, ix: usize, iy: usize) -> bool {
        ix < self.cols && iy < self.rows && self.cells[iy * self.cols + ix]
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| **c).count()
    }

    fn cell_span(&self, rect: &Rect) -> (std::ops::Range<usize>, std::ops::Range<usize>) {
        let max = rect.max();
        let x0 = self.first_center_at_or_after(rect.min.x, self.cols);
        let x1 = self.first_center_at_or_after(max.x, self.cols);
        let y0 = self.first_center_at_or_after(rect.min.y, self.rows);
        let y1 = self.first_center_at_or_after(max.y, self.rows);
        (x0..x1.max(x0), y0..y1.max(y0))
    }

    /// Index of the first cell whose center is `>= v`, clamped to `[0, limit]`.
    fn first_center_at_or_after(&self, v: f32, limit: usize) -> usize {
        if v.is_nan() {
            return limit;
        }
        let idx = (v / self.cell_size - 0.5).ceil();
        if idx <= 0.0 {
            0
        } else {
            (idx as usize).min(limit)
        }
    }
}

fn cells_along(extent: f32, cell_size: f32) -> usize {
    if extent.is_finite() && extent > 0.0 {
        (extent / cell_size).ceil() as usize
    } else {
        0
    }
}
