//! Dense weight grid owned by the room.

use std::mem;

use room_planner_core::{CellCoord, CellRect, WeightView};

/// Row-major weights, one per cell, starting fully desirable at 1.0.
#[derive(Clone, Debug)]
pub(crate) struct WeightGrid {
    columns: u32,
    rows: u32,
    cells: Vec<f64>,
}

impl WeightGrid {
    /// Allocates a grid, or `None` when the cells cannot be allocated.
    pub(crate) fn new(columns: u32, rows: u32) -> Option<Self> {
        let capacity = usize::try_from(u64::from(columns) * u64::from(rows)).ok()?;
        if capacity > isize::MAX as usize / mem::size_of::<f64>() {
            return None;
        }
        let mut cells = Vec::new();
        cells.try_reserve_exact(capacity).ok()?;
        cells.resize(capacity, 1.0);
        Some(Self {
            columns,
            rows,
            cells,
        })
    }

    pub(crate) fn view(&self) -> WeightView<'_> {
        WeightView::new(&self.cells, self.columns, self.rows)
    }

    pub(crate) fn dimensions(&self) -> (u32, u32) {
        (self.columns, self.rows)
    }

    /// Zeroes the region grown by `margin` on every side, clipped to the grid.
    pub(crate) fn mark_occupied(&mut self, region: &CellRect, margin: u32) {
        let zone = region.expanded_within(margin, self.columns, self.rows);
        for row in zone.row()..zone.row() + zone.height() {
            for column in zone.column()..zone.column() + zone.width() {
                if let Some(index) = self.index(CellCoord::new(column, row)) {
                    self.cells[index] = 0.0;
                }
            }
        }
    }

    pub(crate) fn penalise(&mut self, cell: CellCoord, amount: f64) {
        if let Some(index) = self.index(cell) {
            self.cells[index] -= amount;
        }
    }

    pub(crate) fn clamp_non_negative(&mut self) {
        for weight in &mut self.cells {
            *weight = weight.max(0.0);
        }
    }

    pub(crate) fn weights(&self) -> &[f64] {
        &self.cells
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.column() < self.columns && cell.row() < self.rows {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}
