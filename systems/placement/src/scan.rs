//! Candidate bookkeeping shared by every placement strategy.

use room_planner_core::{CellRect, CellRectSize, WeightView};

/// Keeps the highest scoring candidate offered so far.
///
/// Only strictly greater scores replace the current best, so ties keep the
/// candidate that was offered first.
#[derive(Clone, Copy, Debug)]
pub(crate) struct BestCandidate {
    score: f64,
    region: Option<CellRect>,
}

impl BestCandidate {
    pub(crate) const fn new() -> Self {
        Self {
            score: f64::NEG_INFINITY,
            region: None,
        }
    }

    pub(crate) fn offer(&mut self, region: CellRect, score: f64) {
        if score > self.score {
            self.score = score;
            self.region = Some(region);
        }
    }

    pub(crate) fn finish(self, strategy: &str) -> Option<CellRect> {
        if let Some(region) = self.region {
            log::debug!(
                "{strategy} placement picked {}x{} at ({}, {}) with score {:.3}",
                region.width(),
                region.height(),
                region.column(),
                region.row(),
                self.score
            );
        }
        self.region
    }
}

/// Builds the candidate anchored at signed coordinates if it lies inside the grid.
pub(crate) fn candidate(
    weights: &WeightView<'_>,
    column: i64,
    row: i64,
    size: CellRectSize,
) -> Option<CellRect> {
    CellRect::from_signed(column, row, size).filter(|region| weights.fits(region))
}

/// Every in-bounds anchor for `size`, rows outer and columns inner.
pub(crate) fn anchors(
    weights: &WeightView<'_>,
    size: CellRectSize,
) -> impl Iterator<Item = CellRect> {
    let last_column = weights.columns().checked_sub(size.width());
    let last_row = weights.rows().checked_sub(size.height());
    let bounds = last_column.zip(last_row).filter(|_| !size.is_empty());
    bounds.into_iter().flat_map(move |(last_column, last_row)| {
        (0..=last_row).flat_map(move |row| {
            (0..=last_column).map(move |column| {
                CellRect::new(column, row, size.width(), size.height())
            })
        })
    })
}

/// Number of cells between the region and the closest wall.
pub(crate) fn wall_distance(region: &CellRect, columns: u32, rows: u32) -> u64 {
    let right = u64::from(columns).saturating_sub(region.right());
    let bottom = u64::from(rows).saturating_sub(region.bottom());
    u64::from(region.column())
        .min(right)
        .min(u64::from(region.row()))
        .min(bottom)
}
