#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure placement system that searches the weight grid for furniture footprints.
//!
//! Every strategy scans a bounded set of candidate anchors, scores each one
//! against a read-only [`WeightView`] and returns the best footprint without
//! touching the grid. The room applies the winning footprint afterwards, so a
//! strategy that finds nothing leaves no trace.

mod scan;

use room_planner_core::{
    CellRect, CellRectSize, FlankAxis, FlankSide, PlacementPreferences, WeightView,
};
use serde::{Deserialize, Serialize};

use crate::scan::{anchors, candidate, wall_distance, BestCandidate};

/// Tuning knobs for the bonuses added on top of raw cell weights.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringTuning {
    /// Bonus numerator for a window; a candidate at distance `d` earns `window_bonus / (1 + d)`.
    pub window_bonus: f64,
    /// Windows farther than this many cells from a candidate award nothing.
    pub window_reach: f64,
    /// Bonus numerator for walls; a candidate `d` cells from the closest wall
    /// earns `wall_bonus / (1 + d)`.
    pub wall_bonus: f64,
}

impl Default for ScoringTuning {
    fn default() -> Self {
        Self {
            window_bonus: 20.0,
            window_reach: 5.0,
            wall_bonus: 5.0,
        }
    }
}

/// Placement system that answers footprint queries against a weight snapshot.
#[derive(Clone, Debug, Default)]
pub struct Placement {
    tuning: ScoringTuning,
}

impl Placement {
    /// Creates a placement system using the provided tuning.
    #[must_use]
    pub const fn new(tuning: ScoringTuning) -> Self {
        Self { tuning }
    }

    /// Tuning used while scoring candidates.
    #[must_use]
    pub const fn tuning(&self) -> &ScoringTuning {
        &self.tuning
    }

    /// Scans the whole grid for the best free-standing footprint.
    ///
    /// The score is the weight sum of the footprint plus the optional window
    /// and wall bonuses. Window distance is measured from the footprint's
    /// upper-left anchor.
    #[must_use]
    pub fn free(
        &self,
        weights: WeightView<'_>,
        windows: &[CellRect],
        size: CellRectSize,
        preferences: PlacementPreferences,
    ) -> Option<CellRect> {
        let (columns, rows) = weights.dimensions();
        let mut best = BestCandidate::new();

        for region in anchors(&weights, size) {
            let Some(mut score) = weights.region_sum(&region) else {
                continue;
            };

            if preferences.prefer_window {
                score += self.window_bonus(&region, windows);
            }

            if preferences.prefer_wall {
                score += self.wall_bonus(&region, columns, rows);
            }

            best.offer(region, score);
        }

        best.finish("free")
    }

    /// Searches the four bands flush against `anchor` for the heaviest footprint.
    ///
    /// Bands are scanned below, above, right and left of the anchor, in that
    /// order. Horizontal bands only hold footprints that stay within the
    /// anchor's column span and vertical bands within its row span.
    #[must_use]
    pub fn near(
        &self,
        weights: WeightView<'_>,
        anchor: CellRect,
        size: CellRectSize,
    ) -> Option<CellRect> {
        if size.is_empty() {
            return None;
        }

        let columns = i64::from(weights.columns());
        let rows = i64::from(weights.rows());
        let (left, top) = (i64::from(anchor.column()), i64::from(anchor.row()));
        let (right, bottom) = (left + i64::from(anchor.width()), top + i64::from(anchor.height()));
        let (width, height) = (i64::from(size.width()), i64::from(size.height()));

        let across = left..=right - width;
        let down = top..=bottom - height;

        let below = across
            .clone()
            .flat_map(|column| (bottom..rows.min(bottom + height)).map(move |row| (column, row)));
        let above = across
            .flat_map(|column| ((top - height).max(0)..top).map(move |row| (column, row)));
        let beside_right = down
            .clone()
            .flat_map(|row| (right..columns.min(right + width)).map(move |column| (column, row)));
        let beside_left =
            down.flat_map(|row| ((left - width).max(0)..left).map(move |column| (column, row)));

        let mut best = BestCandidate::new();
        for (column, row) in below.chain(above).chain(beside_right).chain(beside_left) {
            let Some(region) = candidate(&weights, column, row, size) else {
                continue;
            };
            if let Some(score) = weights.region_sum(&region) {
                best.offer(region, score);
            }
        }

        best.finish("near")
    }

    /// Finds the footprint for one item of a flanking pair around `target`.
    ///
    /// The item sits directly beyond the target's edge on the requested side
    /// and slides along the target's span. Candidates closer to a wall score
    /// higher; each cell of distance from the closest wall costs one point.
    #[must_use]
    pub fn flank(
        &self,
        weights: WeightView<'_>,
        target: CellRect,
        size: CellRectSize,
        axis: FlankAxis,
        side: FlankSide,
    ) -> Option<CellRect> {
        if size.is_empty() {
            return None;
        }

        let (columns, rows) = weights.dimensions();
        let (left, top) = (i64::from(target.column()), i64::from(target.row()));
        let (width, height) = (i64::from(size.width()), i64::from(size.height()));

        let anchors: Vec<(i64, i64)> = match axis {
            FlankAxis::Vertical => {
                let row = match side {
                    FlankSide::First => top - height,
                    FlankSide::Second => top + i64::from(target.height()),
                };
                (left..left + i64::from(target.width()))
                    .map(|column| (column, row))
                    .collect()
            }
            FlankAxis::Horizontal => {
                let column = match side {
                    FlankSide::First => left - width,
                    FlankSide::Second => left + i64::from(target.width()),
                };
                (top..top + i64::from(target.height()))
                    .map(|row| (column, row))
                    .collect()
            }
        };

        let mut best = BestCandidate::new();
        for (column, row) in anchors {
            let Some(region) = candidate(&weights, column, row, size) else {
                continue;
            };
            let Some(weight) = weights.region_sum(&region) else {
                continue;
            };
            let distance = wall_distance(&region, columns, rows) as f64;
            best.offer(region, weight - distance);
        }

        best.finish("flank")
    }

    /// Scans the grid for a wardrobe footprint with room to swing its doors.
    ///
    /// A candidate is skipped when the clearance zone, the footprint grown by
    /// half the wardrobe's width on every side, overlaps any footprint in
    /// `furniture`. The score adds the wall bonus and the distance from the
    /// footprint's centre to the closest furnished cell, or `columns + rows`
    /// when nothing is furnished yet.
    #[must_use]
    pub fn wardrobe(
        &self,
        weights: WeightView<'_>,
        furniture: &[CellRect],
        size: CellRectSize,
    ) -> Option<CellRect> {
        let (columns, rows) = weights.dimensions();
        let clearance = size.width() / 2;
        let unfurnished = f64::from(columns) + f64::from(rows);
        let mut best = BestCandidate::new();

        for region in anchors(&weights, size) {
            let zone = region.expanded_within(clearance, columns, rows);
            if furniture.iter().any(|placed| placed.intersects(&zone)) {
                continue;
            }

            let Some(weight) = weights.region_sum(&region) else {
                continue;
            };

            let centre_x = f64::from(region.column()) + f64::from(region.width()) / 2.0;
            let centre_y = f64::from(region.row()) + f64::from(region.height()) / 2.0;
            let spacing = furniture
                .iter()
                .filter_map(|placed| placed.nearest_cell_distance(centre_x, centre_y))
                .reduce(f64::min)
                .unwrap_or(unfurnished);

            let score = weight + self.wall_bonus(&region, columns, rows) + spacing;
            best.offer(region, score);
        }

        best.finish("wardrobe")
    }

    fn window_bonus(&self, region: &CellRect, windows: &[CellRect]) -> f64 {
        let column = i64::from(region.column());
        let row = i64::from(region.row());
        windows
            .iter()
            .map(|window| (window.gap_squared(column, row) as f64).sqrt())
            .filter(|distance| *distance <= self.tuning.window_reach)
            .map(|distance| self.tuning.window_bonus / (1.0 + distance))
            .sum()
    }

    fn wall_bonus(&self, region: &CellRect, columns: u32, rows: u32) -> f64 {
        let distance = wall_distance(region, columns, rows) as f64;
        self.tuning.wall_bonus / (1.0 + distance)
    }
}
