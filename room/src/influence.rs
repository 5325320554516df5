//! Obstacle influence pass that makes cells near doors and windows less desirable.

use room_planner_core::{CellCoord, CellRect};

use crate::grid::WeightGrid;

/// Subtracts a distance-decaying penalty around every obstacle, then clamps at zero.
///
/// A cell at distance `d` (Euclidean gap to the obstacle rectangle, in cells)
/// loses `1 / (1 + d)` when `d` is within `radius`. Penalties from several
/// obstacles add up before the single clamp, so processing order is irrelevant.
pub(crate) fn apply_influence<'a, I>(grid: &mut WeightGrid, obstacles: I, radius: u32)
where
    I: IntoIterator<Item = &'a CellRect>,
{
    let (columns, rows) = grid.dimensions();
    // No cell lies farther than `columns + rows` from any obstacle.
    let reach = i64::from(radius).min(i64::from(columns) + i64::from(rows));
    let reach_sq = reach * reach;

    for obstacle in obstacles {
        let left = i64::from(obstacle.column());
        let top = i64::from(obstacle.row());
        let right = left + i64::from(obstacle.width());
        let bottom = top + i64::from(obstacle.height());

        let column_range = clip(left - reach, columns)..clip(right + reach, columns);
        let row_range = clip(top - reach, rows)..clip(bottom + reach, rows);

        for row in row_range {
            for column in column_range.clone() {
                let distance_sq = obstacle.gap_squared(i64::from(column), i64::from(row));
                if distance_sq > reach_sq {
                    continue;
                }
                let distance = (distance_sq as f64).sqrt();
                grid.penalise(CellCoord::new(column, row), 1.0 / (1.0 + distance));
            }
        }
    }

    grid.clamp_non_negative();
}

fn clip(value: i64, limit: u32) -> u32 {
    value.clamp(0, i64::from(limit)) as u32
}
