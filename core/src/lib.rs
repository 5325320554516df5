#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the room planner.
//!
//! This crate defines the message surface that connects callers, the
//! authoritative room, and the pure placement system. Callers submit
//! [`Command`] values describing desired layout steps, the room executes those
//! commands via its `apply` entry point, and then reports [`Event`] values
//! describing what was placed or rejected. The placement system only ever sees
//! read-only [`WeightView`] snapshots and answers with candidate footprints.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Commands that express all permissible room mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Runs the one-time obstacle influence pass over the weight grid.
    CalculateWeights {
        /// Maximum cell distance at which doors and windows penalise a cell.
        influence_radius: u32,
    },
    /// Places an item anywhere in the room, guided by optional preferences.
    PlaceFurniture {
        /// Registry key of the item.
        name: String,
        /// Physical footprint of the item.
        size: PhysicalSize,
        /// Bonuses applied while scoring candidate positions.
        preferences: PlacementPreferences,
    },
    /// Places an item flush against one side of an already placed item.
    PlaceFurnitureNear {
        /// Registry key of the item.
        name: String,
        /// Physical footprint of the item.
        size: PhysicalSize,
        /// Name of the previously placed item to sit next to.
        anchor: String,
    },
    /// Places a pair of items on opposite sides of an already placed item.
    PlaceFurnitureAround {
        /// Base name; the pair is registered as `"{name} 1"` and `"{name} 2"`.
        name: String,
        /// Physical footprint of each item of the pair.
        size: PhysicalSize,
        /// Name of the previously placed item to flank.
        target: String,
        /// Axis along which the pair is laid out.
        axis: FlankAxis,
    },
    /// Places a wardrobe near a wall, away from other furniture, with door clearance.
    PlaceWardrobe {
        /// Registry key of the wardrobe.
        name: String,
        /// Physical footprint of the wardrobe.
        size: PhysicalSize,
    },
}

/// Events reported by the room after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that obstacle influence was applied to the weight grid.
    WeightsCalculated {
        /// Radius used for the pass.
        influence_radius: u32,
        /// Number of doors and windows that contributed penalties.
        obstacles: usize,
    },
    /// Reports that a weight pass was refused.
    WeightsRejected {
        /// Specific reason the pass was refused.
        reason: InfluenceError,
    },
    /// Confirms that an item was placed and registered.
    FurniturePlaced {
        /// Registry key of the placed item.
        name: String,
        /// Cells covered by the item.
        region: CellRect,
    },
    /// Reports that a placement request left the room unchanged.
    PlacementRejected {
        /// Name the item would have been registered under.
        name: String,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
}

/// Reasons a placement request may be rejected by the room.
#[derive(Clone, Debug, Error, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlacementError {
    /// A relative placement named an item that is not registered.
    #[error("furniture `{reference}` was not found")]
    ReferenceNotFound {
        /// Name that failed to resolve.
        reference: String,
    },
    /// Every candidate position failed the bounds or clearance checks.
    #[error("no feasible position was found")]
    NoFeasiblePosition,
}

/// Reasons an obstacle influence pass may be refused.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InfluenceError {
    /// Influence was already subtracted from this grid.
    #[error("obstacle influence has already been applied to this room")]
    AlreadyApplied,
}

/// Scoring bonuses requested for a free placement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlacementPreferences {
    /// Rewards positions close to a window.
    pub prefer_window: bool,
    /// Rewards positions close to a wall.
    pub prefer_wall: bool,
}

impl PlacementPreferences {
    /// Preferences with no bonus enabled.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            prefer_window: false,
            prefer_wall: false,
        }
    }

    /// Enables the window proximity bonus.
    #[must_use]
    pub const fn near_window(mut self) -> Self {
        self.prefer_window = true;
        self
    }

    /// Enables the wall proximity bonus.
    #[must_use]
    pub const fn near_wall(mut self) -> Self {
        self.prefer_wall = true;
        self
    }
}

/// Axis along which a flanking pair is laid out around its target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlankAxis {
    /// First item above the target, second item below it.
    #[default]
    Vertical,
    /// First item left of the target, second item right of it.
    Horizontal,
}

/// Position of one item of a flanking pair relative to its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlankSide {
    /// Above the target on the vertical axis, left of it on the horizontal axis.
    First,
    /// Below the target on the vertical axis, right of it on the horizontal axis.
    Second,
}

impl FlankSide {
    /// Both sides in placement order.
    pub const ALL: [FlankSide; 2] = [FlankSide::First, FlankSide::Second];

    /// One-based index appended to the pair's base name.
    #[must_use]
    pub const fn index(self) -> u32 {
        match self {
            Self::First => 1,
            Self::Second => 2,
        }
    }
}

/// Side length of a grid cell measured in physical units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellSize(NonZeroU32);

impl CellSize {
    /// Creates a cell size, refusing zero.
    #[must_use]
    pub const fn new(length: u32) -> Option<Self> {
        match NonZeroU32::new(length) {
            Some(length) => Some(Self(length)),
            None => None,
        }
    }

    /// Retrieves the side length in physical units.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0.get()
    }

    /// Number of whole cells covered by `length`, truncating partial cells.
    #[must_use]
    pub const fn floor_cells(&self, length: u32) -> u32 {
        length / self.0.get()
    }

    /// Number of cells needed to cover `length`, rounding partial cells up.
    #[must_use]
    pub const fn ceil_cells(&self, length: u32) -> u32 {
        length.div_ceil(self.0.get())
    }
}

/// Width and height of an item measured in physical units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhysicalSize {
    width: u32,
    height: u32,
}

impl PhysicalSize {
    /// Creates a new physical size.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Horizontal extent in physical units.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Vertical extent in physical units.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Converts to whole cells so the item never under-covers its area.
    #[must_use]
    pub const fn to_cells(&self, cell_size: CellSize) -> CellRectSize {
        CellRectSize::new(
            cell_size.ceil_cells(self.width),
            cell_size.ceil_cells(self.height),
        )
    }
}

/// Axis-aligned rectangle measured in physical units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhysicalRect {
    x: u32,
    y: u32,
    size: PhysicalSize,
}

impl PhysicalRect {
    /// Creates a rectangle from its upper-left corner and extent.
    #[must_use]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            size: PhysicalSize::new(width, height),
        }
    }

    /// Horizontal offset of the upper-left corner.
    #[must_use]
    pub const fn x(&self) -> u32 {
        self.x
    }

    /// Vertical offset of the upper-left corner.
    #[must_use]
    pub const fn y(&self) -> u32 {
        self.y
    }

    /// Extent of the rectangle.
    #[must_use]
    pub const fn size(&self) -> PhysicalSize {
        self.size
    }

    /// Converts to cell coordinates: the corner is floored, the extent rounded up.
    #[must_use]
    pub const fn to_cells(&self, cell_size: CellSize) -> CellRect {
        CellRect::from_origin_and_size(
            CellCoord::new(cell_size.floor_cells(self.x), cell_size.floor_cells(self.y)),
            self.size.to_cells(cell_size),
        )
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

/// Axis-aligned rectangle expressed in cell coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRect {
    origin: CellCoord,
    size: CellRectSize,
}

impl CellRect {
    /// Constructs a rectangle from an origin cell and size.
    #[must_use]
    pub const fn from_origin_and_size(origin: CellCoord, size: CellRectSize) -> Self {
        Self { origin, size }
    }

    /// Constructs a rectangle from raw column, row, width and height values.
    #[must_use]
    pub const fn new(column: u32, row: u32, width: u32, height: u32) -> Self {
        Self::from_origin_and_size(
            CellCoord::new(column, row),
            CellRectSize::new(width, height),
        )
    }

    /// Constructs a rectangle from signed coordinates, refusing negative origins.
    #[must_use]
    pub fn from_signed(column: i64, row: i64, size: CellRectSize) -> Option<Self> {
        let column = u32::try_from(column).ok()?;
        let row = u32::try_from(row).ok()?;
        Some(Self::from_origin_and_size(CellCoord::new(column, row), size))
    }

    /// Upper-left cell that anchors the rectangle.
    #[must_use]
    pub const fn origin(&self) -> CellCoord {
        self.origin
    }

    /// Dimensions of the rectangle measured in whole cells.
    #[must_use]
    pub const fn size(&self) -> CellRectSize {
        self.size
    }

    /// Column of the left edge.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.origin.column()
    }

    /// Row of the top edge.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.origin.row()
    }

    /// Width in cells.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.size.width()
    }

    /// Height in cells.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.size.height()
    }

    /// Column one past the right edge.
    #[must_use]
    pub const fn right(&self) -> u64 {
        self.origin.column() as u64 + self.size.width() as u64
    }

    /// Row one past the bottom edge.
    #[must_use]
    pub const fn bottom(&self) -> u64 {
        self.origin.row() as u64 + self.size.height() as u64
    }

    /// Reports whether the rectangle covers the provided cell.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        let column = cell.column() as u64;
        let row = cell.row() as u64;
        column >= self.origin.column() as u64
            && column < self.right()
            && row >= self.origin.row() as u64
            && row < self.bottom()
    }

    /// Reports whether the two rectangles share at least one cell.
    #[must_use]
    pub const fn intersects(&self, other: &CellRect) -> bool {
        (self.origin.column() as u64) < other.right()
            && (other.origin.column() as u64) < self.right()
            && (self.origin.row() as u64) < other.bottom()
            && (other.origin.row() as u64) < self.bottom()
    }

    /// Grows the rectangle by `margin` cells on every side, clipped to the grid.
    #[must_use]
    pub fn expanded_within(&self, margin: u32, columns: u32, rows: u32) -> CellRect {
        let column_start = self.column().saturating_sub(margin).min(columns);
        let row_start = self.row().saturating_sub(margin).min(rows);
        let column_end = (self.right() + u64::from(margin)).min(u64::from(columns));
        let row_end = (self.bottom() + u64::from(margin)).min(u64::from(rows));
        let width = column_end.saturating_sub(u64::from(column_start));
        let height = row_end.saturating_sub(u64::from(row_start));
        CellRect::new(column_start, row_start, width as u32, height as u32)
    }

    /// Squared gap between the rectangle and a cell, zero for cells on or inside it.
    ///
    /// The far edges are treated as touching, so the column at `right()` and the
    /// row at `bottom()` also report a zero gap.
    #[must_use]
    pub fn gap_squared(&self, column: i64, row: i64) -> i64 {
        let left = i64::from(self.column());
        let top = i64::from(self.row());
        let right = left + i64::from(self.width());
        let bottom = top + i64::from(self.height());
        let gap_x = (left - column).max(column - right).max(0);
        let gap_y = (top - row).max(row - bottom).max(0);
        gap_x * gap_x + gap_y * gap_y
    }

    /// Euclidean distance from a point to the nearest cell index covered by the rectangle.
    ///
    /// Returns `None` for empty rectangles.
    #[must_use]
    pub fn nearest_cell_distance(&self, x: f64, y: f64) -> Option<f64> {
        if self.width() == 0 || self.height() == 0 {
            return None;
        }
        let last_column = f64::from(self.column()) + f64::from(self.width() - 1);
        let last_row = f64::from(self.row()) + f64::from(self.height() - 1);
        let dx = x.clamp(f64::from(self.column()), last_column) - x;
        let dy = y.clamp(f64::from(self.row()), last_row) - y;
        Some(dx.hypot(dy))
    }
}

/// Size of a [`CellRect`] measured in whole cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRectSize {
    width: u32,
    height: u32,
}

impl CellRectSize {
    /// Creates a new size descriptor with explicit dimensions.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width of the rectangle in cells.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height of the rectangle in cells.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Reports whether the size covers no cells.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Fixed opening kinds that influence the weight grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Doorway that furniture should keep clear of.
    Door,
    /// Window that some furniture is drawn towards.
    Window,
}

/// Door or window expressed in cell coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Obstacle {
    /// Kind of opening.
    pub kind: ObstacleKind,
    /// Cells covered by the opening.
    pub region: CellRect,
}

/// Read-only view into the dense weight grid.
#[derive(Clone, Copy, Debug)]
pub struct WeightView<'a> {
    cells: &'a [f64],
    columns: u32,
    rows: u32,
}

impl<'a> WeightView<'a> {
    /// Captures a new weight view backed by the provided row-major cell slice.
    #[must_use]
    pub fn new(cells: &'a [f64], columns: u32, rows: u32) -> Self {
        Self {
            cells,
            columns,
            rows,
        }
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Provides the dimensions of the underlying grid.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.columns, self.rows)
    }

    /// Returns the weight stored for the provided cell, if it lies inside the grid.
    #[must_use]
    pub fn weight(&self, cell: CellCoord) -> Option<f64> {
        self.index(cell)
            .and_then(|index| self.cells.get(index).copied())
    }

    /// Reports whether the rectangle lies entirely within the grid bounds.
    ///
    /// Only bounds are checked; occupied or penalised cells still fit.
    #[must_use]
    pub fn fits(&self, rect: &CellRect) -> bool {
        rect.right() <= u64::from(self.columns) && rect.bottom() <= u64::from(self.rows)
    }

    /// Sums the weights covered by the rectangle, or `None` when it does not fit.
    #[must_use]
    pub fn region_sum(&self, rect: &CellRect) -> Option<f64> {
        if !self.fits(rect) {
            return None;
        }
        let width = usize::try_from(self.columns).ok()?;
        let start = usize::try_from(rect.column()).ok()?;
        let end = start + usize::try_from(rect.width()).ok()?;
        let mut total = 0.0;
        for row in rect.row()..rect.row() + rect.height() {
            let offset = usize::try_from(row).ok()? * width;
            total += self.cells.get(offset + start..offset + end)?.iter().sum::<f64>();
        }
        Some(total)
    }

    /// Returns an iterator over all weights in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = f64> + 'a {
        self.cells.iter().copied()
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

/// Immutable representation of a single placed item used for queries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FurnitureSnapshot {
    /// Registry key of the item.
    pub name: String,
    /// Cells covered by the item.
    pub region: CellRect,
}

/// Read-only snapshot describing all furniture placed within the room.
#[derive(Clone, Debug, Default)]
pub struct FurnitureView {
    snapshots: Vec<FurnitureSnapshot>,
}

impl FurnitureView {
    /// Creates a new furniture view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<FurnitureSnapshot>) -> Self {
        snapshots.sort_by(|left, right| left.name.cmp(&right.name));
        Self { snapshots }
    }

    /// Iterator over the captured snapshots ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = &FurnitureSnapshot> {
        self.snapshots.iter()
    }

    /// Number of registered items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether no item has been placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<FurnitureSnapshot> {
        self.snapshots
    }
}

/// Everything a renderer needs to draw the room, detached from the live state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutSnapshot {
    /// Number of grid columns.
    pub columns: u32,
    /// Number of grid rows.
    pub rows: u32,
    /// Physical side length of a cell.
    pub cell_size: CellSize,
    /// Doors and windows in cell coordinates.
    pub obstacles: Vec<Obstacle>,
    /// Placed furniture ordered by name.
    pub furniture: Vec<FurnitureSnapshot>,
    /// Row-major weights.
    pub weights: Vec<f64>,
}
