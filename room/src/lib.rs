#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative room state for the furniture planner.
//!
//! A [`Room`] owns the weight grid, the fixed doors and windows, and the
//! registry of placed furniture. Callers drive it exclusively through
//! [`apply`], one [`Command`] at a time, and read it back through [`query`].
//! Placements are greedy: each one sees the grid left behind by every earlier
//! placement and is never revisited.

mod furniture;
mod grid;
mod influence;

use room_planner_core::{
    CellRect, CellSize, Command, Event, FlankAxis, FlankSide, InfluenceError, PhysicalRect,
    PhysicalSize, PlacementError, PlacementPreferences,
};
use room_planner_system_placement::{Placement, ScoringTuning};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{furniture::FurnitureRegistry, grid::WeightGrid};

/// Cells around a placed item that are zeroed along with its footprint.
pub const DEFAULT_CLEARANCE_MARGIN: u32 = 2;

/// Influence radius, in cells, used by callers that have no better value.
pub const DEFAULT_INFLUENCE_RADIUS: u32 = 8;

/// Physical description of a room and the knobs that shape its layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoomConfig {
    /// Horizontal extent of the room in physical units.
    pub width: u32,
    /// Vertical extent of the room in physical units.
    pub height: u32,
    /// Side length of a grid cell in physical units.
    pub cell_size: u32,
    /// Doors in physical units.
    #[serde(default)]
    pub doors: Vec<PhysicalRect>,
    /// Windows in physical units.
    #[serde(default)]
    pub windows: Vec<PhysicalRect>,
    /// Cells zeroed around every placed footprint.
    #[serde(default = "default_clearance_margin")]
    pub clearance_margin: u32,
    /// Bonuses used while scoring placements.
    #[serde(default)]
    pub tuning: ScoringTuning,
}

fn default_clearance_margin() -> u32 {
    DEFAULT_CLEARANCE_MARGIN
}

impl RoomConfig {
    /// Describes an empty room with default margin and tuning.
    #[must_use]
    pub fn new(width: u32, height: u32, cell_size: u32) -> Self {
        Self {
            width,
            height,
            cell_size,
            doors: Vec::new(),
            windows: Vec::new(),
            clearance_margin: DEFAULT_CLEARANCE_MARGIN,
            tuning: ScoringTuning::default(),
        }
    }

    /// Adds a door.
    #[must_use]
    pub fn with_door(mut self, door: PhysicalRect) -> Self {
        self.doors.push(door);
        self
    }

    /// Adds a window.
    #[must_use]
    pub fn with_window(mut self, window: PhysicalRect) -> Self {
        self.windows.push(window);
        self
    }

    /// Overrides the clearance margin.
    #[must_use]
    pub fn with_clearance_margin(mut self, margin: u32) -> Self {
        self.clearance_margin = margin;
        self
    }

    /// Overrides the scoring tuning.
    #[must_use]
    pub fn with_tuning(mut self, tuning: ScoringTuning) -> Self {
        self.tuning = tuning;
        self
    }
}

/// Reasons a room cannot be constructed from its configuration.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum RoomError {
    /// The cell size was zero, so the room cannot be discretised.
    #[error("cell size must be positive")]
    ZeroCellSize,
    /// The grid would hold more cells than can be addressed.
    #[error("a {columns}x{rows} grid is too large to allocate")]
    GridTooLarge {
        /// Requested number of columns.
        columns: u32,
        /// Requested number of rows.
        rows: u32,
    },
}

/// Represents the authoritative state of a single room being furnished.
#[derive(Debug)]
pub struct Room {
    cell_size: CellSize,
    grid: WeightGrid,
    doors: Vec<CellRect>,
    windows: Vec<CellRect>,
    furniture: FurnitureRegistry,
    clearance_margin: u32,
    placement: Placement,
    weights_applied: bool,
}

impl Room {
    /// Discretises the configured room into a fresh, fully desirable grid.
    pub fn new(config: RoomConfig) -> Result<Self, RoomError> {
        let cell_size = CellSize::new(config.cell_size).ok_or(RoomError::ZeroCellSize)?;
        let columns = cell_size.floor_cells(config.width);
        let rows = cell_size.floor_cells(config.height);
        let grid = WeightGrid::new(columns, rows).ok_or(RoomError::GridTooLarge { columns, rows })?;

        let to_cells = |rects: &[PhysicalRect]| -> Vec<CellRect> {
            rects.iter().map(|rect| rect.to_cells(cell_size)).collect()
        };

        Ok(Self {
            cell_size,
            grid,
            doors: to_cells(&config.doors),
            windows: to_cells(&config.windows),
            furniture: FurnitureRegistry::new(),
            clearance_margin: config.clearance_margin,
            placement: Placement::new(config.tuning),
            weights_applied: false,
        })
    }

    fn calculate_weights(&mut self, influence_radius: u32, out_events: &mut Vec<Event>) {
        if self.weights_applied {
            let reason = InfluenceError::AlreadyApplied;
            log::warn!("ignoring weight pass: {reason}");
            out_events.push(Event::WeightsRejected { reason });
            return;
        }

        influence::apply_influence(
            &mut self.grid,
            self.doors.iter().chain(self.windows.iter()),
            influence_radius,
        );
        self.weights_applied = true;

        let obstacles = self.doors.len() + self.windows.len();
        log::info!("applied influence of {obstacles} obstacles within {influence_radius} cells");
        out_events.push(Event::WeightsCalculated {
            influence_radius,
            obstacles,
        });
    }

    fn place_free(
        &mut self,
        name: String,
        size: PhysicalSize,
        preferences: PlacementPreferences,
        out_events: &mut Vec<Event>,
    ) {
        let size = size.to_cells(self.cell_size);
        let outcome = self
            .placement
            .free(self.grid.view(), &self.windows, size, preferences)
            .ok_or(PlacementError::NoFeasiblePosition);
        self.settle(name, outcome, out_events);
    }

    fn place_near(
        &mut self,
        name: String,
        size: PhysicalSize,
        anchor: &str,
        out_events: &mut Vec<Event>,
    ) {
        let size = size.to_cells(self.cell_size);
        let outcome = self.reference(anchor).and_then(|anchor| {
            self.placement
                .near(self.grid.view(), anchor, size)
                .ok_or(PlacementError::NoFeasiblePosition)
        });
        self.settle(name, outcome, out_events);
    }

    fn place_around(
        &mut self,
        name: String,
        size: PhysicalSize,
        target: &str,
        axis: FlankAxis,
        out_events: &mut Vec<Event>,
    ) {
        let target = match self.reference(target) {
            Ok(target) => target,
            Err(reason) => {
                self.settle(name, Err(reason), out_events);
                return;
            }
        };

        let size = size.to_cells(self.cell_size);
        for side in FlankSide::ALL {
            let outcome = self
                .placement
                .flank(self.grid.view(), target, size, axis, side)
                .ok_or(PlacementError::NoFeasiblePosition);
            self.settle(format!("{name} {}", side.index()), outcome, out_events);
        }
    }

    fn place_wardrobe(&mut self, name: String, size: PhysicalSize, out_events: &mut Vec<Event>) {
        let size = size.to_cells(self.cell_size);
        let furniture: Vec<CellRect> = self.furniture.regions().collect();
        let outcome = self
            .placement
            .wardrobe(self.grid.view(), &furniture, size)
            .ok_or(PlacementError::NoFeasiblePosition);
        self.settle(name, outcome, out_events);
    }

    fn reference(&self, name: &str) -> Result<CellRect, PlacementError> {
        self.furniture
            .lookup(name)
            .ok_or_else(|| PlacementError::ReferenceNotFound {
                reference: name.to_owned(),
            })
    }

    fn settle(
        &mut self,
        name: String,
        outcome: Result<CellRect, PlacementError>,
        out_events: &mut Vec<Event>,
    ) {
        match outcome {
            Ok(region) => {
                self.grid.mark_occupied(&region, self.clearance_margin);
                if let Some(previous) = self.furniture.record(name.clone(), region) {
                    log::info!("`{name}` replaces its earlier footprint {previous:?}");
                }
                log::info!(
                    "placed `{name}` at ({}, {}) covering {}x{} cells",
                    region.column(),
                    region.row(),
                    region.width(),
                    region.height()
                );
                out_events.push(Event::FurniturePlaced { name, region });
            }
            Err(reason) => {
                log::warn!("could not place `{name}`: {reason}");
                out_events.push(Event::PlacementRejected { name, reason });
            }
        }
    }
}

/// Applies the provided command to the room, mutating state deterministically.
pub fn apply(room: &mut Room, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::CalculateWeights { influence_radius } => {
            room.calculate_weights(influence_radius, out_events);
        }
        Command::PlaceFurniture {
            name,
            size,
            preferences,
        } => room.place_free(name, size, preferences, out_events),
        Command::PlaceFurnitureNear { name, size, anchor } => {
            room.place_near(name, size, &anchor, out_events);
        }
        Command::PlaceFurnitureAround {
            name,
            size,
            target,
            axis,
        } => room.place_around(name, size, &target, axis, out_events),
        Command::PlaceWardrobe { name, size } => room.place_wardrobe(name, size, out_events),
    }
}

/// Query functions that provide read-only access to the room state.
pub mod query {
    use room_planner_core::{
        CellRect, CellRectSize, CellSize, FurnitureView, LayoutSnapshot, Obstacle, ObstacleKind,
        WeightView,
    };

    use super::Room;

    /// Exposes a read-only view of the weight grid.
    #[must_use]
    pub fn weights(room: &Room) -> WeightView<'_> {
        room.grid.view()
    }

    /// Number of grid columns and rows.
    #[must_use]
    pub fn dimensions(room: &Room) -> CellRectSize {
        let (columns, rows) = room.grid.dimensions();
        CellRectSize::new(columns, rows)
    }

    /// Physical side length of a grid cell.
    #[must_use]
    pub fn cell_size(room: &Room) -> CellSize {
        room.cell_size
    }

    /// Cells zeroed around every placed footprint.
    #[must_use]
    pub fn clearance_margin(room: &Room) -> u32 {
        room.clearance_margin
    }

    /// Reports whether the obstacle influence pass has run.
    #[must_use]
    pub fn weights_applied(room: &Room) -> bool {
        room.weights_applied
    }

    /// Doors in cell coordinates, in configuration order.
    #[must_use]
    pub fn doors(room: &Room) -> &[CellRect] {
        &room.doors
    }

    /// Windows in cell coordinates, in configuration order.
    #[must_use]
    pub fn windows(room: &Room) -> &[CellRect] {
        &room.windows
    }

    /// Doors followed by windows, tagged with their kind.
    #[must_use]
    pub fn obstacles(room: &Room) -> Vec<Obstacle> {
        let doors = room.doors.iter().map(|region| Obstacle {
            kind: ObstacleKind::Door,
            region: *region,
        });
        let windows = room.windows.iter().map(|region| Obstacle {
            kind: ObstacleKind::Window,
            region: *region,
        });
        doors.chain(windows).collect()
    }

    /// Footprint registered under `name`, if any.
    #[must_use]
    pub fn furniture_region(room: &Room, name: &str) -> Option<CellRect> {
        room.furniture.lookup(name)
    }

    /// Captures a read-only view of every placed item.
    #[must_use]
    pub fn furniture_view(room: &Room) -> FurnitureView {
        FurnitureView::from_snapshots(room.furniture.snapshots())
    }

    /// Detaches everything a renderer needs from the live room.
    #[must_use]
    pub fn layout_snapshot(room: &Room) -> LayoutSnapshot {
        let (columns, rows) = room.grid.dimensions();
        LayoutSnapshot {
            columns,
            rows,
            cell_size: room.cell_size,
            obstacles: obstacles(room),
            furniture: furniture_view(room).into_vec(),
            weights: room.grid.weights().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_cell_size_fails_fast() {
        let error = Room::new(RoomConfig::new(400, 600, 0)).expect_err("zero cell size");
        assert_eq!(error, RoomError::ZeroCellSize);
    }

    #[test]
    fn oversized_grid_fails_fast() {
        let config = RoomConfig::new(u32::MAX, u32::MAX, 1);
        let error = Room::new(config).expect_err("oversized grid");
        assert_eq!(
            error,
            RoomError::GridTooLarge {
                columns: u32::MAX,
                rows: u32::MAX,
            }
        );
    }

    #[test]
    fn huge_influence_radius_completes_the_pass() {
        let config = RoomConfig::new(100, 60, 10)
            .with_window(PhysicalRect::new(0, 0, 10, 10));
        let mut room = Room::new(config).expect("valid room");
        let mut events = Vec::new();

        apply(
            &mut room,
            Command::CalculateWeights {
                influence_radius: u32::MAX,
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![Event::WeightsCalculated {
                influence_radius: u32::MAX,
                obstacles: 1,
            }]
        );
        assert!(query::weights(&room).iter().all(|weight| weight < 1.0));
    }

    #[test]
    fn grid_dimensions_truncate() {
        let room = Room::new(RoomConfig::new(410, 619, 20)).expect("valid room");
        assert_eq!(query::dimensions(&room).width(), 20);
        assert_eq!(query::dimensions(&room).height(), 30);
        assert_eq!(query::cell_size(&room).get(), 20);
        assert_eq!(query::clearance_margin(&room), DEFAULT_CLEARANCE_MARGIN);
    }

    #[test]
    fn second_weight_pass_is_rejected() {
        let config = RoomConfig::new(100, 100, 10)
            .with_door(PhysicalRect::new(0, 0, 10, 10));
        let mut room = Room::new(config).expect("valid room");
        let mut events = Vec::new();

        apply(&mut room, Command::CalculateWeights { influence_radius: 3 }, &mut events);
        let after_first: Vec<f64> = query::weights(&room).iter().collect();
        apply(&mut room, Command::CalculateWeights { influence_radius: 3 }, &mut events);

        assert_eq!(
            events,
            vec![
                Event::WeightsCalculated {
                    influence_radius: 3,
                    obstacles: 1,
                },
                Event::WeightsRejected {
                    reason: InfluenceError::AlreadyApplied,
                },
            ]
        );
        assert_eq!(query::weights(&room).iter().collect::<Vec<f64>>(), after_first);
    }

    #[test]
    fn config_starts_with_default_margin_and_tuning() {
        let config = RoomConfig::new(400, 600, 20);
        assert_eq!(config.clearance_margin, DEFAULT_CLEARANCE_MARGIN);
        assert_eq!(config.tuning, ScoringTuning::default());
        assert!(config.doors.is_empty() && config.windows.is_empty());
    }
}
