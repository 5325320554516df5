//! Registry of placed furniture keyed by name.

use std::collections::BTreeMap;

use room_planner_core::{CellRect, FurnitureSnapshot};

/// Footprints of every successfully placed item. Entries are never removed.
#[derive(Debug)]
pub(crate) struct FurnitureRegistry {
    entries: BTreeMap<String, CellRect>,
}

impl FurnitureRegistry {
    pub(crate) fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Inserts or overwrites the entry, returning the footprint it replaced.
    pub(crate) fn record(&mut self, name: String, region: CellRect) -> Option<CellRect> {
        self.entries.insert(name, region)
    }

    pub(crate) fn lookup(&self, name: &str) -> Option<CellRect> {
        self.entries.get(name).copied()
    }

    pub(crate) fn regions(&self) -> impl Iterator<Item = CellRect> + '_ {
        self.entries.values().copied()
    }

    pub(crate) fn snapshots(&self) -> Vec<FurnitureSnapshot> {
        self.entries
            .iter()
            .map(|(name, region)| FurnitureSnapshot {
                name: name.clone(),
                region: *region,
            })
            .collect()
    }
}
