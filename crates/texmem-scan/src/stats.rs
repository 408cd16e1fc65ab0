//! Aggregated memory statistics per scan unit.

use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Fraction of the memory budget above which usage is considered critical.
pub const CRITICAL_FRACTION: f64 = 0.8;

/// Accumulated statistics for a single scan unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UnitStats {
    /// Accumulated estimated memory in bytes.
    pub total_bytes: u64,
    /// Number of textures counted.
    pub texture_count: u32,
    /// Textures small enough for atlas packing.
    pub atlas_eligible: u32,
    /// Textures too large for atlas packing.
    pub oversized: u32,
}

/// Snapshot of totals across all units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Totals {
    /// Estimated memory across all units in bytes.
    pub bytes: u64,
    /// Textures counted across all units.
    pub textures: u32,
    /// Atlas-eligible textures across all units.
    pub atlas_eligible: u32,
    /// Oversized textures across all units.
    pub oversized: u32,
}

/// Mapping from scan-unit identity to accumulated statistics.
///
/// Written only by the scan engine, strictly between its yield points;
/// readers may observe a unit's totals mid-accumulation and must treat them
/// as partial until the engine has moved past that unit.
#[derive(Debug, Default)]
pub struct StatsStore {
    by_unit: HashMap<String, UnitStats>,
}

impl StatsStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure a unit has an entry, created empty.
    ///
    /// Called when the scan engine begins a unit, so units without any
    /// textures still show up in reports.
    pub fn begin_unit(&mut self, unit: &str) {
        self.by_unit.entry(unit.to_owned()).or_default();
    }

    /// Append one texture's contribution to a unit's running totals.
    pub fn record(&mut self, unit: &str, size_delta: u64, atlas_eligible: bool) {
        let stats = self.by_unit.entry(unit.to_owned()).or_default();
        stats.total_bytes += size_delta;
        stats.texture_count += 1;
        if atlas_eligible {
            stats.atlas_eligible += 1;
        } else {
            stats.oversized += 1;
        }
    }

    /// Look up one unit's statistics.
    pub fn get(&self, unit: &str) -> Option<&UnitStats> {
        self.by_unit.get(unit)
    }

    /// Iterate over all units and their statistics.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &UnitStats)> {
        self.by_unit.iter().map(|(id, stats)| (id.as_str(), stats))
    }

    /// Number of units recorded so far.
    pub fn unit_count(&self) -> usize {
        self.by_unit.len()
    }

    /// The largest single-unit byte total, for scaling report bars.
    pub fn largest_unit_bytes(&self) -> u64 {
        self.by_unit
            .values()
            .map(|stats| stats.total_bytes)
            .max()
            .unwrap_or(0)
    }

    /// Sum of all unit totals, valid mid-scan as a partial snapshot.
    pub fn totals(&self) -> Totals {
        let mut totals = Totals::default();
        for stats in self.by_unit.values() {
            totals.bytes += stats.total_bytes;
            totals.textures += stats.texture_count;
            totals.atlas_eligible += stats.atlas_eligible;
            totals.oversized += stats.oversized;
        }
        totals
    }

    /// Reset to empty. Invoked at the start of every fresh scan and when
    /// upstream parameters invalidate cached sizes.
    pub fn clear(&mut self) {
        self.by_unit.clear();
    }
}

/// A memory capacity to compare aggregated usage against.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MemoryBudget {
    /// Capacity in bytes (typically the host's video memory).
    pub capacity: u64,
}

impl MemoryBudget {
    /// Create a budget from a capacity in bytes.
    pub fn new(capacity: u64) -> Self {
        Self { capacity }
    }

    /// Used fraction of the capacity.
    pub fn fraction(&self, bytes: u64) -> f64 {
        if self.capacity == 0 {
            return 0.0;
        }
        bytes as f64 / self.capacity as f64
    }

    /// Usage is close enough to capacity to warn about.
    pub fn is_critical(&self, bytes: u64) -> bool {
        self.fraction(bytes) > CRITICAL_FRACTION
    }

    /// Usage exceeds capacity outright.
    pub fn is_overflow(&self, bytes: u64) -> bool {
        self.fraction(bytes) > 1.0
    }
}

/// Format a byte count for display, in decimal units.
pub fn format_bytes(bytes: u64) -> String {
    if bytes < 1_000 {
        format!("{} bytes", bytes)
    } else if bytes < 1_000_000 {
        format!("{:.2}kB", bytes as f64 / 1_000.0)
    } else if bytes < 1_000_000_000 {
        format!("{:.2}MB", bytes as f64 / 1_000_000.0)
    } else {
        format!("{:.2}GB", bytes as f64 / 1_000_000_000.0)
    }
}
