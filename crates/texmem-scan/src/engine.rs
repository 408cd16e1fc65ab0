//! Incremental, cooperative scan engine.
//!
//! The engine is driven by repeated [`ScanEngine::tick`] calls from a host
//! loop. Each tick processes a small, bounded number of items and returns,
//! so a single call never holds the host for long. Pausing keeps the cursor
//! and all accumulated statistics; resuming continues exactly where the
//! scan left off.

use texmem_dds::TexelFormat;

use crate::estimate::estimate_size;
use crate::stats::{StatsStore, Totals};
use crate::unit::{ScanUnit, TextureRecord, UnitSource};

/// Items processed per tick before control returns to the caller.
pub const DEFAULT_ITEMS_PER_TICK: usize = 3;

/// Scan lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanPhase {
    /// No scan has run, or state was invalidated.
    Idle,
    /// Ticks consume items.
    Running,
    /// Cursor and stats held, ticks do nothing.
    Paused,
    /// All units exhausted; ticks do nothing until restarted.
    Completed,
}

/// Cooperative scanner over a collection of texture-bearing units.
///
/// Owns its unit snapshot, cursor and [`StatsStore`]; there is no ambient
/// state. Single-threaded by design: all mutation happens inside `tick`,
/// between the caller's invocations.
#[derive(Debug)]
pub struct ScanEngine<S: UnitSource> {
    source: S,
    phase: ScanPhase,
    units: Vec<ScanUnit>,
    unit_idx: usize,
    item_idx: usize,
    stats: StatsStore,
    items_per_tick: usize,
}

impl<S: UnitSource> ScanEngine<S> {
    /// Create an engine over a unit source.
    pub fn new(source: S) -> Self {
        Self {
            source,
            phase: ScanPhase::Idle,
            units: Vec::new(),
            unit_idx: 0,
            item_idx: 0,
            stats: StatsStore::new(),
            items_per_tick: DEFAULT_ITEMS_PER_TICK,
        }
    }

    /// Override how many items one tick may process.
    pub fn with_items_per_tick(mut self, items: usize) -> Self {
        self.items_per_tick = items.max(1);
        self
    }

    /// Current phase.
    pub fn phase(&self) -> ScanPhase {
        self.phase
    }

    /// Current cursor position as (unit index, item index within unit).
    pub fn cursor(&self) -> (usize, usize) {
        (self.unit_idx, self.item_idx)
    }

    /// Progress as (units fully processed, units total) for this pass.
    pub fn progress(&self) -> (usize, usize) {
        (self.unit_idx.min(self.units.len()), self.units.len())
    }

    /// Read access to the aggregated statistics.
    ///
    /// Valid at any time; mid-scan the current unit's totals are partial.
    pub fn stats(&self) -> &StatsStore {
        &self.stats
    }

    /// Snapshot of totals across all units, partial while running.
    pub fn totals(&self) -> Totals {
        self.stats.totals()
    }

    /// Begin a scan pass.
    ///
    /// From `Idle` or `Completed` this clears prior statistics, enumerates
    /// units afresh and starts running; if the enumeration is empty the
    /// engine stays idle. A `start` while already running is a no-op, and
    /// one received while paused resumes the scan.
    pub fn start(&mut self) {
        match self.phase {
            ScanPhase::Running => {}
            ScanPhase::Paused => self.phase = ScanPhase::Running,
            ScanPhase::Idle | ScanPhase::Completed => {
                self.stats.clear();
                self.units = self.source.enumerate();
                self.unit_idx = 0;
                self.item_idx = 0;
                self.phase = if self.units.is_empty() {
                    ScanPhase::Idle
                } else {
                    ScanPhase::Running
                };
            }
        }
    }

    /// Flip between `Running` and `Paused` without losing the cursor.
    ///
    /// A pause held indefinitely is the cancellation mechanism; discarding
    /// state requires a fresh [`start`](Self::start).
    pub fn toggle(&mut self) {
        self.phase = match self.phase {
            ScanPhase::Running => ScanPhase::Paused,
            ScanPhase::Paused => ScanPhase::Running,
            other => other,
        };
    }

    /// Drop all scan state because upstream configuration changed.
    pub fn invalidate(&mut self) {
        self.stats.clear();
        self.units.clear();
        self.unit_idx = 0;
        self.item_idx = 0;
        self.phase = ScanPhase::Idle;
    }

    /// Process one bounded chunk of work and return the number of items
    /// consumed. Does nothing unless running.
    pub fn tick(&mut self) -> usize {
        if self.phase != ScanPhase::Running {
            return 0;
        }

        let mut processed = 0;
        while processed < self.items_per_tick {
            let Some(unit) = self.units.get(self.unit_idx) else {
                self.phase = ScanPhase::Completed;
                break;
            };
            if self.item_idx == 0 {
                self.stats.begin_unit(&unit.id);
            }
            let Some(record) = unit.textures.get(self.item_idx) else {
                // Unit exhausted; its totals are final from here on.
                self.unit_idx += 1;
                self.item_idx = 0;
                continue;
            };
            let size = item_size(record);
            self.stats.record(&unit.id, size, record.is_atlas_eligible());
            self.item_idx += 1;
            processed += 1;
        }
        processed
    }
}

/// Size contribution of a single item.
///
/// An item whose format never resolved contributes its host-reported
/// resident length, or nothing; either way the scan continues.
fn item_size(record: &TextureRecord) -> u64 {
    if record.format == TexelFormat::Unsupported {
        log::warn!(
            "texture '{}' has no resolved format, falling back to resident byte length",
            record.name
        );
        return record.resident_bytes.unwrap_or(0);
    }
    estimate_size(record.format, record.width, record.height, record.mip_count)
}
