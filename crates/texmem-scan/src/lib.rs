//! Texture memory estimation and incremental scanning.
//!
//! Profiling the memory cost of a large texture set has two halves:
//!
//! - [`estimate_size`] - a pure per-texture footprint estimate from format,
//!   dimensions and mip count, without touching pixel data
//! - [`ScanEngine`] - a cooperative scanner that walks units of textures in
//!   small bounded chunks, pausable and resumable at any point, feeding a
//!   caller-owned [`StatsStore`]
//!
//! # Example
//!
//! ```
//! use texmem_scan::{ScanEngine, ScanPhase, ScanUnit};
//!
//! let mut engine = ScanEngine::new(|| Vec::<ScanUnit>::new());
//! engine.start();
//! while engine.phase() == ScanPhase::Running {
//!     engine.tick(); // bounded work per call
//! }
//! let totals = engine.totals();
//! ```

mod engine;
mod estimate;
mod stats;
mod unit;

pub use engine::{ScanEngine, ScanPhase, DEFAULT_ITEMS_PER_TICK};
pub use estimate::estimate_size;
pub use stats::{format_bytes, MemoryBudget, StatsStore, Totals, UnitStats, CRITICAL_FRACTION};
pub use unit::{ScanUnit, TextureRecord, UnitSource, ATLAS_SIZE_LIMIT};
