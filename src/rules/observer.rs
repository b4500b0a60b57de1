//! Block observation hooks.
//!
//! Observers see every block bracket, every aura refresh and every death
//! sweep of the game they are attached to. Search forks drop their
//! observers, so only the game a caller holds reports.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};

use crate::core::EntityId;

/// Kind of an action block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockType {
    Attack,
    Joust,
    Power,
    Trigger,
    Deaths,
    /// Playing a card. Not counted toward the nesting depth.
    Play,
    Fatigue,
    Ritual,
}

impl BlockType {
    /// Whether the block moves the nesting counter.
    #[must_use]
    pub const fn is_counted(self) -> bool {
        !matches!(self, BlockType::Play)
    }
}

/// Receives block notifications. All methods default to no-ops.
pub trait BlockObserver: Send + Sync {
    /// A block opened. `depth` is the nesting counter after the open.
    fn block_start(&self, _block: BlockType, _source: EntityId, _depth: u32) {}

    /// A block closed. `depth` is the nesting counter after the close.
    fn block_end(&self, _block: BlockType, _source: EntityId, _depth: u32) {}

    /// An aura refresh finished; `tick` is the new tick.
    fn auras_refreshed(&self, _tick: u64) {}

    /// The death sweep moved these entities to the graveyard.
    fn deaths_processed(&self, _dead: &[EntityId]) {}
}

/// Observer that counts what it sees.
#[derive(Debug, Default)]
pub struct BlockCounter {
    starts: AtomicU64,
    ends: AtomicU64,
    refreshes: AtomicU64,
    deaths: AtomicU64,
    max_depth: AtomicU32,
}

impl BlockCounter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn starts(&self) -> u64 {
        self.starts.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn ends(&self) -> u64 {
        self.ends.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn refreshes(&self) -> u64 {
        self.refreshes.load(Ordering::Relaxed)
    }

    /// Entities finalized by death sweeps.
    #[must_use]
    pub fn deaths(&self) -> u64 {
        self.deaths.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn max_depth(&self) -> u32 {
        self.max_depth.load(Ordering::Relaxed)
    }
}

impl BlockObserver for BlockCounter {
    fn block_start(&self, _block: BlockType, _source: EntityId, depth: u32) {
        self.starts.fetch_add(1, Ordering::Relaxed);
        self.max_depth.fetch_max(depth, Ordering::Relaxed);
    }

    fn block_end(&self, _block: BlockType, _source: EntityId, _depth: u32) {
        self.ends.fetch_add(1, Ordering::Relaxed);
    }

    fn auras_refreshed(&self, _tick: u64) {
        self.refreshes.fetch_add(1, Ordering::Relaxed);
    }

    fn deaths_processed(&self, dead: &[EntityId]) {
        self.deaths.fetch_add(dead.len() as u64, Ordering::Relaxed);
    }
}
