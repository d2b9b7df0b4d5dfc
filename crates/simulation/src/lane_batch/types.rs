use bevy::prelude::*;
use std::collections::HashMap;

use crate::config::LANE_BATCH_CHUNK;

/// Resumable state of one propagation run.
#[derive(Debug, Clone)]
pub struct BatchCursor {
    snapshot: Vec<Entity>,
    index: usize,
    scalar: f32,
}

impl BatchCursor {
    pub fn total(&self) -> usize {
        self.snapshot.len()
    }

    pub fn remaining(&self) -> usize {
        self.snapshot.len() - self.index
    }

    pub fn scalar(&self) -> f32 {
        self.scalar
    }
}

/// Desired lane speed per path prototype for the current run. `None` marks a
/// prototype with nothing to write. Keyed by prototype only: the scalar is
/// fixed for the lifetime of a run and the cache is dropped with the run.
#[derive(Debug, Default)]
pub struct DesiredSpeedCache {
    by_prototype: HashMap<Entity, Option<f32>>,
    misses: usize,
}

impl DesiredSpeedCache {
    pub fn get_or_compute(
        &mut self,
        prototype: Entity,
        compute: impl FnOnce() -> Option<f32>,
    ) -> Option<f32> {
        if let Some(cached) = self.by_prototype.get(&prototype) {
            return *cached;
        }
        self.misses += 1;
        let desired = compute();
        self.by_prototype.insert(prototype, desired);
        desired
    }

    /// Number of computations performed (cache misses).
    pub fn misses(&self) -> usize {
        self.misses
    }

    pub fn len(&self) -> usize {
        self.by_prototype.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_prototype.is_empty()
    }

    fn clear(&mut self) {
        self.by_prototype.clear();
        self.misses = 0;
    }
}

/// What happened to one lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaneVisit {
    Written,
    Unchanged,
    /// Owner, prototype or lane data vanished since the snapshot.
    Skipped,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaneBatchStats {
    pub runs_started: u32,
    pub runs_superseded: u32,
    pub runs_completed: u32,
    pub ticks: u32,
    pub lanes_written: usize,
    pub lanes_unchanged: usize,
    pub lanes_skipped: usize,
}

/// Idle -> Draining -> Idle. At most one cursor exists; a new run discards the
/// old cursor and its cache.
#[derive(Resource, Debug)]
pub struct LaneBatchScheduler {
    cursor: Option<BatchCursor>,
    cache: DesiredSpeedCache,
    chunk_size: usize,
    applied_scalar: Option<f32>,
    force_pending: bool,
    pub stats: LaneBatchStats,
}

impl Default for LaneBatchScheduler {
    fn default() -> Self {
        Self::with_chunk_size(LANE_BATCH_CHUNK)
    }
}

impl LaneBatchScheduler {
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        Self {
            cursor: None,
            cache: DesiredSpeedCache::default(),
            chunk_size: chunk_size.max(1),
            applied_scalar: None,
            force_pending: false,
            stats: LaneBatchStats::default(),
        }
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn is_active(&self) -> bool {
        self.cursor.is_some()
    }

    pub fn cursor(&self) -> Option<&BatchCursor> {
        self.cursor.as_ref()
    }

    /// `(remaining, total)` while a run is draining.
    pub fn progress(&self) -> Option<(usize, usize)> {
        self.cursor.as_ref().map(|c| (c.remaining(), c.total()))
    }

    /// Scalar of the most recently started run.
    pub fn applied_scalar(&self) -> Option<f32> {
        self.applied_scalar
    }

    /// Make the next [`LaneBatchScheduler::needs_begin`] true even if the
    /// scalar did not change (a new city was loaded).
    pub fn request_force(&mut self) {
        self.force_pending = true;
    }

    pub fn needs_begin(&self, scalar: f32) -> bool {
        self.force_pending || self.applied_scalar != Some(scalar)
    }

    /// Drop any run in flight and forget the applied scalar. Counters stay.
    pub fn reset(&mut self) {
        self.cursor = None;
        self.cache.clear();
        self.applied_scalar = None;
        self.force_pending = false;
    }

    /// Start a run over `snapshot`, superseding any run in flight.
    pub fn begin(&mut self, snapshot: Vec<Entity>, scalar: f32) {
        if self.cursor.take().is_some() {
            self.stats.runs_superseded += 1;
        }
        self.cache.clear();
        self.force_pending = false;
        self.applied_scalar = Some(scalar);
        self.stats.runs_started += 1;

        if snapshot.is_empty() {
            self.stats.runs_completed += 1;
            return;
        }
        self.cursor = Some(BatchCursor {
            snapshot,
            index: 0,
            scalar,
        });
    }

    /// Start a run only when the scalar changed or a forced run is pending.
    /// `snapshot` is only called when a run starts.
    pub fn begin_if_needed(&mut self, scalar: f32, snapshot: impl FnOnce() -> Vec<Entity>) -> bool {
        if !self.needs_begin(scalar) {
            return false;
        }
        self.begin(snapshot(), scalar);
        true
    }

    /// Visit up to one chunk of lanes from the cursor. Disposes the cursor and
    /// cache once the snapshot is drained. Returns lanes visited this call.
    pub fn continue_batch(
        &mut self,
        mut visit: impl FnMut(Entity, f32, &mut DesiredSpeedCache) -> LaneVisit,
    ) -> usize {
        let Some(cursor) = self.cursor.as_mut() else {
            return 0;
        };

        let start = cursor.index;
        let end = (start + self.chunk_size).min(cursor.snapshot.len());
        for &lane in &cursor.snapshot[start..end] {
            match visit(lane, cursor.scalar, &mut self.cache) {
                LaneVisit::Written => self.stats.lanes_written += 1,
                LaneVisit::Unchanged => self.stats.lanes_unchanged += 1,
                LaneVisit::Skipped => self.stats.lanes_skipped += 1,
            }
        }
        cursor.index = end;
        self.stats.ticks += 1;

        if cursor.index >= cursor.snapshot.len() {
            self.cursor = None;
            self.cache.clear();
            self.stats.runs_completed += 1;
        }
        end - start
    }
}
