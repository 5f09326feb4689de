//! Single-threaded transposition table keyed by the incremental Zobrist hash.
//!
//! Bounded to roughly one million entries; on overflow the worst-ranked half
//! (by `depth - 2*age`) is evicted and every surviving entry's age is bumped.

use std::collections::HashMap;

use zugzwang_core::Move;

/// Upper bound on the number of entries kept before an eviction sweep runs.
const MAX_ENTRIES: usize = 1_000_000;

/// Scores above this threshold indicate a forced mate.
const MATE_THRESHOLD: i32 = 19_000;

/// Bound type stored in a TT entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// The stored score is exact (PV node).
    Exact,
    /// The stored score is an upper bound (failed low / all-node).
    Upper,
    /// The stored score is a lower bound (failed high / beta cutoff).
    Lower,
}

/// Result of a successful TT probe.
#[derive(Debug, Clone)]
pub struct TtProbeResult {
    /// Best move from a previous search of this position.
    pub best_move: Move,
    /// Search depth of the stored entry.
    pub depth: u8,
    /// Bound type (exact, upper, or lower).
    pub bound: Bound,
    /// Score, already adjusted from TT-relative back to root-relative.
    pub score: i32,
}

struct TtEntry {
    depth: u8,
    score: i32,
    best_move: Move,
    bound: Bound,
    age: u32,
}

/// Convert a search score to TT-storable form.
///
/// Mate scores are path-dependent (`MATE_SCORE - ply`); store them as
/// distance-from-node instead of distance-from-root so they stay
/// path-independent across different ply depths to the same position.
fn score_to_tt(score: i32, ply: u8) -> i32 {
    if score > MATE_THRESHOLD {
        score + ply as i32
    } else if score < -MATE_THRESHOLD {
        score - ply as i32
    } else {
        score
    }
}

/// Reverse [`score_to_tt`].
fn score_from_tt(score: i32, ply: u8) -> i32 {
    if score > MATE_THRESHOLD {
        score - ply as i32
    } else if score < -MATE_THRESHOLD {
        score + ply as i32
    } else {
        score
    }
}

/// Bounded hash map from position identity to search results.
pub struct TranspositionTable {
    entries: HashMap<u64, TtEntry>,
}

impl TranspositionTable {
    /// Create a new transposition table. The `mb` parameter is accepted for
    /// interface parity with the rest of the search stack but only caps at
    /// [`MAX_ENTRIES`] — this table is a plain bounded map, not an
    /// allocation-sized array.
    pub fn new(_mb: usize) -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Remove all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of entries currently stored.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Probe the table for a position.
    pub fn probe(&self, hash: u64, ply: u8) -> Option<TtProbeResult> {
        self.entries.get(&hash).map(|entry| TtProbeResult {
            best_move: entry.best_move,
            depth: entry.depth,
            bound: entry.bound,
            score: score_from_tt(entry.score, ply),
        })
    }

    /// Store a position's search result, evicting the worst half of the
    /// table first if it is full.
    pub fn store(&mut self, hash: u64, depth: u8, score: i32, best_move: Move, bound: Bound, ply: u8) {
        if self.entries.len() >= MAX_ENTRIES && !self.entries.contains_key(&hash) {
            self.evict_worst_half();
        }

        self.entries.insert(
            hash,
            TtEntry {
                depth,
                score: score_to_tt(score, ply),
                best_move,
                bound,
                age: 0,
            },
        );
    }

    /// Evict the worst-ranked half of the table by `depth - 2*age`, then age
    /// every surviving entry.
    fn evict_worst_half(&mut self) {
        let mut ranked: Vec<(u64, i64)> = self
            .entries
            .iter()
            .map(|(&hash, entry)| (hash, entry.depth as i64 - 2 * entry.age as i64))
            .collect();
        ranked.sort_by_key(|&(_, rank)| rank);

        let evict_count = ranked.len() / 2;
        for &(hash, _) in ranked.iter().take(evict_count) {
            self.entries.remove(&hash);
        }

        for entry in self.entries.values_mut() {
            entry.age += 1;
        }
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new(0)
    }
}

impl std::fmt::Debug for TranspositionTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranspositionTable")
            .field("entries", &self.entries.len())
            .finish()
    }
}
