//! The top-level engine facade.
//!
//! Wraps a position, its search state, and the opening book behind the
//! small surface an external protocol adapter needs, so that adapter code
//! never has to reach into `search` or `eval` directly.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use zugzwang_core::{Board, Move, PositionError, generate_legal_moves};

use crate::book;
use crate::eval::evaluate;
use crate::search::control::SearchControl;
use crate::search::Searcher;

/// Snapshot of search/evaluation activity from the most recently completed
/// `best_move` call.
#[derive(Debug, Clone, Copy, Default)]
pub struct EngineStats {
    /// Static evaluations performed during the search.
    pub evaluations: u64,
    /// Wall-clock time the search took, in milliseconds.
    pub time_elapsed_ms: u64,
    /// Nodes visited during the search.
    pub nodes: u64,
    /// Current number of entries held in the transposition table.
    pub tt_size: usize,
}

/// Owns a position across a sequence of applied moves and drives search
/// over it.
///
/// Threefold repetition is tracked here, as a multiset of Zobrist hashes
/// seen across applied moves, rather than inside `Searcher`: the search
/// kernel only needs fifty-move and insufficient-material draws to reason
/// about a single line, while repetition is a property of the game's move
/// history that only this facade has visibility into.
pub struct Engine {
    board: Board,
    searcher: Searcher,
    position_counts: HashMap<u64, u32>,
    stop_flag: Arc<AtomicBool>,
    last_stats: EngineStats,
}

impl Engine {
    /// Create a fresh engine at the standard starting position.
    pub fn new() -> Self {
        let board = Board::starting_position();
        let mut position_counts = HashMap::new();
        position_counts.insert(board.hash(), 1);
        Self {
            board,
            searcher: Searcher::new(),
            position_counts,
            stop_flag: Arc::new(AtomicBool::new(false)),
            last_stats: EngineStats::default(),
        }
    }

    /// Reset to the standard starting position, clearing search and
    /// repetition state.
    pub fn reset_to_initial(&mut self) {
        self.board = Board::starting_position();
        self.position_counts.clear();
        self.position_counts.insert(self.board.hash(), 1);
        self.searcher.clear_tt();
    }

    /// Load a textual position, replacing the current one.
    ///
    /// Repetition history is reset: a freshly loaded position has no move
    /// history behind it.
    pub fn load_position(&mut self, text: &str) -> Result<(), PositionError> {
        let board: Board = text.parse()?;
        self.board = board;
        self.position_counts.clear();
        self.position_counts.insert(self.board.hash(), 1);
        Ok(())
    }

    /// Apply a long-algebraic move (e.g. `"e2e4"`, `"e7e8q"`) to the current
    /// position.
    ///
    /// Returns `false` without mutating state if the text is malformed or
    /// does not name a legal move.
    pub fn apply_move_text(&mut self, text: &str) -> bool {
        let Some(mv) = Move::from_uci(text, &self.board) else {
            return false;
        };

        let legal = generate_legal_moves(&self.board);
        if !legal.as_slice().contains(&mv) {
            return false;
        }

        self.board = self.board.make_move(mv);
        *self.position_counts.entry(self.board.hash()).or_insert(0) += 1;
        true
    }

    /// Whether the current position has now occurred three or more times
    /// across applied moves.
    pub fn is_threefold_repetition(&self) -> bool {
        self.position_counts.get(&self.board.hash()).copied().unwrap_or(0) >= 3
    }

    /// Ask a search in progress to stop at its next time-check poll.
    pub fn request_stop(&self) {
        self.stop_flag.store(true, Ordering::Release);
    }

    /// Clone of the stop flag a search is driven by, for callers that run
    /// `best_move` on a separate thread and need to cancel it concurrently.
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop_flag)
    }

    /// Search for the best move in the current position.
    ///
    /// Consults the opening book first; on a miss, runs iterative-deepening
    /// search up to `max_depth` under `control`, calling `on_iter(depth,
    /// score, nodes, pv)` after each completed iteration so a protocol
    /// adapter can emit progress output. `on_iter` is never called on a book
    /// hit. Returns `None` if the position has no legal moves.
    pub fn best_move<F>(&mut self, control: SearchControl, max_depth: u8, on_iter: F) -> Option<String>
    where
        F: FnMut(u8, i32, u64, &[Move]),
    {
        if let Some(mv) = book::lookup(&self.board) {
            return Some(mv.to_uci());
        }

        self.stop_flag.store(false, Ordering::Release);

        let start = Instant::now();
        let result = self.searcher.search(&self.board, max_depth, &control, on_iter);

        self.last_stats = EngineStats {
            evaluations: result.evaluations,
            time_elapsed_ms: start.elapsed().as_millis() as u64,
            nodes: result.nodes,
            tt_size: self.searcher.tt_size(),
        };

        if result.best_move.is_null() {
            None
        } else {
            Some(result.best_move.to_uci())
        }
    }

    /// Static evaluation of the current position, in centipawns from the
    /// side-to-move's perspective.
    pub fn static_eval(&self) -> i32 {
        evaluate(&self.board)
    }

    /// Activity snapshot from the most recently completed `best_move` call.
    pub fn stats(&self) -> EngineStats {
        self.last_stats
    }

    /// The current position.
    pub fn board(&self) -> &Board {
        &self.board
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
