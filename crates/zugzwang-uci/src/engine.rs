//! Event-driven UCI command loop.
//!
//! A dedicated stdin-reader thread forwards parsed commands to the main
//! loop; `go` dispatches the actual search to a single worker thread so
//! that `stop` (arriving on the reader thread) can flip the shared stop
//! flag while the search is in progress. There is no parallelism inside
//! the search itself and no pondering — the worker thread is purely so a
//! blocking search doesn't also block command intake.

use std::io::{self, BufRead};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::time::Instant;

use tracing::{debug, info, warn};

use zugzwang_engine::Engine;

use crate::command::{Command, GoParams, parse_command};
use crate::error::UciError;

/// Events processed by the main engine loop.
enum EngineEvent {
    UciCommand(Result<Command, UciError>),
    SearchDone { best_move: Option<String>, engine: Engine },
    InputClosed,
}

/// Whether a search is currently running on the worker thread.
enum State {
    Idle(Engine),
    /// The worker thread owns the engine while a search runs; the stop flag
    /// is kept here so the main loop can still signal cancellation.
    Searching(Arc<AtomicBool>),
}

/// The UCI engine loop.
pub struct UciEngine {
    state: State,
}

impl UciEngine {
    /// Create a new engine at the starting position.
    pub fn new() -> Self {
        Self {
            state: State::Idle(Engine::new()),
        }
    }

    /// Run the UCI event loop, reading from stdin until `quit` or input closes.
    pub fn run(mut self) -> Result<(), UciError> {
        let (tx, rx) = mpsc::channel::<EngineEvent>();

        let stdin_tx = tx.clone();
        std::thread::spawn(move || {
            let stdin = io::stdin();
            let reader = stdin.lock();
            for line in reader.lines() {
                match line {
                    Ok(line) => {
                        let trimmed = line.trim().to_string();
                        if trimmed.is_empty() {
                            continue;
                        }
                        debug!(cmd = %trimmed, "received UCI command");
                        let cmd = parse_command(&trimmed);
                        if stdin_tx.send(EngineEvent::UciCommand(cmd)).is_err() {
                            break;
                        }
                    }
                    Err(_) => {
                        let _ = stdin_tx.send(EngineEvent::InputClosed);
                        break;
                    }
                }
            }
            let _ = stdin_tx.send(EngineEvent::InputClosed);
        });

        for event in &rx {
            match event {
                EngineEvent::UciCommand(Ok(cmd)) => match cmd {
                    Command::Uci => self.handle_uci(),
                    Command::IsReady => self.handle_isready(),
                    Command::UciNewGame => self.handle_ucinewgame(),
                    Command::Position(board) => self.handle_position(board),
                    Command::Go(params) => self.handle_go(params, &tx),
                    Command::Stop => self.handle_stop(),
                    Command::Quit => {
                        if matches!(self.state, State::Searching(_)) {
                            self.handle_stop();
                            for ev in &rx {
                                if let EngineEvent::SearchDone { best_move, engine } = ev {
                                    self.finish_search(best_move, engine);
                                    break;
                                }
                            }
                        }
                        break;
                    }
                    Command::Unknown(_) => {}
                },
                EngineEvent::UciCommand(Err(e)) => {
                    warn!(error = %e, "UCI parse error");
                }
                EngineEvent::SearchDone { best_move, engine } => {
                    self.finish_search(best_move, engine);
                }
                EngineEvent::InputClosed => break,
            }
        }

        info!("zugzwang shutting down");
        Ok(())
    }

    fn handle_uci(&self) {
        println!("id name zugzwang");
        println!("id author the zugzwang contributors");
        println!("uciok");
    }

    fn handle_isready(&self) {
        println!("readyok");
    }

    fn handle_ucinewgame(&mut self) {
        if let State::Idle(engine) = &mut self.state {
            engine.reset_to_initial();
        }
    }

    fn handle_position(&mut self, board: zugzwang_core::Board) {
        if let State::Idle(engine) = &mut self.state {
            let fen = board.to_string();
            if engine.load_position(&fen).is_err() {
                warn!(%fen, "position command produced an unparseable board, ignoring");
            }
        } else {
            warn!("position received while searching, ignoring");
        }
    }

    fn handle_go(&mut self, params: GoParams, tx: &mpsc::Sender<EngineEvent>) {
        let mut engine = match std::mem::replace(&mut self.state, State::Searching(Arc::new(AtomicBool::new(false)))) {
            State::Idle(engine) => engine,
            searching @ State::Searching(_) => {
                warn!("go received while not idle, ignoring");
                self.state = searching;
                return;
            }
        };
        let stop_flag = engine.stop_flag();
        self.state = State::Searching(Arc::clone(&stop_flag));

        let side = engine.board().side_to_move();
        let control = zugzwang_engine::time::limits_from_go(
            params.wtime,
            params.btime,
            params.movetime,
            params.infinite,
            side,
            Arc::clone(&stop_flag),
        );
        let max_depth = params.depth.unwrap_or(128);

        info!(max_depth, "starting search");

        let search_start = Instant::now();
        let tx = tx.clone();
        std::thread::spawn(move || {
            let best_move = engine.best_move(control, max_depth, |depth, score, nodes, pv| {
                let elapsed_ms = search_start.elapsed().as_millis().max(1) as u64;
                let nps = (nodes as u128 * 1000) / elapsed_ms as u128;
                let pv_str: String = pv
                    .iter()
                    .filter(|m| !m.is_null())
                    .map(|m| m.to_uci())
                    .collect::<Vec<_>>()
                    .join(" ");
                println!("info depth {depth} score cp {score} nodes {nodes} nps {nps} time {elapsed_ms} pv {pv_str}");
            });
            let _ = tx.send(EngineEvent::SearchDone { best_move, engine });
        });
    }

    fn handle_stop(&mut self) {
        match &self.state {
            State::Idle(engine) => engine.request_stop(),
            State::Searching(stop_flag) => stop_flag.store(true, Ordering::Release),
        }
    }

    fn finish_search(&mut self, best_move: Option<String>, engine: Engine) {
        match best_move {
            Some(mv) => println!("bestmove {mv}"),
            None => println!("bestmove 0000"),
        }
        self.state = State::Idle(engine);
    }
}

impl Default for UciEngine {
    fn default() -> Self {
        Self::new()
    }
}
