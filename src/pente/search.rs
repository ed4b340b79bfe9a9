use tracing::debug;

use super::board::{Board, Coord, Stone};
use super::heuristic::{evaluate, near_stones};
use super::{PlayerConfig, SearchStats};

#[derive(Debug, Clone, Copy)]
struct SearchResult {
    score: f64,
    mv: Option<Coord>,
}

/// Depth-limited minimax with alpha-beta pruning.
///
/// Scores are from the perspective of the side to move at the root. Won
/// positions score `+inf`, lost ones `-inf`. Among equally scored moves the
/// first in [`Board::legal_moves`] order wins.
pub struct AlphaBeta {
    cfg: PlayerConfig,
    stats: SearchStats,
}

impl AlphaBeta {
    pub fn new() -> Self { Self::with_config(PlayerConfig::default()) }

    pub fn with_config(cfg: PlayerConfig) -> Self { Self { cfg, stats: SearchStats::default() } }

    #[inline]
    pub fn config(&self) -> &PlayerConfig { &self.cfg }

    /// Search depth to use with `seconds_left` on the clock.
    pub fn depth_for_clock(&self, seconds_left: f64) -> u32 {
        if seconds_left < self.cfg.low_clock_seconds {
            self.cfg.low_clock_depth.min(self.cfg.depth)
        } else {
            self.cfg.depth
        }
    }

    /// Best move for the side to move, at the configured depth.
    ///
    /// Returns `None` when the game is already decided or the board is full.
    /// The board is restored before returning.
    ///
    /// ```
    /// use ai_coursework::pente::{AlphaBeta, Board, Coord};
    /// let mut board = Board::new();
    /// let mut agent = AlphaBeta::new();
    /// assert_eq!(agent.best_move(&mut board), Some(Coord::new(9, 9)));
    /// ```
    pub fn best_move(&mut self, board: &mut Board) -> Option<Coord> {
        let depth = self.cfg.depth;
        self.best_move_at_depth(board, depth)
    }

    /// Like [`Self::best_move`], dropping depth when the clock runs low.
    pub fn best_move_for_clock(&mut self, board: &mut Board, seconds_left: f64) -> Option<Coord> {
        let depth = self.depth_for_clock(seconds_left);
        self.best_move_at_depth(board, depth)
    }

    /// Best move searching `depth` plies. A depth of 0 is searched as 1 ply,
    /// since a move has to be played to be chosen.
    pub fn best_move_at_depth(&mut self, board: &mut Board, depth: u32) -> Option<Coord> {
        self.stats = SearchStats::default();
        if board.winner().is_some() {
            return None;
        }
        let me = board.to_move();
        let result = self.max_value(board, me, f64::NEG_INFINITY, f64::INFINITY, depth.max(1));
        debug!(
            depth,
            nodes = self.stats.nodes,
            cutoffs = self.stats.cutoffs,
            score = result.score,
            chosen = ?result.mv.map(|m| m.to_notation()),
            "alpha-beta finished"
        );
        result.mv
    }

    /// Alpha-beta value of the position for the side to move.
    pub fn state_value(&mut self, board: &mut Board, depth: u32) -> f64 {
        self.stats = SearchStats::default();
        let me = board.to_move();
        if let Some(w) = board.winner() {
            return if w == me { f64::INFINITY } else { f64::NEG_INFINITY };
        }
        self.max_value(board, me, f64::NEG_INFINITY, f64::INFINITY, depth).score
    }

    /// Statistics collected from the last search.
    #[inline]
    pub fn last_stats(&self) -> SearchStats { self.stats }

    fn candidates(&self, board: &Board) -> Vec<Coord> {
        let moves = board.legal_moves();
        match self.cfg.candidate_radius {
            Some(r) if moves.len() > 1 => near_stones(board, r, moves),
            _ => moves,
        }
    }

    /// Terminal score if the last move ended the game.
    #[inline]
    fn terminal(&self, board: &Board, me: Stone) -> Option<f64> {
        if !board.last_move_won() {
            return None;
        }
        let mover = board.to_move().opponent();
        Some(if mover == me { f64::INFINITY } else { f64::NEG_INFINITY })
    }

    fn max_value(&mut self, board: &mut Board, me: Stone, mut alpha: f64, beta: f64, depth: u32) -> SearchResult {
        self.stats.nodes += 1;
        if let Some(score) = self.terminal(board, me) {
            return SearchResult { score, mv: None };
        }
        if depth == 0 {
            self.stats.evals += 1;
            return SearchResult { score: evaluate(board, me, &self.cfg.weights), mv: None };
        }
        let moves = self.candidates(board);
        if moves.is_empty() {
            self.stats.evals += 1;
            return SearchResult { score: evaluate(board, me, &self.cfg.weights), mv: None };
        }
        let mut best = SearchResult { score: f64::NEG_INFINITY, mv: Some(moves[0]) };
        for mv in moves {
            board.play(mv);
            let value = self.min_value(board, me, alpha, beta, depth - 1).score;
            board.unmake_move();
            if value > best.score {
                best = SearchResult { score: value, mv: Some(mv) };
            }
            if value >= beta {
                self.stats.cutoffs += 1;
                return best;
            }
            alpha = alpha.max(value);
        }
        best
    }

    fn min_value(&mut self, board: &mut Board, me: Stone, alpha: f64, mut beta: f64, depth: u32) -> SearchResult {
        self.stats.nodes += 1;
        if let Some(score) = self.terminal(board, me) {
            return SearchResult { score, mv: None };
        }
        if depth == 0 {
            self.stats.evals += 1;
            return SearchResult { score: evaluate(board, me, &self.cfg.weights), mv: None };
        }
        let moves = self.candidates(board);
        if moves.is_empty() {
            self.stats.evals += 1;
            return SearchResult { score: evaluate(board, me, &self.cfg.weights), mv: None };
        }
        let mut best = SearchResult { score: f64::INFINITY, mv: Some(moves[0]) };
        for mv in moves {
            board.play(mv);
            let value = self.max_value(board, me, alpha, beta, depth - 1).score;
            board.unmake_move();
            if value < best.score {
                best = SearchResult { score: value, mv: Some(mv) };
            }
            if value <= alpha {
                self.stats.cutoffs += 1;
                return best;
            }
            beta = beta.min(value);
        }
        best
    }
}

impl Default for AlphaBeta {
    fn default() -> Self { Self::new() }
}

/// Plain minimax value (no pruning) for the side to move.
///
/// Exponential in `depth`; meant for checking [`AlphaBeta`] on small searches.
pub fn minimax_value(board: &mut Board, cfg: &PlayerConfig, depth: u32) -> f64 {
    let me = board.to_move();
    if let Some(w) = board.winner() {
        return if w == me { f64::INFINITY } else { f64::NEG_INFINITY };
    }
    fn go(board: &mut Board, me: Stone, cfg: &PlayerConfig, depth: u32, maximizing: bool) -> f64 {
        if board.last_move_won() {
            return if board.to_move().opponent() == me { f64::INFINITY } else { f64::NEG_INFINITY };
        }
        let moves = {
            let moves = board.legal_moves();
            match cfg.candidate_radius {
                Some(r) if moves.len() > 1 => near_stones(board, r, moves),
                _ => moves,
            }
        };
        if depth == 0 || moves.is_empty() {
            return evaluate(board, me, &cfg.weights);
        }
        let mut best = if maximizing { f64::NEG_INFINITY } else { f64::INFINITY };
        for mv in moves {
            board.play(mv);
            let v = go(board, me, cfg, depth - 1, !maximizing);
            board.unmake_move();
            best = if maximizing { best.max(v) } else { best.min(v) };
        }
        best
    }
    go(board, me, cfg, depth, true)
}
