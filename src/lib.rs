//! ai-coursework: three classic AI search exercises as one library.
//!
//! This crate provides:
//! - `mountain`: BFS, uniform-cost and A* pathfinding to ski lodges on an
//!   elevation grid with a stamina budget and downhill momentum.
//! - `pente`: a 19x19 Pente engine (captures, five-in-a-row, opening rules)
//!   and an alpha-beta agent.
//! - `resolution`: a resolution-refutation prover for first-order sentences
//!   over flat terms.
//! - `config`: TOML loading for the agent and prover settings.
//!
//! Each solver reads a line-oriented `input.txt` via `FromStr` and formats a
//! single answer for `output.txt`.
//!
//! Quick start:
//! ```
//! use ai_coursework::pente::{AlphaBeta, Board};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! // Deterministic position from a seeded RNG
//! let mut rng = StdRng::seed_from_u64(42);
//! let mut board = Board::new().with_random_stones(&mut rng, 12);
//! let before = board.clone();
//! let mv = AlphaBeta::new().best_move(&mut board);
//! assert!(mv.is_some());
//! assert_eq!(board, before);
//! ```
//!
pub mod config;
pub mod mountain;
pub mod pente;
pub mod resolution;
