use std::time::{Duration, Instant};

use ai_coursework::pente::{AlphaBeta, Board, PlayerConfig, Stone};
use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "selfplay", about = "Pente alpha-beta agent playing itself")]
struct Args {
    /// Stop after this many moves
    #[arg(long, default_value_t = 60)]
    moves: usize,
    /// Search depth for both sides
    #[arg(long, default_value_t = 1)]
    depth: u32,
    /// Only consider points within this distance of a stone
    #[arg(long)]
    radius: Option<usize>,
    /// Suppress the spinner and board output
    #[arg(long)]
    quiet: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let cfg = PlayerConfig { depth: args.depth, candidate_radius: args.radius, ..Default::default() };
    let mut agent = AlphaBeta::with_config(cfg);
    let mut board = Board::new();

    let pb = if args.quiet {
        None
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("{spinner} {elapsed_precise} | Moves: {msg}")
                .context("spinner template")?
                .tick_chars("⠁⠃⠇⠧⠷⠿⠻⠟⠯⠷⠧⠇⠃"),
        );
        pb.enable_steady_tick(Duration::from_millis(120));
        Some(pb)
    };

    let start = Instant::now();
    let mut nodes: u64 = 0;
    while board.ply() < args.moves && board.winner().is_none() {
        let mover = board.to_move();
        let Some(mv) = agent.best_move(&mut board) else { break };
        board.make_move(mv)?;
        nodes += agent.last_stats().nodes;
        if let Some(pb) = &pb {
            pb.set_message(format!("{} | nodes: {nodes}", board.ply()));
            pb.println(format!("{mover} {}\n{board}", mv.to_notation()));
        }
    }
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    let result = match board.winner() {
        Some(stone) => format!("{stone} wins"),
        None => String::from("no winner"),
    };
    println!(
        "{result} after {} moves | captures W/B: {}/{} | nodes: {nodes} | {:.2}s",
        board.ply(),
        board.captures(Stone::White),
        board.captures(Stone::Black),
        start.elapsed().as_secs_f64()
    );
    Ok(())
}
