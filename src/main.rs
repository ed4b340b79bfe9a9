use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use ai_coursework::config;
use ai_coursework::mountain::{self, MountainInput, Pathfinder};
use ai_coursework::pente::{self, GameInput, PlayerConfig};
use ai_coursework::resolution::{self, ProverConfig, ResolutionInput};
use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "ai-coursework", about = "Pathfinding, Pente and resolution solvers")]
struct Args {
    #[command(subcommand)]
    cmd: Cmd,
    /// Suppress the summary line on stderr
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Debug, ClapArgs)]
struct Io {
    /// Input file
    #[arg(long, default_value = "input.txt")]
    input: PathBuf,
    /// Output file
    #[arg(long, default_value = "output.txt")]
    output: PathBuf,
}

#[derive(Debug, Subcommand)]
enum Cmd {
    /// Find a path from the start to every lodge
    Mountain {
        #[command(flatten)]
        io: Io,
    },
    /// Choose the next Pente move
    Pente {
        #[command(flatten)]
        io: Io,
        /// TOML file with agent settings
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Decide whether the knowledge base entails the query
    Resolve {
        #[command(flatten)]
        io: Io,
        /// TOML file with prover settings
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let start = Instant::now();
    let summary = match &args.cmd {
        Cmd::Mountain { io } => {
            let input: MountainInput = read_input(&io.input)?.parse()?;
            let mut finder = Pathfinder::new(input.algorithm);
            let paths = finder.solve(&input.mountain);
            write_output(&io.output, &mountain::format_output(&paths))?;
            let stats = finder.last_stats();
            let found = paths.iter().filter(|p| p.is_found()).count();
            format!(
                "{}: {found}/{} lodges reached | expanded: {} | generated: {}",
                input.algorithm,
                paths.len(),
                stats.expanded,
                stats.generated
            )
        }
        Cmd::Pente { io, config: cfg_path } => {
            let cfg: PlayerConfig = config::load_or_default(cfg_path.as_deref())
                .with_context(|| format!("loading {}", display_opt(cfg_path)))?;
            let mut input: GameInput = read_input(&io.input)?.parse()?;
            let mv = pente::choose_move(&mut input, &cfg).context("no legal move: the game is already over")?;
            write_output(&io.output, &format!("{}\n", pente::format_output(mv)))?;
            format!("{} plays {}", input.board.to_move(), mv.to_notation())
        }
        Cmd::Resolve { io, config: cfg_path } => {
            let cfg: ProverConfig = config::load_or_default(cfg_path.as_deref())
                .with_context(|| format!("loading {}", display_opt(cfg_path)))?;
            let input: ResolutionInput = read_input(&io.input)?.parse()?;
            let outcome = resolution::answer(&input, &cfg);
            write_output(&io.output, &format!("{}\n", resolution::format_output(outcome)))?;
            format!("{}: {outcome:?}", input.query)
        }
    };
    if !args.quiet {
        eprintln!("{summary} | {:.3}s", start.elapsed().as_secs_f64());
    }
    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn write_output(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text).with_context(|| format!("writing {}", path.display()))
}

fn display_opt(path: &Option<PathBuf>) -> String {
    path.as_ref().map(|p| p.display().to_string()).unwrap_or_default()
}
