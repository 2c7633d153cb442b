use std::path::PathBuf;

use clap::Parser;
use serde_json::json;
use draughtcargo::{
    find_move, legal_moves, load_config_from_json, rng_for_ply, status, Board, EngineConfig, SearchOutcome,
    Searcher,
};

#[derive(Debug, Parser)]
#[command(name = "analyze", about = "Rate a draughts position and print the engine's move as JSON")]
struct Args {
    /// Position code: 32 glyphs (. o x O X) in square order, then turn (w|b) and the quiet-king-move counter
    #[arg(long, conflicts_with = "moves")]
    position: Option<String>,

    /// Moves played from the initial position, separated by spaces or commas, e.g. "c3-d4 f6-e5"
    #[arg(long)]
    moves: Option<String>,

    /// Engine config JSON; command-line flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Search depth in plies
    #[arg(long)]
    depth: Option<u8>,

    /// Pick uniformly among equally good moves instead of the first one
    #[arg(long, default_value_t = false)]
    random: bool,

    /// Seed for --random (deterministic)
    #[arg(long)]
    seed: Option<u64>,

    /// Disable alpha-beta cutoffs (plain minimax, same result)
    #[arg(long, default_value_t = false)]
    no_pruning: bool,

    /// Rate top-level moves in parallel
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Print the board to stderr
    #[arg(long, default_value_t = false)]
    show: bool,
}

fn build_board(args: &Args) -> Result<Board, Box<dyn std::error::Error>> {
    if let Some(code) = &args.position {
        return Ok(code.parse::<Board>()?);
    }
    let mut board = Board::initial();
    if let Some(list) = &args.moves {
        for name in list.split(|c: char| c == ',' || c.is_whitespace()).filter(|s| !s.is_empty()) {
            board = find_move(&board, name)?.board;
        }
    }
    Ok(board)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut cfg = match &args.config {
        Some(p) => load_config_from_json(p)?,
        None => EngineConfig::default(),
    };
    if let Some(d) = args.depth {
        cfg.depth = d;
    }
    if let Some(s) = args.seed {
        cfg.seed = s;
    }
    if args.no_pruning {
        cfg.pruning = false;
    }
    if args.parallel {
        cfg.parallel = true;
    }
    cfg.validate()?;

    let board = build_board(&args)?;
    if args.show {
        eprintln!("{board}");
    }

    let legal = legal_moves(&board);
    let mut searcher = Searcher::with_config(cfg.search_config());
    let outcome = if args.random {
        let mut rng = rng_for_ply(cfg.seed, 0, 0);
        searcher.best_random_move(&board, &mut rng)
    } else {
        searcher.best_move(&board)
    };

    let best = outcome.best();
    if let SearchOutcome::GameOver(st) = outcome {
        eprintln!("[analyze] no move to search: {st}");
    }
    let line = json!({
        "position": board.to_code(),
        "turn": board.turn(),
        "status": status(&board),
        "forced_capture": legal.forced_capture,
        "legal": legal.names(),
        "depth": cfg.depth,
        "best": best.map(|b| b.mv.name()),
        "rate": best.map(|b| b.rate),
        "plies": best.map(|b| b.plies),
        "goodness": best.map(|b| b.goodness),
        "tied": best.map(|b| b.tied),
        "stats": searcher.stats(),
    });
    println!("{}", serde_json::to_string(&line)?);
    Ok(())
}
