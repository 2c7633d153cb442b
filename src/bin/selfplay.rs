use std::path::PathBuf;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rayon::prelude::*;
use draughtcargo::{
    find_move, load_config_from_json, play_selfplay, Board, Color, EngineConfig, EngineError, GameRecord, GameStatus,
};

#[derive(Debug, Parser)]
#[command(name = "selfplay", about = "Engine versus engine draughts games")]
struct Args {
    /// Number of games; game ids run from 0 to N-1
    #[arg(long, default_value_t = 1)]
    games: u64,

    /// Search depth for White
    #[arg(long)]
    white_depth: Option<u8>,

    /// Search depth for Black
    #[arg(long)]
    black_depth: Option<u8>,

    /// Stop a game after this many plies
    #[arg(long)]
    max_plies: Option<usize>,

    /// Base seed for tie-breaking (deterministic per game id and ply)
    #[arg(long)]
    seed: Option<u64>,

    /// Engine config JSON; its depth applies to both colors unless overridden
    #[arg(long)]
    config: Option<PathBuf>,

    /// One JSON summary line per game on stdout
    #[arg(long, default_value_t = false)]
    json: bool,
}

const DEFAULT_DEPTH: u8 = 4;

fn print_replay(record: &GameRecord) -> Result<(), Box<dyn std::error::Error>> {
    let mut board = Board::initial();
    println!("{board}\n");
    for (i, name) in record.moves.iter().enumerate() {
        let mover = board.turn();
        board = find_move(&board, name)?.board;
        println!("Move {}: {mover} {name}", i + 1);
        println!("{board}\n");
    }
    Ok(())
}

fn verdict(record: &GameRecord) -> String {
    match record.status {
        GameStatus::InProgress if record.truncated => format!("stopped after {} plies", record.plies),
        st => st.to_string(),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let file_cfg = match &args.config {
        Some(p) => Some(load_config_from_json(p)?),
        None => None,
    };
    let mut base = file_cfg.unwrap_or_default();
    if let Some(s) = args.seed {
        base.seed = s;
    }
    let fallback = file_cfg.map_or(DEFAULT_DEPTH, |c| c.depth);
    let white = EngineConfig {
        depth: args.white_depth.unwrap_or(fallback),
        ..base
    };
    let black = EngineConfig {
        depth: args.black_depth.unwrap_or(fallback),
        ..base
    };
    white.validate()?;
    black.validate()?;

    eprintln!(
        "[selfplay] games={} white depth={} black depth={} seed={:#x}",
        args.games, white.depth, black.depth, base.seed
    );

    let pb = ProgressBar::new(args.games);
    pb.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] games {bar:40.cyan/blue} {pos}/{len}")?.progress_chars("=>-"),
    );
    if args.games <= 1 {
        pb.set_draw_target(indicatif::ProgressDrawTarget::hidden());
    }

    let records: Vec<GameRecord> = (0..args.games)
        .into_par_iter()
        .map(|game_id| {
            let r = play_selfplay(
                white.search_config(),
                black.search_config(),
                base.seed,
                game_id,
                args.max_plies,
            );
            pb.inc(1);
            r
        })
        .collect::<Result<Vec<GameRecord>, EngineError>>()?;
    pb.finish_and_clear();

    let (mut white_wins, mut black_wins, mut draws, mut stopped) = (0u64, 0u64, 0u64, 0u64);
    for r in &records {
        match r.status {
            GameStatus::Won(Color::White) => white_wins += 1,
            GameStatus::Won(Color::Black) => black_wins += 1,
            GameStatus::Draw => draws += 1,
            GameStatus::InProgress => stopped += 1,
        }
        if args.json {
            println!("{}", serde_json::to_string(r)?);
        } else if args.games == 1 {
            print_replay(r)?;
            println!("{}", verdict(r));
        } else {
            println!("game {}: {} ({} plies)", r.game_id, verdict(r), r.plies);
        }
    }
    info!("white {white_wins}, black {black_wins}, draws {draws}, stopped {stopped}");
    Ok(())
}
