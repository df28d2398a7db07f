use std::time::Instant;

use chess_rules::perft::{divide, perft};
use chess_rules::Game;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Count legal move sequences from the opening position.
#[derive(Parser, Debug)]
#[command(name = "perft")]
struct PerftArgs {
    /// Plies to search
    #[arg(short, long, default_value_t = 4)]
    depth: u32,

    /// Print the count under each root move
    #[arg(long)]
    divide: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args = PerftArgs::parse();
    let game = Game::new();
    let start = Instant::now();

    let nodes = if args.divide {
        let split = divide(&game, args.depth);
        for (mv, n) in &split {
            println!("{mv}: {n}");
        }
        split.iter().map(|(_, n)| n).sum()
    } else {
        perft(&game, args.depth)
    };

    let elapsed = start.elapsed();
    let nps = nodes as f64 / elapsed.as_secs_f64().max(1e-9);
    println!("depth {}: {nodes} nodes in {:.2?} ({nps:.0} nodes/s)", args.depth, elapsed);
}
