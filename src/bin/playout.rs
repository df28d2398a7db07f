use chess_rules::{Color, Game, GameStatus, PieceType};
use clap::Parser;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Play random legal games and tally how they end. Any game that loses a king
/// or stalls with legal moves left is reported as a rules bug.
#[derive(Parser, Debug)]
#[command(name = "playout")]
struct PlayoutArgs {
    /// Number of games to play
    #[arg(short, long, default_value_t = 100)]
    games: usize,

    /// Stop a game after this many plies
    #[arg(long, default_value_t = 300)]
    max_plies: u32,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Debug, Default)]
struct Tally {
    white_mated: u32,
    black_mated: u32,
    stalemates: u32,
    unfinished: u32,
    broken: u32,
}

fn kings_intact(game: &Game) -> bool {
    [Color::White, Color::Black].iter().all(|&c| {
        game.board()
            .pieces_of(c)
            .filter(|(_, p)| p.piece_type() == PieceType::King)
            .count()
            == 1
    })
}

fn play_game(rng: &mut StdRng, max_plies: u32, tally: &mut Tally) {
    let mut game = Game::new();
    for ply in 0..max_plies {
        match game.status() {
            GameStatus::Checkmate(Color::White) => {
                tally.white_mated += 1;
                return;
            }
            GameStatus::Checkmate(Color::Black) => {
                tally.black_mated += 1;
                return;
            }
            GameStatus::Stalemate(_) => {
                tally.stalemates += 1;
                return;
            }
            GameStatus::Ended => {
                tally.broken += 1;
                return;
            }
            GameStatus::Check(_) | GameStatus::Ongoing => {}
        }

        let moves = game.legal_moves(game.team_turn());
        let Some(mv) = moves.choose(rng) else {
            warn!(ply, "no legal moves but status was not terminal");
            tally.broken += 1;
            return;
        };
        if let Err(e) = game.make_move(mv) {
            warn!(ply, %mv, error = %e, "generated move was rejected");
            tally.broken += 1;
            return;
        }
        if !kings_intact(&game) {
            warn!(ply, %mv, "a king left the board");
            tally.broken += 1;
            return;
        }
    }
    tally.unfinished += 1;
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = PlayoutArgs::parse();
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, games = args.games, "starting playout");

    let mut rng = StdRng::seed_from_u64(seed);
    let mut tally = Tally::default();
    for _ in 0..args.games {
        play_game(&mut rng, args.max_plies, &mut tally);
    }

    println!("White checkmated: {}", tally.white_mated);
    println!("Black checkmated: {}", tally.black_mated);
    println!("Stalemates:       {}", tally.stalemates);
    println!("Move limit:       {}", tally.unfinished);
    if tally.broken > 0 {
        eprintln!("Rule violations:  {} (seed {seed})", tally.broken);
        std::process::exit(1);
    }
}
