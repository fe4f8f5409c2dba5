mod config;
mod console;
mod game_loop;

use std::time::Duration;

use clap::{Parser, ValueEnum};
use tictactoe_common::config::Validate;
use tictactoe_common::logger::{self, LogLevel};
use tictactoe_common::{
    ComputerMovePolicy, Difficulty, FileScoreStore, GameMode, GameSession, ScorePersister,
    SessionRng, load_or_clear, log,
};

use config::{Config, get_config_manager};
use game_loop::{Timers, run_console};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    Pvp,
    Pvc,
}

impl From<ModeArg> for GameMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Pvp => GameMode::PlayerVsPlayer,
            ModeArg::Pvc => GameMode::PlayerVsComputer,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DifficultyArg {
    Easy,
    Hard,
    Pro,
}

impl From<DifficultyArg> for Difficulty {
    fn from(difficulty: DifficultyArg) -> Self {
        match difficulty {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Hard => Difficulty::Hard,
            DifficultyArg::Pro => Difficulty::Pro,
        }
    }
}

#[derive(Parser)]
#[command(name = "tictactoe_console", about = "Tic-tac-toe against a friend or the computer")]
struct Args {
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    #[arg(long, value_enum)]
    difficulty: Option<DifficultyArg>,

    /// Delay before the computer answers, in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Seed for the easy computer's random moves
    #[arg(long)]
    seed: Option<u64>,

    /// Config file to use instead of the one next to the executable
    #[arg(long)]
    config: Option<String>,

    /// Write the effective settings back to the config file
    #[arg(long)]
    save_config: bool,

    #[arg(long)]
    use_log_prefix: bool,

    #[arg(long)]
    verbose: bool,
}

impl Args {
    fn apply_to(&self, config: &mut Config) {
        if let Some(mode) = self.mode {
            config.mode = mode.into();
        }
        if let Some(difficulty) = self.difficulty {
            config.difficulty = difficulty.into();
        }
        if let Some(delay_ms) = self.delay_ms {
            config.computer_move_delay_ms = delay_ms;
        }
        if self.verbose {
            config.log_level = LogLevel::Debug;
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config_manager = get_config_manager(args.config.as_deref());
    let mut config = config_manager.get_config()?;
    args.apply_to(&mut config);
    config.validate()?;

    let prefix = if args.use_log_prefix {
        Some("Console".to_string())
    } else {
        None
    };
    logger::init_logger(prefix, config.log_level);

    if args.save_config {
        config_manager.set_config(&config)?;
        log!("Settings saved");
    }

    let score_store = FileScoreStore::new(&config.score_file);
    let score = load_or_clear(&score_store)
        .map_err(|e| format!("Score file {} is unusable: {}", config.score_file, e))?;

    let rng = match args.seed {
        Some(seed) => SessionRng::new(seed),
        None => SessionRng::from_random(),
    };

    let mut session = GameSession::new(score)
        .with_rng(rng)
        .with_computer_move_policy(ComputerMovePolicy::Deferred)
        .with_score_listener(ScorePersister::new(score_store));
    log!("Random seed {}", session.rng_seed());
    session.start_session(config.mode, config.difficulty);

    let timers = Timers::new(
        Duration::from_millis(config.computer_move_delay_ms),
        config.new_round_delay(),
    );
    run_console(session, timers).await?;

    Ok(())
}
