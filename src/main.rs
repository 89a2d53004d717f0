use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Parser;
use log::{info, warn};
use wrap_snake::config::{FRAME_INTERVAL, GameRules};
use wrap_snake::game::GameSession;
use wrap_snake::input::{GameInput, ReversalPolicy, poll_input};
use wrap_snake::logging::init_file_logger;
use wrap_snake::renderer;
use wrap_snake::settings::{load_rules, log_path, rules_path, save_rules};
use wrap_snake::snake::SnakeStatus;
use wrap_snake::terminal_runtime::{TerminalGuard, install_panic_hook};

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Rules file to read instead of the per-user one.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width in cells.
    #[arg(long)]
    width: Option<u16>,

    /// Grid height in cells.
    #[arg(long)]
    height: Option<u16>,

    /// Starting speed in ticks per second.
    #[arg(long)]
    speed: Option<f64>,

    /// Let a direction opposite to the last one through.
    #[arg(long = "allow-reversal")]
    allow_reversal: bool,

    /// Seed for goal placement.
    #[arg(long)]
    seed: Option<u64>,

    /// Log file; defaults to the per-user data directory.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    /// Log scoring and reset events too.
    #[arg(long, short)]
    verbose: bool,

    /// Write the effective rules to the rules file and exit.
    #[arg(long = "write-config")]
    write_config: bool,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    let log_file = cli.log_file.clone().unwrap_or_else(log_path);
    if let Err(error) = init_file_logger(&log_file, cli.verbose) {
        eprintln!("Logging disabled, cannot open {}: {error}", log_file.display());
    }

    let config_path = cli.config.clone().unwrap_or_else(rules_path);
    let rules = effective_rules(&cli, &config_path);

    if cli.write_config {
        save_rules(&config_path, &rules)?;
        println!("Wrote {}", config_path.display());
        return Ok(());
    }

    let session = match cli.seed {
        Some(seed) => GameSession::with_seed(rules, seed),
        None => GameSession::from_entropy(rules),
    }
    .map_err(|error| io::Error::new(io::ErrorKind::InvalidInput, error))?;

    install_panic_hook();
    info!("starting on a {}x{} grid", rules.width, rules.height);

    let mut guard = TerminalGuard::enter()?;
    run(&mut guard, session)
}

fn effective_rules(cli: &Cli, config_path: &Path) -> GameRules {
    let mut rules = match load_rules(config_path) {
        Ok(rules) => rules,
        Err(error) => {
            eprintln!("Ignoring rules file {}: {error}", config_path.display());
            warn!("ignoring rules file {}: {error}", config_path.display());
            GameRules::default()
        }
    };

    if let Some(width) = cli.width {
        rules.width = width;
    }
    if let Some(height) = cli.height {
        rules.height = height;
    }
    if let Some(speed) = cli.speed {
        rules.speed_start = speed;
    }
    if cli.allow_reversal {
        rules.reversal = ReversalPolicy::Allow;
    }

    rules
}

fn run(guard: &mut TerminalGuard, mut session: GameSession) -> io::Result<()> {
    let mut last_tick = Instant::now();

    loop {
        guard
            .terminal_mut()
            .draw(|frame| renderer::render(frame, &session))?;

        if let Some(input) = poll_input(FRAME_INTERVAL)? {
            if matches!(input, GameInput::Quit) {
                break;
            }

            if handle_input(&mut session, input) {
                last_tick = Instant::now();
            }
        }

        if last_tick.elapsed() >= session.tick_interval() {
            if session.tick() == SnakeStatus::Scored {
                info!("score {:.0}, speed {:.1}/s", session.score(), session.speed());
            }
            last_tick = Instant::now();
        }

        if session.take_just_died() {
            info!("run ended with score {:.0}", session.score());
        }
    }

    info!("quit with score {:.0}", session.score());
    Ok(())
}

/// Applies one intent; returns true when the session was restarted.
fn handle_input(session: &mut GameSession, input: GameInput) -> bool {
    match input {
        GameInput::Direction(direction) => {
            session.request_direction(direction);
            false
        }
        GameInput::Reset => match session.request_reset() {
            Ok(()) => true,
            Err(error) => {
                warn!("reset failed: {error}");
                false
            }
        },
        GameInput::ForceGameOver => {
            session.force_game_over();
            false
        }
        GameInput::Quit => false,
    }
}
