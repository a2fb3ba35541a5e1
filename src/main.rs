use std::path::PathBuf;
use std::process::ExitCode;

use adedonha::{
    config::{Config, ConfigStore, FileConfigStore},
    display::{GameDisplay, TerminalDisplay},
    runtime::{read_int_in_range, ChannelLineSource, LineSource, ReadOutcome},
    session::SessionConfig,
    Game, GameError,
};
use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};
use tracing::info;

/// timed word game: one letter, one category, less time for every player after you
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Players take turns naming something in the round's category that starts with the round's letter. Longer answers score more, shared answers split their points, and the clock gets shorter the later you play."
)]
pub struct Cli {
    /// number of players (asked interactively when omitted)
    #[clap(short = 'n', long)]
    players: Option<usize>,

    /// number of rounds to play
    #[clap(short = 'r', long)]
    rounds: Option<usize>,

    /// seconds given to the last player of each round
    #[clap(short = 't', long)]
    base_time: Option<u64>,

    /// extra seconds for each earlier turn position
    #[clap(short = 'd', long)]
    time_decrement: Option<u64>,

    /// seed for letter, category and turn order
    #[clap(short = 's', long)]
    seed: Option<u64>,

    /// read settings from this file instead of the default location
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// write the effective settings back to the config file
    #[clap(long)]
    save_config: bool,
}

impl Cli {
    fn apply(&self, cfg: &mut Config) {
        if let Some(r) = self.rounds {
            cfg.rounds = r;
        }
        if let Some(t) = self.base_time {
            cfg.base_time_secs = t;
        }
        if let Some(d) = self.time_decrement {
            cfg.time_decrement_secs = d;
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.code() {
                Some(code) => eprintln!("error: {e} (code {code})"),
                None => eprintln!("error: {e}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), GameError> {
    let store = cli
        .config
        .as_ref()
        .map(FileConfigStore::with_path)
        .unwrap_or_default();
    let mut cfg = store.load();
    cli.apply(&mut cfg);
    let session = SessionConfig::try_from(&cfg)?;
    if cli.save_config {
        store.save(&cfg)?;
        info!(path = %store.path().display(), "settings saved");
    }

    let mut source = ChannelLineSource::stdin();
    let mut display = TerminalDisplay::new();

    let (min, max) = (cfg.min_players, cfg.max_players);
    let players = match cli.players {
        Some(n) if (min..=max).contains(&n) => n,
        Some(n) => {
            return Err(GameError::Players(format!(
                "{n} players requested, expected {min} to {max}"
            )))
        }
        None => {
            display.message(&format!("Number of players (between {min} and {max}): "));
            let n = read_int_in_range(&mut source, &mut display, min as i64, max as i64)?;
            n as usize
        }
    };
    display.message(&format!("Number of players: {players}\n"));

    let names = collect_names(&mut source, &mut display, players, cfg.name_size)?;

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut game = Game::new(session, names, source, display, rng)?;
    game.run()?;
    Ok(())
}

/// Ask for each player's name until it is 1 to `name_size` characters and
/// not already taken.
fn collect_names<S: LineSource, D: GameDisplay>(
    source: &mut S,
    display: &mut D,
    players: usize,
    name_size: usize,
) -> Result<Vec<String>, GameError> {
    let mut names: Vec<String> = Vec::with_capacity(players);
    while names.len() < players {
        display.message(&format!("Player {} name: ", names.len() + 1));
        let line = match source.await_line(None) {
            ReadOutcome::Line(line) => line,
            ReadOutcome::Error(e) => return Err(e.into()),
            ReadOutcome::Expired => continue,
        };
        let name = line.trim();
        let len = name.chars().count();
        if len == 0 || len > name_size {
            display.message(&format!("Names must have 1 to {name_size} characters.\n"));
        } else if names.iter().any(|n| n.to_lowercase() == name.to_lowercase()) {
            display.message(&format!("{name} is already playing.\n"));
        } else {
            names.push(name.to_string());
        }
    }
    Ok(names)
}
