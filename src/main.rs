//! Brickfall entry point
//!
//! Headless runner: plays episodes with the autopilot frontend at a fixed
//! tick rate (or unpaced) and prints the session leaderboard.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, anyhow};
use clap::Parser;

use brickfall::autopilot::Autopilot;
use brickfall::frontend::{Control, EpisodeEnd, Frontend, run_episode};
use brickfall::highscores::HighScoreEntry;
use brickfall::sim::{GameState, Snapshot, StepOutcome};
use brickfall::{GameConfig, HighScores, Variant};

#[derive(Parser, Debug)]
#[command(name = "brickfall", about = "Run brick-breaker episodes headlessly")]
struct Args {
    /// Number of episodes to play
    #[arg(long, default_value_t = 5)]
    episodes: u32,

    /// Base seed; episode i uses seed + i (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Preset: agent or arcade
    #[arg(long, default_value = "agent")]
    variant: String,

    /// JSON config file (overrides the preset)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Ticks per second; 0 runs unpaced, omitted uses the variant's rate
    #[arg(long)]
    fps: Option<u32>,

    /// End episodes that last this many ticks
    #[arg(long, default_value_t = 20_000)]
    stall_limit: u64,
}

/// Sleeps between ticks to hold a fixed rate
struct Paced<F> {
    inner: F,
    period: Option<Duration>,
    next_deadline: Option<Instant>,
}

impl<F> Paced<F> {
    fn new(inner: F, fps: u32) -> Self {
        let period = (fps > 0).then(|| Duration::from_secs_f64(1.0 / f64::from(fps)));
        Self {
            inner,
            period,
            next_deadline: None,
        }
    }
}

impl<F: Frontend> Frontend for Paced<F> {
    fn poll(&mut self, snapshot: &Snapshot) -> Control {
        if let Some(period) = self.period {
            let now = Instant::now();
            let deadline = self.next_deadline.unwrap_or(now);
            if deadline > now {
                std::thread::sleep(deadline - now);
            }
            self.next_deadline = Some(deadline.max(now) + period);
        }
        self.inner.poll(snapshot)
    }

    fn present(&mut self, snapshot: &Snapshot, outcome: &StepOutcome) {
        self.inner.present(snapshot, outcome);
    }
}

fn load_config(args: &Args) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            GameConfig::from_json(&json)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => {
            let variant = Variant::from_str(&args.variant)
                .ok_or_else(|| anyhow!("unknown variant '{}'", args.variant))?;
            GameConfig::from_variant(variant)
        }
    };
    config.stall_limit = Some(args.stall_limit);
    config.validate().context("invalid config")?;
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = load_config(&args)?;

    let base_seed = args.seed.unwrap_or_else(rand::random);
    let fps = args.fps.unwrap_or_else(|| config.variant.tick_rate());
    log::info!(
        "Brickfall ({}) starting: {} episodes, base seed {}, {} fps",
        config.variant.as_str(),
        args.episodes,
        base_seed,
        fps
    );

    let mut board = HighScores::new();
    for i in 0..args.episodes {
        let seed = base_seed.wrapping_add(u64::from(i));
        let mut state = GameState::new(config.clone(), seed);
        let mut frontend = Paced::new(Autopilot::new(&config), fps);

        let outcome = match run_episode(&mut state, &mut frontend) {
            EpisodeEnd::Finished(last) => last.outcome,
            EpisodeEnd::Quit => break,
        };
        let Some(outcome) = outcome else {
            continue;
        };

        let pilot = &frontend.inner;
        let entry = HighScoreEntry {
            score: state.score,
            reward: pilot.reward,
            ticks: state.ticks,
            seed,
            outcome,
        };
        let rank = board.add_episode(entry);
        println!(
            "episode {:>3}  seed {:>20}  {:<8} score {:>3}  reward {:>6}  paddle hits {:>4}  ticks {:>6}{}",
            i + 1,
            seed,
            format!("{outcome:?}"),
            state.score,
            pilot.reward,
            pilot.paddle_hits,
            state.ticks,
            rank.map(|r| format!("  (rank {r})")).unwrap_or_default()
        );
    }

    println!();
    println!(
        "{} episodes, {} won, mean score {:.2}",
        board.episodes,
        board.wins,
        board.mean_score()
    );
    for (i, entry) in board.entries.iter().enumerate() {
        println!(
            "{:>2}. score {:>3}  reward {:>6}  {:?}  seed {}",
            i + 1,
            entry.score,
            entry.reward,
            entry.outcome,
            entry.seed
        );
    }

    Ok(())
}
