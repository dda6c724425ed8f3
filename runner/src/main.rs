mod config;
mod simulation;

use clap::Parser;
use snake_common::config::ConfigSource;
use snake_common::{CycleMode, Heuristic, SessionRng, log, logger};

use config::{Config, DEFAULT_CONFIG_FILE, Validate, get_config_manager};
use simulation::{GameOutcome, Simulation, SimulationSettings};

#[derive(Parser)]
#[command(name = "snake_autopilot", about = "Runs headless snake games driven by the autopilot")]
struct Args {
    /// YAML config file; defaults are used when it does not exist.
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: String,

    #[arg(long)]
    games: Option<u32>,

    #[arg(long)]
    seed: Option<u64>,

    /// full | improved
    #[arg(long)]
    cycle: Option<CycleMode>,

    /// random | euclidian | bfs
    #[arg(long)]
    heuristic: Option<Heuristic>,

    #[arg(long)]
    use_log_prefix: bool,

    #[arg(long)]
    verbose: bool,

    /// Store the effective config (after command-line overrides) back to the file.
    #[arg(long)]
    write_config: bool,
}

impl Args {
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(games) = self.games {
            config.run.games = games;
        }
        if let Some(seed) = self.seed {
            config.run.seed = Some(seed);
        }
        if let Some(cycle) = self.cycle {
            config.autopilot.cycle = cycle;
        }
        if let Some(heuristic) = self.heuristic {
            config.autopilot.heuristic = heuristic;
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Autopilot".to_string())
    } else {
        None
    };
    logger::init_logger(prefix, args.verbose);

    let config_manager = get_config_manager(&args.config);
    let (mut config, source) = config_manager.get_config()?;
    if source == ConfigSource::Default {
        log!("No config at {}, using defaults", config_manager.location());
    }

    args.apply_overrides(&mut config);
    config.validate()?;

    if args.write_config {
        config_manager.set_config(&config)?;
        log!("Config written to {}", config_manager.location());
    }

    let rng = match config.run.seed {
        Some(seed) => SessionRng::new(seed),
        None => SessionRng::from_random(),
    };
    log!(
        "Running {} game(s) on {}x{} with {} cycle and {} heuristic (seed {})",
        config.run.games,
        config.game.width,
        config.game.height,
        config.autopilot.cycle,
        config.autopilot.heuristic,
        rng.seed()
    );

    let settings = SimulationSettings::from(&config);
    let mut simulation = Simulation::new(settings.clone(), rng);

    if config.status.show_cycles {
        let field = simulation.engine().field(
            settings.cycle,
            settings.field_size.width,
            settings.field_size.height,
        )?;
        log!("{} hint field:\n{}", field.mode(), field.render());
    }

    let mut wins = 0;
    for game in 1..=config.run.games {
        let report = simulation.run_game()?;
        if report.outcome == GameOutcome::Won {
            wins += 1;
        }

        let mut line = format!(
            "Game {}: {:?}, length {}, apples {}",
            game, report.outcome, report.snake_length, report.stats.apples_eaten
        );
        if config.status.show_step_count {
            line.push_str(&format!(", steps {}", report.stats.steps));
        }
        if config.status.show_head_average_distance_from_apple
            && let Some(distance) = report.stats.average_head_apple_distance()
        {
            line.push_str(&format!(", avg head-apple distance {:.2}", distance));
        }
        log!("{}", line);
    }

    log!("Won {} of {} game(s)", wins, config.run.games);
    if config.status.show_average_decision_time {
        let telemetry = simulation.engine().telemetry();
        log!(
            "Decisions: {}, total {:?}, average {:?}",
            telemetry.decisions(),
            telemetry.total(),
            telemetry.average().unwrap_or_default()
        );
    }

    Ok(())
}
