use std::fs::File;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use crossterm::event::{self, Event};
use log::{info, warn};

use nestris::ai::{HeuristicPolicy, HeuristicWeights};
use nestris::core::{random_seed, GameState, InputState};
use nestris::input::{ControlAction, KeyMapper};
use nestris::store::{JsonFileStore, MemoryStore, ScoreStore};
use nestris::term::{GameView, TerminalRenderer};
use nestris::types::{GameStatus, FRAME_RATE};

const DEFAULT_STORE: &str = "nestris-scores.json";
const LOG_FILE: &str = "nestris.log";

const USAGE: &str = "\
nestris - NES-style Tetris in the terminal

USAGE:
    nestris [OPTIONS]

OPTIONS:
    --seed <1-255>        Sequencer seed (random by default)
    --level <N>           Start a fresh game at level N instead of resuming
    --autoplay            Keep the autoplayer on after pressing start
    --weights <NAME>      Autoplayer weights: basic or tuned (default tuned)
    --no-lookahead        Evaluate placements without the next-piece preview
    --store <PATH|none>   Score file (default nestris-scores.json)
    -h, --help            Show this help
";

struct Config {
    seed: Option<u8>,
    level: Option<u32>,
    autoplay: bool,
    weights: HeuristicWeights,
    lookahead: bool,
    store: Option<String>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Config> {
    let mut config = Config {
        seed: None,
        level: None,
        autoplay: false,
        weights: HeuristicWeights::tuned(),
        lookahead: true,
        store: None,
    };

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--seed" => {
                let value = args.next().context("--seed requires a value")?;
                let seed: u8 = value
                    .parse()
                    .with_context(|| format!("invalid seed '{value}'"))?;
                if seed == 0 {
                    bail!("seed must be in 1..=255");
                }
                config.seed = Some(seed);
            }
            "--level" => {
                let value = args.next().context("--level requires a value")?;
                config.level = Some(
                    value
                        .parse()
                        .with_context(|| format!("invalid level '{value}'"))?,
                );
            }
            "--autoplay" => config.autoplay = true,
            "--weights" => {
                let value = args.next().context("--weights requires a value")?;
                config.weights = match value.as_str() {
                    "basic" => HeuristicWeights::basic(),
                    "tuned" => HeuristicWeights::tuned(),
                    other => bail!("unknown weights '{other}' (basic, tuned)"),
                };
            }
            "--no-lookahead" => config.lookahead = false,
            "--store" => {
                config.store = Some(args.next().context("--store requires a value")?);
            }
            "-h" | "--help" => {
                print!("{USAGE}");
                std::process::exit(0);
            }
            other => bail!("unknown argument '{other}'\n\n{USAGE}"),
        }
    }
    Ok(config)
}

fn init_logging() -> Result<()> {
    // Raw mode owns stdout/stderr, so logs go to a file.
    let file = File::create(LOG_FILE).context("creating log file")?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn open_store(config: &Config) -> Box<dyn ScoreStore> {
    let path = match config.store.as_deref() {
        Some("none") => return Box::new(MemoryStore::new()),
        Some(path) => path,
        None => DEFAULT_STORE,
    };
    match JsonFileStore::open(path) {
        Ok(store) => Box::new(store),
        Err(err) => {
            warn!("score store unavailable, playing without persistence: {err:#}");
            Box::new(MemoryStore::new())
        }
    }
}

fn main() -> Result<()> {
    let config = parse_args(std::env::args().skip(1))?;
    init_logging()?;

    let store = open_store(&config);
    let seed = config.seed.unwrap_or_else(random_seed);
    let mut state = match config.level {
        Some(level) => GameState::new(seed, level, store),
        None => GameState::resume(seed, store),
    };
    state.set_policy(Box::new(HeuristicPolicy::new(
        config.weights,
        config.lookahead,
    )));
    // The title screen demos itself until the player takes over.
    state.set_autoplay(true);
    info!("session starting with seed {seed}");

    let mut renderer = TerminalRenderer::new();
    renderer.enter()?;
    let result = event_loop(&mut renderer, &mut state, config.autoplay);
    renderer.exit()?;
    result
}

fn event_loop(
    renderer: &mut TerminalRenderer,
    state: &mut GameState,
    keep_autoplay: bool,
) -> Result<()> {
    let view = GameView::new();
    let mut mapper = KeyMapper::new();
    let mut input = InputState::new();
    let frame = Duration::from_secs_f64(1.0 / FRAME_RATE);
    let mut next_tick = Instant::now();

    loop {
        let timeout = next_tick.saturating_duration_since(Instant::now());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if let Some(action) = mapper.handle_key(key, &mut input) {
                    match action {
                        ControlAction::Quit => return Ok(()),
                        ControlAction::StartOrPause => match state.status() {
                            GameStatus::Idle | GameStatus::GameOver => {
                                state.start();
                                state.set_autoplay(keep_autoplay);
                                input.reset();
                            }
                            GameStatus::Playing | GameStatus::Paused => {
                                state.toggle_pause();
                                input.reset();
                            }
                        },
                        ControlAction::Restart => {
                            state.restart();
                            state.set_autoplay(true);
                            input.reset();
                        }
                        ControlAction::TogglePreview => state.toggle_preview(),
                        ControlAction::ToggleAutoplay => {
                            state.set_autoplay(!state.autoplay());
                        }
                    }
                }
            }
        }

        let now = Instant::now();
        if now >= next_tick {
            mapper.expire_holds(&mut input);
            state.tick(&mut input);
            renderer.draw(&view.render(&state.snapshot()))?;
            // A late frame is skipped, never burst to catch up.
            next_tick += frame;
            if next_tick < now {
                next_tick = now + frame;
            }
        }
    }
}
