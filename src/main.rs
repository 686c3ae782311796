mod input;
mod ui;

use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use input::{
    handle_game_input, handle_home_input, map_game_key, DragTracker, HomeAction, InputResult,
};
use lane_runner::profile::Profile;
use lane_runner::runner::{RunnerConfig, Session};
use lane_runner::utils::logging;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{info, warn};
use ui::home_scene::{HomeScreen, HomeStats};
use ui::runner_scene::render_runner_scene;

const FRAME_POLL_MS: u64 = 16;

enum Screen {
    Home,
    Game,
}

struct Options {
    seed: Option<u64>,
    config_path: Option<PathBuf>,
}

fn print_usage() {
    println!("Lane Runner - Terminal Endless Runner\n");
    println!("Usage: lane-runner [options]\n");
    println!("Options:");
    println!("  --seed <N>       Seed spawn randomness for a repeatable run");
    println!("  --config <PATH>  Load tuning values from a JSON file");
    println!("  --version        Show version information");
    println!("  --help           Show this help message");
}

fn usage_error(message: &str) -> ! {
    eprintln!("{}", message);
    eprintln!("Run 'lane-runner --help' for usage.");
    std::process::exit(1);
}

fn parse_args() -> Options {
    let mut options = Options {
        seed: None,
        config_path: None,
    };
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-v" => {
                println!("lane-runner {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            "--seed" => {
                let value = args
                    .next()
                    .unwrap_or_else(|| usage_error("--seed needs a value"));
                let seed = value
                    .parse::<u64>()
                    .unwrap_or_else(|_| usage_error(&format!("Invalid seed: {}", value)));
                options.seed = Some(seed);
            }
            "--config" => {
                let path = args
                    .next()
                    .unwrap_or_else(|| usage_error("--config needs a path"));
                options.config_path = Some(PathBuf::from(path));
            }
            other => usage_error(&format!("Unknown argument: {}", other)),
        }
    }
    options
}

fn main() -> io::Result<()> {
    let options = parse_args();

    if let Err(e) = logging::init() {
        eprintln!("Warning: file logging disabled: {}", e);
    }

    let config = match &options.config_path {
        Some(path) => match RunnerConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "rejected config");
                eprintln!("Could not load config {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => RunnerConfig::default(),
    };

    let seed = options.seed.unwrap_or_else(rand::random);
    info!(seed, "lane-runner starting");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, config, seed);

    // Restore terminal
    disable_raw_mode()?;
    terminal.backend_mut().execute(DisableMouseCapture)?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: RunnerConfig,
    seed: u64,
) -> io::Result<()> {
    let mut current_screen = Screen::Home;
    let mut home = HomeScreen::new();
    let mut profile = Profile::default();

    let mut session = Session::new(config, seed);
    let mut drag = DragTracker::new();
    let mut last_frame = Instant::now();

    loop {
        match current_screen {
            Screen::Home => {
                let stats = HomeStats {
                    balance: profile.balance(),
                    best_score: profile.best_score(),
                    runs: profile.runs(),
                };
                terminal.draw(|f| {
                    let area = f.size();
                    home.draw(f, area, &stats);
                })?;

                if event::poll(Duration::from_millis(50))? {
                    if let Event::Key(key) = event::read()? {
                        if key.kind != KeyEventKind::Press {
                            continue;
                        }
                        match handle_home_input(key, &mut home) {
                            HomeAction::Play => {
                                session.restart();
                                last_frame = Instant::now();
                                current_screen = Screen::Game;
                            }
                            HomeAction::Quit => break,
                            HomeAction::None => {}
                        }
                    }
                }
            }
            Screen::Game => {
                terminal.draw(|f| {
                    let area = f.size();
                    render_runner_scene(f, area, &session);
                })?;

                if event::poll(Duration::from_millis(FRAME_POLL_MS))? {
                    let result = match event::read()? {
                        Event::Key(key) if key.kind == KeyEventKind::Press => {
                            handle_game_input(map_game_key(key), &mut session)
                        }
                        Event::Mouse(mouse) => {
                            match drag.handle(mouse, session.config().swipe_threshold) {
                                Some(swipe) => handle_game_input(
                                    input::GameInput::Swipe(swipe),
                                    &mut session,
                                ),
                                None => InputResult::Continue,
                            }
                        }
                        _ => InputResult::Continue,
                    };
                    match result {
                        InputResult::QuitToHome => {
                            current_screen = Screen::Home;
                            continue;
                        }
                        InputResult::Restarted => last_frame = Instant::now(),
                        InputResult::Continue => {}
                    }
                }

                let now = Instant::now();
                let elapsed = now.duration_since(last_frame).as_millis() as u64;
                last_frame = now;

                profile.record_all(&session.advance(elapsed));
            }
        }
    }

    info!(
        runs = profile.runs(),
        best_score = profile.best_score(),
        "lane-runner exiting"
    );
    Ok(())
}
