//! scout: a three-pane terminal file browser built with ratatui.
//!
//! This binary loads configuration, opens the start directory, runs the
//! blocking event loop and restores the terminal on exit or panic.

mod app;
mod input;
mod render;
mod ui;

use std::io;
use std::panic;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::{ArgAction, Parser};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use scout_core::config::keymap::Keymap;
use scout_core::config::settings::Config;
use scout_core::config::theme::Theme;
use scout_core::CoreError;
use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::input::{handle_key, InputState};
use crate::render::render;

#[derive(Debug, Parser)]
#[command(name = "scout", version, about, disable_version_flag = true)]
struct Cli {
    /// Directory to open.
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Print version.
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    version: Option<bool>,
}

fn setup_terminal() -> anyhow::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> anyhow::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Installs a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}

/// Logs go to a file so the terminal UI is never disturbed.
fn init_logging() {
    let log_path = std::env::temp_dir().join("scout.log");
    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("scout: cannot open {}: {e}", log_path.display());
            return;
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_env_filter(filter)
        .init();
}

/// Project-local `config/` first, then `~/.config/scout`.
fn config_dir() -> PathBuf {
    let local = PathBuf::from("config");
    if local.exists() {
        return local;
    }
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/"))
        .join(".config")
        .join("scout")
}

/// Loads a config file, falling back to defaults. A missing file is normal;
/// anything else is logged.
fn load_or_default<T: Default>(path: &Path, load: impl FnOnce(&Path) -> Result<T, CoreError>) -> T {
    match load(path) {
        Ok(value) => value,
        Err(CoreError::NotFound(_)) => T::default(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "using defaults");
            T::default()
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging();

    let cfg_dir = config_dir();
    let config = load_or_default(&cfg_dir.join("config.toml"), Config::load);
    let theme = load_or_default(&cfg_dir.join("theme.toml"), Theme::load);
    let keymap = load_or_default(&cfg_dir.join("keymap.toml"), Keymap::load);

    let (_, height) = crossterm::terminal::size().unwrap_or((80, 24));
    let app = match App::new(&cli.path, config, theme, keymap, height) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("scout: {}: {e}", cli.path.display());
            std::process::exit(1);
        }
    };
    tracing::info!(path = %cli.path.display(), "started");

    install_panic_hook();
    let mut terminal = setup_terminal()?;

    let result = run_app(&mut terminal, app);

    restore_terminal(&mut terminal)?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
) -> anyhow::Result<()> {
    let mut input_state = InputState::new();

    loop {
        terminal.draw(|f| render(f, &app))?;

        if app.should_quit() {
            break;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let (action, next_state) =
                    handle_key(key, app.mode(), &input_state, app.keymap());
                input_state = next_state;
                app = app.handle_input(action);
            }
            Event::Resize(_, height) => {
                app = app.with_terminal_height(height);
            }
            _ => {}
        }
    }

    app.shutdown();
    tracing::info!("exiting");
    Ok(())
}
