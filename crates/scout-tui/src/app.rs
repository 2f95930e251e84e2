use std::path::Path;

use scout_core::config::keymap::Keymap;
use scout_core::config::settings::Config;
use scout_core::config::theme::Theme;
use scout_core::fs::owner::{session_identity, OwnerResolver};
use scout_core::nav::panes::{Move, Navigator};

use crate::input::InputAction;

/// Application mode. Determines how input is routed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppMode {
    Normal,
    /// The one-line command prompt; the string is the text typed so far.
    Command(String),
}

/// Rows taken by the top and bottom bars.
const BAR_ROWS: u16 = 2;

/// Entry rows available to each pane in a terminal `height` lines tall.
pub fn pane_rows(height: u16) -> usize {
    usize::from(height.saturating_sub(BAR_ROWS).max(1))
}

/// Top-level application state.
///
/// Holds the single [`Navigator`] plus the configuration loaded at startup.
/// Mode and status transitions consume `self` and return the new state.
#[derive(Debug)]
pub struct App {
    navigator: Navigator,
    config: Config,
    theme: Theme,
    keymap: Keymap,
    identity: String,
    mode: AppMode,
    status: Option<String>,
    should_quit: bool,
}

impl App {
    /// Opens `start` for a terminal `height` lines tall.
    pub fn new(
        start: &Path,
        config: Config,
        theme: Theme,
        keymap: Keymap,
        height: u16,
    ) -> anyhow::Result<Self> {
        let navigator =
            Navigator::open(start, &config, OwnerResolver::from_system(), pane_rows(height))?;
        Ok(Self {
            navigator,
            config,
            theme,
            keymap,
            identity: session_identity(),
            mode: AppMode::Normal,
            status: None,
            should_quit: false,
        })
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    /// `user@host` shown at the start of the top bar.
    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn mode(&self) -> &AppMode {
        &self.mode
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn with_mode(self, mode: AppMode) -> Self {
        Self { mode, ..self }
    }

    pub fn with_status(self, status: String) -> Self {
        Self {
            status: Some(status),
            ..self
        }
    }

    pub fn with_clear_status(self) -> Self {
        Self {
            status: None,
            ..self
        }
    }

    /// Rebuilds every pane for a terminal `height` lines tall.
    pub fn with_terminal_height(mut self, height: u16) -> Self {
        self.navigator.resize(pane_rows(height));
        self
    }

    /// Applies one decoded key action.
    pub fn handle_input(mut self, action: InputAction) -> Self {
        match action {
            InputAction::Move(mv) => {
                self.navigator.apply(mv);
                self.with_clear_status()
            }
            InputAction::ToggleMark => {
                self.navigator.toggle_mark();
                self
            }
            InputAction::ToggleTag => {
                self.navigator.toggle_tag();
                self
            }
            InputAction::Reload => {
                self.navigator.reload();
                self.with_clear_status()
            }
            InputAction::EnterMode(mode) => self.with_clear_status().with_mode(mode),
            InputAction::Quit => Self {
                should_quit: true,
                ..self
            },
            InputAction::CommandChar(c) => match self.mode {
                AppMode::Command(ref mut text) => {
                    text.push(c);
                    self
                }
                AppMode::Normal => self,
            },
            InputAction::CommandBackspace => match self.mode {
                AppMode::Command(ref text) if text.is_empty() => self.with_mode(AppMode::Normal),
                AppMode::Command(ref mut text) => {
                    text.pop();
                    self
                }
                AppMode::Normal => self,
            },
            InputAction::CommandConfirm => match std::mem::replace(&mut self.mode, AppMode::Normal) {
                AppMode::Command(line) => self.run_command(&line),
                AppMode::Normal => self,
            },
            InputAction::None => self,
        }
    }

    /// Runs one command line.
    fn run_command(mut self, line: &str) -> Self {
        let line = line.trim();
        let (name, arg) = match line.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (line, ""),
        };
        tracing::debug!(command = %name, "command line");

        match name {
            "" => self,
            "q" | "quit" => Self {
                should_quit: true,
                ..self
            },
            "search" if arg.is_empty() => self,
            "search" => {
                if self.navigator.jump_to_match(arg) {
                    self
                } else {
                    self.with_status(format!("no match: {arg}"))
                }
            }
            "top" => {
                self.navigator.apply(Move::Top);
                self
            }
            "bottom" => {
                self.navigator.apply(Move::Bottom);
                self
            }
            "reload" => {
                self.navigator.reload();
                self
            }
            "rename" | "shell" => self.with_status(format!("{name}: not supported")),
            other => self.with_status(format!("unknown command: {other}")),
        }
    }

    /// Writes pane state to the cache and clears it before exit.
    pub fn shutdown(&mut self) {
        self.navigator.shutdown();
    }
}
