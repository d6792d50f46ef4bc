use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::{info, warn};
use std::{path::PathBuf, time::Instant};

use crate::{config::Config, scheduler::Ticker, theme::Theme};

pub struct App {
    pub ticker: Ticker,
    pub theme: Theme,
    pub show_help: bool,
    pub compact: bool,
    config: Config,
    /// Where theme changes are written back; `None` keeps them in memory only.
    persist_dir: Option<PathBuf>,
}

impl App {
    pub fn new(config: Config, persist_dir: Option<PathBuf>) -> Self {
        Self {
            ticker: Ticker::new(config.build_timer()),
            theme: Theme::get(config.theme),
            show_help: false,
            compact: false,
            config,
            persist_dir,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns true when the app should exit.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
            || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
        {
            return true;
        }

        match key.code {
            KeyCode::Char(' ') | KeyCode::Enter => {
                self.ticker.toggle(now);
            }
            KeyCode::Char('h') | KeyCode::Char('?') => self.show_help = !self.show_help,
            KeyCode::Char('m') | KeyCode::Char('M') => self.compact = !self.compact,
            KeyCode::Char('t') => self.cycle_theme(),
            _ => {}
        }
        false
    }

    fn cycle_theme(&mut self) {
        self.config.theme = self.config.theme.next();
        self.theme = Theme::get(self.config.theme);

        if let Some(dir) = &self.persist_dir {
            match self.config.save(dir) {
                Ok(()) => info!("Saved theme {}", self.config.theme.as_str()),
                Err(e) => warn!("Could not save theme: {}", e),
            }
        }
    }
}
