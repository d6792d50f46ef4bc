mod app;
mod config;
mod error;
mod logger;
mod readout;
mod scheduler;
mod theme;
mod timer;
mod ui;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{debug, info};
use ratatui::prelude::*;
use std::{io, path::PathBuf, time::Instant};

use app::App;
use config::{Config, Overrides, Preset, ThemeName, LOG_FILE};
use error::{AppError, AppResult};
use logger::FileLogger;

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Clone)]
#[command(author, version, about = "A single-screen terminal Pomodoro timer with a rotating dial")]
struct Args {
    /// Duration pair to run: classic (25m/5m) or demo (5s/1s)
    #[arg(short, long, value_enum)]
    preset: Option<Preset>,
    #[arg(short = 't', long, value_enum)]
    theme: Option<ThemeName>,
    /// Carry the part of a tick that overshoots a phase into the next phase
    #[arg(long)]
    carry_overshoot: bool,
    /// Directory holding config.json and the log file
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(long)]
    log_file: Option<PathBuf>,
    #[arg(short, long)]
    verbose: bool,
    /// Write the resolved settings back to config.json
    #[arg(long)]
    save: bool,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            preset: self.preset,
            theme: self.theme,
            carry_overshoot: self.carry_overshoot,
            verbose: self.verbose,
        }
    }
}

// ============================================================================
// Main
// ============================================================================

fn main() -> AppResult<()> {
    let args = Args::parse();
    let dir = config::data_dir(args.config.as_deref());
    config::ensure_dir(&dir)?;

    let mut config = Config::load(&dir)?;
    config.apply_overrides(&args.overrides());

    let log_path = args.log_file.clone().unwrap_or_else(|| dir.join(LOG_FILE));
    FileLogger::open(&log_path, config.level_filter())?.install()?;
    debug!("Loaded configuration from {}: {:?}", dir.display(), config);

    if args.save {
        config.save(&dir)?;
        info!("Saved configuration to {}", dir.display());
    }

    let mut app = App::new(config, Some(dir));

    let mut terminal = setup_terminal()?;

    let res = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    let timer = app.ticker.timer();
    info!(
        "Exiting after {} completed phases, {:.2}s into {}",
        timer.completed_phases(),
        timer.elapsed_secs(),
        timer.phase().name()
    );
    res
}

/// Puts the terminal into raw mode on the alternate screen, undoing any
/// partial setup if a later step fails.
fn setup_terminal() -> AppResult<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().map_err(|e| AppError::Terminal(format!("Failed to enable raw mode: {}", e)))?;

    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(AppError::Terminal(format!("Failed to enter alternate screen: {}", e)));
    }

    Terminal::new(CrosstermBackend::new(stdout)).map_err(|e| {
        let _ = disable_raw_mode();
        let mut out = io::stdout();
        let _ = execute!(out, LeaveAlternateScreen);
        AppError::Terminal(format!("Failed to create terminal: {}", e))
    })
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> AppResult<()> {
    loop {
        terminal.draw(|f| ui::render(f, app))?;

        let timeout = app.ticker.poll_timeout(Instant::now());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && app.handle_key(key, Instant::now()) {
                    return Ok(());
                }
            }
        }

        app.ticker.pump(Instant::now());
    }
}
