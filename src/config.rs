use clap::ValueEnum;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{
    error::ConfigError,
    timer::{BoundaryPolicy, PhaseDurations, PhaseTimer, TICK_RATE},
};

pub const APP_DIR: &str = "pomodoro-dial";
pub const CONFIG_FILE: &str = "config.json";
pub const LOG_FILE: &str = "pomodoro-dial.log";

/// The two hardcoded work/relax duration pairs.
#[derive(Serialize, Deserialize, ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    /// 25 minutes of work, 5 minutes of relax
    #[default]
    Classic,
    /// 5 seconds of work, 1 second of relax
    Demo,
}

impl Preset {
    pub fn durations(self) -> PhaseDurations {
        match self {
            Self::Classic => PhaseDurations {
                work: Duration::from_secs(25 * 60),
                relax: Duration::from_secs(5 * 60),
            },
            Self::Demo => PhaseDurations {
                work: Duration::from_secs(5),
                relax: Duration::from_secs(1),
            },
        }
    }
}

#[derive(Serialize, Deserialize, ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ThemeName {
    #[default]
    Default,
    Nord,
    Dracula,
    Gruvbox,
}

impl ThemeName {
    const ALL: [ThemeName; 4] = [Self::Default, Self::Nord, Self::Dracula, Self::Gruvbox];

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&t| t == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Nord => "nord",
            Self::Dracula => "dracula",
            Self::Gruvbox => "gruvbox",
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Config {
    pub preset: Preset,
    pub theme: ThemeName,
    pub boundary: BoundaryPolicy,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            preset: Preset::Classic,
            theme: ThemeName::Default,
            boundary: BoundaryPolicy::Reset,
            log_level: "info".into(),
        }
    }
}

/// Command-line values that take precedence over the file.
#[derive(Default, Clone, Debug)]
pub struct Overrides {
    pub preset: Option<Preset>,
    pub theme: Option<ThemeName>,
    pub carry_overshoot: bool,
    pub verbose: bool,
}

impl Config {
    /// Reads `config.json` from `dir`. A missing file yields the defaults.
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ConfigError::Deserialize { path, source })
    }

    pub fn save(&self, dir: &Path) -> Result<(), ConfigError> {
        ensure_dir(dir)?;
        let path = dir.join(CONFIG_FILE);
        let json = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        fs::write(&path, json).map_err(|source| ConfigError::Write { path, source })
    }

    pub fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(p) = overrides.preset { self.preset = p; }
        if let Some(t) = overrides.theme { self.theme = t; }
        if overrides.carry_overshoot { self.boundary = BoundaryPolicy::Carry; }
        if overrides.verbose { self.log_level = "debug".into(); }
    }

    /// Unknown level names fall back to `Info`.
    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }

    pub fn build_timer(&self) -> PhaseTimer {
        PhaseTimer::new(self.preset.durations(), TICK_RATE, self.boundary)
    }
}

/// The data directory holding `config.json` and the log file.
pub fn data_dir(custom: Option<&Path>) -> PathBuf {
    match custom {
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(".").join(APP_DIR),
    }
}

pub fn ensure_dir(dir: &Path) -> Result<(), ConfigError> {
    fs::create_dir_all(dir).map_err(|source| ConfigError::CreateDirectory {
        path: dir.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn scratch_dir(name: &str) -> PathBuf {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let n = COUNTER.fetch_add(1, Ordering::SeqCst);
        let dir = std::env::temp_dir().join(format!(
            "pomodoro-dial-config-{}-{}-{}",
            name,
            std::process::id(),
            n
        ));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = scratch_dir("missing");
        let config = Config::load(&dir).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.preset, Preset::Classic);
        assert_eq!(config.boundary, BoundaryPolicy::Reset);
    }

    #[test]
    fn test_save_then_load() {
        let dir = scratch_dir("save");
        let config = Config {
            preset: Preset::Demo,
            theme: ThemeName::Nord,
            boundary: BoundaryPolicy::Carry,
            log_level: "debug".into(),
        };
        config.save(&dir).unwrap();

        let raw = fs::read_to_string(dir.join(CONFIG_FILE)).unwrap();
        assert!(raw.contains("\"preset\": \"demo\""));
        assert!(raw.contains("\"boundary\": \"carry\""));
        assert_eq!(Config::load(&dir).unwrap(), config);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = scratch_dir("partial");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(CONFIG_FILE), r#"{ "theme": "gruvbox" }"#).unwrap();

        let config = Config::load(&dir).unwrap();
        assert_eq!(config.theme, ThemeName::Gruvbox);
        assert_eq!(config.preset, Preset::Classic);
        assert_eq!(config.log_level, "info");

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = scratch_dir("malformed");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(CONFIG_FILE), "{ preset: ").unwrap();

        let err = Config::load(&dir).unwrap_err();
        assert!(matches!(err, ConfigError::Deserialize { .. }));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_overrides_take_precedence() {
        let mut config = Config::default();
        config.apply_overrides(&Overrides {
            preset: Some(Preset::Demo),
            theme: None,
            carry_overshoot: true,
            verbose: true,
        });
        assert_eq!(config.preset, Preset::Demo);
        assert_eq!(config.theme, ThemeName::Default);
        assert_eq!(config.boundary, BoundaryPolicy::Carry);
        assert_eq!(config.level_filter(), LevelFilter::Debug);
    }

    #[test]
    fn test_level_filter_fallback() {
        let config = Config { log_level: "chatty".into(), ..Config::default() };
        assert_eq!(config.level_filter(), LevelFilter::Info);
    }

    #[test]
    fn test_preset_durations() {
        let demo = Preset::Demo.durations();
        assert_eq!(demo.work, Duration::from_secs(5));
        assert_eq!(demo.relax, Duration::from_secs(1));
        assert_eq!(Preset::Classic.durations().work, Duration::from_secs(1_500));
    }

    #[test]
    fn test_build_timer_uses_config() {
        let config = Config { preset: Preset::Demo, ..Config::default() };
        let timer = config.build_timer();
        assert_eq!(timer.durations(), Preset::Demo.durations());
        assert_eq!(timer.policy(), BoundaryPolicy::Reset);
        assert!(!timer.is_running());
    }

    #[test]
    fn test_theme_cycle_wraps() {
        assert_eq!(ThemeName::Default.next(), ThemeName::Nord);
        assert_eq!(ThemeName::Gruvbox.next(), ThemeName::Default);
        assert_eq!(ThemeName::Dracula.as_str(), "dracula");
    }

    #[test]
    fn test_data_dir() {
        assert_eq!(data_dir(None), PathBuf::from("./pomodoro-dial"));
        assert_eq!(data_dir(Some(Path::new("/tmp/x"))), PathBuf::from("/tmp/x"));
    }
}
