use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::cli::GlobalArgs;
use crate::state::ThemePreference;

/// Simulated call durations, in milliseconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DelaysMs {
    pub login_ms: u64,
    pub chat_ms: u64,
    pub processing_ms: u64,
    pub regenerate_ms: u64,
    pub insights_ms: u64,
}

impl Default for DelaysMs {
    fn default() -> Self {
        Self {
            login_ms: 1000,
            chat_ms: 1500,
            processing_ms: 2000,
            regenerate_ms: 1500,
            insights_ms: 0,
        }
    }
}

/// Delays after scaling, ready for `tokio::time::sleep`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delays {
    pub login: Duration,
    pub chat: Duration,
    pub processing: Duration,
    pub regenerate: Duration,
    pub insights: Duration,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub theme: ThemePreference,
    pub start_route: String,
    pub delays: DelaysMs,
    pub delay_scale: f64,
    pub tick_rate_ms: u64,
    pub notification_ttl_ms: u64,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: ThemePreference::System,
            start_route: "/".to_string(),
            delays: DelaysMs::default(),
            delay_scale: 1.0,
            tick_rate_ms: 100,
            notification_ttl_ms: 4000,
            log_file: None,
        }
    }
}

impl Config {
    /// Defaults, then the JSON file (`--config` or `AXION_CONFIG`), then
    /// `AXION_*` variables, then flags.
    pub fn load(args: &GlobalArgs) -> Result<Self> {
        let file = args
            .config
            .clone()
            .or_else(|| std::env::var_os("AXION_CONFIG").map(PathBuf::from));
        let mut config = match file {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.apply_args(args);
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(theme) = lookup("AXION_THEME") {
            self.theme = theme.parse().context("AXION_THEME")?;
        }
        if let Some(route) = lookup("AXION_START_ROUTE") {
            self.start_route = route;
        }
        if let Some(path) = lookup("AXION_LOG_FILE") {
            self.log_file = Some(PathBuf::from(path));
        }
        if let Some(scale) = lookup("AXION_DELAY_SCALE") {
            self.delay_scale = scale
                .trim()
                .parse()
                .with_context(|| format!("AXION_DELAY_SCALE is not a number: {}", scale))?;
        }
        Ok(())
    }

    pub fn apply_args(&mut self, args: &GlobalArgs) {
        if let Some(route) = &args.route {
            self.start_route = route.clone();
        }
        if let Some(theme) = args.theme {
            self.theme = theme;
        }
        if let Some(scale) = args.delay_scale {
            self.delay_scale = scale;
        }
    }

    pub fn scaled_delays(&self) -> Delays {
        let scale = if self.delay_scale.is_finite() {
            self.delay_scale.max(0.0)
        } else {
            1.0
        };
        let ms = |value: u64| Duration::from_millis((value as f64 * scale).round() as u64);
        Delays {
            login: ms(self.delays.login_ms),
            chat: ms(self.delays.chat_ms),
            processing: ms(self.delays.processing_ms),
            regenerate: ms(self.delays.regenerate_ms),
            insights: ms(self.delays.insights_ms),
        }
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(10))
    }

    pub fn notification_ttl(&self) -> Duration {
        Duration::from_millis(self.notification_ttl_ms)
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("axion.log"))
    }

    /// Same settings with every simulated delay removed.
    #[cfg(test)]
    pub fn instant() -> Self {
        Self {
            delay_scale: 0.0,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.theme, ThemePreference::System);
        assert_eq!(config.start_route, "/");
        let delays = config.scaled_delays();
        assert_eq!(delays.chat, Duration::from_millis(1500));
        assert_eq!(delays.processing, Duration::from_millis(2000));
    }

    #[test]
    fn test_partial_file_keeps_defaults() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("axion.json");
        std::fs::write(&path, r#"{ "theme": "dark", "delays": { "chat_ms": 10 } }"#)?;

        let config = Config::from_file(&path)?;
        assert_eq!(config.theme, ThemePreference::Dark);
        assert_eq!(config.delays.chat_ms, 10);
        assert_eq!(config.delays.login_ms, 1000);
        assert_eq!(config.tick_rate_ms, 100);
        Ok(())
    }

    #[test]
    fn test_bad_file_reports_path() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json")?;

        let err = Config::from_file(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("broken.json"));
        Ok(())
    }

    #[test]
    fn test_env_then_args_precedence() -> anyhow::Result<()> {
        let env: HashMap<&str, &str> = [
            ("AXION_THEME", "light"),
            ("AXION_START_ROUTE", "/settings"),
            ("AXION_DELAY_SCALE", "0.5"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_env(|key| env.get(key).map(|v| v.to_string()))?;
        assert_eq!(config.theme, ThemePreference::Light);
        assert_eq!(config.scaled_delays().chat, Duration::from_millis(750));

        config.apply_args(&GlobalArgs {
            route: Some("/ai-assistant".to_string()),
            theme: Some(ThemePreference::Dark),
            ..GlobalArgs::default()
        });
        assert_eq!(config.start_route, "/ai-assistant");
        assert_eq!(config.theme, ThemePreference::Dark);
        Ok(())
    }

    #[test]
    fn test_bad_env_value() {
        let mut config = Config::default();
        assert!(config
            .apply_env(|key| (key == "AXION_DELAY_SCALE").then(|| "fast".to_string()))
            .is_err());
    }

    #[test]
    fn test_instant_has_zero_delays() {
        let delays = Config::instant().scaled_delays();
        assert_eq!(delays.login, Duration::ZERO);
        assert_eq!(delays.regenerate, Duration::ZERO);
    }
}
