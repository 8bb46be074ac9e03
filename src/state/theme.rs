use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemePreference {
    pub const ALL: [ThemePreference; 3] = [
        ThemePreference::Light,
        ThemePreference::Dark,
        ThemePreference::System,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ThemePreference::Light => "Light",
            ThemePreference::Dark => "Dark",
            ThemePreference::System => "System",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ThemePreference::Light => "A clean, bright interface",
            ThemePreference::Dark => "Easy on the eyes at night",
            ThemePreference::System => "Follow your device settings",
        }
    }

    pub fn resolve(&self, system: Appearance) -> Appearance {
        match self {
            ThemePreference::Light => Appearance::Light,
            ThemePreference::Dark => Appearance::Dark,
            ThemePreference::System => system,
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
            ThemePreference::System => "system",
        })
    }
}

impl FromStr for ThemePreference {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(ThemePreference::Light),
            "dark" => Ok(ThemePreference::Dark),
            "system" => Ok(ThemePreference::System),
            other => Err(anyhow::anyhow!("unknown theme '{}'", other)),
        }
    }
}

/// Concrete palette choice after `System` is resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Appearance {
    Light,
    Dark,
}

/// Guess the terminal background from `COLORFGBG` ("fg;bg"). Light
/// backgrounds use colour 7 or 15; anything else, or no hint, is dark.
pub fn appearance_from_colorfgbg(value: Option<&str>) -> Appearance {
    match value.and_then(|v| v.rsplit(';').next()) {
        Some("7") | Some("15") => Appearance::Light,
        _ => Appearance::Dark,
    }
}

pub fn system_appearance() -> Appearance {
    appearance_from_colorfgbg(std::env::var("COLORFGBG").ok().as_deref())
}

/// The only write path for the theme. Not `Clone`: whoever owns it is the
/// single writer.
#[derive(Debug)]
pub struct ThemeHandle {
    tx: watch::Sender<ThemePreference>,
}

impl ThemeHandle {
    pub fn new(initial: ThemePreference) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Store a new preference. Returns whether it changed.
    pub fn set(&self, preference: ThemePreference) -> bool {
        let changed = self.tx.send_if_modified(|current| {
            if *current == preference {
                false
            } else {
                *current = preference;
                true
            }
        });
        if changed {
            tracing::info!(theme = %preference, "theme changed");
        }
        changed
    }

    pub fn current(&self) -> ThemePreference {
        *self.tx.borrow()
    }

    pub fn reader(&self) -> ThemeReader {
        ThemeReader {
            rx: self.tx.subscribe(),
        }
    }
}

/// Read-only view of the theme, cheap to clone into any renderer
#[derive(Debug, Clone)]
pub struct ThemeReader {
    rx: watch::Receiver<ThemePreference>,
}

impl ThemeReader {
    pub fn current(&self) -> ThemePreference {
        *self.rx.borrow()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_system() {
        assert_eq!(ThemePreference::default(), ThemePreference::System);
        let handle = ThemeHandle::new(ThemePreference::default());
        assert_eq!(handle.reader().current(), ThemePreference::System);
    }

    #[test]
    fn test_writes_reach_every_reader() {
        let handle = ThemeHandle::new(ThemePreference::System);
        let first = handle.reader();
        let second = first.clone();

        assert!(handle.set(ThemePreference::Dark));
        assert_eq!(first.current(), ThemePreference::Dark);
        assert_eq!(second.current(), ThemePreference::Dark);

        assert!(!handle.set(ThemePreference::Dark));
        assert!(handle.set(ThemePreference::Light));
        assert_eq!(handle.reader().current(), ThemePreference::Light);
    }

    #[test]
    fn test_resolve_system() {
        assert_eq!(ThemePreference::System.resolve(Appearance::Light), Appearance::Light);
        assert_eq!(ThemePreference::Dark.resolve(Appearance::Light), Appearance::Dark);
    }

    #[test]
    fn test_colorfgbg_detection() {
        assert_eq!(appearance_from_colorfgbg(Some("0;15")), Appearance::Light);
        assert_eq!(appearance_from_colorfgbg(Some("15;0")), Appearance::Dark);
        assert_eq!(appearance_from_colorfgbg(None), Appearance::Dark);
    }

    #[test]
    fn test_parse_preference() -> anyhow::Result<()> {
        assert_eq!("Dark".parse::<ThemePreference>()?, ThemePreference::Dark);
        assert!("sepia".parse::<ThemePreference>().is_err());
        Ok(())
    }
}
