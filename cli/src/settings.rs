use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use sapper_core::{CellCount, Coord, GameConfig};
use serde::Deserialize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum Preset {
    Beginner,
    Intermediate,
    Expert,
}

impl Preset {
    pub(crate) const fn config(self) -> GameConfig {
        match self {
            Self::Beginner => GameConfig::beginner(),
            Self::Intermediate => GameConfig::intermediate(),
            Self::Expert => GameConfig::expert(),
        }
    }
}

/// Values that may come from the settings file or the command line, unset
/// fields fall through to the next layer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Overrides {
    pub(crate) width: Option<Coord>,
    pub(crate) height: Option<Coord>,
    pub(crate) mines: Option<CellCount>,
    pub(crate) seed: Option<u64>,
}

impl Overrides {
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("could not read settings from {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid settings in {}", path.display()))
    }

    pub(crate) fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// `other` wins wherever it has a value.
    fn or(self, other: Self) -> Self {
        Self {
            width: other.width.or(self.width),
            height: other.height.or(self.height),
            mines: other.mines.or(self.mines),
            seed: other.seed.or(self.seed),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Settings {
    pub(crate) config: GameConfig,
    pub(crate) seed: Option<u64>,
}

impl Settings {
    /// Layers, lowest first: preset (or the default board), file, flags.
    pub(crate) fn resolve(
        preset: Option<Preset>,
        file: Option<Overrides>,
        flags: Overrides,
    ) -> Result<Self> {
        let base = preset.map(Preset::config).unwrap_or_default();
        let merged = file.unwrap_or_default().or(flags);

        let config = GameConfig::new(
            merged.width.unwrap_or(base.width),
            merged.height.unwrap_or(base.height),
            merged.mines.unwrap_or(base.mines),
        )
        .context("invalid board settings")?;

        Ok(Self {
            config,
            seed: merged.seed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_classic_board() {
        let settings = Settings::resolve(None, None, Overrides::default()).unwrap();

        assert_eq!(settings.config, GameConfig::default());
        assert_eq!(settings.seed, None);
    }

    #[test]
    fn file_overrides_preset_and_flags_override_file() {
        let file = Overrides::parse("width = 12\nmines = 20\nseed = 4\n").unwrap();
        let flags = Overrides {
            mines: Some(30),
            ..Default::default()
        };

        let settings = Settings::resolve(Some(Preset::Expert), Some(file), flags).unwrap();

        assert_eq!(settings.config, GameConfig::new(12, 16, 30).unwrap());
        assert_eq!(settings.seed, Some(4));
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(Overrides::parse("bombs = 3").is_err());
    }

    #[test]
    fn rejects_invalid_board() {
        let flags = Overrides {
            width: Some(2),
            height: Some(2),
            mines: Some(4),
            seed: None,
        };

        let err = Settings::resolve(None, None, flags).unwrap_err();
        assert_eq!(err.to_string(), "invalid board settings");
    }
}
