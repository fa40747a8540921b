use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use cellsweep_core::{BoardConfig, CellCount, Coord, DEFAULT_CELL_SIZE};
use serde::Deserialize;

/// Board options, applied in order: preset, config file, then individual flags.
#[derive(clap::Args, Debug, Default)]
pub(crate) struct BoardArgs {
    /// Start from a named preset: beginner, intermediate or expert
    #[arg(short, long)]
    preset: Option<String>,

    /// TOML file with any of `width`, `height`, `mines` and `seed`
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of columns
    #[arg(long)]
    width: Option<Coord>,

    /// Number of rows
    #[arg(long)]
    height: Option<Coord>,

    /// Number of mines
    #[arg(short, long)]
    mines: Option<CellCount>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Pixel size of a cell, used to map `click` coordinates
    #[arg(long)]
    cell_size: Option<u32>,
}

/// Partial board description as read from a config file.
#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    width: Option<Coord>,
    height: Option<Coord>,
    mines: Option<CellCount>,
    seed: Option<u64>,
}

impl FileConfig {
    fn apply(&self, config: &mut BoardConfig) {
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(mines) = self.mines {
            config.mines = mines;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
    }
}

impl BoardArgs {
    pub(crate) fn resolve(&self) -> Result<BoardConfig> {
        let mut config = match &self.preset {
            Some(name) => BoardConfig::preset(name)
                .with_context(|| format!("Unknown preset {:?}", name))?,
            None => BoardConfig::default(),
        };

        if let Some(path) = &self.config {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Could not read config file {}", path.display()))?;
            parse_file_config(&text)
                .with_context(|| format!("Invalid config file {}", path.display()))?
                .apply(&mut config);
        }

        FileConfig {
            width: self.width,
            height: self.height,
            mines: self.mines,
            seed: self.seed,
        }
        .apply(&mut config);

        config.validate()?;
        Ok(config)
    }

    pub(crate) fn cell_size(&self) -> u32 {
        self.cell_size.unwrap_or(DEFAULT_CELL_SIZE)
    }
}

fn parse_file_config(text: &str) -> Result<FileConfig> {
    Ok(toml::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_twenty_square() {
        let config = BoardArgs::default().resolve().unwrap();
        assert_eq!(config, BoardConfig::default());
    }

    #[test]
    fn flags_override_preset() {
        let args = BoardArgs {
            preset: Some("beginner".into()),
            mines: Some(5),
            seed: Some(8),
            ..Default::default()
        };
        let config = args.resolve().unwrap();
        assert_eq!(config, BoardConfig::new(9, 9, 5).with_seed(8));
    }

    #[test]
    fn unknown_preset_is_an_error() {
        let args = BoardArgs {
            preset: Some("nightmare".into()),
            ..Default::default()
        };
        assert!(args.resolve().is_err());
    }

    #[test]
    fn invalid_board_is_rejected_up_front() {
        let args = BoardArgs {
            width: Some(2),
            height: Some(2),
            mines: Some(5),
            ..Default::default()
        };
        let err = args.resolve().unwrap_err();
        assert!(err.to_string().contains("Too many mines"));
    }

    #[test]
    fn file_config_is_partial() {
        let file = parse_file_config("width = 12\nseed = 3\n").unwrap();
        assert_eq!(
            file,
            FileConfig {
                width: Some(12),
                seed: Some(3),
                ..Default::default()
            }
        );

        let mut config = BoardConfig::default();
        file.apply(&mut config);
        assert_eq!(config, BoardConfig::new(12, 20, 50).with_seed(3));
    }

    #[test]
    fn file_config_rejects_unknown_keys() {
        assert!(parse_file_config("colour = \"blue\"\n").is_err());
    }

    #[test]
    fn cell_size_falls_back_to_default() {
        assert_eq!(BoardArgs::default().cell_size(), DEFAULT_CELL_SIZE);
    }
}
