use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use derivative::Derivative;
use overlay_texture::{
    ColorEntry, ColorTable, OverlayKind, Rgb, vignette_overlay::VignetteConfig,
};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(Parser, Debug, Default)]
#[command(version, about = "Generate tintable radiation overlay textures")]
pub struct Cli {
    /// TOML settings file, overridden by the flags below
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub width: Option<u32>,

    #[arg(long)]
    pub height: Option<u32>,

    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    #[arg(short, long, value_enum)]
    pub mode: Option<Mode>,

    /// Edge opacity of vignette overlays, in [0, 1]
    #[arg(long)]
    pub max_opacity: Option<f64>,

    /// Render textures on a thread pool
    #[arg(long)]
    pub parallel: bool,

    /// `name=r,g,b` or `name=#rrggbb`, repeatable. Replaces the color table
    #[arg(long = "color", value_name = "NAME=COLOR")]
    pub colors: Vec<String>,

    /// Print the resolved settings as TOML and exit
    #[arg(long)]
    pub dump_config: bool,
}

#[derive(Serialize, Deserialize, ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Solid,
    Vignette,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ColorSetting {
    pub name: String,
    pub color: String,
}

impl From<&ColorEntry> for ColorSetting {
    fn from(entry: &ColorEntry) -> Self {
        Self {
            name: entry.name.clone(),
            color: entry.color.to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Derivative)]
#[derivative(Default)]
#[serde(default)]
pub struct Config {
    #[derivative(Default(value = "1920"))]
    pub width: u32,

    #[derivative(Default(value = "1080"))]
    pub height: u32,

    #[derivative(Default(value = "PathBuf::from(\".\")"))]
    pub output_dir: PathBuf,

    pub mode: Mode,

    #[derivative(Default(value = "0.8"))]
    pub max_opacity: f64,

    pub parallel: bool,

    #[derivative(Default(value = "default_colors()"))]
    pub colors: Vec<ColorSetting>,
}

fn default_colors() -> Vec<ColorSetting> {
    ColorTable::default().iter().map(ColorSetting::from).collect()
}

impl Config {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("read config file {} failed", path.display()))?;

        toml::from_str(&text).with_context(|| format!("parse config file {} failed", path.display()))
    }

    /// Defaults, then the config file, then command line flags
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::from_path(path)?,
            None => Self::default(),
        };

        if let Some(width) = cli.width {
            config.width = width;
        }

        if let Some(height) = cli.height {
            config.height = height;
        }

        if let Some(output_dir) = &cli.output_dir {
            config.output_dir = output_dir.clone();
        }

        if let Some(mode) = cli.mode {
            config.mode = mode;
        }

        if let Some(max_opacity) = cli.max_opacity {
            config.max_opacity = max_opacity;
        }

        config.parallel |= cli.parallel;

        if !cli.colors.is_empty() {
            config.colors = cli
                .colors
                .iter()
                .map(|item| {
                    item.parse::<ColorEntry>()
                        .map(|entry| ColorSetting::from(&entry))
                        .with_context(|| format!("invalid --color `{item}`"))
                })
                .collect::<Result<_>>()?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            bail!("image size must be positive, got {}x{}", self.width, self.height);
        }

        if !(0.0..=1.0).contains(&self.max_opacity) {
            bail!("max_opacity must be within [0, 1], got {}", self.max_opacity);
        }

        if self.color_table()?.is_empty() {
            bail!("color table is empty");
        }

        Ok(())
    }

    pub fn color_table(&self) -> Result<ColorTable> {
        let entries = self
            .colors
            .iter()
            .map(|setting| {
                setting
                    .color
                    .parse::<Rgb>()
                    .map(|color| ColorEntry::new(setting.name.as_str(), color))
                    .with_context(|| format!("invalid color for `{}`", setting.name))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(ColorTable::new(entries)?)
    }

    pub fn overlay(&self) -> OverlayKind {
        match self.mode {
            Mode::Solid => OverlayKind::Solid,
            Mode::Vignette => {
                OverlayKind::Vignette(VignetteConfig::new().with_max_opacity(self.max_opacity))
            }
        }
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
