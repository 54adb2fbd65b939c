use anyhow::{Context, Result};
use derivative::Derivative;
use image_sharpen::SharpenOptions;
use log::debug;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Defaults read from a TOML file. Command-line flags win over these.
///
/// ```toml
/// intensity = "high"
/// output_format = "png"
/// quality = 0.85
/// output_dir = "out"
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Derivative)]
#[derivative(Default)]
pub struct Config {
    #[serde(flatten)]
    pub options: SharpenOptions,

    #[serde(default)]
    #[derivative(Default(value = "None"))]
    pub output_dir: Option<PathBuf>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read config file {} failed", path.display()))?;
        let config = Self::from_toml(&text)
            .with_context(|| format!("parse config file {} failed", path.display()))?;

        debug!("{:?}", config);
        Ok(config)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str::<Config>(text)?)
    }
}
