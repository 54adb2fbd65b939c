//! Command-line front end for `image-sharpen`.
//!
//! Reads image files from disk, runs them through the sharpen batch and
//! writes each result as `<name>_sharpened.<ext>`. A file that fails is
//! logged and skipped; the others are still written.

pub mod config;

use anyhow::{Context, Result};
use clap::Parser;
use config::Config;
use image_sharpen::{BatchInput, Intensity, OutputFormat, Quality, SharpenOptions, batch};
use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

#[derive(Parser, Debug, Clone)]
#[command(name = "sharpen-helper", version, about = "Sharpen images with a 3x3 convolution kernel")]
pub struct Cli {
    /// Images to sharpen
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Sharpening strength: low, medium or high
    #[arg(short, long)]
    pub intensity: Option<Intensity>,

    /// Output container: jpeg, png or webp
    #[arg(short = 'f', long = "format")]
    pub output_format: Option<OutputFormat>,

    /// Encoder quality in (0.0, 1.0], used for JPEG
    #[arg(short, long)]
    pub quality: Option<Quality>,

    /// Directory for results, defaults to each input's own directory
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// TOML file with default options
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Flags override the config file, which overrides built-in defaults.
    pub fn resolve(&self, config: Config) -> (SharpenOptions, Option<PathBuf>) {
        let mut options = config.options;
        if let Some(intensity) = self.intensity {
            options = options.with_intensity(intensity);
        }
        if let Some(format) = self.output_format {
            options = options.with_output_format(format);
        }
        if let Some(quality) = self.quality {
            options = options.with_quality(quality);
        }

        let output_dir = self.output_dir.clone().or(config.output_dir);
        (options, output_dir)
    }
}

#[derive(Debug, Default)]
pub struct RunSummary {
    pub written: Vec<PathBuf>,
    pub failed: Vec<String>,
}

impl RunSummary {
    pub fn total(&self) -> usize {
        self.written.len() + self.failed.len()
    }
}

/// Initializes the logger.
///
/// Defaults to `info` unless `RUST_LOG` says otherwise. Each line carries a
/// local timestamp, the level, and the source file and line.
pub fn init_logger() {
    use std::io::Write;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let style = buf.default_level_style(record.level());
            let ts = chrono::Local::now().format("%H:%M:%S");

            writeln!(
                buf,
                "[{} {style}{}{style:#} {} {}] {}",
                ts,
                record.level(),
                record
                    .file()
                    .unwrap_or("None")
                    .split('/')
                    .next_back()
                    .unwrap_or("None"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .init();
}

pub fn run(cli: &Cli) -> Result<RunSummary> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let (options, output_dir) = cli.resolve(config);

    log::info!(
        "sharpening {} file(s): intensity={}, format={}, quality={}",
        cli.files.len(),
        options.intensity,
        options.output_format,
        options.quality.value()
    );

    if !options.output_format.is_lossy() && cli.quality.is_some() {
        log::warn!("quality is ignored for {} output", options.output_format);
    }

    if let Some(dir) = &output_dir {
        fs::create_dir_all(dir)
            .with_context(|| format!("create output directory {} failed", dir.display()))?;
    }

    let mut summary = RunSummary::default();
    let mut sources = Vec::with_capacity(cli.files.len());
    let mut inputs = Vec::with_capacity(cli.files.len());

    for path in &cli.files {
        match fs::read(path) {
            Ok(bytes) => {
                inputs.push(BatchInput::new(path.to_string_lossy(), bytes));
                sources.push(path);
            }
            Err(e) => {
                log::warn!("read {} failed: {e}", path.display());
                summary.failed.push(path.display().to_string());
            }
        }
    }

    let mut taken = HashSet::new();
    let outcomes = batch::sharpen_batch(inputs, &options);

    for (source, outcome) in sources.into_iter().zip(outcomes) {
        let image = match outcome.result {
            Ok(image) => image,
            Err(_) => {
                summary.failed.push(source.display().to_string());
                continue;
            }
        };

        let dir = match &output_dir {
            Some(dir) => dir.as_path(),
            None => source.parent().unwrap_or(Path::new("")),
        };
        let target = unique_target(dir, &image.file_name, &mut taken);

        match fs::write(&target, &image.data) {
            Ok(()) => {
                log::info!("wrote {}", target.display());
                summary.written.push(target);
            }
            Err(e) => {
                log::warn!("write {} failed: {e}", target.display());
                summary.failed.push(source.display().to_string());
            }
        }
    }

    Ok(summary)
}

/// Picks `dir/file_name`, or `dir/<stem>-N.<ext>` when an earlier input in
/// this run already claimed that path.
fn unique_target(dir: &Path, file_name: &str, taken: &mut HashSet<PathBuf>) -> PathBuf {
    let mut target = dir.join(file_name);
    if !taken.contains(&target) {
        taken.insert(target.clone());
        return target;
    }

    let name = Path::new(file_name);
    let stem = name
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = name.extension().map(|e| e.to_string_lossy().into_owned());

    for n in 1.. {
        let candidate = match &ext {
            Some(ext) => format!("{stem}-{n}.{ext}"),
            None => format!("{stem}-{n}"),
        };
        target = dir.join(candidate);
        if !taken.contains(&target) {
            break;
        }
    }

    log::warn!(
        "{file_name} clashes with an earlier output, writing {}",
        target.display()
    );
    taken.insert(target.clone());
    target
}
