use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use ringtarget::{Precision, Shot, ShotRecord, Target, TargetConfig, TargetKind};

#[derive(Parser, Debug)]
#[command(name = "ringtarget", version, about = "Draw a scored shooting target")]
struct Cli {
    /// JSON render configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON array of shots, `{ "x", "y" }` or `{ "x", "y", "teiler", "value" }`
    #[arg(long)]
    shots: Option<PathBuf>,

    /// Output file, defaults to target.<ext> in the pictures directory
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Score in tenths instead of whole rings
    #[arg(long)]
    tenth: bool,

    /// Mark the mean point of impact
    #[arg(long)]
    center: bool,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,

    /// Target kind: default, green or red
    #[arg(long)]
    kind: Option<TargetKind>,

    #[arg(long)]
    headline: Option<String>,
}

impl Cli {
    fn apply(&self, config: &mut TargetConfig) {
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(kind) = self.kind {
            config.kind = kind;
        }
        if let Some(headline) = &self.headline {
            config.headline = Some(headline.clone());
        }
    }
}

/// Config picked up without `--config`
fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("ringtarget").join("config.json"))
}

fn load_config(path: Option<&Path>) -> Result<TargetConfig> {
    if let Some(path) = path {
        return TargetConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()));
    }
    Ok(default_config_path()
        .filter(|path| path.exists())
        .map(|path| TargetConfig::load_or_default(&path))
        .unwrap_or_default())
}

fn load_shots(path: &Path) -> Result<Vec<Shot>> {
    let data =
        std::fs::read(path).with_context(|| format!("Failed to read shots {}", path.display()))?;
    let records: Vec<ShotRecord> = serde_json::from_slice(&data)
        .with_context(|| format!("Failed to parse shots {}", path.display()))?;
    Ok(records.into_iter().map(Shot::from).collect())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    cli.apply(&mut config);

    let shots = match &cli.shots {
        Some(path) => load_shots(path)?,
        None => Vec::new(),
    };
    if config.expected_shots == 0 {
        config.expected_shots = shots.len();
    }

    let mut target = Target::new(&config).context("Failed to set up target")?;
    for shot in shots {
        target.draw_shot(shot);
    }
    let precision = if cli.tenth {
        Precision::Tenth
    } else {
        Precision::Whole
    };
    target.draw_table(precision);
    if cli.center {
        target.draw_center();
    }

    let bytes = target.finish(config.format).context("Failed to encode target")?;
    let output = cli.output.unwrap_or_else(|| {
        dirs::picture_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(format!("target.{}", config.format.extension()))
    });
    std::fs::write(&output, bytes)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    log::info!("Wrote {}", output.display());
    Ok(())
}
