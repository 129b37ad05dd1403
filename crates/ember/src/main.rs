use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use color_eyre::eyre::WrapErr;
use directories::ProjectDirs;
use ember_core::EnhancementConfig;

mod app;
mod surface;

use app::App;

/// Preview the ember particle field in the terminal.
#[derive(Debug, Parser)]
#[command(name = "ember", version, about)]
struct Args {
    /// Config file (TOML). Defaults to the platform config directory.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the particle count.
    #[arg(long)]
    count: Option<usize>,

    /// Seed for a reproducible field.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let mut config = load_config(args.config.as_deref())?;
    if let Some(count) = args.count {
        config.particles.count = count;
        config.validate()?;
    }

    let terminal = ratatui::init();
    let result = App::new(config, args.seed).run(terminal);
    ratatui::restore();
    result
}

/// Load the config at `path`, or the default location if it exists.
fn load_config(path: Option<&Path>) -> color_eyre::Result<EnhancementConfig> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            _ => return Ok(EnhancementConfig::default()),
        },
    };
    let text = fs::read_to_string(&path)
        .wrap_err_with(|| format!("reading {}", path.display()))?;
    let config = EnhancementConfig::from_toml(&text)
        .wrap_err_with(|| format!("parsing {}", path.display()))?;
    log::info!("loaded config from {}", path.display());
    Ok(config)
}

fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "ember").map(|dirs| dirs.config_dir().join("config.toml"))
}
