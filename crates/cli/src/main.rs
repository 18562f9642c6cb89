use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use ibex_image::identify;
use tracing::debug;

/// Identify Apple iBoot-family firmware images
#[derive(Parser)]
#[command(
    name = "ibex",
    about = "Identify Apple bootloader images (SecureROM, LLB, iBoot, ...)",
    version
)]
struct Cli {
    /// Image files to inspect
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Emit one JSON object per recognized image instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    let cli = Cli::parse();

    let mut failed = false;
    for path in &cli.paths {
        if let Err(error) = inspect(path, cli.json) {
            eprintln!("{}: {:#}", path.display(), error);
            failed = true;
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn inspect(path: &Path, json: bool) -> Result<()> {
    let data = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    debug!("inspecting {} ({} bytes)", path.display(), data.len());

    match identify(data.as_slice())? {
        Some(identity) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&identity)?);
            } else {
                println!("{}", path.display());
                println!("  {:<14} {}", "Stage", identity.stage);
                println!("  {:<14} {}", "Device", identity.device);
                println!("  {:<14} {}", "Architecture", identity.architecture);
                println!("  {:<14} {}", "Version", identity.version);
                println!("  {:<14} {}", "Edition", identity.edition);
                println!("  {:<14} {}", "Base address", identity.base_address);
            }
        }
        None => println!("{}: not an iBoot image", path.display()),
    }

    Ok(())
}
