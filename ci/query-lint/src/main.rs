use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{error, info, warn};

use crate::config::LintConfig;

mod config;
mod lint;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// YAML lint config. Falls back to the file named by the CONFIG
    /// environment variable.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Files holding a query message or a JSON array of them. `-`
    /// reads from stdin.
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = LintConfig::load(args.config.as_deref())?;

    let mut total = 0;
    let mut rejected = 0;
    for file in &args.files {
        let raw = read_input(file)?;
        for outcome in lint::lint_input(&file.display().to_string(), &raw, &config) {
            total += 1;
            match outcome.result {
                Ok(accepted) => {
                    info!("{}: ok ({})", outcome.source, accepted.tag);
                    for warning in accepted.warnings {
                        warn!("{}: {}", outcome.source, warning);
                    }
                }
                Err(err) => {
                    rejected += 1;
                    error!("{}: rejected: {}", outcome.source, err);
                }
            }
        }
    }

    if rejected > 0 {
        bail!("{rejected} of {total} query messages rejected");
    }
    info!("{total} query messages ok");
    Ok(())
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    if path == Path::new("-") {
        let mut raw = vec![];
        io::stdin()
            .read_to_end(&mut raw)
            .context("failed to read stdin")?;
        Ok(raw)
    } else {
        fs::read(path).with_context(|| format!("failed to read {}", path.display()))
    }
}
