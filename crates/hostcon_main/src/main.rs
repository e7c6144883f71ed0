use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use hostcon_config::ConfigLoader;
use hostcon_main::{Cli, logging, run};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.file(path.clone());
    }
    let config = loader.load().context("Failed to load configuration")?;

    let _guard = logging::init(&config.log)?;

    run(&cli, &config, io::stdin().lock())
}
