use anyhow::Context;
use clap::Parser;

use roster::config::{Cli, Config};

fn main() -> anyhow::Result<()> {
    let config = Config::from(Cli::parse());
    roster::logging::init_tracing(&config.log_filter);

    roster::cli::run(&config)
        .with_context(|| format!("failed to open roster at {}", config.data_file.display()))
}
