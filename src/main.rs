use std::path::PathBuf;

use anyhow::Context;
use blogify::config::Config;
use blogify::logging::init_tracing;
use blogify::ui::runtime::run as run_dashboard;
use clap::Parser;

/// Terminal dashboard for browsing blog posts and their comments.
#[derive(Debug, Parser)]
#[command(name = "blogify", version, about)]
struct Cli {
    /// Config file path (default: <config dir>/blogify/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Override the API base URL
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Override the number of posts per page
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u16).range(1..=100))]
    page_size: Option<u16>,

    /// Do not keep comments locally when the server rejects them
    #[arg(long)]
    no_local_fallback: bool,
}

impl Cli {
    fn apply(&self, config: &mut Config) {
        if let Some(url) = &self.base_url {
            config.api.base_url = url.clone();
        }
        if let Some(size) = self.page_size {
            config.view.page_size = usize::from(size);
        }
        if self.no_local_fallback {
            config.comments.fallback_to_local = false;
        }
    }
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    cli.apply(&mut config);
    config.validate()?;

    let log_file = init_tracing(&config.logging);
    tracing::info!(log_file = ?log_file, page_size = config.view.page_size, "Configuration loaded");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    let result = run_dashboard(&config, runtime.handle().clone());
    runtime.shutdown_background();
    result
}
