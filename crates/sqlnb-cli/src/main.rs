use clap::Parser;
use sqlnb_core::storage::config::Config;
use std::path::PathBuf;

mod cli;
mod utils;

use cli::dispatcher::Dispatcher;
use cli::main_types::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    utils::logging::init(cli.verbose);

    // Load Config
    let config_path = cli
        .config_dir
        .as_ref()
        .map(|dir| PathBuf::from(dir).join("config.toml"));

    let config = match Config::load(config_path.clone()) {
        Ok(config) => config,
        Err(err) => {
            log::error!("loading config: {}", err.display_friendly());
            std::process::exit(1);
        }
    };

    if let Some(config_dir) = &cli.config_dir {
        log::debug!("using config directory: {}", config_dir);
    }

    let dispatcher = Dispatcher::new(config, config_path);

    if let Err(e) = dispatcher.dispatch(cli.command).await {
        log::error!("{} {}", e.severity().emoji(), e.display_friendly());
        if let Some(hint) = e.troubleshooting_hint() {
            log::info!("{}", hint);
        }
        std::process::exit(1);
    }
}
