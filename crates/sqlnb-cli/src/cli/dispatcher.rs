use crate::cli::command_handlers::{ConfigHandler, RenderHandler};
use crate::cli::main_types::Commands;
use sqlnb_core::error::AppError;
use sqlnb_core::storage::config::Config;
use std::path::PathBuf;

pub struct Dispatcher {
    config: Config,
    config_path: Option<PathBuf>,
}

impl Dispatcher {
    pub fn new(config: Config, config_path: Option<PathBuf>) -> Self {
        Self {
            config,
            config_path,
        }
    }

    pub async fn dispatch(&self, command: Commands) -> Result<(), AppError> {
        match command {
            Commands::Render(args) => RenderHandler::new().handle(args, &self.config).await,
            Commands::Config { command } => {
                ConfigHandler::new().handle(command, self.config.clone(), self.config_path.clone())
            }
        }
    }
}
