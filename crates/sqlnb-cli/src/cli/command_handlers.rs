use crate::cli::main_types::{ConfigCommands, OutputFormat, RenderArgs};
use sqlnb_core::api::client::RecordedExecutor;
use sqlnb_core::core::connection::ActiveConnection;
use sqlnb_core::core::services::{CellOutcome, ExecutionService};
use sqlnb_core::display::csv::to_csv;
use sqlnb_core::display::display_options::RenderOptions;
use sqlnb_core::display::output::{MIME_HTML, MIME_TEXT};
use sqlnb_core::error::{AppError, DisplayError, ExecutionError, StorageError};
use sqlnb_core::storage::config::Config;
use std::fs;
use std::path::PathBuf;

fn to_pretty_json<T: serde::Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| DisplayError::Serialization(e.to_string()).into())
}

/// Items of one MIME type across all outputs, in output order.
fn items_of(outcome: &CellOutcome, mime: &str, separator: &str) -> String {
    outcome
        .outputs
        .iter()
        .filter_map(|output| output.item(mime))
        .map(|item| item.data.as_str())
        .collect::<Vec<_>>()
        .join(separator)
}

/// Render command handler
pub struct RenderHandler;

impl RenderHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn handle(&self, args: RenderArgs, config: &Config) -> Result<(), AppError> {
        let executor = RecordedExecutor::from_file(&args.input)?;
        let connection = ActiveConnection::resolve(
            config,
            args.connection.as_deref(),
            args.database.as_deref(),
        )?;
        match &connection {
            Some(connection) => log::debug!(
                "rendering against {} / {}",
                connection.connection_label(),
                connection.database_label()
            ),
            None => log::debug!("no active connection"),
        }

        let sql = args
            .sql
            .unwrap_or_else(|| format!("-- replay of {}", args.input.display()));

        let service = ExecutionService::new(executor, RenderOptions::from(&config.render));
        let outcome = service.execute_cell(&sql, connection.as_ref()).await;

        if !outcome.success {
            let message = outcome.error_message().unwrap_or_default();
            return Err(match connection {
                None => ExecutionError::NoActiveConnection,
                Some(_) => ExecutionError::BatchFailed { message },
            }
            .into());
        }

        let rendered = Self::format(&outcome, args.format)?;
        match args.output {
            Some(path) => {
                fs::write(&path, &rendered).map_err(|source| StorageError::FileIo {
                    path: path.to_string_lossy().to_string(),
                    source,
                })?;
                log::info!(
                    "Wrote {} output(s) to {}",
                    outcome.outputs.len(),
                    path.display()
                );
            }
            None => println!("{}", rendered),
        }
        Ok(())
    }

    fn format(outcome: &CellOutcome, format: OutputFormat) -> Result<String, AppError> {
        match format {
            OutputFormat::Html => Ok(items_of(outcome, MIME_HTML, "\n")),
            OutputFormat::Text => Ok(items_of(outcome, MIME_TEXT, "\n\n")),
            OutputFormat::Json => to_pretty_json(&outcome.result_sets),
            OutputFormat::Csv => Ok(outcome
                .result_sets
                .iter()
                .filter(|result| result.is_tabular())
                .map(to_csv)
                .collect::<Vec<_>>()
                .join("\n\n")),
            OutputFormat::All => to_pretty_json(&outcome.outputs),
        }
    }
}

/// Config command handler
pub struct ConfigHandler;

impl ConfigHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(
        &self,
        command: ConfigCommands,
        mut config: Config,
        config_path: Option<PathBuf>,
    ) -> Result<(), AppError> {
        match command {
            ConfigCommands::Show => {
                log::debug!("showing configuration");

                println!("Current Configuration:");
                println!("=====================");
                println!(
                    "Active Connection: {}",
                    config
                        .get_active_connection()
                        .unwrap_or_else(|| "(none)".to_string())
                );
                println!(
                    "Active Database: {}",
                    config.active_database.as_deref().unwrap_or("(profile default)")
                );

                println!("\nConnections:");
                if config.connections.is_empty() {
                    println!("  No connections configured");
                } else {
                    for (id, profile) in &config.connections {
                        println!("  [{}]", id);
                        println!("    Name: {}", profile.name);
                        match profile.port {
                            Some(port) => println!("    Server: {}:{}", profile.server, port),
                            None => println!("    Server: {}", profile.server),
                        }
                        if !profile.database.is_empty() {
                            println!("    Database: {}", profile.database);
                        }
                    }
                }

                let render = &config.render;
                println!("\nRender:");
                println!("  max_table_height_px: {}", render.max_table_height_px);
                println!("  max_cell_width_px: {}", render.max_cell_width_px);
                println!("  page_size: {}", render.page_size);
                println!("  tooltip_trigger: {}", render.tooltip_trigger.as_str());
                println!("  default_mode: {}", render.default_mode.label());
                println!("  text_max_cell_width: {}", render.text_max_cell_width);
                Ok(())
            }
            ConfigCommands::Path => {
                let path = match config_path {
                    Some(path) => path,
                    None => Config::config_file_path()?,
                };
                println!("{}", path.display());
                Ok(())
            }
            ConfigCommands::Set { key, value } => {
                config.set_value(&key, &value)?;
                config.save(config_path)?;
                log::info!("Set {} = '{}'", key, value);
                Ok(())
            }
        }
    }
}
