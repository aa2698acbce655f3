//! Configuration management
//!
//! Connection display metadata and render settings stored in a TOML file.
//! Priority for the active connection: explicit argument > config.toml >
//! SQLNB_CONNECTION environment variable.

use super::Result;
use crate::display::display_options::{DisplayMode, TooltipTrigger};
use crate::error::{ConfigError, StorageError};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

pub const CONNECTION_ENV: &str = "SQLNB_CONNECTION";

/// Display metadata of a connection. Credentials live elsewhere.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ConnectionProfile {
    pub name: String,
    pub server: String,
    pub port: Option<u16>,
    #[serde(default)]
    pub database: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RenderSettings {
    pub max_table_height_px: u32,
    pub max_cell_width_px: u32,
    /// Rows per table page; 0 disables paging.
    pub page_size: usize,
    pub tooltip_trigger: TooltipTrigger,
    pub default_mode: DisplayMode,
    /// Cell width limit of the plain-text fallback, in terminal columns.
    pub text_max_cell_width: usize,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            max_table_height_px: 400,
            max_cell_width_px: 320,
            page_size: 100,
            tooltip_trigger: TooltipTrigger::Hover,
            default_mode: DisplayMode::Table,
            text_max_cell_width: 40,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub active_connection: Option<String>,
    pub active_database: Option<String>,
    pub connections: IndexMap<String, ConnectionProfile>,
    pub render: RenderSettings,
}

fn parse_field<T: FromStr>(field: &str, value: &str, reason: &str) -> Result<T> {
    value.trim().parse::<T>().map_err(|_| {
        ConfigError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
        .into()
    })
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

impl Config {
    /// Load configuration from file; a missing file yields defaults.
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p,
            None => Self::config_file_path()?,
        };

        if !config_path.exists() {
            log::debug!("no config at {}, using defaults", config_path.display());
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|source| StorageError::FileIo {
            path: config_path.to_string_lossy().to_string(),
            source,
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|e| StorageError::ConfigParseError {
                message: format!("Failed to parse config file: {}", e),
            })?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: Option<PathBuf>) -> Result<()> {
        let config_path = match path {
            Some(p) => p,
            None => Self::config_file_path()?,
        };

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|source| StorageError::FileIo {
                path: parent.to_string_lossy().to_string(),
                source,
            })?;
        }

        let toml_content = toml::to_string(self).map_err(|e| StorageError::ConfigSaveFailed {
            message: format!("Failed to serialize config: {}", e),
        })?;

        fs::write(&config_path, toml_content).map_err(|source| StorageError::FileIo {
            path: config_path.to_string_lossy().to_string(),
            source,
        })?;

        Ok(())
    }

    pub fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or(StorageError::ConfigDirNotFound)?;
        Ok(config_dir.join("sqlnb").join("config.toml"))
    }

    /// Active connection id with fallback to the environment variable
    pub fn get_active_connection(&self) -> Option<String> {
        self.active_connection
            .clone()
            .or_else(|| std::env::var(CONNECTION_ENV).ok().filter(|s| !s.is_empty()))
    }

    pub fn get_connection(&self, id: &str) -> Option<&ConnectionProfile> {
        self.connections.get(id)
    }

    pub fn set_connection(&mut self, id: String, profile: ConnectionProfile) {
        self.connections.insert(id, profile);
    }

    /// Apply a `key = value` edit. An empty value clears optional settings.
    ///
    /// Keys: `active_connection`, `active_database`,
    /// `connections.<id>.<name|server|port|database>` and `render.<setting>`.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "active_connection" => self.active_connection = optional(value),
            "active_database" => self.active_database = optional(value),
            _ => {
                if let Some(setting) = key.strip_prefix("render.") {
                    return self.set_render_value(key, setting, value);
                }
                if let Some(rest) = key.strip_prefix("connections.") {
                    if let Some((id, field)) = rest.rsplit_once('.') {
                        return self.set_connection_value(key, id, field, value);
                    }
                }
                return Err(ConfigError::UnknownKey {
                    key: key.to_string(),
                }
                .into());
            }
        }
        Ok(())
    }

    fn set_render_value(&mut self, key: &str, setting: &str, value: &str) -> Result<()> {
        let render = &mut self.render;
        match setting {
            "max_table_height_px" => {
                render.max_table_height_px = parse_field(key, value, "expected pixels")?
            }
            "max_cell_width_px" => {
                render.max_cell_width_px = parse_field(key, value, "expected pixels")?
            }
            "page_size" => {
                render.page_size = parse_field(key, value, "expected a non-negative integer")?
            }
            "tooltip_trigger" => {
                render.tooltip_trigger = parse_field(key, value, "expected 'hover' or 'click'")?
            }
            "default_mode" => {
                render.default_mode = parse_field(key, value, "expected 'table' or 'json'")?
            }
            "text_max_cell_width" => {
                render.text_max_cell_width =
                    parse_field(key, value, "expected a non-negative integer")?
            }
            _ => {
                return Err(ConfigError::UnknownKey {
                    key: key.to_string(),
                }
                .into());
            }
        }
        Ok(())
    }

    fn set_connection_value(&mut self, key: &str, id: &str, field: &str, value: &str) -> Result<()> {
        if id.is_empty() {
            return Err(ConfigError::UnknownKey {
                key: key.to_string(),
            }
            .into());
        }

        let port = match field {
            "port" if value.trim().is_empty() => Some(None),
            "port" => Some(Some(parse_field::<u16>(key, value, "expected a TCP port")?)),
            "name" | "server" | "database" => None,
            _ => {
                return Err(ConfigError::UnknownKey {
                    key: key.to_string(),
                }
                .into());
            }
        };

        let profile = self
            .connections
            .entry(id.to_string())
            .or_insert_with(|| ConnectionProfile {
                name: id.to_string(),
                server: String::new(),
                port: None,
                database: String::new(),
            });

        match (field, port) {
            (_, Some(port)) => profile.port = port,
            ("name", _) => profile.name = value.trim().to_string(),
            ("server", _) => profile.server = value.trim().to_string(),
            _ => profile.database = value.trim().to_string(),
        }
        Ok(())
    }
}
