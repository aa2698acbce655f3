use crate::storage::config::RenderSettings;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Which representation of a result set is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Table,
    Json,
}

impl DisplayMode {
    pub fn label(&self) -> &'static str {
        match self {
            DisplayMode::Table => "Table",
            DisplayMode::Json => "JSON",
        }
    }
}

impl FromStr for DisplayMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "table" => Ok(DisplayMode::Table),
            "json" => Ok(DisplayMode::Json),
            other => Err(format!("unknown display mode '{}'", other)),
        }
    }
}

/// Pointer activation that reveals a clipped cell's full value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TooltipTrigger {
    #[default]
    Hover,
    Click,
}

impl TooltipTrigger {
    pub fn as_str(&self) -> &'static str {
        match self {
            TooltipTrigger::Hover => "hover",
            TooltipTrigger::Click => "click",
        }
    }
}

impl FromStr for TooltipTrigger {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hover" => Ok(TooltipTrigger::Hover),
            "click" => Ok(TooltipTrigger::Click),
            other => Err(format!("unknown tooltip trigger '{}'", other)),
        }
    }
}

/// Struct to manage view rendering options
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Height of the scrolling table region
    pub max_table_height_px: u32,
    /// Width at which cell text is clipped
    pub max_cell_width_px: u32,
    /// Rows per page (0 shows every row on one page)
    pub page_size: usize,
    pub tooltip_trigger: TooltipTrigger,
    /// Mode visible when the view is first shown
    pub default_mode: DisplayMode,
    /// Cell width limit of the plain-text fallback
    pub text_max_cell_width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::from(&RenderSettings::default())
    }
}

impl From<&RenderSettings> for RenderOptions {
    fn from(settings: &RenderSettings) -> Self {
        Self {
            max_table_height_px: settings.max_table_height_px,
            max_cell_width_px: settings.max_cell_width_px,
            page_size: settings.page_size,
            tooltip_trigger: settings.tooltip_trigger,
            default_mode: settings.default_mode,
            text_max_cell_width: settings.text_max_cell_width,
        }
    }
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_tooltip_trigger(mut self, trigger: TooltipTrigger) -> Self {
        self.tooltip_trigger = trigger;
        self
    }

    pub fn with_default_mode(mut self, mode: DisplayMode) -> Self {
        self.default_mode = mode;
        self
    }

    pub fn with_max_table_height(mut self, px: u32) -> Self {
        self.max_table_height_px = px;
        self
    }

    pub fn with_max_cell_width(mut self, px: u32) -> Self {
        self.max_cell_width_px = px;
        self
    }

    /// Number of table pages needed for `rows` rows; never less than one.
    pub fn page_count(&self, rows: usize) -> usize {
        if self.page_size == 0 || rows == 0 {
            1
        } else {
            rows.div_ceil(self.page_size)
        }
    }
}
