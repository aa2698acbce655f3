//! # sqlnb-core
//!
//! Result-set materialization and interactive view rendering for SQL
//! notebooks.
//!
//! A statement batch comes back from the database client as loosely shaped
//! result sets, server messages and affected-row counts. This crate
//! normalizes that response into strict [`core::result_model::ResultSet`]s
//! and renders each one as a self-contained view fragment: a sticky-header
//! grid with clipped-cell tooltips, a collapsible JSON tree of the same rows,
//! and a messages panel, plus plain-text and structured fallbacks.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sqlnb_core::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> sqlnb_core::Result<()> {
//!     let config = Config::load(None)?;
//!     let connection = ActiveConnection::resolve(&config, None, None)?;
//!
//!     let executor = RecordedExecutor::from_file("batch.json".as_ref())?;
//!     let service = ExecutionService::new(executor, RenderOptions::from(&config.render));
//!
//!     let outcome = service.execute_cell("SELECT 1", connection.as_ref()).await;
//!     for output in &outcome.outputs {
//!         println!("{:?}", output.items);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │           API Layer                 │  Database client seam, raw batch models
//! ├─────────────────────────────────────┤
//! │          Core Layer                 │  Result model, messages, execution service
//! ├─────────────────────────────────────┤
//! │         Display Layer               │  Markup, renderers, view composer, outputs
//! ├─────────────────────────────────────┤
//! │        Storage Layer                │  Configuration
//! ├─────────────────────────────────────┤
//! │         Utils Layer                 │  Text helpers
//! └─────────────────────────────────────┘
//! ```

pub use error::AppError;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use sqlnb_core::prelude::*;
/// ```
pub mod prelude {
    // Error handling
    pub use crate::Result;
    pub use crate::error::AppError;

    // Collaborator seam
    pub use crate::api::client::{RecordedExecutor, StatementExecutor};
    pub use crate::api::models::RawBatch;

    // Domain
    pub use crate::core::connection::ActiveConnection;
    pub use crate::core::messages::{Message, Severity};
    pub use crate::core::result_model::ResultSet;
    pub use crate::core::services::{CellOutcome, ExecutionService};

    // Storage
    pub use crate::storage::config::Config;

    // Display
    pub use crate::display::{CellOutput, OutputItem, RenderOptions, ViewComposer};
}

/// Database client seam and the raw shapes it returns.
pub mod api;

/// Domain layer - result model, message aggregation, execution service.
///
/// - [`core::result_model`]: re-keyed, column-aligned result sets
/// - [`core::messages`]: server and affected-row messages
/// - [`core::services::execution_service`]: one notebook cell end to end
pub mod core;

/// Rendering of result sets into view fragments and output items.
pub mod display;

/// Configuration persistence.
pub mod storage;

pub mod utils;

/// Error handling - hierarchical error system.
///
/// - Domain-specific error variants (execution, config, storage, ...)
/// - Severity levels (Critical, High, Medium, Low)
/// - Troubleshooting hints for common issues
pub mod error;

/// Convenient Result type alias using [`AppError`].
pub type Result<T> = std::result::Result<T, AppError>;
