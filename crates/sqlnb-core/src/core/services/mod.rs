pub mod execution_service;
pub mod types;

pub use execution_service::ExecutionService;
pub use types::CellOutcome;
