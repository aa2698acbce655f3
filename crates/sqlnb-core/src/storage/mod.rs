pub mod config;

pub use config::{Config, ConnectionProfile, RenderSettings};

type Result<T> = crate::Result<T>;
