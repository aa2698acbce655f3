pub mod connection;
pub mod messages;
pub mod result_model;
pub mod services;
pub mod value;
