pub mod types;
pub mod store;
pub mod selection;
pub mod history;
pub mod engine;
pub mod config;
pub mod error;
pub mod stats;
