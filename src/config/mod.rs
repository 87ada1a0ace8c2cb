//! Configuration management for viewset projects
//!
//! - `types`: application entries as written in the config file
//! - `loader`: configuration file discovery, parsing and validation

pub mod loader;
pub mod types;


pub use loader::{Config, ConfigV1};
pub use types::AppConfig;
