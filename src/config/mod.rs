//! Configuration loading for the working-time engine.
//!
//! Reads the legal-holiday policy and the statutory limits from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use worktime_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Week starts on {}", config.policy().week_start_day);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::EngineConfig;
