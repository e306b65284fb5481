pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::adapters::storage::LocalStorage;
#[cfg(feature = "cli")]
pub use crate::config::cli::CliArgs;
pub use crate::config::{toml_config::TomlConfig, AmalgamateConfig};

pub use crate::core::{engine::AmalgamationEngine, pipeline::SingleHeaderPipeline};
pub use crate::domain::model::{
    ModuleOutcome, ModuleStatus, RunMode, RunSummary, SelfIncludePolicy,
};
pub use crate::utils::error::{AmalgamateError, Result};
