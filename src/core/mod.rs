pub mod assembler;
pub mod discovery;
pub mod engine;
pub mod loader;
pub mod pipeline;

pub use crate::domain::model::{
    Amalgamation, Module, ModuleOutcome, ModuleSource, ModuleStatus, RunMode, RunSummary,
    SelfIncludePolicy,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
