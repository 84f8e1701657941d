pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod graphql;
pub mod server;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::{JsonFileStore, MemoryStore};
pub use crate::core::{construct, MutationHandlers, QueryHandlers};
pub use graphql::{build_schema, AppSchema};
pub use utils::error::{ApiError, Result};
