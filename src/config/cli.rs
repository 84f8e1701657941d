use crate::domain::ports::{ConfigProvider, LogFormat};
use crate::graphql::DEFAULT_DEPTH_LIMIT;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_one_of, validate_path, validate_range, validate_socket_addr, Validate,
};
use clap::Parser;
use std::net::SocketAddr;

#[derive(Debug, Clone, Parser)]
#[command(name = "staffql")]
#[command(about = "GraphQL API for departments, roles and employees")]
pub struct CliConfig {
    /// Path to TOML configuration file (takes precedence over the flags below)
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long, default_value = "127.0.0.1:8000")]
    pub listen: String,

    /// Persist documents to this JSON file instead of keeping them in memory
    #[arg(long)]
    pub data_file: Option<String>,

    #[arg(long, help = "Disable the GraphiQL page on GET /graphql")]
    pub no_graphiql: bool,

    #[arg(long, default_value_t = DEFAULT_DEPTH_LIMIT)]
    pub depth_limit: usize,

    #[arg(long, default_value = "compact", value_parser = ["compact", "json"])]
    pub log_format: String,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            config: None,
            listen: "127.0.0.1:8000".to_string(),
            data_file: None,
            no_graphiql: false,
            depth_limit: DEFAULT_DEPTH_LIMIT,
            log_format: "compact".to_string(),
            verbose: false,
        }
    }
}

impl ConfigProvider for CliConfig {
    fn listen_addr(&self) -> Result<SocketAddr> {
        validate_socket_addr("--listen", &self.listen)
    }

    fn data_file(&self) -> Option<&str> {
        self.data_file.as_deref()
    }

    fn graphiql(&self) -> bool {
        !self.no_graphiql
    }

    fn depth_limit(&self) -> usize {
        self.depth_limit
    }

    fn verbose(&self) -> bool {
        self.verbose
    }

    fn log_format(&self) -> LogFormat {
        LogFormat::parse(&self.log_format).unwrap_or_default()
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        self.listen_addr()?;
        if let Some(path) = &self.data_file {
            validate_path("--data-file", path)?;
        }
        validate_range("--depth-limit", self.depth_limit, 1, 64)?;
        validate_one_of("--log-format", &self.log_format, &["compact", "json"])?;
        Ok(())
    }
}
