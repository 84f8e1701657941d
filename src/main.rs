use clap::Parser;
use staffql::domain::ports::{ConfigProvider, DocumentStore};
use staffql::utils::logger;
use staffql::utils::validation::Validate;
use staffql::{build_schema, server, CliConfig, JsonFileStore, MemoryStore, TomlConfig};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 載入配置：指定 --config 時以 TOML 檔為準
    let config: Box<dyn ConfigProvider> = match &cli.config {
        Some(path) => match TomlConfig::from_file(path) {
            Ok(mut toml_config) => {
                if cli.verbose {
                    toml_config.logging.verbose = Some(true);
                }
                Box::new(toml_config)
            }
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 {}", e.recovery_suggestion());
                std::process::exit(1);
            }
        },
        None => Box::new(cli.clone()),
    };

    // 初始化日誌
    logger::init_logger(config.log_format(), config.verbose());
    tracing::info!("Starting staffql");

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let store: Arc<dyn DocumentStore> = match config.data_file() {
        Some(path) => match JsonFileStore::open(path).await {
            Ok(store) => Arc::new(store),
            Err(e) => {
                tracing::error!("❌ Failed to open data file {}: {}", path, e);
                eprintln!("❌ {}", e.user_friendly_message());
                eprintln!("💡 建議: {}", e.recovery_suggestion());
                std::process::exit(1);
            }
        },
        None => {
            tracing::info!("Using in-memory storage; data is lost on exit");
            Arc::new(MemoryStore::new())
        }
    };

    let schema = build_schema(store, config.depth_limit());
    if config.graphiql() {
        tracing::info!("🔍 GraphiQL enabled on GET {}", server::GRAPHQL_PATH);
    }

    let addr = config.listen_addr()?;
    server::serve(addr, server::router(schema, config.graphiql())).await?;

    tracing::info!("✅ Server stopped");
    Ok(())
}
