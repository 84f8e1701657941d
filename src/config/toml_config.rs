use crate::domain::ports::{ConfigProvider, LogFormat};
use crate::graphql::DEFAULT_DEPTH_LIMIT;
use crate::utils::error::{ApiError, Result};
use crate::utils::validation::{
    validate_one_of, validate_path, validate_range, validate_required_field,
    validate_socket_addr, Validate,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_listen")]
    pub listen: String,
    pub graphiql: Option<bool>,
    pub depth_limit: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            graphiql: None,
            depth_limit: None,
        }
    }
}

fn default_listen() -> String {
    "127.0.0.1:8000".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// "memory" 或 "file"
    #[serde(default = "default_backend")]
    pub backend: String,
    pub path: Option<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            path: None,
        }
    }
}

fn default_backend() -> String {
    "memory".to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    /// "compact" 或 "json"
    pub format: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ApiError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ApiError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATA_DIR})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| ApiError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validate_socket_addr("server.listen", &self.server.listen)?;

        if let Some(depth) = self.server.depth_limit {
            validate_range("server.depth_limit", depth, 1, 64)?;
        }

        validate_one_of("storage.backend", &self.storage.backend, &["memory", "file"])?;
        if self.storage.backend == "file" {
            let path = validate_required_field("storage.path", &self.storage.path)?;
            validate_path("storage.path", path)?;
        }

        if let Some(format) = &self.logging.format {
            validate_one_of("logging.format", format, &["compact", "json"])?;
        }

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn listen_addr(&self) -> Result<SocketAddr> {
        validate_socket_addr("server.listen", &self.server.listen)
    }

    fn data_file(&self) -> Option<&str> {
        match self.storage.backend.as_str() {
            "file" => self.storage.path.as_deref(),
            _ => None,
        }
    }

    fn graphiql(&self) -> bool {
        self.server.graphiql.unwrap_or(true)
    }

    fn depth_limit(&self) -> usize {
        self.server.depth_limit.unwrap_or(DEFAULT_DEPTH_LIMIT)
    }

    fn verbose(&self) -> bool {
        self.logging.verbose.unwrap_or(false)
    }

    fn log_format(&self) -> LogFormat {
        self.logging
            .format
            .as_deref()
            .and_then(LogFormat::parse)
            .unwrap_or_default()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
