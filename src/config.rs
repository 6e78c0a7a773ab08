use serde::Deserialize;
use std::fmt;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// 指定配置文件路径的环境变量
pub const CONFIG_ENV: &str = "STOREFRONT_CONFIG";

/// 商店服务配置结构
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP 服务配置
    pub http: HttpConfig,
    /// 日志配置
    pub logging: LoggingConfig,
    /// 产品目录数据来源
    pub catalog: CatalogConfig,
}

/// HTTP 服务配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// 绑定地址
    pub bind_address: String,
    /// HTTP 服务端口
    pub port: u16,
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别 (trace, debug, info, warn, error)
    pub level: String,
}

/// 产品目录配置
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// `staticProducts.json` 路径；未设置时使用内置种子数据
    pub products_snapshot: Option<PathBuf>,
    /// `staticCategories.json` 路径；未设置时使用内置分类
    pub categories_snapshot: Option<PathBuf>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl HttpConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.bind_address, self.port)
            .parse()
            .map_err(|e| ConfigError::Validation(format!("无效的监听地址: {}", e)))
    }
}

impl Config {
    /// 从配置文件加载配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::FileRead(e.to_string()))?;

        let config: Config =
            toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        Ok(config)
    }

    /// 用环境变量覆盖配置：`PORT`、`BIND_ADDRESS`、`LOG_LEVEL`
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT") {
            self.http.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::Validation(format!("无效的 PORT: {}", port)))?;
        }
        if let Some(address) = lookup("BIND_ADDRESS") {
            self.http.bind_address = address;
        }
        if let Some(level) = lookup("LOG_LEVEL") {
            self.logging.level = level.to_lowercase();
        }
        Ok(())
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.port == 0 {
            return Err(ConfigError::Validation("HTTP端口必须大于0".to_string()));
        }
        if self.http.bind_address.is_empty() {
            return Err(ConfigError::Validation("绑定地址不能为空".to_string()));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "无效的日志级别: {}，有效值: {:?}",
                self.logging.level, valid_levels
            )));
        }

        Ok(())
    }
}

/// 配置错误类型
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("文件读取错误: {0}")]
    FileRead(String),
    #[error("配置解析错误: {0}")]
    Parse(String),
    #[error("配置验证错误: {0}")]
    Validation(String),
}

/// 配置来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "配置文件 {}", path.display()),
            ConfigSource::Defaults => f.write_str("默认配置"),
        }
    }
}

/// 加载配置：环境变量指定的文件 > `config.toml` > `./config/config.toml` > 默认值，
/// 之后应用环境变量覆盖并校验
///
/// 调用时日志尚未初始化，来源随配置一起返回，由调用方记录。
pub fn load_config() -> Result<(Config, ConfigSource), ConfigError> {
    let explicit = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
    let (mut config, source) = load_config_from(explicit.as_deref())?;

    config.apply_env_overrides(|key| std::env::var(key).ok())?;
    config.validate()?;
    Ok((config, source))
}

/// 按优先级查找配置文件；显式指定的路径不存在时报错
pub fn load_config_from(explicit: Option<&Path>) -> Result<(Config, ConfigSource), ConfigError> {
    if let Some(path) = explicit {
        let config = Config::load_from_file(path)?;
        return Ok((config, ConfigSource::File(path.to_path_buf())));
    }

    let config_paths = ["config.toml", "./config/config.toml"];

    for path in &config_paths {
        let path = Path::new(path);
        if path.exists() {
            let config = Config::load_from_file(path)?;
            return Ok((config, ConfigSource::File(path.to_path_buf())));
        }
    }

    Ok((Config::default(), ConfigSource::Defaults))
}
