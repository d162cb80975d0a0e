//! 容器配置
//!
//! 配置来源按优先级从低到高：默认值、配置文件中的 `container` 节、`IOC_` 前缀的环境变量。

use crate::errors::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// 配置节名称
pub const CONTAINER_SECTION: &str = "container";

/// 环境变量前缀
pub const ENV_PREFIX: &str = "IOC";

/// 容器配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    /// 是否启用循环依赖检测
    ///
    /// 默认关闭：依赖环会导致无限递归直到栈溢出。
    pub detect_cycles: bool,
    /// 最大解析深度，`None` 表示不限制
    pub max_resolution_depth: Option<usize>,
    /// 是否记录每一步解析日志
    pub log_resolutions: bool,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            detect_cycles: false,
            max_resolution_depth: None,
            log_resolutions: true,
        }
    }
}

impl ContainerConfig {
    /// 启用循环依赖检测
    pub fn with_cycle_detection(mut self, enabled: bool) -> Self {
        self.detect_cycles = enabled;
        self
    }

    /// 设置最大解析深度
    pub fn with_max_resolution_depth(mut self, depth: usize) -> Self {
        self.max_resolution_depth = Some(depth);
        self
    }

    /// 设置是否记录解析日志
    pub fn with_resolution_logging(mut self, enabled: bool) -> Self {
        self.log_resolutions = enabled;
        self
    }

    /// 从配置文件和环境变量加载配置
    ///
    /// 文件格式由扩展名决定（`.toml` 或 `.json`），文件中缺省的字段使用默认值。
    pub fn load<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let format = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => config::FileFormat::Toml,
            Some("json") => config::FileFormat::Json,
            _ => {
                return Err(ConfigError::UnsupportedFormat {
                    path: path.display().to_string(),
                })
            }
        };

        debug!("加载容器配置文件: {}", path.display());
        let builder = config::Config::builder()
            .add_source(config::File::from(path).format(format).required(true));
        Self::from_builder(builder)
    }

    /// 仅从环境变量加载配置
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_builder(config::Config::builder())
    }

    /// 从 TOML 字符串解析配置
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let builder = config::Config::builder()
            .add_source(config::File::from_str(content, config::FileFormat::Toml));
        Self::from_builder(builder)
    }

    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_resolution_depth == Some(0) {
            return Err(ConfigError::ValidationError {
                message: "max_resolution_depth 必须大于 0".to_string(),
            });
        }
        Ok(())
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> ConfigResult<Self> {
        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(|e| ConfigError::ParseError {
                source: Box::new(e),
            })?;

        let config = match settings.get::<Self>(CONTAINER_SECTION) {
            Ok(config) => config,
            Err(config::ConfigError::NotFound(_)) => Self::default(),
            Err(e) => {
                return Err(ConfigError::ParseError {
                    source: Box::new(e),
                })
            }
        };

        config.validate()?;
        debug!("容器配置加载完成: {:?}", config);
        Ok(config)
    }
}
