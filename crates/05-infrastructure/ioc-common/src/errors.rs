//! 错误类型定义

use thiserror::Error;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },

    #[error("配置文件格式不受支持: {path}")]
    UnsupportedFormat { path: String },

    #[error("配置解析失败: {source}")]
    ParseError {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("配置验证失败: {message}")]
    ValidationError { message: String },
}

/// 实例构造错误类型
///
/// 由实例工厂在调用构造函数或属性设置器失败时产生
#[derive(Error, Debug)]
pub enum ConstructionError {
    #[error("缺少构造参数: 第 {index} 个参数, 期望类型 {expected}")]
    MissingArgument { index: usize, expected: String },

    #[error("构造参数类型不匹配: 期望 {expected}, 实际 {actual}")]
    ArgumentType { expected: String, actual: String },

    #[error("目标实例类型不匹配: 期望 {expected}, 实际 {actual}")]
    TargetType { expected: String, actual: String },

    #[error("构造函数执行失败: {source}")]
    Failed {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ConstructionError {
    /// 包装构造函数体内产生的错误
    pub fn failed(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Failed {
            source: source.into(),
        }
    }
}

/// 容器错误类型
#[derive(Error, Debug)]
pub enum ContainerError {
    #[error("类型重复注册: {requested} (已映射到 {existing})")]
    DuplicateRegistration { requested: String, existing: String },

    #[error("无法创建 {requested} 的实例, 依赖未注册: {missing} (解析路径: {path})")]
    UnregisteredType {
        requested: String,
        missing: String,
        path: String,
    },

    #[error("类型 {type_name} 没有公共构造函数")]
    NoPublicConstructor { type_name: String },

    #[error("组件创建失败: {type_name}, 原因: {source}")]
    Construction {
        type_name: String,
        #[source]
        source: ConstructionError,
    },

    #[error("解析结果类型不匹配: 请求 {requested}, 实际 {actual}")]
    TypeMismatch { requested: String, actual: String },

    #[error("循环依赖检测到: {dependency_chain}")]
    CircularDependency { dependency_chain: String },

    #[error("解析深度超过限制 {max_depth}: {path}")]
    ResolutionDepthExceeded { max_depth: usize, path: String },
}

impl ContainerError {
    /// 是否为未注册错误
    pub fn is_unregistered(&self) -> bool {
        matches!(self, Self::UnregisteredType { .. })
    }

    /// 是否为重复注册错误
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::DuplicateRegistration { .. })
    }
}

/// 结果类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type ConstructionResult<T> = Result<T, ConstructionError>;
pub type ContainerResult<T> = Result<T, ContainerError>;
