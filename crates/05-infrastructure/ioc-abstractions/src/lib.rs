//! # IoC Abstractions
//!
//! 依赖注入抽象层，定义容器核心与外部协作者之间的接口。
//!
//! ## 核心接口
//!
//! - [`ComponentRegistry`] - 类型注册表接口
//! - [`MetadataSource`] - 组件元数据来源接口
//! - [`ComponentScanner`] - 批量组件枚举接口
//! - [`InstanceFactory`] - 实例工厂接口
//! - [`ComponentResolver`] - 依赖解析接口

pub mod factory;
pub mod metadata;
pub mod registry;
pub mod resolver;
pub mod scanner;

pub use factory::*;
pub use metadata::*;
pub use registry::*;
pub use resolver::*;
pub use scanner::*;
