//! # IoC Common
//!
//! 这个 crate 提供了 IoC 容器各层共享的基础类型。
//!
//! ## 核心类型
//!
//! - [`TypeKey`] - 类型标识，注册表的键
//! - [`Instance`] - 类型擦除的组件实例
//! - [`ComponentDescriptor`] - 组件注入元数据（构造注入、属性注入、导出标记、公共构造函数）
//! - [`ContainerError`] - 容器错误分类
//! - [`ContainerConfig`] - 容器配置
//!
//! ## 设计原则
//!
//! - 元数据在注册时一次性计算，解析器不依赖任何标记读取机制
//! - 每次解析都构建新的对象图，容器不持有任何已创建的实例
//! - 所有失败都返回给调用方，不做静默降级

pub mod component;
pub mod configuration;
pub mod errors;
pub mod instance;
pub mod metadata;

pub use component::*;
pub use configuration::*;
pub use errors::*;
pub use instance::*;
pub use metadata::*;
