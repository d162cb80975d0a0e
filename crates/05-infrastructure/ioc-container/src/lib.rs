//! # IoC 容器实现
//!
//! 提供类型注册表、元数据检查器、依赖解析器和批量注册的具体实现。
//!
//! ```ignore
//! let mut container = Container::new();
//! container.add_type_as::<dyn CustomerDal, SqlCustomerDal>()?;
//! container.add_type::<CustomerBll>()?;
//!
//! let bll = container.resolve::<CustomerBll>()?;
//! ```

pub mod container;
pub mod factory;
pub mod inspector;
pub mod registry;
pub mod resolver;
pub mod scanner;

pub use container::{Container, ContainerBuilder};
pub use factory::DescriptorInstanceFactory;
pub use inspector::{DescriptorCatalog, MetadataInspector};
pub use registry::TypeRegistry;
pub use resolver::Resolver;
pub use scanner::Assembly;

// 重新导出常用类型，使用方只依赖本 crate 即可
pub use ioc_abstractions::{ComponentResolver, ComponentScanner, MetadataSource, RegistryEntry};
pub use ioc_common::{
    ComponentDescriptor, ConstructionError, Constructor, ContainerConfig, ContainerError,
    ContainerResult, ExportMarker, Injectable, Instance, PropertyInjection, TypeKey,
};
