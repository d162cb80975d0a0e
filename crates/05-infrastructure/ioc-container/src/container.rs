//! IoC 容器
//!
//! 容器持有类型注册表、元数据来源和实例工厂，由创建者显式拥有，不存在进程级的全局容器。
//! 容器本身不加锁；需要跨线程共享时，调用方应在注册阶段结束后只读使用，
//! 或者在外部串行化注册和解析。

use crate::factory::DescriptorInstanceFactory;
use crate::inspector::{DescriptorCatalog, MetadataInspector};
use crate::registry::TypeRegistry;
use crate::resolver::Resolver;
use ioc_abstractions::{
    ComponentRegistry, ComponentResolver, ComponentScanner, InstanceFactory, MetadataSource,
    RegistryEntry,
};
use ioc_common::{
    ComponentDescriptor, ContainerConfig, ContainerError, ContainerResult, Injectable, Instance,
    TypeKey,
};
use tracing::{debug, info};

/// IoC 容器
pub struct Container {
    registry: TypeRegistry,
    metadata: Box<dyn MetadataSource + Send + Sync>,
    factory: Box<dyn InstanceFactory + Send + Sync>,
    config: ContainerConfig,
}

impl Container {
    /// 使用默认配置创建空容器
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// 创建容器构建器
    pub fn builder() -> ContainerBuilder {
        ContainerBuilder::new()
    }

    /// 以自身作为实现类型注册组件
    pub fn add_type<T: Injectable>(&mut self) -> ContainerResult<()> {
        let ty = TypeKey::of::<T>();
        self.registry.check(&ty)?;
        self.metadata.record(T::descriptor());
        self.registry.add_self(ty)
    }

    /// 把请求类型 `R` 映射到实现类型 `T`
    ///
    /// `R` 通常是 trait object，例如 `container.add_type_as::<dyn CustomerDal, SqlCustomerDal>()`。
    pub fn add_type_as<R, T>(&mut self) -> ContainerResult<()>
    where
        R: ?Sized + 'static,
        T: Injectable,
    {
        let requested = TypeKey::of::<R>();
        self.registry.check(&requested)?;
        self.metadata.record(T::descriptor());
        self.registry.add(requested, TypeKey::of::<T>())
    }

    /// 以自身作为实现类型注册（类型擦除）
    ///
    /// 实现类型的描述符需要事先通过 [`Container::add_descriptor`] 提供。
    pub fn add_type_key(&mut self, ty: TypeKey) -> ContainerResult<()> {
        self.registry.add_self(ty)
    }

    /// 注册显式映射（类型擦除）
    pub fn add_type_mapping(
        &mut self,
        requested: TypeKey,
        implementation: TypeKey,
    ) -> ContainerResult<()> {
        self.registry.add(requested, implementation)
    }

    /// 只记录组件描述符，不注册
    pub fn add_descriptor(&mut self, descriptor: ComponentDescriptor) {
        self.metadata.record(descriptor);
    }

    /// 批量注册一个组件集合
    ///
    /// 只有带构造注入标记、注入属性或导出标记的组件会被注册。整个批次先全部校验，
    /// 任何一个请求类型重复时返回错误，注册表保持不变。
    /// 返回新增的注册项数量。
    pub fn add_assembly(&mut self, scanner: &dyn ComponentScanner) -> ContainerResult<usize> {
        let candidates = scanner.scan();
        info!(
            "扫描组件集合: {} ({} 个候选组件)",
            scanner.name(),
            candidates.len()
        );

        let mut planned: Vec<RegistryEntry> = Vec::new();
        for descriptor in &candidates {
            if !descriptor.qualifies_for_scan() {
                debug!("跳过未标记的组件: {}", descriptor.type_key().name());
                continue;
            }

            for requested in MetadataInspector::requested_types(descriptor) {
                self.registry.check(&requested)?;
                if let Some(existing) = planned.iter().find(|entry| entry.requested == requested) {
                    return Err(ContainerError::DuplicateRegistration {
                        requested: requested.name().to_string(),
                        existing: existing.implementation.name().to_string(),
                    });
                }
                planned.push(RegistryEntry::new(requested, descriptor.type_key()));
            }
        }

        for descriptor in candidates {
            self.metadata.record(descriptor);
        }
        for entry in &planned {
            self.registry.add(entry.requested, entry.implementation)?;
        }

        info!("组件集合 {} 注册完成: {} 个注册项", scanner.name(), planned.len());
        Ok(planned.len())
    }

    /// 解析指定类型
    pub fn resolve<T: ?Sized + 'static>(&self) -> ContainerResult<Box<T>> {
        self.resolver().resolve::<T>()
    }

    /// 类型是否已注册
    pub fn is_registered<T: ?Sized + 'static>(&self) -> bool {
        self.is_registered_type(&TypeKey::of::<T>())
    }

    /// 类型是否已注册（类型擦除）
    pub fn is_registered_type(&self, ty: &TypeKey) -> bool {
        self.registry.contains(ty)
    }

    /// 所有注册项，按请求类型名称排序
    pub fn registrations(&self) -> Vec<RegistryEntry> {
        self.registry.entries()
    }

    /// 注册项数量
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// 容器是否为空
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// 容器配置
    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }

    fn resolver(&self) -> Resolver<'_> {
        Resolver::new(
            &self.registry,
            self.metadata.as_ref(),
            self.factory.as_ref(),
            &self.config,
        )
    }
}

impl ComponentResolver for Container {
    fn resolve_type(&self, requested: TypeKey) -> ContainerResult<Instance> {
        self.resolver().resolve_type(requested)
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("registry", &self.registry)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// 容器构建器
#[derive(Default)]
pub struct ContainerBuilder {
    config: ContainerConfig,
    metadata: Option<Box<dyn MetadataSource + Send + Sync>>,
    factory: Option<Box<dyn InstanceFactory + Send + Sync>>,
}

impl ContainerBuilder {
    /// 创建新的构建器
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置容器配置
    pub fn with_config(mut self, config: ContainerConfig) -> Self {
        self.config = config;
        self
    }

    /// 替换元数据来源
    pub fn with_metadata_source<M>(mut self, metadata: M) -> Self
    where
        M: MetadataSource + Send + Sync + 'static,
    {
        self.metadata = Some(Box::new(metadata));
        self
    }

    /// 替换实例工厂
    pub fn with_instance_factory<F>(mut self, factory: F) -> Self
    where
        F: InstanceFactory + Send + Sync + 'static,
    {
        self.factory = Some(Box::new(factory));
        self
    }

    /// 构建容器
    pub fn build(self) -> Container {
        debug!("构建容器: {:?}", self.config);
        Container {
            registry: TypeRegistry::new(),
            metadata: self
                .metadata
                .unwrap_or_else(|| Box::new(DescriptorCatalog::new())),
            factory: self
                .factory
                .unwrap_or_else(|| Box::new(DescriptorInstanceFactory)),
            config: self.config,
        }
    }
}

impl std::fmt::Debug for ContainerBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContainerBuilder")
            .field("config", &self.config)
            .field("custom_metadata", &self.metadata.is_some())
            .field("custom_factory", &self.factory.is_some())
            .finish()
    }
}
