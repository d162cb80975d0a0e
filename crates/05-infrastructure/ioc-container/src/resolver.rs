//! 依赖解析器
//!
//! 解析流程：
//!
//! 1. 在注册表中查找请求类型对应的实现类型
//! 2. 选择实现类型的第一个公共构造函数
//! 3. 按参数顺序递归解析构造参数
//! 4. 通过实例工厂创建实例，必要时转换为请求类型的视图
//! 5. 请求类型带构造注入标记时直接返回，否则按声明顺序注入请求类型的属性
//!
//! 默认配置下解析器不分析依赖图，循环依赖会导致无界递归。
//! 需要时可在 [`ContainerConfig`] 中打开循环检测或深度限制。

use crate::inspector::MetadataInspector;
use ioc_abstractions::{
    ComponentRegistry, ComponentResolver, InstanceFactory, MetadataSource, ResolveContext,
    ResolveOptions,
};
use ioc_common::{Arguments, ContainerConfig, ContainerError, ContainerResult, Instance, TypeKey};
use tracing::{debug, warn};

/// 依赖解析器
///
/// 只借用容器的各个协作者，每次调用 [`ComponentResolver::resolve_type`] 都使用新的解析上下文。
#[derive(Clone, Copy)]
pub struct Resolver<'a> {
    registry: &'a dyn ComponentRegistry,
    metadata: &'a dyn MetadataSource,
    factory: &'a dyn InstanceFactory,
    config: &'a ContainerConfig,
}

impl<'a> Resolver<'a> {
    /// 创建解析器
    pub fn new(
        registry: &'a dyn ComponentRegistry,
        metadata: &'a dyn MetadataSource,
        factory: &'a dyn InstanceFactory,
        config: &'a ContainerConfig,
    ) -> Self {
        Self {
            registry,
            metadata,
            factory,
            config,
        }
    }

    fn inspector(&self) -> MetadataInspector<'a> {
        MetadataInspector::new(self.metadata)
    }

    /// 在给定上下文中解析请求类型
    pub fn resolve_with(
        &self,
        requested: TypeKey,
        context: &mut ResolveContext,
    ) -> ContainerResult<Instance> {
        context.push_type(requested)?;
        let result = self.resolve_pushed(requested, context);
        context.pop_type();
        result
    }

    fn resolve_pushed(
        &self,
        requested: TypeKey,
        context: &mut ResolveContext,
    ) -> ContainerResult<Instance> {
        let implementation =
            self.registry
                .lookup(&requested)
                .ok_or_else(|| ContainerError::UnregisteredType {
                    requested: context.root().unwrap_or(requested).name().to_string(),
                    missing: requested.name().to_string(),
                    path: context.path(),
                })?;

        let inspector = self.inspector();
        let constructor = inspector.select_constructor(&implementation).ok_or_else(|| {
            ContainerError::NoPublicConstructor {
                type_name: implementation.name().to_string(),
            }
        })?;

        if self.config.log_resolutions {
            debug!(
                "解析类型: {} -> {} (构造函数: {}, 深度: {})",
                requested.name(),
                implementation.name(),
                constructor.name(),
                context.depth()
            );
        }

        let mut values = Vec::with_capacity(constructor.arity());
        for parameter in constructor.parameters() {
            values.push(self.resolve_with(*parameter, context)?);
        }

        let instance = self
            .factory
            .construct(implementation, constructor, Arguments::new(values))
            .map_err(|source| ContainerError::Construction {
                type_name: implementation.name().to_string(),
                source,
            })?;

        let mut instance = self.coerce(requested, implementation, instance)?;

        if inspector.uses_constructor_injection(&requested) {
            if self.config.log_resolutions {
                debug!("{} 使用构造注入，跳过属性注入", requested.short_name());
            }
            return Ok(instance);
        }

        for property in inspector.injectable_properties(&requested) {
            if self.config.log_resolutions {
                debug!(
                    "注入属性: {}.{} ({})",
                    requested.short_name(),
                    property.name(),
                    property.property_type().name()
                );
            }

            let value = self.resolve_with(property.property_type(), context)?;
            property
                .inject(&mut instance, value)
                .map_err(|source| ContainerError::Construction {
                    type_name: requested.name().to_string(),
                    source,
                })?;
        }

        Ok(instance)
    }

    /// 把新建实例转换为请求类型的视图
    fn coerce(
        &self,
        requested: TypeKey,
        implementation: TypeKey,
        instance: Instance,
    ) -> ContainerResult<Instance> {
        if requested == implementation {
            return Ok(instance);
        }

        match self.inspector().export_for(&implementation, requested) {
            Some(export) if export.has_coercion() => {
                export
                    .coerce(instance)
                    .map_err(|source| ContainerError::Construction {
                        type_name: implementation.name().to_string(),
                        source,
                    })
            }
            _ => {
                if requested.is_trait_object() {
                    warn!(
                        "{} 没有导出到 {} 的视图转换，实例保持具体类型",
                        implementation.name(),
                        requested.name()
                    );
                }
                Ok(instance)
            }
        }
    }
}

impl ComponentResolver for Resolver<'_> {
    fn resolve_type(&self, requested: TypeKey) -> ContainerResult<Instance> {
        let mut context = ResolveContext::new(ResolveOptions::from(self.config));
        self.resolve_with(requested, &mut context)
    }
}

impl std::fmt::Debug for Resolver<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("config", self.config)
            .finish_non_exhaustive()
    }
}
