//! 组件元数据检查
//!
//! [`DescriptorCatalog`] 是默认的元数据来源，[`MetadataInspector`] 在任意来源之上
//! 回答解析器和批量注册关心的问题。

use ioc_abstractions::MetadataSource;
use ioc_common::{ComponentDescriptor, Constructor, ExportMarker, PropertyInjection, TypeKey};
use std::collections::HashMap;
use tracing::debug;

/// 组件描述符目录
#[derive(Debug, Default, Clone)]
pub struct DescriptorCatalog {
    descriptors: HashMap<TypeKey, ComponentDescriptor>,
}

impl DescriptorCatalog {
    /// 创建空目录
    pub fn new() -> Self {
        Self::default()
    }

    /// 已知描述符数量
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// 目录是否为空
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

impl MetadataSource for DescriptorCatalog {
    fn descriptor(&self, ty: &TypeKey) -> Option<&ComponentDescriptor> {
        self.descriptors.get(ty)
    }

    fn record(&mut self, descriptor: ComponentDescriptor) {
        let ty = descriptor.type_key();
        if self.descriptors.contains_key(&ty) {
            return;
        }
        debug!(
            "记录组件元数据: {} (构造注入: {}, 注入属性: {}, 导出: {}, 公共构造函数: {})",
            ty.name(),
            descriptor.uses_constructor_injection(),
            descriptor.properties().len(),
            descriptor.exports().len(),
            descriptor.constructors().len()
        );
        self.descriptors.insert(ty, descriptor);
    }
}

impl FromIterator<ComponentDescriptor> for DescriptorCatalog {
    fn from_iter<I: IntoIterator<Item = ComponentDescriptor>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for descriptor in iter {
            catalog.record(descriptor);
        }
        catalog
    }
}

/// 元数据检查器
///
/// 没有描述符的类型（例如 trait object）视为不带任何标记、没有公共构造函数。
#[derive(Clone, Copy)]
pub struct MetadataInspector<'a> {
    source: &'a dyn MetadataSource,
}

impl<'a> MetadataInspector<'a> {
    /// 基于元数据来源创建检查器
    pub fn new(source: &'a dyn MetadataSource) -> Self {
        Self { source }
    }

    /// 获取类型的描述符
    pub fn descriptor(&self, ty: &TypeKey) -> Option<&'a ComponentDescriptor> {
        self.source.descriptor(ty)
    }

    /// 类型是否带有构造注入标记
    pub fn uses_constructor_injection(&self, ty: &TypeKey) -> bool {
        self.descriptor(ty)
            .is_some_and(ComponentDescriptor::uses_constructor_injection)
    }

    /// 类型带有属性注入标记的属性（按声明顺序）
    pub fn injectable_properties(&self, ty: &TypeKey) -> &'a [PropertyInjection] {
        self.descriptor(ty)
            .map(ComponentDescriptor::properties)
            .unwrap_or_default()
    }

    /// 类型的公共构造函数（按声明顺序）
    pub fn public_constructors(&self, ty: &TypeKey) -> &'a [Constructor] {
        self.descriptor(ty)
            .map(ComponentDescriptor::constructors)
            .unwrap_or_default()
    }

    /// 选择构造函数
    ///
    /// 总是选择第一个声明的公共构造函数，不根据参数数量或依赖可用性做重载选择。
    pub fn select_constructor(&self, ty: &TypeKey) -> Option<&'a Constructor> {
        self.public_constructors(ty).first()
    }

    /// 实现类型导出到指定请求类型的标记
    pub fn export_for(&self, implementation: &TypeKey, requested: TypeKey) -> Option<&'a ExportMarker> {
        self.descriptor(implementation)
            .and_then(|descriptor| descriptor.export_for(requested))
    }

    /// 批量注册时组件应注册到的请求类型
    ///
    /// 带构造注入标记或注入属性时先注册到自身，之后每个导出标记贡献一个请求类型
    /// （无显式类型时为自身）。重复的请求类型原样保留，由批量注册报告重复注册。
    pub fn requested_types(descriptor: &ComponentDescriptor) -> Vec<TypeKey> {
        let own = descriptor.type_key();
        let mut requested = Vec::new();

        if descriptor.uses_constructor_injection() || !descriptor.properties().is_empty() {
            requested.push(own);
        }
        requested.extend(
            descriptor
                .exports()
                .iter()
                .map(|export| export.requested_type(own)),
        );

        requested
    }
}

impl std::fmt::Debug for MetadataInspector<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetadataInspector").finish_non_exhaustive()
    }
}
