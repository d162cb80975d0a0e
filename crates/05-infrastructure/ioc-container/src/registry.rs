//! 类型注册表实现

use ioc_abstractions::{ComponentRegistry, RegistryEntry};
use ioc_common::{ContainerError, ContainerResult, TypeKey};
use std::collections::HashMap;
use tracing::info;

/// 类型注册表
///
/// 条目一旦加入就不会被修改或移除。
#[derive(Debug, Default, Clone)]
pub struct TypeRegistry {
    /// 请求类型 -> 实现类型
    types: HashMap<TypeKey, TypeKey>,
}

impl TypeRegistry {
    /// 创建新的注册表
    pub fn new() -> Self {
        Self::default()
    }

    /// 检查一个映射能否加入注册表
    pub fn check(&self, requested: &TypeKey) -> ContainerResult<()> {
        match self.types.get(requested) {
            Some(existing) => Err(ContainerError::DuplicateRegistration {
                requested: requested.name().to_string(),
                existing: existing.name().to_string(),
            }),
            None => Ok(()),
        }
    }

    /// 所有条目，按请求类型名称排序
    pub fn entries(&self) -> Vec<RegistryEntry> {
        let mut entries: Vec<RegistryEntry> = self
            .types
            .iter()
            .map(|(requested, implementation)| RegistryEntry::new(*requested, *implementation))
            .collect();
        entries.sort_by(|a, b| a.requested.cmp(&b.requested));
        entries
    }
}

impl ComponentRegistry for TypeRegistry {
    fn add(&mut self, requested: TypeKey, implementation: TypeKey) -> ContainerResult<()> {
        self.check(&requested)?;

        info!("注册类型: {} -> {}", requested.name(), implementation.name());
        self.types.insert(requested, implementation);
        Ok(())
    }

    fn lookup(&self, requested: &TypeKey) -> Option<TypeKey> {
        self.types.get(requested).copied()
    }

    fn len(&self) -> usize {
        self.types.len()
    }
}
