//! 类型注册表抽象接口

use ioc_common::{ContainerResult, TypeKey};

/// 类型注册表 trait
///
/// 维护请求类型到实现类型的映射。请求类型唯一，
/// 重复注册返回 [`ioc_common::ContainerError::DuplicateRegistration`]，不会覆盖已有映射。
/// 注册表不提供移除操作。
pub trait ComponentRegistry {
    /// 注册显式映射
    fn add(&mut self, requested: TypeKey, implementation: TypeKey) -> ContainerResult<()>;

    /// 以自身作为实现类型注册
    fn add_self(&mut self, ty: TypeKey) -> ContainerResult<()> {
        self.add(ty, ty)
    }

    /// 查找请求类型对应的实现类型
    fn lookup(&self, requested: &TypeKey) -> Option<TypeKey>;

    /// 检查请求类型是否已注册
    fn contains(&self, requested: &TypeKey) -> bool {
        self.lookup(requested).is_some()
    }

    /// 已注册的映射数量
    fn len(&self) -> usize;

    /// 注册表是否为空
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// 注册表条目
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegistryEntry {
    /// 请求类型
    pub requested: TypeKey,
    /// 实现类型
    pub implementation: TypeKey,
}

impl RegistryEntry {
    /// 创建注册表条目
    pub fn new(requested: TypeKey, implementation: TypeKey) -> Self {
        Self {
            requested,
            implementation,
        }
    }

    /// 是否为自注册
    pub fn is_self_registration(&self) -> bool {
        self.requested == self.implementation
    }
}
