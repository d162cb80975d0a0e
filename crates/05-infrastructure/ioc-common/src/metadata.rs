//! 类型元数据定义
//!
//! 提供容器内部使用的类型标识

use std::any::TypeId;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// 类型标识
///
/// 用作注册表的键，也用来描述构造参数和属性的依赖类型。
/// 两个 `TypeKey` 相等当且仅当它们标识同一个类型，名称只用于诊断。
#[derive(Clone, Copy)]
pub struct TypeKey {
    /// 类型ID
    id: TypeId,
    /// 完整类型名称
    name: &'static str,
}

impl TypeKey {
    /// 从类型获取类型标识
    ///
    /// 支持 trait object（例如 `dyn Logger`），这是表达"接口"类型的方式。
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// 获取类型ID
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// 获取完整类型名称
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// 获取简短的类型名称（不包含模块路径）
    pub fn short_name(&self) -> &'static str {
        let name = self.name.strip_prefix("dyn ").unwrap_or(self.name);
        let base = name.split('<').next().unwrap_or(name);
        base.rsplit("::").next().unwrap_or(base)
    }

    /// 是否为 trait object 类型
    pub fn is_trait_object(&self) -> bool {
        self.name.starts_with("dyn ")
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for TypeKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TypeKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(other.name).then_with(|| self.id.cmp(&other.id))
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeKey({})", self.name)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
