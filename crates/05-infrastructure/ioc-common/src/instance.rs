//! 类型擦除的组件实例
//!
//! 解析过程中所有实例都以 [`Instance`] 的形式流转，调用方在根部把它取回为具体类型。

use crate::errors::{ConstructionError, ConstructionResult};
use crate::metadata::TypeKey;
use std::any::Any;
use std::collections::VecDeque;
use std::fmt;

/// 组件实例
///
/// 内部总是保存一个 `Box<V>`，其中 `V` 是当前视图类型：
/// 刚构造出来时 `V` 就是具体类型，经过导出转换后 `V` 可以是某个 trait object。
/// 无论视图如何变化，[`Instance::concrete_type`] 始终报告实际被构造的类型。
pub struct Instance {
    value: Box<dyn Any + Send + Sync>,
    concrete: TypeKey,
    view: TypeKey,
}

impl Instance {
    /// 从具体值创建实例
    pub fn new<T: Send + Sync + 'static>(value: T) -> Self {
        Self::from_box(Box::new(value))
    }

    /// 从已装箱的具体值创建实例
    pub fn from_box<T: Send + Sync + 'static>(value: Box<T>) -> Self {
        let key = TypeKey::of::<T>();
        Self {
            value: Box::new(value),
            concrete: key,
            view: key,
        }
    }

    /// 以指定视图类型包装实例，保留原始的具体类型
    pub fn from_view<V>(value: Box<V>, concrete: TypeKey) -> Self
    where
        V: ?Sized + Send + Sync + 'static,
    {
        Self {
            value: Box::new(value),
            concrete,
            view: TypeKey::of::<V>(),
        }
    }

    /// 实际被构造的类型
    pub fn concrete_type(&self) -> TypeKey {
        self.concrete
    }

    /// 当前视图类型
    pub fn view_type(&self) -> TypeKey {
        self.view
    }

    /// 检查当前视图是否为 `V`
    pub fn is<V: ?Sized + 'static>(&self) -> bool {
        self.value.is::<Box<V>>()
    }

    /// 以 `V` 视图借用实例
    pub fn view_ref<V: ?Sized + 'static>(&self) -> Option<&V> {
        self.value.downcast_ref::<Box<V>>().map(|boxed| &**boxed)
    }

    /// 以 `V` 视图可变借用实例
    pub fn view_mut<V: ?Sized + 'static>(&mut self) -> Option<&mut V> {
        self.value.downcast_mut::<Box<V>>().map(|boxed| &mut **boxed)
    }

    /// 取出为 `Box<V>`，视图不匹配时原样返回实例
    pub fn into_box<V: ?Sized + 'static>(self) -> Result<Box<V>, Self> {
        let Self {
            value,
            concrete,
            view,
        } = self;

        match value.downcast::<Box<V>>() {
            Ok(boxed) => Ok(*boxed),
            Err(value) => Err(Self {
                value,
                concrete,
                view,
            }),
        }
    }

    /// 取出为具体值
    pub fn downcast<T: 'static>(self) -> Result<T, Self> {
        self.into_box::<T>().map(|boxed| *boxed)
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("concrete", &self.concrete)
            .field("view", &self.view)
            .field("value", &"<instance>")
            .finish()
    }
}

/// 已解析的构造参数
///
/// 按构造函数参数顺序保存解析结果，构造函数通过 [`Arguments::next`] 依次取用。
#[derive(Debug, Default)]
pub struct Arguments {
    values: VecDeque<Instance>,
    consumed: usize,
}

impl Arguments {
    /// 创建参数列表
    pub fn new(values: Vec<Instance>) -> Self {
        Self {
            values: values.into(),
            consumed: 0,
        }
    }

    /// 取出下一个参数
    pub fn next<V: ?Sized + 'static>(&mut self) -> ConstructionResult<Box<V>> {
        let index = self.consumed;
        let instance = self
            .values
            .pop_front()
            .ok_or_else(|| ConstructionError::MissingArgument {
                index,
                expected: std::any::type_name::<V>().to_string(),
            })?;
        self.consumed += 1;

        instance
            .into_box::<V>()
            .map_err(|instance| ConstructionError::ArgumentType {
                expected: std::any::type_name::<V>().to_string(),
                actual: instance.view_type().name().to_string(),
            })
    }

    /// 取出下一个参数并解箱为具体值
    pub fn next_value<T: 'static>(&mut self) -> ConstructionResult<T> {
        self.next::<T>().map(|boxed| *boxed)
    }

    /// 剩余参数数量
    pub fn remaining(&self) -> usize {
        self.values.len()
    }

    /// 参数总数
    pub fn len(&self) -> usize {
        self.consumed + self.values.len()
    }

    /// 是否没有参数
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
