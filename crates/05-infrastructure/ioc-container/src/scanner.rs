//! 组件集合
//!
//! [`Assembly`] 是一组候选组件的显式清单，供 [`crate::Container::add_assembly`] 批量注册。

use ioc_abstractions::ComponentScanner;
use ioc_common::{ComponentDescriptor, Injectable};

/// 候选组件集合
#[derive(Debug, Clone)]
pub struct Assembly {
    name: String,
    components: Vec<ComponentDescriptor>,
}

impl Assembly {
    /// 创建空集合
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            components: Vec::new(),
        }
    }

    /// 加入一个可注入组件
    pub fn with<T: Injectable>(self) -> Self {
        self.with_descriptor(T::descriptor())
    }

    /// 加入一个手写的组件描述符
    pub fn with_descriptor(mut self, descriptor: ComponentDescriptor) -> Self {
        self.components.push(descriptor);
        self
    }

    /// 候选组件数量
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// 集合是否为空
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl ComponentScanner for Assembly {
    fn name(&self) -> &str {
        &self.name
    }

    fn scan(&self) -> Vec<ComponentDescriptor> {
        self.components.clone()
    }
}
