//! 组件解析器抽象接口
//!
//! 提供依赖解析和组件实例化的能力

use ioc_common::{ContainerConfig, ContainerError, ContainerResult, Instance, TypeKey};

/// 组件解析器 trait
///
/// 负责解析组件依赖并创建组件实例
pub trait ComponentResolver {
    /// 解析指定类型（类型擦除）
    fn resolve_type(&self, requested: TypeKey) -> ContainerResult<Instance>;

    /// 解析指定类型
    fn resolve<T>(&self) -> ContainerResult<Box<T>>
    where
        T: ?Sized + 'static,
        Self: Sized,
    {
        let requested = TypeKey::of::<T>();
        let instance = self.resolve_type(requested)?;
        instance
            .into_box::<T>()
            .map_err(|instance| ContainerError::TypeMismatch {
                requested: requested.name().to_string(),
                actual: instance.view_type().name().to_string(),
            })
    }
}

/// 解析上下文
///
/// 记录当前解析链。解析链既用于错误信息中的解析路径，
/// 也用于可选的循环依赖检测和深度限制。
#[derive(Debug, Clone)]
pub struct ResolveContext {
    /// 当前解析链
    resolution_chain: Vec<TypeKey>,
    /// 解析选项
    options: ResolveOptions,
}

impl ResolveContext {
    /// 创建新的解析上下文
    pub fn new(options: ResolveOptions) -> Self {
        Self {
            resolution_chain: Vec::new(),
            options,
        }
    }

    /// 添加类型到解析链
    pub fn push_type(&mut self, ty: TypeKey) -> ContainerResult<()> {
        if self.options.detect_cycles && self.resolution_chain.contains(&ty) {
            return Err(ContainerError::CircularDependency {
                dependency_chain: format!("{} -> {}", self.path(), ty.name()),
            });
        }

        if let Some(max_depth) = self.options.max_depth {
            if self.resolution_chain.len() >= max_depth {
                return Err(ContainerError::ResolutionDepthExceeded {
                    max_depth,
                    path: format!("{} -> {}", self.path(), ty.name()),
                });
            }
        }

        self.resolution_chain.push(ty);
        Ok(())
    }

    /// 从解析链中移除类型
    pub fn pop_type(&mut self) {
        self.resolution_chain.pop();
    }

    /// 最初请求的类型
    pub fn root(&self) -> Option<TypeKey> {
        self.resolution_chain.first().copied()
    }

    /// 当前解析深度
    pub fn depth(&self) -> usize {
        self.resolution_chain.len()
    }

    /// 解析路径（根类型在前）
    pub fn path(&self) -> String {
        self.resolution_chain
            .iter()
            .map(TypeKey::name)
            .collect::<Vec<_>>()
            .join(" -> ")
    }
}

/// 解析选项
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// 是否检测循环依赖
    pub detect_cycles: bool,
    /// 最大递归深度
    pub max_depth: Option<usize>,
}

impl From<&ContainerConfig> for ResolveOptions {
    fn from(config: &ContainerConfig) -> Self {
        Self {
            detect_cycles: config.detect_cycles,
            max_depth: config.max_resolution_depth,
        }
    }
}
