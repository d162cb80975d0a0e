//! 实例工厂抽象接口
//!
//! 提供根据具体类型和已解析参数创建实例的能力

use ioc_common::{Arguments, ConstructionResult, Constructor, Instance, TypeKey};

/// 实例工厂 trait
///
/// 给定具体类型、选中的构造函数和按顺序解析好的参数，创建新实例。
/// 构造函数调用失败时返回 [`ioc_common::ConstructionError`]。
pub trait InstanceFactory {
    /// 创建实例
    fn construct(
        &self,
        implementation: TypeKey,
        constructor: &Constructor,
        args: Arguments,
    ) -> ConstructionResult<Instance>;
}

impl<F> InstanceFactory for F
where
    F: Fn(TypeKey, &Constructor, Arguments) -> ConstructionResult<Instance>,
{
    fn construct(
        &self,
        implementation: TypeKey,
        constructor: &Constructor,
        args: Arguments,
    ) -> ConstructionResult<Instance> {
        self(implementation, constructor, args)
    }
}
