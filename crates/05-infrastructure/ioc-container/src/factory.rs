//! 默认实例工厂

use ioc_abstractions::InstanceFactory;
use ioc_common::{Arguments, ConstructionError, ConstructionResult, Constructor, Instance, TypeKey};
use tracing::trace;

/// 基于描述符的实例工厂
///
/// 直接调用描述符中记录的构造函数。
#[derive(Debug, Default, Clone, Copy)]
pub struct DescriptorInstanceFactory;

impl InstanceFactory for DescriptorInstanceFactory {
    fn construct(
        &self,
        implementation: TypeKey,
        constructor: &Constructor,
        args: Arguments,
    ) -> ConstructionResult<Instance> {
        trace!(
            "调用构造函数: {}::{} ({} 个参数)",
            implementation.short_name(),
            constructor.name(),
            args.len()
        );

        let instance = constructor.invoke(args)?;
        if instance.concrete_type() != implementation {
            return Err(ConstructionError::TargetType {
                expected: implementation.name().to_string(),
                actual: instance.concrete_type().name().to_string(),
            });
        }
        Ok(instance)
    }
}
