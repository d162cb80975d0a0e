//! 组件元数据来源抽象接口
//!
//! 元数据来源负责回答"某个类型声明了哪些注入标记"，
//! 解析器和批量注册都只通过它读取元数据。

use ioc_common::{ComponentDescriptor, TypeKey};

/// 组件元数据来源 trait
pub trait MetadataSource {
    /// 获取类型的描述符，未知类型返回 `None`
    fn descriptor(&self, ty: &TypeKey) -> Option<&ComponentDescriptor>;

    /// 记录类型的描述符
    ///
    /// 同一类型只记录第一次提供的描述符，之后的调用被忽略。
    fn record(&mut self, descriptor: ComponentDescriptor);
}
