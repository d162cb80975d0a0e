//! 组件扫描器抽象接口
//!
//! 提供批量枚举候选组件的能力

use ioc_common::ComponentDescriptor;

/// 组件扫描器 trait
///
/// 枚举一个部署单元中的全部候选类型，是否注册由容器根据注入标记决定。
pub trait ComponentScanner {
    /// 获取扫描单元名称
    fn name(&self) -> &str;

    /// 枚举候选组件描述符（按声明顺序）
    fn scan(&self) -> Vec<ComponentDescriptor>;
}
