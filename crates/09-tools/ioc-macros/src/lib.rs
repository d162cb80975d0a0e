//! # IoC Macros
//!
//! 这个 crate 提供了为组件生成注入元数据的过程宏。
//!
//! ## 核心宏
//!
//! - [`Component`] - 派生 `ioc_common::Injectable`，声明构造注入、属性注入和导出标记
//! - [`component_constructors`] - 把 impl 块中的公共构造函数收集为 `ioc_common::ConstructorSet`
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use ioc_macros::{component_constructors, Component};
//!
//! #[derive(Component)]
//! #[component(import_constructor)]
//! pub struct CustomerBll {
//!     dal: Box<dyn CustomerDal>,
//! }
//!
//! #[component_constructors]
//! impl CustomerBll {
//!     pub fn new(dal: Box<dyn CustomerDal>) -> Self {
//!         Self { dal }
//!     }
//! }
//! ```
//!
//! 生成的代码引用 `::ioc_common`，使用方需要直接依赖 `ioc-common`。

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput, ItemImpl};

mod component;
mod constructors;
mod utils;

/// 组件派生宏
///
/// # 结构体参数 `#[component(...)]`
///
/// - `import_constructor` - 构造注入标记，解析时跳过属性注入
/// - `export` - 以自身类型导出
/// - `export = dyn Trait` - 以 trait object 视图导出，可重复
/// - `default` - 使用 `Default` 作为唯一的公共构造函数，
///   否则使用 [`component_constructors`] 生成的构造函数
///
/// # 字段参数
///
/// - `#[import]` - 属性注入标记，字段类型必须是 `Option<Box<T>>` 或 `Option<T>`
///
/// # 示例
///
/// ```rust,ignore
/// #[derive(Default, Component)]
/// #[component(default, export = dyn CustomerDal)]
/// pub struct SqlCustomerDal {
///     #[import]
///     logger: Option<Box<Logger>>,
/// }
/// ```
#[proc_macro_derive(Component, attributes(component, import))]
pub fn derive_component(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    component::derive_component_impl(input)
}

/// 公共构造函数收集宏
///
/// 按声明顺序收集 impl 块中返回 `Self`（或 `Result<Self, E>`）的 `pub fn`，
/// 参数类型为 `Box<T>` 时按 `T` 解析，否则按参数类型本身解析。
/// 容器总是选择第一个收集到的构造函数。
///
/// # 示例
///
/// ```rust,ignore
/// #[component_constructors]
/// impl CustomerBll {
///     pub fn new(dal: Box<dyn CustomerDal>) -> Self {
///         Self { dal }
///     }
/// }
/// ```
#[proc_macro_attribute]
pub fn component_constructors(_args: TokenStream, input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as ItemImpl);
    constructors::component_constructors_impl(input)
}
