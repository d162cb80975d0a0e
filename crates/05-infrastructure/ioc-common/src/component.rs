//! 组件描述符定义
//!
//! 组件的注入元数据（构造注入标记、属性注入标记、导出标记、公共构造函数）
//! 在注册时一次性计算成 [`ComponentDescriptor`]，解析器只读取这份数据，
//! 不关心标记是如何声明的（派生宏或手写）。

use crate::errors::{ConstructionError, ConstructionResult};
use crate::instance::{Arguments, Instance};
use crate::metadata::TypeKey;
use std::fmt;
use std::sync::Arc;

/// 构造函数调用类型
pub type ConstructFn = Arc<dyn Fn(Arguments) -> ConstructionResult<Instance> + Send + Sync>;

/// 属性设置函数类型
pub type PropertySetterFn = Arc<dyn Fn(&mut Instance, Instance) -> ConstructionResult<()> + Send + Sync>;

/// 导出视图转换函数类型
pub type CoercionFn = Arc<dyn Fn(Instance) -> ConstructionResult<Instance> + Send + Sync>;

/// 可注入组件 trait
///
/// 由 `#[derive(Component)]` 生成，也可以手写。
pub trait Injectable: Send + Sync + 'static {
    /// 组件描述符
    fn descriptor() -> ComponentDescriptor
    where
        Self: Sized;
}

/// 公共构造函数集合 trait
///
/// 由 `#[component_constructors]` 从 impl 块中按声明顺序生成。
pub trait ConstructorSet: Send + Sync + 'static {
    /// 按声明顺序返回公共构造函数
    fn constructors() -> Vec<Constructor>
    where
        Self: Sized;
}

/// 公共构造函数
#[derive(Clone)]
pub struct Constructor {
    /// 构造函数名称
    name: &'static str,
    /// 参数类型列表（按参数顺序）
    parameters: Vec<TypeKey>,
    /// 调用函数
    invoke: ConstructFn,
}

impl Constructor {
    /// 创建构造函数
    pub fn new<T, F>(name: &'static str, parameters: Vec<TypeKey>, body: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn(&mut Arguments) -> ConstructionResult<T> + Send + Sync + 'static,
    {
        Self {
            name,
            parameters,
            invoke: Arc::new(move |mut args: Arguments| body(&mut args).map(Instance::new)),
        }
    }

    /// 创建无参构造函数
    pub fn nullary<T, F>(name: &'static str, body: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self::new(name, Vec::new(), move |_| Ok(body()))
    }

    /// 基于 `Default` 的构造函数
    pub fn from_default<T>() -> Self
    where
        T: Default + Send + Sync + 'static,
    {
        Self::nullary("default", T::default)
    }

    /// 构造函数名称
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// 参数类型列表
    pub fn parameters(&self) -> &[TypeKey] {
        &self.parameters
    }

    /// 参数数量
    pub fn arity(&self) -> usize {
        self.parameters.len()
    }

    /// 使用已解析的参数调用构造函数
    pub fn invoke(&self, args: Arguments) -> ConstructionResult<Instance> {
        (self.invoke)(args)
    }
}

impl fmt::Debug for Constructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constructor")
            .field("name", &self.name)
            .field("parameters", &self.parameters)
            .field("invoke", &"<function>")
            .finish()
    }
}

/// 属性注入标记
#[derive(Clone)]
pub struct PropertyInjection {
    /// 属性名称
    name: &'static str,
    /// 属性声明的依赖类型
    ty: TypeKey,
    /// 设置函数
    setter: PropertySetterFn,
}

impl PropertyInjection {
    /// 创建属性注入标记
    ///
    /// `setter` 在实例以 `O` 视图出现时被调用，依赖以 `Box<D>` 形式传入。
    pub fn new<O, D, F>(name: &'static str, setter: F) -> Self
    where
        O: ?Sized + 'static,
        D: ?Sized + 'static,
        F: Fn(&mut O, Box<D>) + Send + Sync + 'static,
    {
        let setter: PropertySetterFn = Arc::new(move |target: &mut Instance, value: Instance| {
            let actual = target.view_type();
            let target = target
                .view_mut::<O>()
                .ok_or_else(|| ConstructionError::TargetType {
                    expected: std::any::type_name::<O>().to_string(),
                    actual: actual.name().to_string(),
                })?;
            let value = value
                .into_box::<D>()
                .map_err(|value| ConstructionError::ArgumentType {
                    expected: std::any::type_name::<D>().to_string(),
                    actual: value.view_type().name().to_string(),
                })?;
            setter(target, value);
            Ok(())
        });

        Self {
            name,
            ty: TypeKey::of::<D>(),
            setter,
        }
    }

    /// 属性名称
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// 属性依赖类型
    pub fn property_type(&self) -> TypeKey {
        self.ty
    }

    /// 把已解析的依赖赋值给实例
    pub fn inject(&self, target: &mut Instance, value: Instance) -> ConstructionResult<()> {
        (self.setter)(target, value)
    }
}

impl fmt::Debug for PropertyInjection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyInjection")
            .field("name", &self.name)
            .field("ty", &self.ty)
            .finish()
    }
}

/// 导出标记
#[derive(Clone)]
pub struct ExportMarker {
    /// 显式的请求类型，`None` 表示以自身类型导出
    as_type: Option<TypeKey>,
    /// 转换为请求类型视图的函数
    coercion: Option<CoercionFn>,
}

impl ExportMarker {
    /// 以自身类型导出
    pub fn as_self() -> Self {
        Self {
            as_type: None,
            coercion: None,
        }
    }

    /// 以另一个类型导出，不提供视图转换
    pub fn as_type(as_type: TypeKey) -> Self {
        Self {
            as_type: Some(as_type),
            coercion: None,
        }
    }

    /// 以 `V` 视图导出具体类型 `T`
    ///
    /// ```ignore
    /// ExportMarker::as_view::<dyn CustomerDal, SqlCustomerDal>(|dal| dal)
    /// ```
    pub fn as_view<V, T>(cast: fn(Box<T>) -> Box<V>) -> Self
    where
        V: ?Sized + Send + Sync + 'static,
        T: Send + Sync + 'static,
    {
        let coercion: CoercionFn = Arc::new(move |instance: Instance| {
            let concrete = instance.concrete_type();
            let value = instance
                .into_box::<T>()
                .map_err(|instance| ConstructionError::TargetType {
                    expected: std::any::type_name::<T>().to_string(),
                    actual: instance.view_type().name().to_string(),
                })?;
            Ok(Instance::from_view::<V>(cast(value), concrete))
        });

        Self {
            as_type: Some(TypeKey::of::<V>()),
            coercion: Some(coercion),
        }
    }

    /// 显式的请求类型
    pub fn explicit_type(&self) -> Option<TypeKey> {
        self.as_type
    }

    /// 实际注册使用的请求类型
    pub fn requested_type(&self, own: TypeKey) -> TypeKey {
        self.as_type.unwrap_or(own)
    }

    /// 是否提供视图转换
    pub fn has_coercion(&self) -> bool {
        self.coercion.is_some()
    }

    /// 把实例转换为导出视图
    pub fn coerce(&self, instance: Instance) -> ConstructionResult<Instance> {
        match &self.coercion {
            Some(coercion) => coercion(instance),
            None => Ok(instance),
        }
    }
}

impl fmt::Debug for ExportMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExportMarker")
            .field("as_type", &self.as_type)
            .field("coercion", &self.coercion.as_ref().map(|_| "<function>"))
            .finish()
    }
}

/// 组件描述符
#[derive(Debug, Clone)]
pub struct ComponentDescriptor {
    /// 组件类型
    ty: TypeKey,
    /// 是否使用构造注入
    constructor_injection: bool,
    /// 属性注入标记（按声明顺序）
    properties: Vec<PropertyInjection>,
    /// 导出标记
    exports: Vec<ExportMarker>,
    /// 公共构造函数（按声明顺序）
    constructors: Vec<Constructor>,
}

impl ComponentDescriptor {
    /// 创建描述符构建器
    pub fn builder<T: ?Sized + 'static>() -> ComponentDescriptorBuilder {
        ComponentDescriptorBuilder::new(TypeKey::of::<T>())
    }

    /// 组件类型
    pub fn type_key(&self) -> TypeKey {
        self.ty
    }

    /// 是否使用构造注入
    pub fn uses_constructor_injection(&self) -> bool {
        self.constructor_injection
    }

    /// 属性注入标记
    pub fn properties(&self) -> &[PropertyInjection] {
        &self.properties
    }

    /// 导出标记
    pub fn exports(&self) -> &[ExportMarker] {
        &self.exports
    }

    /// 公共构造函数
    pub fn constructors(&self) -> &[Constructor] {
        &self.constructors
    }

    /// 是否符合批量注册条件
    pub fn qualifies_for_scan(&self) -> bool {
        self.constructor_injection || !self.properties.is_empty() || !self.exports.is_empty()
    }

    /// 查找导出到指定请求类型的标记
    pub fn export_for(&self, requested: TypeKey) -> Option<&ExportMarker> {
        self.exports
            .iter()
            .find(|export| export.requested_type(self.ty) == requested)
    }
}

/// 组件描述符构建器
#[derive(Debug)]
pub struct ComponentDescriptorBuilder {
    descriptor: ComponentDescriptor,
}

impl ComponentDescriptorBuilder {
    fn new(ty: TypeKey) -> Self {
        Self {
            descriptor: ComponentDescriptor {
                ty,
                constructor_injection: false,
                properties: Vec::new(),
                exports: Vec::new(),
                constructors: Vec::new(),
            },
        }
    }

    /// 标记为构造注入
    pub fn constructor_injection(mut self) -> Self {
        self.descriptor.constructor_injection = true;
        self
    }

    /// 添加公共构造函数
    pub fn constructor(mut self, constructor: Constructor) -> Self {
        self.descriptor.constructors.push(constructor);
        self
    }

    /// 批量添加公共构造函数
    pub fn constructors(mut self, constructors: impl IntoIterator<Item = Constructor>) -> Self {
        self.descriptor.constructors.extend(constructors);
        self
    }

    /// 添加属性注入标记
    pub fn property(mut self, property: PropertyInjection) -> Self {
        self.descriptor.properties.push(property);
        self
    }

    /// 添加导出标记
    pub fn export(mut self, export: ExportMarker) -> Self {
        self.descriptor.exports.push(export);
        self
    }

    /// 构建描述符
    pub fn build(self) -> ComponentDescriptor {
        self.descriptor
    }
}
