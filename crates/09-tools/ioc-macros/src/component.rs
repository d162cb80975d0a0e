//! 组件派生宏实现

use crate::utils::{is_trait_object, single_generic_argument};
use proc_macro::TokenStream;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Error, Field, Fields, Ident, Result, Token, Type};

/// 组件参数
#[derive(Default)]
pub struct ComponentArgs {
    /// 构造注入标记
    pub import_constructor: bool,
    /// 使用 `Default` 作为构造函数
    pub use_default: bool,
    /// 导出标记（按声明顺序）
    pub exports: Vec<ExportArg>,
}

/// 导出参数
pub enum ExportArg {
    /// 以自身类型导出
    Own,
    /// 以指定类型导出
    As(Box<Type>),
}

impl ComponentArgs {
    /// 从结构体的 `#[component(...)]` 属性中解析参数
    pub fn from_attributes(attrs: &[Attribute]) -> Result<Self> {
        let mut args = ComponentArgs::default();

        for attr in attrs {
            if !attr.path().is_ident("component") {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("import_constructor") {
                    args.import_constructor = true;
                } else if meta.path.is_ident("default") {
                    args.use_default = true;
                } else if meta.path.is_ident("export") {
                    if meta.input.peek(Token![=]) {
                        let ty: Type = meta.value()?.parse()?;
                        args.exports.push(ExportArg::As(Box::new(ty)));
                    } else {
                        args.exports.push(ExportArg::Own);
                    }
                } else {
                    return Err(meta.error("未知的 component 参数"));
                }
                Ok(())
            })?;
        }

        Ok(args)
    }
}

/// 属性注入字段
pub struct ImportField {
    /// 字段名
    pub ident: Ident,
    /// 注入的依赖类型
    pub dependency: Type,
    /// 字段是否保存 `Box<T>`
    pub boxed: bool,
}

impl ImportField {
    /// 解析带 `#[import]` 的字段，其余字段返回 `None`
    pub fn from_field(field: &Field) -> Result<Option<Self>> {
        if !field.attrs.iter().any(|attr| attr.path().is_ident("import")) {
            return Ok(None);
        }

        let ident = field
            .ident
            .clone()
            .ok_or_else(|| Error::new_spanned(field, "#[import] 只能用于具名字段"))?;

        let inner = single_generic_argument(&field.ty, "Option").ok_or_else(|| {
            Error::new_spanned(&field.ty, "#[import] 字段的类型必须是 Option<Box<T>> 或 Option<T>")
        })?;

        let (dependency, boxed) = match single_generic_argument(inner, "Box") {
            Some(boxed) => (boxed.clone(), true),
            None => (inner.clone(), false),
        };

        Ok(Some(Self {
            ident,
            dependency,
            boxed,
        }))
    }
}

/// 实现 #[derive(Component)] 宏
pub fn derive_component_impl(input: DeriveInput) -> TokenStream {
    match expand(&input) {
        Ok(tokens) => TokenStream::from(tokens),
        Err(err) => TokenStream::from(err.to_compile_error()),
    }
}

fn expand(input: &DeriveInput) -> Result<proc_macro2::TokenStream> {
    let struct_name = &input.ident;
    let args = ComponentArgs::from_attributes(&input.attrs)?;

    let Data::Struct(data) = &input.data else {
        return Err(Error::new_spanned(struct_name, "Component 只能派生在结构体上"));
    };

    let mut imports = Vec::new();
    if let Fields::Named(fields) = &data.fields {
        for field in &fields.named {
            if let Some(import) = ImportField::from_field(field)? {
                imports.push(import);
            }
        }
    } else {
        for field in data.fields.iter() {
            ImportField::from_field(field)?;
        }
    }

    let constructor_marker = args
        .import_constructor
        .then(|| quote! { .constructor_injection() });

    let constructors = if args.use_default {
        quote! { ::std::vec![::ioc_common::Constructor::from_default::<Self>()] }
    } else {
        quote! { <Self as ::ioc_common::ConstructorSet>::constructors() }
    };

    let properties = imports.iter().map(|import| {
        let ident = &import.ident;
        let name = ident.to_string();
        let dependency = &import.dependency;
        let value = if import.boxed {
            quote! { value }
        } else {
            quote! { *value }
        };
        quote! {
            .property(::ioc_common::PropertyInjection::new::<Self, #dependency, _>(
                #name,
                |target, value| {
                    target.#ident = ::std::option::Option::Some(#value);
                },
            ))
        }
    });

    let exports = args.exports.iter().map(|export| match export {
        ExportArg::Own => quote! { .export(::ioc_common::ExportMarker::as_self()) },
        ExportArg::As(ty) if is_trait_object(ty) => quote! {
            .export(::ioc_common::ExportMarker::as_view::<#ty, Self>(
                |component: ::std::boxed::Box<Self>| -> ::std::boxed::Box<#ty> { component },
            ))
        },
        ExportArg::As(ty) => quote! {
            .export(::ioc_common::ExportMarker::as_type(::ioc_common::TypeKey::of::<#ty>()))
        },
    });

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::ioc_common::Injectable for #struct_name #ty_generics #where_clause {
            fn descriptor() -> ::ioc_common::ComponentDescriptor {
                ::ioc_common::ComponentDescriptor::builder::<Self>()
                    #constructor_marker
                    .constructors(#constructors)
                    #(#properties)*
                    #(#exports)*
                    .build()
            }
        }
    })
}
