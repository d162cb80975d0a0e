//! 公共构造函数收集宏实现

use crate::utils::{constructor_return, single_generic_argument, ReturnKind};
use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{Error, FnArg, ImplItem, ImplItemFn, ItemImpl, Result, Type, Visibility};

/// 实现 #[component_constructors] 宏
pub fn component_constructors_impl(input: ItemImpl) -> TokenStream {
    let generated = match expand(&input) {
        Ok(tokens) => tokens,
        Err(err) => err.to_compile_error(),
    };

    TokenStream::from(quote! {
        #input

        #generated
    })
}

/// 收集构造函数签名
fn collect(input: &ItemImpl) -> Vec<(&ImplItemFn, ReturnKind)> {
    input
        .items
        .iter()
        .filter_map(|item| match item {
            ImplItem::Fn(method) => Some(method),
            _ => None,
        })
        .filter(|method| matches!(method.vis, Visibility::Public(_)))
        .filter(|method| method.sig.receiver().is_none() && method.sig.generics.params.is_empty())
        .filter_map(|method| {
            constructor_return(&method.sig.output, &input.self_ty).map(|kind| (method, kind))
        })
        .collect()
}

fn expand(input: &ItemImpl) -> Result<proc_macro2::TokenStream> {
    if let Some((_, path, _)) = &input.trait_ {
        return Err(Error::new_spanned(path, "#[component_constructors] 只能用于固有 impl 块"));
    }

    let self_ty = &input.self_ty;
    let (impl_generics, _, where_clause) = input.generics.split_for_impl();

    let constructors = collect(input)
        .into_iter()
        .map(|(method, kind)| constructor_tokens(method, kind))
        .collect::<Result<Vec<_>>>()?;

    Ok(quote! {
        impl #impl_generics ::ioc_common::ConstructorSet for #self_ty #where_clause {
            fn constructors() -> ::std::vec::Vec<::ioc_common::Constructor> {
                ::std::vec![#(#constructors),*]
            }
        }
    })
}

/// 生成单个构造函数
fn constructor_tokens(method: &ImplItemFn, kind: ReturnKind) -> Result<proc_macro2::TokenStream> {
    let ident = &method.sig.ident;
    let name = ident.to_string();

    let mut keys = Vec::new();
    let mut values = Vec::new();
    for input in &method.sig.inputs {
        let FnArg::Typed(pat_type) = input else {
            continue;
        };
        let (key, value) = parameter_tokens(&pat_type.ty)?;
        keys.push(key);
        values.push(value);
    }

    let args = if values.is_empty() {
        format_ident!("_args")
    } else {
        format_ident!("args")
    };
    let values = values.iter().map(|value| quote! { #args.#value? });

    let call = quote! { Self::#ident(#(#values),*) };
    let body = match kind {
        ReturnKind::Infallible => quote! { ::std::result::Result::Ok(#call) },
        ReturnKind::Fallible => quote! { #call.map_err(::ioc_common::ConstructionError::failed) },
    };

    Ok(quote! {
        ::ioc_common::Constructor::new(
            #name,
            ::std::vec![#(#keys),*],
            |#args: &mut ::ioc_common::Arguments| -> ::ioc_common::ConstructionResult<Self> {
                #body
            },
        )
    })
}

/// 参数类型对应的类型标识和取参表达式
fn parameter_tokens(ty: &Type) -> Result<(proc_macro2::TokenStream, proc_macro2::TokenStream)> {
    match ty {
        Type::Reference(_) => Err(Error::new_spanned(ty, "构造函数参数不能是引用，请使用 Box<T> 或 T")),
        Type::ImplTrait(_) => Err(Error::new_spanned(ty, "构造函数参数不能是 impl Trait，请使用 Box<dyn Trait>")),
        _ => Ok(match single_generic_argument(ty, "Box") {
            Some(inner) => (
                quote! { ::ioc_common::TypeKey::of::<#inner>() },
                quote! { next::<#inner>() },
            ),
            None => (
                quote! { ::ioc_common::TypeKey::of::<#ty>() },
                quote! { next_value::<#ty>() },
            ),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_collect_public_constructors_in_order() {
        let input: ItemImpl = parse_quote! {
            impl CustomerBll {
                pub fn new(dal: Box<dyn CustomerDal>) -> Self {
                    Self { dal }
                }

                fn private() -> Self {
                    unimplemented!()
                }

                pub fn with_name(name: String) -> Result<CustomerBll, std::io::Error> {
                    unimplemented!()
                }

                pub fn name(&self) -> &str {
                    "bll"
                }

                pub fn helper() -> u32 {
                    1
                }
            }
        };

        let collected: Vec<_> = collect(&input)
            .into_iter()
            .map(|(method, kind)| (method.sig.ident.to_string(), kind))
            .collect();

        assert_eq!(
            collected,
            vec![
                ("new".to_string(), ReturnKind::Infallible),
                ("with_name".to_string(), ReturnKind::Fallible),
            ]
        );
    }

    #[test]
    fn test_reference_parameter_is_rejected() {
        let ty: Type = parse_quote!(&Logger);
        assert!(parameter_tokens(&ty).is_err());
    }

    #[test]
    fn test_trait_impl_is_rejected() {
        let input: ItemImpl = parse_quote! {
            impl Default for CustomerBll {
                fn default() -> Self {
                    unimplemented!()
                }
            }
        };
        assert!(expand(&input).is_err());
    }
}
