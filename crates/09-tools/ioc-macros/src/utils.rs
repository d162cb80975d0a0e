//! 宏工具函数

use syn::{GenericArgument, PathArguments, ReturnType, Type};

/// 如果类型是 `Wrapper<T>`，返回 `T`
///
/// 只比较最后一个路径段，`std::boxed::Box<T>` 和 `Box<T>` 都能识别。
pub fn single_generic_argument<'a>(ty: &'a Type, wrapper: &str) -> Option<&'a Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    let segment = type_path.path.segments.last()?;
    if segment.ident != wrapper {
        return None;
    }
    match &segment.arguments {
        PathArguments::AngleBracketed(args) => match args.args.first() {
            Some(GenericArgument::Type(inner)) => Some(inner),
            _ => None,
        },
        _ => None,
    }
}

/// 检查类型是否为 trait object（`dyn Trait`）
pub fn is_trait_object(ty: &Type) -> bool {
    match ty {
        Type::TraitObject(_) => true,
        Type::Paren(paren) => is_trait_object(&paren.elem),
        Type::Group(group) => is_trait_object(&group.elem),
        _ => false,
    }
}

/// 构造函数返回值形式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnKind {
    /// 返回 `Self`
    Infallible,
    /// 返回 `Result<Self, E>`
    Fallible,
}

/// 判断返回类型是否构成构造函数
pub fn constructor_return(output: &ReturnType, self_ty: &Type) -> Option<ReturnKind> {
    let ReturnType::Type(_, ty) = output else {
        return None;
    };

    if is_self_type(ty, self_ty) {
        return Some(ReturnKind::Infallible);
    }

    single_generic_argument(ty, "Result")
        .filter(|inner| is_self_type(inner, self_ty))
        .map(|_| ReturnKind::Fallible)
}

fn is_self_type(ty: &Type, self_ty: &Type) -> bool {
    if let Type::Path(type_path) = ty {
        if type_path.qself.is_none() && type_path.path.is_ident("Self") {
            return true;
        }
    }
    type_tokens(ty) == type_tokens(self_ty)
}

fn type_tokens(ty: &Type) -> String {
    quote::quote!(#ty).to_string()
}
