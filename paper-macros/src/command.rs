use crate::derive_utils::{apply_derives, ensure_serde_flag};
use crate::field_utils::default_every_field;
use proc_macro::TokenStream;
use quote::quote;
use syn::spanned::Spanned;
use syn::{Item, ItemStruct, parse_macro_input};

/// #[command]：根命令的参数结构
/// - 派生 Debug 与 Deserialize；
/// - 追加 `#[serde(deny_unknown_fields)]`，调用方传入未知参数名时反序列化失败。
pub(crate) fn expand_root(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as Item);
    let mut st = match named_struct(attr, input, "#[command]") {
        Ok(st) => st,
        Err(err) => return err.to_compile_error().into(),
    };

    apply_derives(&mut st.attrs, deserialize_derives());
    ensure_serde_flag(&mut st.attrs, "deny_unknown_fields");

    TokenStream::from(quote! { #st })
}

/// #[subscriber_command]：订阅者命令的参数结构（由事件字段按名填充）
/// - 派生 Debug 与 Deserialize；
/// - 每个字段追加 `#[serde(default)]`：事件缺失的字段取默认值；
/// - 不拒绝未知字段：事件中多余的字段被忽略。
pub(crate) fn expand_subscriber(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as Item);
    let mut st = match named_struct(attr, input, "#[subscriber_command]") {
        Ok(st) => st,
        Err(err) => return err.to_compile_error().into(),
    };

    apply_derives(&mut st.attrs, deserialize_derives());
    if let syn::Fields::Named(fields) = &mut st.fields {
        default_every_field(fields);
    }

    TokenStream::from(quote! { #st })
}

fn deserialize_derives() -> Vec<syn::Path> {
    vec![
        syn::parse_quote!(Debug),
        syn::parse_quote!(serde::Deserialize),
    ]
}

fn named_struct(attr: TokenStream, input: Item, macro_name: &str) -> syn::Result<ItemStruct> {
    if !attr.is_empty() {
        return Err(syn::Error::new(
            proc_macro2::TokenStream::from(attr).span(),
            format!("{macro_name} takes no arguments"),
        ));
    }
    match input {
        Item::Struct(st) if matches!(st.fields, syn::Fields::Named(_)) => Ok(st),
        Item::Struct(st) => Err(syn::Error::new(
            st.span(),
            format!("{macro_name} supports only named-field struct, e.g., struct X {{}}"),
        )),
        other => Err(syn::Error::new(other.span(), format!("{macro_name} only on struct"))),
    }
}
