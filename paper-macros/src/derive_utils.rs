use quote::ToTokens;
use syn::{Attribute, Token, punctuated::Punctuated};

// 拆分出已有 derive 列表与其余属性
fn split_derives(attrs: &[Attribute]) -> (Vec<Attribute>, Vec<syn::Path>) {
    let mut retained = Vec::new();
    let mut existing = Vec::new();
    for attr in attrs {
        if attr.path().is_ident("derive") {
            if let Ok(list) = attr.parse_args_with(Punctuated::<syn::Path, Token![,]>::parse_terminated) {
                existing.extend(list);
            }
        } else {
            retained.push(attr.clone());
        }
    }
    (retained, existing)
}

// Serialize 与 serde::Serialize 视为同一项
fn derive_key(p: &syn::Path) -> String {
    match p.segments.last() {
        Some(last) => match last.ident.to_string().as_str() {
            name @ ("Serialize" | "Deserialize") => format!("serde::{name}"),
            name => name.to_string(),
        },
        None => p.to_token_stream().to_string(),
    }
}

/// 合并 required 与已有 derive（去重，required 在前），并将 derive 放在属性首位，
/// 以保证随后追加的 `#[serde(..)]` 辅助属性位于 derive 之后。
pub(crate) fn apply_derives(attrs: &mut Vec<Attribute>, required: Vec<syn::Path>) {
    let (retained, existing) = split_derives(attrs);

    let mut seen = std::collections::HashSet::<String>::new();
    let merged: Vec<syn::Path> = required
        .into_iter()
        .chain(existing)
        .filter(|p| seen.insert(derive_key(p)))
        .collect();

    let derive: Attribute = syn::parse_quote!(#[derive(#(#merged),*)]);
    *attrs = std::iter::once(derive).chain(retained).collect();
}

/// 若不存在同名的 `#[serde(<flag>)]`，则追加
pub(crate) fn ensure_serde_flag(attrs: &mut Vec<Attribute>, flag: &str) {
    let present = attrs.iter().any(|attr| {
        attr.path().is_ident("serde") && attr.to_token_stream().to_string().contains(flag)
    });
    if !present {
        let ident = syn::Ident::new(flag, proc_macro2::Span::call_site());
        attrs.push(syn::parse_quote!(#[serde(#ident)]));
    }
}
