use syn::{Field, FieldsNamed, Type};

pub(crate) fn has_field_named(fields: &FieldsNamed, name: &str) -> bool {
    fields
        .named
        .iter()
        .any(|f| f.ident.as_ref().map(|i| i == name).unwrap_or(false))
}

/// 若缺失则在末尾追加字段 `pub <name>: <ty>`，保留既有字段顺序
pub(crate) fn append_field_if_missing(fields: &mut FieldsNamed, name: &str, ty: &Type) {
    if has_field_named(fields, name) {
        return;
    }
    let ident = syn::Ident::new(name, proc_macro2::Span::call_site());
    let field: Field = syn::parse_quote! { pub #ident: #ty };
    fields.named.push(field);
}

/// 为每个未显式声明 `#[serde(default..)]` 的字段追加 `#[serde(default)]`
pub(crate) fn default_every_field(fields: &mut FieldsNamed) {
    for field in fields.named.iter_mut() {
        let has_default = field.attrs.iter().any(|attr| {
            attr.path().is_ident("serde")
                && quote::ToTokens::to_token_stream(attr)
                    .to_string()
                    .contains("default")
        });
        if !has_default {
            field.attrs.push(syn::parse_quote!(#[serde(default)]));
        }
    }
}
