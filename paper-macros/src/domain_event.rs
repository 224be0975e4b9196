use crate::derive_utils::apply_derives;
use crate::field_utils::append_field_if_missing;
use proc_macro::TokenStream;
use quote::quote;
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{Expr, Ident, Item, Result, Token, Type, parse::Parse, parse::ParseStream, parse_macro_input};

const OCCURRED_AT: &str = "occurred_at";

/// #[domain_event] 宏实现
/// - 仅支持无泛型的具名字段结构体；
/// - 若缺失则在末尾追加 `occurred_at: DateTime<Utc>`；
/// - 合并/追加派生：Debug, Clone, PartialEq, Serialize, Deserialize；
/// - 生成 `new(<除 occurred_at 外的字段>)` 与 `::paper_domain::domain_event::DomainEvent` 实现。
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let cfg = parse_macro_input!(attr as EventAttrConfig);
    let input = parse_macro_input!(item as Item);

    let mut st = match input {
        Item::Struct(s) => s,
        other => {
            return syn::Error::new(other.span(), "#[domain_event] only on struct")
                .to_compile_error()
                .into();
        }
    };

    if !st.generics.params.is_empty() {
        return syn::Error::new(st.generics.span(), "#[domain_event] does not support generics")
            .to_compile_error()
            .into();
    }

    let fields_named = match &mut st.fields {
        syn::Fields::Named(f) => f,
        _ => {
            return syn::Error::new(st.span(), "#[domain_event] supports only named-field struct")
                .to_compile_error()
                .into();
        }
    };

    let timestamp_ty: Type = syn::parse_quote! { ::chrono::DateTime<::chrono::Utc> };
    append_field_if_missing(fields_named, OCCURRED_AT, &timestamp_ty);

    // 构造函数参数：事件自身的业务字段
    let (names, tys): (Vec<Ident>, Vec<Type>) = fields_named
        .named
        .iter()
        .filter_map(|f| {
            let ident = f.ident.clone()?;
            (ident != OCCURRED_AT).then(|| (ident, f.ty.clone()))
        })
        .unzip();

    let required: Vec<syn::Path> = vec![
        syn::parse_quote!(Debug),
        syn::parse_quote!(Clone),
        syn::parse_quote!(PartialEq),
        syn::parse_quote!(serde::Serialize),
        syn::parse_quote!(serde::Deserialize),
    ];
    apply_derives(&mut st.attrs, required);

    let ident = &st.ident;
    let kind = cfg
        .kind
        .unwrap_or_else(|| syn::LitStr::new(&ident.to_string(), ident.span()));

    let out = quote! {
        #st

        impl #ident {
            /// 构造事件，发生时间取构造时刻
            #[allow(clippy::too_many_arguments)]
            pub fn new(#( #names: #tys ),*) -> Self {
                Self {
                    #( #names, )*
                    occurred_at: ::chrono::Utc::now(),
                }
            }
        }

        impl ::paper_domain::domain_event::DomainEvent for #ident {
            const KIND: &'static str = #kind;

            fn occurred_at(&self) -> ::chrono::DateTime<::chrono::Utc> {
                self.occurred_at
            }
        }
    };

    TokenStream::from(out)
}

// 解析键值参数：kind = "<str>"
struct EventAttrConfig {
    kind: Option<syn::LitStr>,
}

impl Parse for EventAttrConfig {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut kind: Option<syn::LitStr> = None;

        if input.is_empty() {
            return Ok(Self { kind });
        }

        let pairs: Punctuated<syn::ExprAssign, Token![,]> =
            Punctuated::<syn::ExprAssign, Token![,]>::parse_terminated(input)?;

        for assign in pairs {
            let key = match *assign.left {
                Expr::Path(p) if p.path.segments.len() == 1 => p.path.segments[0].ident.clone(),
                other => return Err(syn::Error::new(other.span(), "invalid attribute key")),
            };
            match key.to_string().as_str() {
                "kind" => {
                    if kind.is_some() {
                        return Err(syn::Error::new(key.span(), "duplicate key 'kind' in attribute"));
                    }
                    match *assign.right {
                        Expr::Lit(syn::ExprLit {
                            lit: syn::Lit::Str(lit),
                            ..
                        }) => kind = Some(lit),
                        other => {
                            return Err(syn::Error::new(
                                other.span(),
                                "expected string literal for 'kind'",
                            ));
                        }
                    }
                }
                _ => return Err(syn::Error::new(key.span(), "unknown key; expected 'kind'")),
            }
        }

        Ok(Self { kind })
    }
}
