use proc_macro::TokenStream;
use quote::quote;
use syn::spanned::Spanned;
use syn::{DeriveInput, parse_macro_input};

/// #[derive(Inject)] 实现
/// 每个字段按声明类型解析为对应能力：
/// `field: <Ty as Capability>::resolve(scope)?`
pub(crate) fn expand(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);

    let fields = match &input.data {
        syn::Data::Struct(syn::DataStruct {
            fields: syn::Fields::Named(named),
            ..
        }) => &named.named,
        _ => {
            return syn::Error::new(input.span(), "#[derive(Inject)] supports only named-field struct")
                .to_compile_error()
                .into();
        }
    };

    let names: Vec<_> = fields.iter().filter_map(|f| f.ident.clone()).collect();
    let tys: Vec<_> = fields.iter().map(|f| f.ty.clone()).collect();

    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let out = quote! {
        impl #impl_generics ::paper_application::capability::Inject for #ident #ty_generics #where_clause {
            fn inject(
                scope: &::paper_application::container::Scope,
            ) -> ::paper_application::error::AppResult<Self> {
                ::std::result::Result::Ok(Self {
                    #( #names: <#tys as ::paper_application::capability::Capability>::resolve(scope)?, )*
                })
            }

            fn check(
                container: &::paper_application::container::Container,
            ) -> ::paper_application::error::AppResult<()> {
                #( <#tys as ::paper_application::capability::Capability>::check(container)?; )*
                ::std::result::Result::Ok(())
            }
        }
    };

    TokenStream::from(out)
}
