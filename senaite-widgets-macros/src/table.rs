//! `#[derive(WidgetTable)]` implementation.

use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Ident, LitStr, Path, Variant, parse_macro_input};

/// Parsed `#[widget(...)]` attribute of one variant.
struct WidgetArgs {
    selector: LitStr,
    factory: Path,
    name: Option<LitStr>,
}

impl WidgetArgs {
    fn from_variant(variant: &Variant) -> syn::Result<Self> {
        let mut selector = None;
        let mut factory = None;
        let mut name = None;
        let mut seen = false;

        for attr in &variant.attrs {
            if !attr.path().is_ident("widget") {
                continue;
            }
            seen = true;
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("selector") {
                    let lit: LitStr = meta.value()?.parse()?;
                    if lit.value().trim().is_empty() {
                        return Err(syn::Error::new(lit.span(), "widget selector must not be empty"));
                    }
                    selector = Some(lit);
                    Ok(())
                } else if meta.path.is_ident("factory") {
                    factory = Some(meta.value()?.parse::<Path>()?);
                    Ok(())
                } else if meta.path.is_ident("name") {
                    name = Some(meta.value()?.parse::<LitStr>()?);
                    Ok(())
                } else {
                    let key = meta
                        .path
                        .get_ident()
                        .map(ToString::to_string)
                        .unwrap_or_default();
                    Err(meta.error(format!("unknown widget attribute: {}", key)))
                }
            })?;
        }

        if !seen {
            return Err(syn::Error::new_spanned(
                &variant.ident,
                "widget kind requires #[widget(selector = \"...\", factory = Type)]",
            ));
        }
        let Some(selector) = selector else {
            return Err(syn::Error::new_spanned(
                &variant.ident,
                "widget kind requires a `selector`",
            ));
        };
        let Some(factory) = factory else {
            return Err(syn::Error::new_spanned(
                &variant.ident,
                "widget renderer required: add `factory = Type` to #[widget(...)]",
            ));
        };

        Ok(Self {
            selector,
            factory,
            name,
        })
    }
}

fn snake_case(ident: &Ident) -> String {
    let mut out = String::new();
    for (i, c) in ident.to_string().chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Implementation of `#[derive(WidgetTable)]`.
pub fn derive_widget_table_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(tokens) => TokenStream::from(tokens),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let enum_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let variants = match &input.data {
        Data::Enum(data_enum) => &data_enum.variants,
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "#[derive(WidgetTable)] can only be used on enums",
            ));
        }
    };

    let mut idents = Vec::new();
    let mut selectors = Vec::new();
    let mut names = Vec::new();
    let mut factories = Vec::new();

    for variant in variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "widget kinds must be fieldless variants",
            ));
        }
        let args = WidgetArgs::from_variant(variant)?;
        let name = args
            .name
            .unwrap_or_else(|| LitStr::new(&snake_case(&variant.ident), Span::call_site()));

        idents.push(&variant.ident);
        selectors.push(args.selector);
        names.push(name);
        factories.push(args.factory);
    }

    Ok(quote! {
        impl #impl_generics #enum_name #ty_generics #where_clause {
            /// All widget kinds in declaration order.
            pub const ALL: &'static [#enum_name #ty_generics] = &[#(#enum_name::#idents),*];
        }

        impl #impl_generics ::senaite_widgets::WidgetTable for #enum_name #ty_generics #where_clause {
            fn kinds() -> &'static [Self] {
                Self::ALL
            }

            fn selector(self) -> &'static str {
                match self {
                    #(#enum_name::#idents => #selectors,)*
                }
            }

            fn name(self) -> &'static str {
                match self {
                    #(#enum_name::#idents => #names,)*
                }
            }

            fn factory(self) -> ::std::sync::Arc<dyn ::senaite_widgets::Factory> {
                match self {
                    #(#enum_name::#idents => ::std::sync::Arc::new(
                        <#factories as ::core::default::Default>::default()
                    ),)*
                }
            }
        }
    })
}
