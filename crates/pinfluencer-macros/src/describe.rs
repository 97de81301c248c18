//! Expansion of `#[derive(Describe)]`.

use proc_macro2::TokenStream;
use quote::quote;
use syn::DeriveInput;

use crate::parse::{RecordDef, TagsDef, Target};

/// Expands the derive for either target shape.
pub fn expand_describe(item: TokenStream) -> syn::Result<TokenStream> {
    let input: DeriveInput = syn::parse2(item)?;

    Ok(match Target::parse(input)? {
        Target::Record(record) => expand_record(&record),
        Target::Tags(tags) => expand_tags(&tags),
    })
}

fn expand_record(record: &RecordDef) -> TokenStream {
    let name = &record.name;
    let name_str = name.to_string();

    let fields = record.fields.iter().map(|field| {
        let field_name = &field.name;
        let ty = &field.ty;
        quote! {
            ::pinfluencer_core::schema::Field::new(
                #field_name,
                <#ty as ::pinfluencer_core::schema::Describe>::describe(),
            )
        }
    });

    quote! {
        impl ::pinfluencer_core::schema::Describe for #name {
            fn describe() -> ::pinfluencer_core::schema::Kind {
                ::pinfluencer_core::schema::Kind::Record(
                    <Self as ::pinfluencer_core::schema::Record>::schema,
                )
            }
        }

        impl ::pinfluencer_core::schema::Record for #name {
            fn schema() -> &'static ::pinfluencer_core::schema::Schema {
                static SCHEMA: ::std::sync::OnceLock<::pinfluencer_core::schema::Schema> =
                    ::std::sync::OnceLock::new();
                SCHEMA.get_or_init(|| {
                    ::pinfluencer_core::schema::Schema::new(
                        #name_str,
                        ::std::vec![#(#fields),*],
                        ::pinfluencer_core::schema::defaults_of::<Self>,
                    )
                })
            }
        }
    }
}

fn expand_tags(tags: &TagsDef) -> TokenStream {
    let name = &tags.name;
    let variants = &tags.variants;
    let tag_strs = &tags.tags;

    quote! {
        impl ::pinfluencer_core::schema::Describe for #name {
            fn describe() -> ::pinfluencer_core::schema::Kind {
                ::pinfluencer_core::schema::Kind::Enum(
                    <Self as ::pinfluencer_core::schema::Tagged>::TAGS,
                )
            }
        }

        impl ::pinfluencer_core::schema::Tagged for #name {
            const TAGS: &'static [&'static str] = &[#(#tag_strs),*];

            fn tag(&self) -> &'static str {
                match self {
                    #(Self::#variants => #tag_strs,)*
                }
            }

            fn from_tag(tag: &str) -> ::std::option::Option<Self> {
                match tag {
                    #(#tag_strs => ::std::option::Option::Some(Self::#variants),)*
                    _ => ::std::option::Option::None,
                }
            }
        }
    }
}
