//! Parsing of derive input into record and enum shapes.

use syn::{spanned::Spanned, Attribute, Data, DeriveInput, Fields, Ident, LitStr, Type};

/// A parsed derive target.
#[derive(Debug)]
pub enum Target {
    /// A struct with named fields.
    Record(RecordDef),
    /// An enum whose variants carry no data.
    Tags(TagsDef),
}

/// A struct with named fields.
#[derive(Debug)]
pub struct RecordDef {
    /// The struct name.
    pub name: Ident,
    /// Fields in declaration order.
    pub fields: Vec<FieldDef>,
}

/// One named field.
#[derive(Debug)]
pub struct FieldDef {
    /// The field name as it appears on the wire.
    pub name: String,
    /// The declared type.
    pub ty: Type,
}

/// An enum with unit variants only.
#[derive(Debug)]
pub struct TagsDef {
    /// The enum name.
    pub name: Ident,
    /// Variant identifiers in declaration order.
    pub variants: Vec<Ident>,
    /// Wire names of the variants, after serde renames.
    pub tags: Vec<String>,
}

impl Target {
    /// Classifies the derive input, rejecting shapes without a descriptor.
    pub fn parse(input: DeriveInput) -> syn::Result<Self> {
        if !input.generics.params.is_empty() {
            return Err(syn::Error::new(
                input.generics.span(),
                "Describe cannot be derived for generic types",
            ));
        }

        match input.data {
            Data::Struct(data) => match data.fields {
                Fields::Named(named) => {
                    let fields = named
                        .named
                        .into_iter()
                        .filter_map(|field| {
                            let ident = field.ident?;
                            let name = match serde_value(&field.attrs, "rename") {
                                Ok(renamed) => renamed.unwrap_or_else(|| strip_raw(&ident)),
                                Err(err) => return Some(Err(err)),
                            };
                            Some(Ok(FieldDef { name, ty: field.ty }))
                        })
                        .collect::<syn::Result<Vec<_>>>()?;
                    Ok(Self::Record(RecordDef {
                        name: input.ident,
                        fields,
                    }))
                }
                other => Err(syn::Error::new(
                    other.span(),
                    "Describe requires a struct with named fields",
                )),
            },
            Data::Enum(data) => {
                let rename_all = serde_value(&input.attrs, "rename_all")?;
                let mut variants = Vec::with_capacity(data.variants.len());
                let mut tags = Vec::with_capacity(data.variants.len());
                for variant in data.variants {
                    if !matches!(variant.fields, Fields::Unit) {
                        return Err(syn::Error::new(
                            variant.span(),
                            "Describe enums must only have unit variants",
                        ));
                    }
                    let tag = match serde_value(&variant.attrs, "rename")? {
                        Some(renamed) => renamed,
                        None => match &rename_all {
                            Some(rule) => apply_rename_all(rule, &variant.ident.to_string())
                                .ok_or_else(|| {
                                    syn::Error::new(
                                        variant.span(),
                                        format!("unsupported rename_all rule \"{rule}\""),
                                    )
                                })?,
                            None => variant.ident.to_string(),
                        },
                    };
                    tags.push(tag);
                    variants.push(variant.ident);
                }
                Ok(Self::Tags(TagsDef {
                    name: input.ident,
                    variants,
                    tags,
                }))
            }
            Data::Union(data) => Err(syn::Error::new(
                data.union_token.span(),
                "Describe cannot be derived for unions",
            )),
        }
    }
}

/// Reads `#[serde(<key> = "...")]` from a set of attributes.
fn serde_value(attrs: &[Attribute], key: &str) -> syn::Result<Option<String>> {
    let mut found = None;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("serde")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident(key) {
                let lit: LitStr = meta.value()?.parse()?;
                found = Some(lit.value());
            } else if meta.input.peek(syn::Token![=]) {
                let _: syn::Expr = meta.value()?.parse()?;
            } else if meta.input.peek(syn::token::Paren) {
                let content;
                syn::parenthesized!(content in meta.input);
                let _: proc_macro2::TokenStream = content.parse()?;
            }
            Ok(())
        })?;
    }
    Ok(found)
}

/// Applies a serde `rename_all` rule to a variant name.
fn apply_rename_all(rule: &str, variant: &str) -> Option<String> {
    let snake = || {
        let mut out = String::with_capacity(variant.len() + 4);
        for (i, c) in variant.char_indices() {
            if c.is_uppercase() && i > 0 {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        }
        out
    };
    match rule {
        "lowercase" => Some(variant.to_ascii_lowercase()),
        "UPPERCASE" => Some(variant.to_ascii_uppercase()),
        "snake_case" => Some(snake()),
        "SCREAMING_SNAKE_CASE" => Some(snake().to_ascii_uppercase()),
        _ => None,
    }
}

fn strip_raw(ident: &Ident) -> String {
    let name = ident.to_string();
    name.strip_prefix("r#").map(str::to_string).unwrap_or(name)
}
