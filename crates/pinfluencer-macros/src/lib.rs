//! Procedural macros for Pinfluencer records.
//!
//! `#[derive(Describe)]` emits the compile-time descriptor consumed by the
//! object mapper, the payload validator and the fixture generator.
//!
//! - On a struct with named fields it implements `Describe` and `Record`,
//!   listing every field with the `Kind` of its declared type.
//! - On an enum with unit variants only it implements `Describe` and
//!   `Tagged`, listing the variant names.
//!
//! # Example
//!
//! ```rust,ignore
//! use pinfluencer_core::schema::Describe;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Default, Serialize, Deserialize, Describe)]
//! pub struct BrandRequest {
//!     pub brand_name: String,
//!     pub values: Vec<ValueEnum>,
//! }
//! ```

mod describe;
mod parse;

use proc_macro::TokenStream;

/// Derives the schema descriptor of a record or the tag table of a unit enum.
///
/// The generated code refers to `::pinfluencer_core`, so the deriving crate
/// must depend on `pinfluencer-core`. Records must also implement
/// `Default`, `Serialize` and `Deserialize`.
///
/// # Generated Code
///
/// For a record the macro generates approximately:
///
/// ```rust,ignore
/// impl Record for BrandRequest {
///     fn schema() -> &'static Schema {
///         static SCHEMA: OnceLock<Schema> = OnceLock::new();
///         SCHEMA.get_or_init(|| Schema::new(
///             "BrandRequest",
///             vec![
///                 Field::new("brand_name", <String as Describe>::describe()),
///                 Field::new("values", <Vec<ValueEnum> as Describe>::describe()),
///             ],
///             defaults_of::<Self>,
///         ))
///     }
/// }
/// ```
#[proc_macro_derive(Describe)]
pub fn derive_describe(item: TokenStream) -> TokenStream {
    describe::expand_describe(item.into())
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
