#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by the `AutoApi` crates.
//! Currently a single attribute, [`macro@autoapi_error`], which turns a plain enum into
//! a `thiserror` error with context propagation.
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! autoapi-derive.workspace = true
//! thiserror.workspace = true
//! ```

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Attribute macro for defining crate-level error enums.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]` when missing.
/// * **Context Support**: Generates a companion `...Ext` trait that adds `.context()`
///   to `Result<T, Error>` and to `Result<T, Source>` for every wrapped source error.
/// * **Standard Conversions**: Implements `From<Source>` for variants containing a
///   `source` field (or a field marked `#[source]`/`#[from]`), enabling `?`.
/// * **Internal Fallback**: Provides `From<&'static str>` and `From<String>` when an
///   `Internal` variant is present.
/// * **Kind Label**: Generates `fn kind(&self) -> &'static str` returning the variant
///   name, used as a structured field in log records.
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum** with named-field variants only.
/// 2. Variants that wrap a source must also carry `context: Option<Cow<'static, str>>`.
///
/// # Example
///
/// ```rust,ignore
/// use autoapi_derive::autoapi_error;
/// use std::borrow::Cow;
///
/// #[autoapi_error]
/// pub enum LoaderError {
///     #[error("IO error{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal fault{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn read(path: &str) -> Result<String, LoaderError> {
///     std::fs::read_to_string(path).context("Reading inventory")
/// }
/// ```
#[proc_macro_attribute]
pub fn autoapi_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}
