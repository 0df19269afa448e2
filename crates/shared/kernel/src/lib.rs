//! Kernel utilities shared by the binaries.
//! Keep this crate lightweight: it loads layered settings and type inventories and
//! re-exports the domain models they deserialize into.
//!
//! ## Settings loading
//! ```rust,no_run
//! use autoapi_kernel::config::load_settings;
//!
//! let settings = load_settings(Some("autoapi.toml"))?;
//! assert!(!settings.auto_api.default_http_verb.is_empty());
//! # Ok::<(), autoapi_kernel::KernelError>(())
//! ```
//!
//! ## Inventory loading
//! ```rust
//! use autoapi_kernel::inventory::parse_inventory;
//!
//! let modules = parse_inventory(r#"[{ "name": "Acme.Orders", "types": [] }]"#)?;
//! assert_eq!(modules[0].name, "Acme.Orders");
//! # Ok::<(), autoapi_kernel::KernelError>(())
//! ```

pub mod config;
mod error;
pub mod inventory;

pub use crate::error::{KernelError, KernelErrorExt};
pub use autoapi_domain as domain;
