//! Facade crate for the convention engine and its shared modules.
//! Re-exports domain/kernel primitives and wires settings into an engine run.
//! Keep this crate thin: it should compose other crates, not implement conventions.
//!
//! ## Usage
//! - Add `autoapi` (the `kernel` feature is on by default for file loading).
//! - Call [`generate`] with loaded settings and a type inventory, or
//!   [`generate_from_files`] to do both loads in one step.

use std::borrow::Cow;
use tracing::debug;

pub use autoapi_convention as convention;
pub use autoapi_convention::{ConventionConfig, ConventionEngine, RouteTable};
pub use autoapi_domain as domain;
#[cfg(feature = "kernel")]
pub use autoapi_kernel as kernel;

use autoapi_convention::ConventionError;
use autoapi_domain::inventory::ModuleDescriptor;
use autoapi_domain::settings::Settings;

/// Errors surfaced by the facade entry points.
#[autoapi_derive::autoapi_error]
pub enum AutoApiError {
    #[error("{source}{}", format_context(.context))]
    Convention { source: ConventionError, context: Option<Cow<'static, str>> },

    #[cfg(feature = "kernel")]
    #[error("{source}{}", format_context(.context))]
    Kernel { source: autoapi_kernel::KernelError, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// Validates the `[auto_api]` section and runs the engine once over `modules`.
///
/// # Errors
/// Returns [`AutoApiError::Convention`] for invalid settings or a malformed inventory.
pub fn generate(settings: &Settings, modules: &[ModuleDescriptor]) -> Result<RouteTable, AutoApiError> {
    let config = ConventionConfig::from_settings(&settings.auto_api)?;
    let table = ConventionEngine::new(config).run(modules)?;
    debug!(services = table.services.len(), "Route table generated");
    Ok(table)
}

/// Loads settings (layered with `AUTOAPI__*` environment overrides) and an inventory
/// file, then calls [`generate`].
///
/// # Errors
/// Returns [`AutoApiError::Kernel`] if either file cannot be loaded, otherwise the
/// errors of [`generate`].
#[cfg(feature = "kernel")]
pub fn generate_from_files(
    settings: Option<impl AsRef<std::path::Path>>,
    inventory: impl AsRef<std::path::Path>,
) -> Result<RouteTable, AutoApiError> {
    let settings = autoapi_kernel::config::load_settings(settings)?;
    let modules = autoapi_kernel::inventory::load_inventory(inventory)?;
    generate(&settings, &modules)
}
