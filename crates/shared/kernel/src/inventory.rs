//! Type inventories exported by the host introspection layer.
//!
//! An inventory file is a JSON array of modules, each listing its candidate types with
//! their capability trees, annotations, selectors and methods.

use crate::error::{KernelError, KernelErrorExt};
use autoapi_domain::inventory::ModuleDescriptor;
use std::path::Path;
use tracing::{debug, info};

/// Reads and parses an inventory file.
///
/// # Errors
/// * [`KernelError::Io`] if the file cannot be read.
/// * [`KernelError::Json`] if it is not a valid inventory.
pub fn load_inventory(path: impl AsRef<Path>) -> Result<Vec<ModuleDescriptor>, KernelError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).context(format!("reading {}", path.display()))?;
    let modules = parse_inventory(&raw).context(format!("parsing {}", path.display()))?;

    info!(
        path = %path.display(),
        modules = modules.len(),
        types = modules.iter().map(|m| m.types.len()).sum::<usize>(),
        "Inventory loaded"
    );
    Ok(modules)
}

/// Parses an inventory from its JSON text.
///
/// # Errors
/// Returns [`KernelError::Json`] if `raw` is not a valid inventory.
pub fn parse_inventory(raw: &str) -> Result<Vec<ModuleDescriptor>, KernelError> {
    let modules: Vec<ModuleDescriptor> = serde_json::from_str(raw)?;
    debug!(modules = modules.len(), "Inventory parsed");
    Ok(modules)
}
