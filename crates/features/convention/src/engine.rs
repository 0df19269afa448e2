//! The convention pipeline: filter, classify, synthesize.

use crate::classifier::classify;
use crate::config::ConventionConfig;
use crate::error::{ConventionError, ConventionErrorExt};
use crate::filter::candidate_types;
use crate::model::RouteTable;
use crate::synthesizer::synthesize_service;
use autoapi_domain::inventory::ModuleDescriptor;
use tracing::{debug, info, instrument};

/// Runs the conventions over a type inventory.
///
/// The engine holds no state between runs: the same inventory and configuration always
/// produce the same [`RouteTable`].
#[derive(Debug, Clone)]
pub struct ConventionEngine {
    config: ConventionConfig,
}

impl ConventionEngine {
    #[must_use]
    pub const fn new(config: ConventionConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &ConventionConfig {
        &self.config
    }

    /// Derives the route table for every eligible service in `modules`.
    ///
    /// # Errors
    /// Returns [`ConventionError::InvalidInput`] if a participating type or one of its
    /// methods has a blank name. Nothing is returned for partially processed inventories.
    #[instrument(skip_all, fields(modules = modules.len()))]
    pub fn run(&self, modules: &[ModuleDescriptor]) -> Result<RouteTable, ConventionError> {
        let mut table = RouteTable::default();
        let mut skipped = 0usize;

        for (module, ty) in candidate_types(modules, self.config.module_filter_prefix()) {
            let eligibility = classify(ty);
            if !eligibility.is_eligible() {
                debug!(module = %module.name, service = %ty.name, reason = %eligibility, "Type skipped");
                skipped += 1;
                continue;
            }

            let service = synthesize_service(&self.config, module, ty, eligibility)
                .context(format!("module {}", module.name))?;
            table.services.push(service);
        }

        info!(
            services = table.services.len(),
            actions = table.action_count(),
            routes = table.routes().count(),
            skipped,
            "Conventions applied"
        );
        Ok(table)
    }
}

/// One-shot form of [`ConventionEngine::run`].
///
/// # Errors
/// See [`ConventionEngine::run`].
pub fn apply(
    config: &ConventionConfig,
    modules: &[ModuleDescriptor],
) -> Result<RouteTable, ConventionError> {
    ConventionEngine::new(config.clone()).run(modules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoapi_domain::constants::ENABLE_MARKER;
    use autoapi_domain::inventory::{CapabilityDescriptor, MethodDescriptor, TypeDescriptor, TypeFlags};

    fn service(name: &str, flags: TypeFlags) -> TypeDescriptor {
        let mut ty = TypeDescriptor::new(name);
        ty.flags = flags;
        ty.capabilities.push(CapabilityDescriptor::new(ENABLE_MARKER));
        ty.methods.push(MethodDescriptor::new("GetList"));
        ty
    }

    #[test]
    fn only_eligible_types_in_matching_modules_are_synthesized() {
        let modules = vec![
            ModuleDescriptor {
                name: "Acme.Orders".to_owned(),
                types: vec![
                    service("OrderAppService", TypeFlags::PUBLIC),
                    service("OrderBaseAppService", TypeFlags::PUBLIC | TypeFlags::ABSTRACT),
                    service("InternalAppService", TypeFlags::empty()),
                    TypeDescriptor::new("OrderRepository"),
                ],
            },
            ModuleDescriptor {
                name: "Vendor.Audit".to_owned(),
                types: vec![service("AuditAppService", TypeFlags::PUBLIC)],
            },
        ];
        let config = ConventionConfig::builder().module_filter_prefix("Acme").build().unwrap();

        let table = ConventionEngine::new(config).run(&modules).unwrap();
        let names: Vec<_> = table.services.iter().map(|s| s.type_name.as_str()).collect();
        assert_eq!(names, ["OrderAppService"]);
        assert_eq!(table.action_count(), 1);
    }

    #[test]
    fn errors_name_the_module_and_action() {
        let mut broken = service("OrderAppService", TypeFlags::PUBLIC);
        broken.methods.push(MethodDescriptor::new(" "));
        let modules = [ModuleDescriptor { name: "Acme.Orders".to_owned(), types: vec![broken] }];

        let err = apply(&ConventionConfig::builder().build().unwrap(), &modules).unwrap_err();
        assert_eq!(err.kind(), "InvalidInput");
        assert!(err.to_string().contains("(module Acme.Orders: action OrderAppService. )"));
    }

    #[test]
    fn empty_inventory_yields_empty_table() {
        let table = apply(&ConventionConfig::builder().build().unwrap(), &[]).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.routes().count(), 0);
    }
}
