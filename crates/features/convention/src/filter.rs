//! # Type Filter
//!
//! Narrows the discovered modules to the ones the engine should scan and yields their
//! types as candidates, in inventory order.

use autoapi_domain::inventory::{ModuleDescriptor, TypeDescriptor};

/// Modules whose name starts with `prefix`; every module when no prefix is set.
pub fn filter_modules<'a>(
    modules: &'a [ModuleDescriptor],
    prefix: Option<&'a str>,
) -> impl Iterator<Item = &'a ModuleDescriptor> + 'a {
    modules.iter().filter(move |module| prefix.is_none_or(|p| module.name.starts_with(p)))
}

/// Every type of every module kept by [`filter_modules`], paired with its module.
pub fn candidate_types<'a>(
    modules: &'a [ModuleDescriptor],
    prefix: Option<&'a str>,
) -> impl Iterator<Item = (&'a ModuleDescriptor, &'a TypeDescriptor)> + 'a {
    filter_modules(modules, prefix).flat_map(|module| module.types.iter().map(move |ty| (module, ty)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn module(name: &str, types: &[&str]) -> ModuleDescriptor {
        ModuleDescriptor {
            name: name.to_owned(),
            types: types.iter().map(|t| TypeDescriptor::new(*t)).collect(),
        }
    }

    #[test]
    fn prefix_keeps_matching_modules_only() {
        let modules = [
            module("Acme.Orders", &["OrderAppService"]),
            module("Vendor.Logging", &["LogService"]),
            module("Acme.Users", &["UserAppService", "RoleAppService"]),
        ];

        let names: Vec<_> =
            candidate_types(&modules, Some("Acme")).map(|(_, ty)| ty.name.as_str()).collect();
        assert_eq!(names, ["OrderAppService", "UserAppService", "RoleAppService"]);
    }

    #[test]
    fn no_prefix_keeps_everything() {
        let modules = [module("a", &["A"]), module("b", &["B"])];
        assert_eq!(filter_modules(&modules, None).count(), 2);
        assert_eq!(candidate_types(&modules, None).count(), 2);
    }
}
