use autoapi::domain::inventory::{Annotation, MethodDescriptor, ModuleDescriptor, TypeDescriptor};
use autoapi::domain::settings::{Settings, SettingsInner};
use autoapi::{AutoApiError, generate, generate_from_files};
use std::fs;
use tempfile::tempdir;

fn inventory() -> Vec<ModuleDescriptor> {
    let mut ty = TypeDescriptor::new("BookAppService");
    ty.annotations.push(Annotation::AutoApi { version: String::new() });
    ty.methods = vec![MethodDescriptor::new("GetListAsync"), MethodDescriptor::new("UpdateAsync")];
    vec![ModuleDescriptor { name: "Acme.Library".to_owned(), types: vec![ty] }]
}

#[test]
fn default_settings_generate_standard_routes() {
    let table = generate(&Settings::default(), &inventory()).unwrap();
    let routes: Vec<_> = table.routes().map(|r| r.template.into_string()).collect();
    assert_eq!(routes, ["api/Book/List", "api/Book"]);
}

#[test]
fn enabled_settings_are_validated_before_running() {
    let mut inner = SettingsInner::default();
    inner.auto_api.enable = true;
    inner.auto_api.default_http_verb = String::new();

    let err = generate(&Settings::from(inner), &inventory()).unwrap_err();
    assert!(matches!(err, AutoApiError::Convention { .. }));
    assert!(err.to_string().starts_with("Invalid configuration"));
}

#[test]
fn files_are_loaded_and_combined() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let settings = dir.path().join("autoapi.toml");
    fs::write(&settings, "[auto_api]\nenable = true\ndefault_area_name = \"v1\"\n")?;
    let inventory_path = dir.path().join("inventory.json");
    fs::write(&inventory_path, serde_json::to_string(&inventory())?)?;

    let table = generate_from_files(Some(&settings), &inventory_path)?;
    let routes: Vec<_> = table.routes().map(|r| r.template.into_string()).collect();
    assert_eq!(routes, ["api/v1/Book/List", "api/v1/Book"]);
    Ok(())
}

#[test]
fn missing_inventory_is_a_kernel_error() {
    let dir = tempdir().unwrap();
    let err = generate_from_files(None::<&str>, dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, AutoApiError::Kernel { .. }));
    assert!(err.to_string().contains("nope.json"));
}
