use solpick_engine::{extract_version, RegistryError, VersionRegistry};
use tracing::info;

fn installed() -> &'static VersionRegistry {
    // every test in this binary installs the same registry
    let _ = VersionRegistry::init_global(VersionRegistry::Installed(vec![
        "0.8.21".to_string(),
        "0.6.12".to_string(),
        "0.5.17".to_string(),
        "0.4.26".to_string(),
    ]));
    VersionRegistry::global().unwrap()
}

#[test]
fn test_extract_version_uses_global_registry() {
    solpick_common::logging::ensure_test_logging(None);
    info!("Running test");
    let registry = installed();
    assert_eq!(registry.source_name(), "installed");

    let version = extract_version("pragma solidity ^0.6.12;\ncontract C {}").unwrap();
    assert_eq!(version.as_deref(), Some("0.6.12"));

    let version = extract_version("pragma solidity 0.5.17;").unwrap();
    assert_eq!(version, None);
}

#[test]
fn test_global_registry_is_set_once() {
    solpick_common::logging::ensure_test_logging(None);
    info!("Running test");
    let registry = installed();

    let err = VersionRegistry::init_global(VersionRegistry::Released(vec![])).unwrap_err();
    assert!(matches!(err, RegistryError::AlreadyInitialized));
    assert!(std::ptr::eq(registry, VersionRegistry::global().unwrap()));
}
