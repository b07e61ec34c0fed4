//! Configuration files and overrides

use compat_resolver::{ConfigError, ResolverConfig};
use compat_rules::{LoadError, RuleTableError};
use compat_test_utils::v;
use std::fs;

#[test]
fn test_config_file_with_relative_rule_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("site.yaml"),
        r#"
rename:
  - legacy: LegacyContour
    modern: Contour
    through: "5.8"
"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("compat.toml"),
        r#"
version = "5.8"
rule_files = ["site.yaml"]
"#,
    )
    .unwrap();

    let config = ResolverConfig::from_path(dir.path().join("compat.toml")).unwrap();
    assert_eq!(config.rule_files, vec![dir.path().join("site.yaml")]);

    let context = config.build().unwrap();
    assert_eq!(context.version, v(5, 8));
    assert_eq!(
        context.resolver.resolve_proxy_name("LegacyContour", context.version),
        "Contour"
    );
    assert_eq!(
        context.resolver.resolve_proxy_name("GhostCellsGenerator", context.version),
        "GhostCells"
    );
}

#[test]
fn test_overlapping_site_rule_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let rules = dir.path().join("clash.toml");
    fs::write(
        &rules,
        "[[rename]]\nlegacy = \"GhostCellsGenerator\"\nmodern = \"GhostCellsV2\"\nintroduced_in = \"5.10\"\nremoved_in = \"5.14\"\n",
    )
    .unwrap();

    let err = ResolverConfig::new()
        .with_rule_file(&rules)
        .build()
        .unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Rules(RuleTableError::AmbiguousRule { .. })
    ));
}

#[test]
fn test_site_schema_replaces_builtin() {
    let dir = tempfile::tempdir().unwrap();
    let schemas = dir.path().join("schemas.toml");
    fs::write(
        &schemas,
        "[[proxy]]\nname = \"Slice\"\n\n[proxy.properties]\nInput = \"text\"\n",
    )
    .unwrap();

    let context = ResolverConfig::new()
        .with_schema_file(&schemas)
        .build()
        .unwrap();
    assert_eq!(context.schemas.get("Slice").unwrap().properties.len(), 1);
}

#[test]
fn test_missing_rule_file() {
    let err = ResolverConfig::new()
        .with_rule_file("/nonexistent/rules.toml")
        .build()
        .unwrap_err();
    assert!(matches!(err, ConfigError::Load(LoadError::Io { .. })));
}

#[test]
fn test_version_override_from_text() {
    let config = ResolverConfig::from_toml_str("version = \"5.10\"")
        .unwrap()
        .with_version_override(Some("5.4"))
        .unwrap();
    assert_eq!(config.version, v(5, 4));
}
