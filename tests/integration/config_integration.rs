//! Integration tests for configuration loading

use folio::config::{ConfigLoader, FolioConfig};
use folio::SiteRegistry;
use tempfile::TempDir;

const CONFIG: &str = r#"
[host]
root_id = 1
start_page_id = 2
multiple_sites = true
upload_folders = ["~/upload", "~/shared"]

[[host.sites]]
name = "two.example"
start_page_id = 3
wildcards = true
upload_folders = ["~/two"]

[resolver]
extension = ".aspx"

[logging]
level = "debug"
format = "json"
"#;

#[test]
fn test_config_file_builds_registry() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("folio.toml");
    std::fs::write(&config_file, CONFIG).unwrap();

    let config = ConfigLoader::load_from_file(&config_file).unwrap();
    assert!(config.validate().is_ok());
    assert_eq!(config.resolver.extension, ".aspx");
    assert_eq!(config.logging.format, "json");

    let registry = SiteRegistry::from_config(&config.host);
    let site = registry.get_site("www.two.example").unwrap();
    assert_eq!(site.upload_folders, vec!["~/upload", "~/shared", "~/two"]);
    assert_eq!(registry.default_site().start_page_id, 2);
}

#[test]
fn test_workspace_config_is_layered_over_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config_dir = temp_dir.path().join("config");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.toml"), CONFIG).unwrap();

    let config = ConfigLoader::load(temp_dir.path()).unwrap();
    assert_eq!(config.host.sites.len(), 1);
    assert_eq!(config.host.sites[0].name, "two.example");
    assert_eq!(config.host.sites[0].root_id, None);
}

#[test]
fn test_invalid_config_reports_every_section() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("bad.toml");
    std::fs::write(
        &config_file,
        r#"
[host]
start_page_id = 0

[resolver]
extension = "aspx"
"#,
    )
    .unwrap();

    let config: FolioConfig = ConfigLoader::load_from_file(&config_file).unwrap();
    let errors = config.validate().unwrap_err();
    assert_eq!(errors.len(), 2);
}
