//! Merge rules: defaults, override order, conflict handling.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("host.root_id", 1)?
        .set_default("host.start_page_id", 1)?
        .set_default("host.multiple_sites", false)?
        .set_default("host.upload_folders", vec!["~/upload"])?
        .set_default("resolver.extension", ".html")?
        .set_default("logging.level", "info")
}
