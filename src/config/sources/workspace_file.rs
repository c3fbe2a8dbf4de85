//! Workspace layer: `config/config.toml`, then `config/<env>.toml`.
//!
//! The environment name comes from `FOLIO_ENV` and defaults to `development`.

use config::builder::DefaultState;
use config::{ConfigBuilder, File, FileFormat};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const ENV_VAR: &str = "FOLIO_ENV";

const DEFAULT_ENV: &str = "development";
const BASE_NAME: &str = "config";

/// Active environment name; unset or blank falls back to `development`
pub fn environment_name() -> String {
    std::env::var(ENV_VAR)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_ENV.to_string())
}

/// Workspace files present for `env`, lowest precedence first
pub fn layer_paths(workspace_root: &Path, env: &str) -> Vec<PathBuf> {
    let dir = workspace_root.join("config");
    let mut candidates = vec![dir.join(format!("{}.toml", BASE_NAME))];
    if env != BASE_NAME {
        candidates.push(dir.join(format!("{}.toml", env)));
    }
    candidates.into_iter().filter(|p| p.is_file()).collect()
}

pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    workspace_root: &Path,
) -> ConfigBuilder<DefaultState> {
    let env = environment_name();
    layer_paths(workspace_root, &env)
        .into_iter()
        .fold(builder, |builder, path| {
            debug!(env = %env, config_path = %path.display(), "Adding workspace config layer");
            builder.add_source(File::from(path).format(FileFormat::Toml))
        })
}
