use super::HandlerContext;
use crate::views::ConfigView;
use anyhow::Result;
use roomflow_runtime::Config;
use serde_json::json;
use std::path::Path;

/// Effective config, env overrides included.
pub fn show(ctx: &HandlerContext, data_dir: &Path) -> Result<()> {
    let config = Config::load_with_env(&Config::path_in(data_dir))?;
    ctx.render(
        &json!({ "dataDir": data_dir, "config": &config }),
        ConfigView::new(data_dir, &config),
    )
}

/// Persists the file's own values; env overrides are not written back.
pub fn set_url(ctx: &HandlerContext, data_dir: &Path, url: &str) -> Result<()> {
    let path = Config::path_in(data_dir);
    let mut config = Config::load_from(&path)?;
    config.set_base_url(url)?;
    config.save_to(&path)?;
    tracing::info!("Saved {}", path.display());
    ctx.message(&format!("API base URL set to {}", config.api.base_url))
}
