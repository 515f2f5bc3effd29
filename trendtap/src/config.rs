use std::path::Path;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use tracing::*;
use trendtap_common::helpers::fs::secure_file;
use trendtap_common::{TrendTapConfig, TrendTapConfigStore};

pub fn load_config(path: &Path, secure: bool) -> Result<TrendTapConfig> {
    if secure {
        secure_file(path).context("Could not secure config")?;
    }

    let store: TrendTapConfigStore = Config::builder()
        .add_source(File::from(path))
        .add_source(Environment::with_prefix("TRENDTAP"))
        .build()
        .context("Could not load config")?
        .try_deserialize()
        .context("Could not parse config")?;

    let config = TrendTapConfig {
        store,
        paths_relative_to: path.parent().unwrap().to_path_buf(),
    };

    info!(
        "Using config: {path:?} (max failed attempts: {}, min password length: {})",
        config.store.lockout.max_failed_attempts, config.store.password_requirements.min_length,
    );
    Ok(config)
}
