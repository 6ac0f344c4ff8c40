pub mod build;
pub mod preview;
pub mod serve;

use anyhow::Result;
use slate_core::{ContentScanner, Site, SiteBuilder, sample};

use crate::config::SlateConfig;

/// Scan content (or fall back to the built-in sample site) and assemble a [`Site`].
pub fn load_site(config: &SlateConfig, dev_mode: bool) -> Result<Site> {
    let build_config = config.build_config();

    let content = match &build_config.content {
        Some(path) => ContentScanner::new(path).scan()?,
        None => {
            tracing::info!("No content path configured, using the sample site");
            sample::content()
        }
    };

    let mut builder = SiteBuilder::new()
        .config(&config.site_file_config())
        .content(content)
        .dev_mode(dev_mode);
    if let Some(theme) = &build_config.theme {
        builder = builder.theme_dir(theme);
    }

    Ok(builder.build()?)
}
