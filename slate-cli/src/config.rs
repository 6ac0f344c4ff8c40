use anyhow::Result;
use clap::ArgMatches;
use config::{Config as ConfigBuilder, Environment, File};
use serde::{Deserialize, Serialize};
use slate_core::config::{Config as SiteFileConfig, SiteConfig};
use std::collections::HashMap;
use std::path::Path;

/// Complete configuration that merges CLI args, env vars, config files, and defaults
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct SlateConfig {
    /// Build configuration
    #[serde(default)]
    pub build: BuildConfig,
    /// `[site]` table shared with slate-core
    #[serde(default)]
    pub site: SiteConfig,
    /// `[styles]` table shared with slate-core
    #[serde(default)]
    pub styles: HashMap<String, String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Content file or directory; the built-in sample site when unset
    pub content: Option<String>,
    /// Output directory for generated site
    pub output: String,
    /// Theme directory; the built-in layout when unset
    pub theme: Option<String>,
    /// Configuration file path
    pub config: String,
    /// Viewport width used for static output and previews
    pub width: u32,
    /// Host for dev server
    pub host: String,
    /// Port for dev server
    pub port: u16,
    /// Open browser automatically
    pub open: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            content: None,
            output: "./out".to_string(),
            theme: None,
            config: "./slate.toml".to_string(),
            width: 1024,
            host: "127.0.0.1".to_string(),
            port: 3000,
            open: false,
        }
    }
}

impl SlateConfig {
    /// Load configuration with cascading precedence:
    /// 1. CLI arguments (highest priority)
    /// 2. Environment variables (SLATE_*)
    /// 3. Configuration file
    /// 4. Defaults (lowest priority)
    pub fn load(args: &ArgMatches) -> Result<Self> {
        let config_file = args
            .try_get_one::<String>("config")
            .unwrap_or(None)
            .cloned()
            .unwrap_or_else(|| BuildConfig::default().config);

        let mut builder = ConfigBuilder::builder();

        // 1. Start with defaults
        let defaults = Self::default();
        builder = builder.add_source(ConfigBuilder::try_from(&defaults)?);

        // 2. Add configuration file if it exists
        if Path::new(&config_file).exists() {
            builder = builder.add_source(File::from(Path::new(&config_file)));
        }

        // 3. Add environment variables with SLATE_ prefix
        builder = builder.add_source(
            Environment::with_prefix("SLATE")
                .prefix_separator("_")
                .separator("__") // Use double underscore for nested keys
                .try_parsing(true),
        );

        // 4. Override with CLI arguments that this command defines
        for key in ["content", "output", "theme", "config", "host"] {
            if let Some(value) = args.try_get_one::<String>(key).unwrap_or(None) {
                builder = builder.set_override(format!("build.{}", key), value.clone())?;
            }
        }
        if let Some(width) = args.try_get_one::<u32>("width").unwrap_or(None) {
            builder = builder.set_override("build.width", i64::from(*width))?;
        }
        if let Some(port) = args.try_get_one::<u16>("port").unwrap_or(None) {
            builder = builder.set_override("build.port", i64::from(*port))?;
        }
        if args.try_get_one::<bool>("open").unwrap_or(None).copied().unwrap_or(false) {
            builder = builder.set_override("build.open", true)?;
        }

        let config = builder.build()?;
        let slate_config: SlateConfig = config.try_deserialize()?;

        Ok(slate_config)
    }

    /// The subset slate-core reads from `slate.toml`
    pub fn site_file_config(&self) -> SiteFileConfig {
        SiteFileConfig {
            site: self.site.clone(),
            styles: self.styles.clone(),
        }
    }

    /// Get the build configuration
    pub fn build_config(&self) -> &BuildConfig {
        &self.build
    }
}
