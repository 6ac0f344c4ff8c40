use anyhow::Result;
use clap::{Arg, ArgMatches, Command, value_parser};
use slate_dev_server::{LiveServer, LiveServerConfig, SiteLoader};
use std::{path::PathBuf, sync::Arc};

use crate::cmd::{build::add_build_args, load_site};
use crate::config::SlateConfig;

pub fn make_subcommand() -> Command {
    add_build_args(Command::new("serve"))
        .about("Start development server with live reload")
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .value_name("PORT")
                .value_parser(value_parser!(u16))
                .help("Port to serve on [default: 3000]"),
        )
        .arg(
            Arg::new("host")
                .long("host")
                .value_name("HOST")
                .help("Host to bind to [default: 127.0.0.1]"),
        )
        .arg(
            Arg::new("open")
                .long("open")
                .help("Open browser automatically")
                .action(clap::ArgAction::SetTrue),
        )
}

/// Paths whose changes should trigger a rebuild.
fn watch_paths(config: &SlateConfig) -> Vec<PathBuf> {
    let build_config = config.build_config();
    let mut paths = vec![PathBuf::from(&build_config.config)];
    paths.extend(build_config.content.iter().map(PathBuf::from));
    paths.extend(build_config.theme.iter().map(PathBuf::from));
    paths
}

pub async fn execute(args: &ArgMatches) -> Result<()> {
    // Load cascading configuration
    let config = SlateConfig::load(args)?;
    let build_config = config.build_config();

    let server_config = LiveServerConfig {
        host: build_config.host.clone(),
        port: build_config.port,
        open: build_config.open,
        watch: watch_paths(&config),
        assets: build_config.theme.as_ref().map(|theme| PathBuf::from(theme).join("assets")),
    };

    let site_config = config.clone();
    let loader: SiteLoader = Arc::new(move || load_site(&site_config, true));

    LiveServer::new(server_config, loader).run().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_args_load_into_config() {
        let matches = make_subcommand()
            .try_get_matches_from(vec![
                "serve",
                "--port", "8080",
                "--host", "0.0.0.0",
                "--open",
                "--config", "/no/such/slate.toml",
            ])
            .unwrap();

        let config = SlateConfig::load(&matches).unwrap();
        assert_eq!(config.build.port, 8080);
        assert_eq!(config.build.host, "0.0.0.0");
        assert!(config.build.open);
    }

    #[test]
    fn test_watch_paths_cover_configured_sources() {
        let mut config = SlateConfig::default();
        assert_eq!(watch_paths(&config), vec![PathBuf::from("./slate.toml")]);

        config.build.content = Some("content".into());
        config.build.theme = Some("theme".into());
        assert_eq!(
            watch_paths(&config),
            vec![PathBuf::from("./slate.toml"), PathBuf::from("content"), PathBuf::from("theme")]
        );
    }
}
