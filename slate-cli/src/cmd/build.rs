use anyhow::Result;
use clap::{Arg, ArgMatches, Command, value_parser};
use slate_core::{SimulatedViewport, ViewState, ViewportObserver};
use std::path::Path;
use std::rc::Rc;

use crate::cmd::load_site;
use crate::config::SlateConfig;

pub fn add_build_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("content")
                .short('i')
                .long("content")
                .value_name("PATH")
                .help("Content file or directory (JSON or TOML); defaults to the sample site"),
        )
        .arg(
            Arg::new("theme")
                .short('t')
                .long("theme")
                .value_name("DIR")
                .help("Theme directory containing layout.html"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file [default: ./slate.toml]"),
        )
        .arg(
            Arg::new("width")
                .short('w')
                .long("width")
                .value_name("PX")
                .value_parser(value_parser!(u32))
                .help("Viewport width the pages are rendered for [default: 1024]"),
        )
}

pub fn make_subcommand() -> Command {
    add_build_args(Command::new("build"))
        .about("Render every page to static HTML")
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("DIR")
                .help("Output directory for generated site [default: ./out]"),
        )
}

pub fn execute(args: &ArgMatches) -> Result<()> {
    // Load cascading configuration
    let config = SlateConfig::load(args)?;
    let build_config = config.build_config();

    let site = load_site(&config, false)?;

    let viewport = Rc::new(SimulatedViewport::new(build_config.width));
    let observer = ViewportObserver::mount(viewport, site.breakpoint());
    let view = ViewState::for_width(observer.width(), observer.breakpoint());

    let output_dir = Path::new(&build_config.output);
    site.render_all(output_dir, &view)?;

    tracing::info!(
        width = build_config.width,
        narrow = view.narrow,
        "Site built successfully in {}",
        output_dir.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_writes_pages() {
        let out = tempfile::tempdir().unwrap();
        let matches = make_subcommand()
            .try_get_matches_from(vec![
                "build",
                "--output",
                out.path().to_str().unwrap(),
                "--config",
                "/no/such/slate.toml",
                "--width",
                "500",
            ])
            .unwrap();

        execute(&matches).unwrap();

        let about = std::fs::read_to_string(out.path().join("about/index.html")).unwrap();
        assert!(about.contains("class=\"hamburger\""));
        assert!(about.contains("<div class=\"menu-overlay\" hidden=\"\">"));
        assert!(out.path().join("index.html").exists());
        assert!(out.path().join("404.html").exists());
    }
}
