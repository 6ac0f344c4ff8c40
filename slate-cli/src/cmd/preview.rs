use anyhow::Result;
use clap::{Arg, ArgMatches, Command};
use slate_core::{MenuAction, Session, SimulatedViewport};
use std::io::{BufRead, Write};
use std::rc::Rc;

use crate::cmd::{build::add_build_args, load_site};
use crate::config::SlateConfig;

/// One line of preview input.
#[derive(Debug, Clone, PartialEq)]
pub enum PreviewCommand {
    Goto(String),
    Resize(u32),
    Menu(MenuAction),
    Show,
    Quit,
}

pub fn parse_command(line: &str) -> Result<PreviewCommand, String> {
    let mut parts = line.split_whitespace();
    let Some(name) = parts.next() else {
        return Ok(PreviewCommand::Show);
    };
    let arg = parts.next();

    match (name, arg) {
        ("goto", Some(path)) => Ok(PreviewCommand::Goto(path.to_string())),
        ("goto", None) => Err("usage: goto <path>".to_string()),
        ("resize", Some(width)) => width
            .parse()
            .map(PreviewCommand::Resize)
            .map_err(|_| format!("invalid width: {}", width)),
        ("resize", None) => Err("usage: resize <width>".to_string()),
        ("toggle", _) => Ok(PreviewCommand::Menu(MenuAction::Toggle)),
        ("close", _) => Ok(PreviewCommand::Menu(MenuAction::Close)),
        ("show", _) => Ok(PreviewCommand::Show),
        ("quit" | "exit", _) => Ok(PreviewCommand::Quit),
        (other, _) => Err(format!("unknown command: {}", other)),
    }
}

pub fn make_subcommand() -> Command {
    add_build_args(Command::new("preview"))
        .about("Render views interactively from commands read on stdin")
        .long_about(
            "Render views interactively. Commands are read one per line from stdin:\n  \
             goto <path>     route to a page\n  \
             resize <width>  change the simulated viewport width\n  \
             toggle          toggle the hamburger menu\n  \
             close           close the hamburger menu\n  \
             show            print the current view again\n  \
             quit            exit",
        )
        .arg(
            Arg::new("path")
                .long("path")
                .value_name("PATH")
                .default_value("/")
                .help("Initial route"),
        )
}

pub fn execute(args: &ArgMatches) -> Result<()> {
    let config = SlateConfig::load(args)?;
    let site = load_site(&config, false)?;

    let path = args
        .get_one::<String>("path")
        .cloned()
        .unwrap_or_else(|| "/".to_string());
    let viewport = Rc::new(SimulatedViewport::new(config.build_config().width));
    let mut session = Session::mount(&site, Rc::clone(&viewport), path);

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run(&mut session, &viewport, stdin.lock(), stdout.lock())
}

/// Apply commands from `input` to the session, writing the view after each one.
pub fn run<R: BufRead, W: Write>(
    session: &mut Session<'_, SimulatedViewport>,
    viewport: &SimulatedViewport,
    input: R,
    mut output: W,
) -> Result<()> {
    writeln!(output, "{}", session.render().to_html())?;

    for line in input.lines() {
        let command = match parse_command(&line?) {
            Ok(command) => command,
            Err(e) => {
                tracing::warn!("{}", e);
                continue;
            }
        };

        match command {
            PreviewCommand::Quit => break,
            PreviewCommand::Goto(path) => session.navigate(path),
            PreviewCommand::Resize(width) => {
                let was_narrow = session.is_narrow();
                viewport.resize(width);
                if was_narrow != session.is_narrow() {
                    tracing::debug!(width, narrow = session.is_narrow(), "Layout switched");
                }
            }
            PreviewCommand::Menu(action) => session.apply(action),
            PreviewCommand::Show => {}
        }

        writeln!(output, "{}", session.render().to_html())?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use slate_core::{SiteBuilder, ViewportSource, sample};
    use std::io::Cursor;

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_command("goto /about"), Ok(PreviewCommand::Goto("/about".into())));
        assert_eq!(parse_command("resize 600"), Ok(PreviewCommand::Resize(600)));
        assert_eq!(parse_command("toggle"), Ok(PreviewCommand::Menu(MenuAction::Toggle)));
        assert_eq!(parse_command("close"), Ok(PreviewCommand::Menu(MenuAction::Close)));
        assert_eq!(parse_command("  "), Ok(PreviewCommand::Show));
        assert_eq!(parse_command("quit"), Ok(PreviewCommand::Quit));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(parse_command("resize wide").is_err());
        assert!(parse_command("goto").is_err());
        assert!(parse_command("dance").is_err());
    }

    #[test]
    fn test_run_renders_after_each_command() {
        let site = SiteBuilder::new().content(sample::content()).build().unwrap();
        let viewport = Rc::new(SimulatedViewport::new(1024));
        let mut session = Session::mount(&site, Rc::clone(&viewport), "/");

        let input = Cursor::new("resize 500\ntoggle\nbogus\ngoto /about\nquit\nresize 1200\n");
        let mut output = Vec::new();
        run(&mut session, &viewport, input, &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        let views: Vec<&str> = text.lines().collect();
        // Initial view plus resize, toggle and goto; the bogus line is skipped.
        assert_eq!(views.len(), 4);
        assert!(views[0].contains("class=\"navbar-nav\""));
        assert!(views[1].contains("class=\"hamburger\""));
        assert!(views[2].contains("class=\"menu-overlay\""));
        assert!(views[3].contains("<h1>About Us</h1>"));
        assert_eq!(viewport.width(), 500);
    }
}
