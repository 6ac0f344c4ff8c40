mod cmd;
mod config;
mod logging;

use anyhow::{Result, bail};
use clap::Command;

fn cli() -> Command {
    Command::new("slate")
        .about("Render block-based pages with a responsive navigation bar")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(cmd::build::make_subcommand())
        .subcommand(cmd::serve::make_subcommand())
        .subcommand(cmd::preview::make_subcommand())
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init()?;

    let matches = cli().get_matches();

    match matches.subcommand() {
        Some(("build", args)) => cmd::build::execute(args),
        Some(("serve", args)) => cmd::serve::execute(args).await,
        Some(("preview", args)) => cmd::preview::execute(args),
        Some((name, _)) => bail!("Unknown command: {}", name),
        None => bail!("No command given"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        cli().debug_assert();
    }
}
