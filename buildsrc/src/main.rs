mod cli;
mod error;
mod module;
mod paths;
mod project;

use std::io::{self, Write as _};

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Command;

fn setup_logging() {
    let filter = EnvFilter::try_from_env("BUILDSRC_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn print_help(parser: &argot::ArgParser) -> io::Result<()> {
    let mut out = io::stdout().lock();

    parser.write_usage(&mut out, "buildsrc")?;
    writeln!(out)?;
    write!(out, "{}", cli::COMMANDS)
}

fn main() -> anyhow::Result<()> {
    setup_logging();

    let parser = cli::parser();
    let input = argot::stitch_args(std::env::args());
    tracing::debug!(input = input.as_str(), "parsing command line");

    let values = argot::parse_or_exit(&parser, &input);

    match Command::from_values(&values)? {
        Command::Help => print_help(&parser)?,
        Command::Install { root } => {
            let root = cli::resolve_root(root.as_deref())?;
            project::install(&root)?;
        }
        Command::NewModule { root, name, props } => {
            let root = cli::resolve_root(root.as_deref())?;

            let props = match props {
                Some(props) => props,
                None => match module::wizard(&name, io::stdin().lock(), io::stdout().lock())? {
                    Some(props) => props,
                    None => return Ok(()),
                },
            };

            tracing::debug!(?props, name = name.as_str(), "creating module");
            module::new_module(&root, &name, &props)?;
        }
    }

    println!("done.");
    Ok(())
}
