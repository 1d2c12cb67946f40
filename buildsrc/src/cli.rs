//! The `buildsrc` command line, parsed with `argot`.

use std::{env, path::PathBuf};

use anyhow::Context;
use argot::{ArgParser, Argument, TypeTag, Values};

use crate::{error::Error, module::ModuleProperties, paths::fix_path, project::find_root};

pub const COMMANDS: &str = "\
COMMANDS:
  install               install buildsrc into the root project
  new-module, nm        create a new module and include it in the project
  help                  print this message
";

pub fn parser() -> ArgParser {
    ArgParser::new()
        .with(Argument::positional("command", TypeTag::Str).help("the subcommand to run"))
        .with(
            Argument::positional("name", TypeTag::Str)
                .help("name (and relative path) of the module to create"),
        )
        .with(
            Argument::new("root", None, TypeTag::Str).help(
                "path to the root project; defaults to the nearest directory \
                 at or above the working directory with a settings.gradle",
            ),
        )
        .with(
            Argument::bool_switch("paper", Some('p'))
                .help("make the new module a paperweight (Paper server) module"),
        )
        .with(
            Argument::new("version", Some('v'), TypeTag::Str)
                .help("initial version of the new module"),
        )
        .with(Argument::bool_switch("help", Some('h')).help("print this message"))
}

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Install {
        root: Option<String>,
    },
    NewModule {
        root: Option<String>,
        name: String,

        /// `None` if nothing was given on the command line and the wizard
        /// should ask.
        props: Option<ModuleProperties>,
    },
    Help,
}

impl Command {
    pub fn from_values(values: &Values) -> Result<Self, Error> {
        if values.flag("help") {
            return Ok(Self::Help);
        }

        let root = values.str("root").map(str::to_owned);

        match values.str("command") {
            None => Err(Error::MissingCommand),
            Some("help") => Ok(Self::Help),
            Some("install") => Ok(Self::Install { root }),
            Some(command @ ("new-module" | "nm")) => {
                let name = values
                    .str("name")
                    .filter(|name| !name.is_empty())
                    .ok_or(Error::MissingModuleName(match command {
                        "nm" => "nm",
                        _ => "new-module",
                    }))?;

                let version = values.str("version").filter(|version| !version.is_empty());
                let has_paper = values.flag("paper");

                let props = match (has_paper, version) {
                    (false, None) => None,
                    (has_paper, version) => Some(ModuleProperties {
                        has_paper,
                        version: version
                            .map(str::to_owned)
                            .unwrap_or_else(|| ModuleProperties::default().version),
                    }),
                };

                Ok(Self::NewModule {
                    root,
                    name: name.to_owned(),
                    props,
                })
            }
            Some(other) => Err(Error::UnknownCommand(other.to_owned())),
        }
    }
}

/// The root project: `--root` if it was given, otherwise the nearest
/// directory at or above the working directory with a `settings.gradle`.
pub fn resolve_root(root: Option<&str>) -> anyhow::Result<PathBuf> {
    match root {
        Some(root) => Ok(PathBuf::from(fix_path(root))),
        None => {
            let cwd = env::current_dir().context("failed to get the working directory")?;
            Ok(find_root(&cwd)?)
        }
    }
}
