use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to find root project path (dir with settings.gradle) at or above {0}")]
    RootNotFound(PathBuf),

    #[error("please specify a subcommand")]
    MissingCommand,

    #[error("unknown subcommand: {0}")]
    UnknownCommand(String),

    #[error("subcommand {0} needs a module name")]
    MissingModuleName(&'static str),

    #[error("module name {0:?} must be a relative path inside the root project")]
    InvalidModuleName(String),

    #[error("module already has a build file at {0}")]
    ModuleExists(PathBuf),
}
