use std::num::{ParseFloatError, ParseIntError};

use crate::types::TypeTag;

/// An error produced by a type strategy while converting text into a
/// [`Value`][crate::Value].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum ValueError {
    #[error("invalid integer {text:?}: {error}")]
    InvalidInt { text: String, error: ParseIntError },

    #[error("invalid number {text:?}: {error}")]
    InvalidFloat { text: String, error: ParseFloatError },

    /// Something else went wrong; used by custom strategies
    #[error("{0}")]
    Custom(String),
}

impl ValueError {
    pub fn custom(message: impl std::fmt::Display) -> Self {
        Self::Custom(message.to_string())
    }
}

/**
Everything that can go wrong during [`ArgParser::parse`].

Every variant aborts the parse at the point it is detected. Values bound
earlier in the same call are left in the output mapping.

[`ArgParser::parse`]: crate::parser::ArgParser::parse
*/
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum ArgError {
    /// A `--long` flag named an argument that was never registered
    #[error("unknown arg by name {name:?}")]
    UnknownName { name: String },

    /// A `-s` short flag used a character that was never registered
    #[error("unknown arg by char '{short}'")]
    UnknownChar { short: char },

    /// The argument's type tag has no registered strategy
    #[error("no type parser defined for {tag} (argument {name:?})")]
    MissingType { name: String, tag: TypeTag },

    /// More positional tokens than positional arguments
    #[error("unexpected positional argument {index}")]
    PositionalOverflow { index: usize },

    /// The argument's type strategy failed to convert its token
    #[error("error occurred parsing {name:?}")]
    Conversion {
        name: String,
        #[source]
        source: ValueError,
    },
}

impl ArgError {
    /// The name of the registered argument this error concerns, if there is
    /// one.
    #[must_use]
    pub fn argument(&self) -> Option<&str> {
        match *self {
            Self::MissingType { ref name, .. } | Self::Conversion { ref name, .. } => Some(name),
            _ => None,
        }
    }
}
