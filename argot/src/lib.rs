/*!
A small, registry-driven argument parser. `argot` binds one flat argument
string, like `core -p --version=2.0 "my dir"`, to a mapping of named, typed
values.

The moving parts:

- [`Argument`] describes something bindable: a name, an optional short
  character, a [`TypeTag`], and optionally a [`Switch`] (for flags that don't
  take a value), a [`Position`] (for positional arguments), and a default.
- [`TypeRegistry`] maps each [`TypeTag`] to a [`TypeStrategy`], which reads
  its own token straight out of a [`Reader`]. Integers, floats, strings
  (bare or quoted) and bools are built in; anything else can be added with
  [`ArgParser::add_type`].
- [`ArgParser`] owns both, and [`parse`][ArgParser::parse] walks the input:
  `--long=value`, `--long value`, `--switch`, bundled `-abc` switches (a
  value-taking short flag ends its bundle), and positionals in registration
  order. Afterwards, truthy defaults are filled in for anything not given.

Errors are always returned as an [`ArgError`]; parsing never prints or
exits. Binaries that want the usual "print the error and quit" behavior can
opt into it with the [`exit`] module. [`stitch`] goes the other way, joining
separate command-line tokens into one parseable string.
*/

pub mod argument;
pub mod error;
pub mod exit;
pub mod parser;
pub mod stitch;
pub mod types;
mod usage;
pub mod value;

pub use argot_reader::Reader;
pub use argument::{Argument, Position, Switch};
pub use error::{ArgError, ValueError};
pub use exit::parse_or_exit;
pub use parser::ArgParser;
pub use stitch::{stitch, stitch_args};
pub use types::{TypeRegistry, TypeStrategy, TypeTag};
pub use value::{Value, Values};
