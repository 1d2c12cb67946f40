/*!
The "parse or report and exit" boundary for binaries.

Nothing in [`ArgParser`] ever prints or exits; everything in this module
does. Library code should call [`ArgParser::parse`] and handle the
[`ArgError`] itself.
*/

use std::{
    any,
    error::Error as _,
    fmt::{self, Display},
    io::{self, Write as _},
    iter, process,
};

use crate::{error::ArgError, parser::ArgParser, value::Values};

/**
Displays an [`ArgError`] as a single line: the error's fully qualified type
name, its message, and each underlying cause.

```text
argot::error::ArgError: error occurred parsing "count": invalid integer "x": invalid digit found in string
```
*/
#[derive(Debug, Clone, Copy)]
pub struct Report<'a>(pub &'a ArgError);

impl Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", any::type_name::<ArgError>(), self.0)?;

        iter::successors(self.0.source(), |&cause| cause.source())
            .try_for_each(|cause| write!(f, ": {cause}"))
    }
}

/// How [`parse_or_exit`] behaves when parsing fails.
#[derive(Debug, Clone, Copy)]
pub struct ExitPolicy {
    /// The process exit status to use
    pub status: i32,
}

impl Default for ExitPolicy {
    fn default() -> Self {
        Self { status: 1 }
    }
}

impl ExitPolicy {
    #[must_use]
    pub fn with_status(status: i32) -> Self {
        Self { status }
    }

    /// Parse `input`. On failure, print a [`Report`] to stderr and exit the
    /// process with this policy's status.
    pub fn parse(&self, parser: &ArgParser, input: &str) -> Values {
        let mut values = Values::new();
        self.parse_into(parser, input, &mut values);
        values
    }

    /// [`parse`][Self::parse], binding into an existing [`Values`].
    pub fn parse_into(&self, parser: &ArgParser, input: &str, out: &mut Values) {
        if let Err(error) = parser.parse_into(input, out) {
            tracing::debug!(?error, status = self.status, "argument parse failed, exiting");

            // Nothing useful to do if stderr itself is broken
            let _ = writeln!(io::stderr().lock(), "{}", Report(&error));
            process::exit(self.status);
        }
    }
}

/// Parse `input` with the default [`ExitPolicy`]: on failure, print the
/// error to stderr and exit with status 1.
pub fn parse_or_exit(parser: &ArgParser, input: &str) -> Values {
    ExitPolicy::default().parse(parser, input)
}
