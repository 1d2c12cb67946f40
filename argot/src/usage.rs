/*!
Usage messages generated from the arguments registered on an
[`ArgParser`].
*/

use std::io::{self, Write};

use indent_write::io::IndentWriter;
use joinery::JoinableIterator;
use lazy_format::lazy_format;

use crate::{argument::Argument, parser::ArgParser};

/// Help text is wrapped to this many columns, not counting indentation.
const HELP_WIDTH: usize = 56;

const INDENT: &str = "  ";

/// Items shorter than this get their help on the same line.
const COLUMN: usize = 24;
const COLUMN_INDENT: &str = "                        ";

/*
Overall structure:

USAGE:
  command [OPTIONS] <ARG> [ARG]

ARGUMENTS:
  <ARG>                 description

OPTIONS:
  -f, --foo <str>       description
      --bar             description
 */
impl ArgParser {
    /// Write a usage message for `command` describing every registered
    /// argument.
    pub fn write_usage(&self, out: &mut impl Write, command: &str) -> io::Result<()> {
        let mut options: Vec<&Argument> = self
            .arguments()
            .filter(|argument| !argument.is_positional())
            .collect();
        options.sort_by(|a, b| a.name().cmp(b.name()));

        let mut sections = Sections::new(out);

        sections.section("Usage", |mut out| {
            write!(out, "{command}")?;

            if !options.is_empty() {
                write!(out, " [OPTIONS]")?;
            }

            self.positionals()
                .try_for_each(|positional| write!(out, " {}", placeholder(positional)))?;

            writeln!(out)
        })?;

        sections.list("Arguments", self.positionals(), |out, positional| {
            describe(out, placeholder(positional), positional)
        })?;

        sections.list("Options", options, |out, option| {
            let name = option.name();
            let ty = option.ty();

            let tags = lazy_format!(match (option.short()) {
                Some(short) => "-{short}, --{name}",
                None => "    --{name}",
            });

            let item = lazy_format!(match (option.switch_handler()) {
                Some(_) => "{tags}",
                None => "{tags} <{ty}>",
            });

            describe(out, item, option)
        })
    }

    /// [`write_usage`][Self::write_usage] into a [`String`].
    #[must_use]
    pub fn usage(&self, command: &str) -> String {
        let mut out = Vec::new();

        // writing into a Vec can't fail
        self.write_usage(&mut out, command).ok();
        String::from_utf8_lossy(&out).into_owned()
    }
}

/// `<name>` for a positional without a default, `[name]` for one with.
fn placeholder(positional: &Argument) -> String {
    let name = positional.name();

    match positional.default_value() {
        Some(_) => format!("[{name}]"),
        None => format!("<{name}>"),
    }
}

/**
Writes `HEADER:` blocks, each followed by an indented body. Headers are
upper-cased, and consecutive sections are separated by one blank line.
*/
struct Sections<'a, O: Write + ?Sized> {
    out: &'a mut O,
    written: bool,
}

impl<'a, O: Write + ?Sized> Sections<'a, O> {
    fn new(out: &'a mut O) -> Self {
        Self {
            out,
            written: false,
        }
    }

    fn section<T>(
        &mut self,
        header: &str,
        body: impl FnOnce(IndentWriter<&mut O>) -> io::Result<T>,
    ) -> io::Result<T> {
        if self.written {
            writeln!(self.out)?;
        }

        self.written = true;
        writeln!(self.out, "{}:", header.to_uppercase())?;
        body(IndentWriter::new(INDENT, &mut *self.out))
    }

    /// A section with one entry per item; nothing at all if there are no
    /// items.
    fn list<I: IntoIterator>(
        &mut self,
        header: &str,
        items: I,
        entry: impl Fn(&mut IndentWriter<&mut O>, I::Item) -> io::Result<()>,
    ) -> io::Result<()> {
        let mut items = items.into_iter().peekable();

        if items.peek().is_none() {
            return Ok(());
        }

        self.section(header, |mut out| {
            items.try_for_each(|item| entry(&mut out, item))
        })
    }
}

/// Describe an item by printing it, followed by its wrapped help text and
/// default. Short items get the first line of help on the same row.
fn describe(
    out: &mut (impl Write + ?Sized),
    item: impl std::fmt::Display,
    argument: &Argument,
) -> io::Result<()> {
    let item = item.to_string();

    let default = argument
        .default_value()
        .filter(|value| value.is_truthy())
        .map(|value| format!("[default: {value}]"));

    let help = [argument.help_text(), default.as_deref()]
        .into_iter()
        .flatten()
        .join_with(' ')
        .to_string();

    if help.is_empty() {
        return writeln!(out, "{item}");
    }

    let mut lines = textwrap::wrap(&help, HELP_WIDTH).into_iter();

    match COLUMN.checked_sub(item.chars().count()) {
        Some(pad) if pad >= 2 => {
            let first = lines.next().unwrap_or_default();
            writeln!(out, "{item}{:pad$}{first}", "")?;
        }
        _ => writeln!(out, "{item}")?,
    }

    let mut out = IndentWriter::new(COLUMN_INDENT, out);
    lines.try_for_each(|line| writeln!(out, "{line}"))
}
