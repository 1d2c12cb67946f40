/*!
The [`ArgParser`]: registration, and the parse loop that drives a
[`Reader`] over an argument string.
*/

use std::{collections::HashMap, sync::Arc};

use argot_reader::Reader;

use crate::{
    argument::Argument,
    error::ArgError,
    types::{TypeRegistry, TypeStrategy, TypeTag},
    value::{Value, Values},
};

/**
Binds a single argument string to named, typed values.

An [`ArgParser`] is set up once, by registering types and arguments, and
then used read-only by [`parse`][ArgParser::parse]. Registration needs
`&mut self` and parsing needs only `&self`, so a fully registered parser can
be shared between threads.

```
use argot::{ArgParser, Argument, TypeTag};

let parser = ArgParser::new()
    .with(Argument::positional("name", TypeTag::Str))
    .with(Argument::bool_switch("paper", Some('p')))
    .with(Argument::new("version", Some('v'), TypeTag::Str).default("1.0.0"));

let values = parser.parse("core -p").unwrap();

assert_eq!(values.str("name"), Some("core"));
assert_eq!(values.bool("paper"), Some(true));
assert_eq!(values.str("version"), Some("1.0.0"));
```
*/
#[derive(Debug, Clone, Default)]
pub struct ArgParser {
    types: TypeRegistry,
    by_name: HashMap<String, Arc<Argument>>,
    by_char: HashMap<char, Arc<Argument>>,
    positionals: Vec<Arc<Argument>>,
}

impl ArgParser {
    /// A parser with the built-in types registered and no arguments.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A parser using `types` instead of the built-in registry.
    #[must_use]
    pub fn with_types(types: TypeRegistry) -> Self {
        Self {
            types,
            ..Self::default()
        }
    }

    /// Register (or replace) the strategy for a type tag.
    pub fn add_type(&mut self, tag: TypeTag, strategy: impl TypeStrategy + 'static) -> &mut Self {
        self.types.define(tag, strategy);
        self
    }

    /**
    Register an argument.

    The argument is stored by name, by its short character if it has one,
    and in the positional list if it is positional. Registering a name or a
    character a second time replaces the earlier registration.
    */
    pub fn add(&mut self, argument: Argument) -> &mut Self {
        let argument = Arc::new(argument);

        tracing::debug!(
            name = argument.name(),
            short = ?argument.short(),
            ty = %argument.ty(),
            position = ?argument.position(),
            "registering argument"
        );

        if let Some(short) = argument.short() {
            self.by_char.insert(short, Arc::clone(&argument));
        }

        if let Some(position) = argument.position() {
            let index = position.resolve(self.positionals.len());
            self.positionals.insert(index, Arc::clone(&argument));
        }

        self.by_name.insert(argument.name().to_owned(), argument);
        self
    }

    /// Builder-style [`add`][ArgParser::add].
    #[must_use]
    pub fn with(mut self, argument: Argument) -> Self {
        self.add(argument);
        self
    }

    /// Builder-style [`add_type`][ArgParser::add_type].
    #[must_use]
    pub fn with_type(mut self, tag: TypeTag, strategy: impl TypeStrategy + 'static) -> Self {
        self.add_type(tag, strategy);
        self
    }

    #[inline]
    #[must_use]
    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }

    #[inline]
    #[must_use]
    pub fn argument(&self, name: &str) -> Option<&Argument> {
        self.by_name.get(name).map(|argument| &**argument)
    }

    #[inline]
    #[must_use]
    pub fn argument_by_char(&self, short: char) -> Option<&Argument> {
        self.by_char.get(&short).map(|argument| &**argument)
    }

    /// All registered arguments, in no particular order.
    pub fn arguments(&self) -> impl Iterator<Item = &Argument> {
        self.by_name.values().map(|argument| &**argument)
    }

    /// The positional arguments, in binding order.
    pub fn positionals(&self) -> impl Iterator<Item = &Argument> {
        self.positionals.iter().map(|argument| &**argument)
    }

    /// Parse `input` into a fresh [`Values`].
    pub fn parse(&self, input: &str) -> Result<Values, ArgError> {
        let mut values = Values::new();
        self.parse_into(input, &mut values)?;
        Ok(values)
    }

    /**
    Parse `input`, binding into an existing [`Values`].

    `out` is never cleared. On error, whatever was bound before the failing
    token stays bound.
    */
    pub fn parse_into(&self, input: &str, out: &mut Values) -> Result<(), ArgError> {
        let mut reader = Reader::new(input);
        let mut positional = 0;

        tracing::trace!(input, "parsing arguments");

        loop {
            reader.skip(char::is_whitespace);

            match reader.current() {
                None => break,
                Some('-') => match reader.next() {
                    Some('-') => self.parse_long(&mut reader, out)?,
                    _ => self.parse_short_bundle(&mut reader, out)?,
                },
                Some(_) => {
                    self.parse_positional(&mut reader, positional, out)?;
                    positional += 1;
                }
            }
        }

        self.fill_defaults(out);

        Ok(())
    }

    /// `--name=value`, `--name value`, or `--name` for a switch. The reader
    /// is on the second dash.
    fn parse_long(&self, reader: &mut Reader, out: &mut Values) -> Result<(), ArgError> {
        reader.next();
        let name = reader.collect(|c| c != ' ' && c != '=');

        let argument = self
            .argument(&name)
            .ok_or_else(|| ArgError::UnknownName { name: name.clone() })?;

        let value = match argument.switch_handler() {
            Some(switch) if reader.current() != Some('=') => switch.invoke(self, argument),
            _ => {
                // `=` or the separating space
                reader.next();
                self.parse_value(argument, reader)?
            }
        };

        tracing::trace!(name = argument.name(), %value, "bound long argument");
        out.insert(argument.name(), value);
        Ok(())
    }

    /// `-abc`. The reader is on the first character after the dash. A
    /// value-taking flag consumes the rest of the token (or the next token)
    /// as its value and ends the bundle.
    fn parse_short_bundle(&self, reader: &mut Reader, out: &mut Values) -> Result<(), ArgError> {
        while let Some(short) = reader.current().filter(|&c| c != ' ') {
            let argument = self
                .argument_by_char(short)
                .ok_or(ArgError::UnknownChar { short })?;

            match argument.switch_handler() {
                Some(switch) => {
                    let value = switch.invoke(self, argument);
                    tracing::trace!(name = argument.name(), short = %short, %value, "bound switch");
                    out.insert(argument.name(), value);
                    reader.next();
                }
                None => {
                    reader.next();
                    reader.skip(char::is_whitespace);

                    let value = self.parse_value(argument, reader)?;
                    tracing::trace!(name = argument.name(), short = %short, %value, "bound short argument");
                    out.insert(argument.name(), value);
                    break;
                }
            }
        }

        Ok(())
    }

    fn parse_positional(
        &self,
        reader: &mut Reader,
        index: usize,
        out: &mut Values,
    ) -> Result<(), ArgError> {
        let argument = self
            .positionals
            .get(index)
            .ok_or(ArgError::PositionalOverflow { index })?;

        let value = self.parse_value(argument, reader)?;
        tracing::trace!(name = argument.name(), index, %value, "bound positional argument");
        out.insert(argument.name(), value);
        Ok(())
    }

    fn parse_value(&self, argument: &Argument, reader: &mut Reader) -> Result<Value, ArgError> {
        let strategy = self
            .types
            .lookup(argument.ty())
            .ok_or_else(|| ArgError::MissingType {
                name: argument.name().to_owned(),
                tag: argument.ty().clone(),
            })?;

        strategy
            .parse(reader)
            .map_err(|source| ArgError::Conversion {
                name: argument.name().to_owned(),
                source,
            })
    }

    /// Bind defaults for everything that wasn't given. Only truthy defaults
    /// are applied.
    fn fill_defaults(&self, out: &mut Values) {
        for argument in self.by_name.values() {
            if out.contains(argument.name()) {
                continue;
            }

            if let Some(value) = argument.default_value().filter(|value| value.is_truthy()) {
                tracing::debug!(name = argument.name(), %value, "applying default");
                out.insert(argument.name(), value.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_insertion_order() {
        let parser = ArgParser::new()
            .with(Argument::positional("a", TypeTag::Str))
            .with(Argument::positional("c", TypeTag::Str))
            .with(Argument::positional_at("b", TypeTag::Str, -1))
            .with(Argument::positional_at("first", TypeTag::Str, 0));

        let names: Vec<&str> = parser.positionals().map(Argument::name).collect();
        assert_eq!(names, ["first", "a", "b", "c"]);
    }

    #[test]
    fn duplicate_registration_replaces() {
        let parser = ArgParser::new()
            .with(Argument::new("out", Some('o'), TypeTag::Str))
            .with(Argument::new("out", Some('o'), TypeTag::Int));

        assert_eq!(parser.argument("out").map(Argument::ty), Some(&TypeTag::Int));
        assert_eq!(parser.arguments().count(), 1);
    }

    #[test]
    fn char_lookup_follows_latest_name() {
        let parser = ArgParser::new()
            .with(Argument::bool_switch("all", Some('a')))
            .with(Argument::bool_switch("append", Some('a')));

        assert_eq!(
            parser.argument_by_char('a').map(Argument::name),
            Some("append")
        );
    }

    #[test]
    fn whitespace_only_input() {
        let parser = ArgParser::new();
        assert_eq!(parser.parse("   \t ").unwrap(), Values::new());
    }

    #[test]
    fn lone_dash_binds_nothing() {
        let parser = ArgParser::new().with(Argument::positional("p", TypeTag::Str));
        assert!(parser.parse("-").unwrap().is_empty());
    }

    #[test]
    fn parser_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ArgParser>();
    }
}
