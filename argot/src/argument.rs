/*!
Argument descriptors: the registration records that tell an
[`ArgParser`][crate::ArgParser] what it can bind.
*/

use std::borrow::Cow;

use crate::{parser::ArgParser, types::TypeTag, value::Value};

/// Where a positional argument goes in the parser's positional list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// After every positional argument registered so far
    Append,

    /// Inserted at this index. Negative indices count from the end of the
    /// list as it is when the argument is added, so `-1` lands before the
    /// current last element.
    Index(isize),
}

impl Position {
    /// Resolve this position into an insertion index for a list of length
    /// `len`. The result is always in `0..=len`.
    #[must_use]
    pub fn resolve(self, len: usize) -> usize {
        match self {
            Position::Append => len,
            Position::Index(index) if index < 0 => len.saturating_sub(index.unsigned_abs()),
            Position::Index(index) => index.unsigned_abs().min(len),
        }
    }
}

/**
What a switch produces when it appears on the command line.

A switch doesn't need to take a value from the input: `--verbose` or `-v`
on its own binds the switch's value. A long switch can still be given an
explicit value with `--verbose=false`, which goes through the argument's
type strategy as usual.
*/
#[derive(Debug, Clone)]
pub enum Switch {
    /// Always bind this value
    Fixed(Value),

    /// Compute the value from the parser and the argument being bound
    Custom(fn(&ArgParser, &Argument) -> Value),
}

impl Switch {
    #[inline]
    #[must_use]
    pub fn invoke(&self, parser: &ArgParser, argument: &Argument) -> Value {
        match *self {
            Switch::Fixed(ref value) => value.clone(),
            Switch::Custom(handler) => handler(parser, argument),
        }
    }
}

/// Describes one bindable argument.
#[derive(Debug, Clone)]
pub struct Argument {
    pub(crate) name: Cow<'static, str>,
    pub(crate) short: Option<char>,
    pub(crate) ty: TypeTag,
    pub(crate) switch: Option<Switch>,
    pub(crate) position: Option<Position>,
    pub(crate) default: Option<Value>,
    pub(crate) help: Option<Cow<'static, str>>,
}

impl Argument {
    fn build(
        name: impl Into<Cow<'static, str>>,
        short: Option<char>,
        ty: TypeTag,
        switch: Option<Switch>,
        position: Option<Position>,
    ) -> Self {
        Self {
            name: name.into(),
            short,
            ty,
            switch,
            position,
            default: None,
            help: None,
        }
    }

    /// A named argument, given as `--name=value`, `--name value` or, if
    /// `short` is set, `-s value`.
    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>, short: Option<char>, ty: TypeTag) -> Self {
        Self::build(name, short, ty, None, None)
    }

    /// A positional argument, after all the positionals added before it.
    #[must_use]
    pub fn positional(name: impl Into<Cow<'static, str>>, ty: TypeTag) -> Self {
        Self::build(name, None, ty, None, Some(Position::Append))
    }

    /// A positional argument at a specific index in the positional list.
    #[must_use]
    pub fn positional_at(name: impl Into<Cow<'static, str>>, ty: TypeTag, index: isize) -> Self {
        Self::build(name, None, ty, None, Some(Position::Index(index)))
    }

    #[must_use]
    pub fn switch(
        name: impl Into<Cow<'static, str>>,
        short: Option<char>,
        ty: TypeTag,
        switch: Switch,
    ) -> Self {
        Self::build(name, short, ty, Some(switch), None)
    }

    /// A boolean switch that binds `true` whenever it's present.
    #[must_use]
    pub fn bool_switch(name: impl Into<Cow<'static, str>>, short: Option<char>) -> Self {
        Self::switch(name, short, TypeTag::Bool, Switch::Fixed(Value::Bool(true)))
    }

    /**
    Set a default, bound after parsing if this argument didn't appear.

    Only *truthy* defaults are ever applied: a default of `false`, `0`, or
    the empty string leaves the argument absent from the output.
    */
    #[must_use]
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Set a one-line description, shown in usage output.
    #[must_use]
    pub fn help(mut self, help: impl Into<Cow<'static, str>>) -> Self {
        self.help = Some(help.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn short(&self) -> Option<char> {
        self.short
    }

    #[inline]
    #[must_use]
    pub fn ty(&self) -> &TypeTag {
        &self.ty
    }

    #[inline]
    #[must_use]
    pub fn switch_handler(&self) -> Option<&Switch> {
        self.switch.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn position(&self) -> Option<Position> {
        self.position
    }

    #[inline]
    #[must_use]
    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn help_text(&self) -> Option<&str> {
        self.help.as_deref()
    }

    #[inline]
    #[must_use]
    pub fn is_positional(&self) -> bool {
        self.position.is_some()
    }

    #[inline]
    #[must_use]
    pub fn is_switch(&self) -> bool {
        self.switch.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_positions() {
        assert_eq!(Position::Append.resolve(3), 3);
        assert_eq!(Position::Index(0).resolve(3), 0);
        assert_eq!(Position::Index(1).resolve(3), 1);
        assert_eq!(Position::Index(9).resolve(3), 3);
        assert_eq!(Position::Index(-1).resolve(3), 2);
        assert_eq!(Position::Index(-3).resolve(3), 0);
        assert_eq!(Position::Index(-7).resolve(3), 0);
        assert_eq!(Position::Index(-1).resolve(0), 0);
    }

    #[test]
    fn bool_switch_shape() {
        let argument = Argument::bool_switch("verbose", Some('v'));

        assert!(argument.is_switch());
        assert!(!argument.is_positional());
        assert_eq!(argument.ty(), &TypeTag::Bool);
        assert_eq!(argument.short(), Some('v'));
    }

    #[test]
    fn builder_modifiers() {
        let argument = Argument::new("count", Some('n'), TypeTag::Int)
            .default(42)
            .help("how many");

        assert_eq!(argument.default_value(), Some(&Value::Int(42)));
        assert_eq!(argument.help_text(), Some("how many"));
    }
}
