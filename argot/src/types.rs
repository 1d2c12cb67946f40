/*!
Type tags, type strategies, and the registry that maps one to the other.

A type strategy reads its own token directly out of a [`Reader`]: it decides
where its value ends, consumes exactly that much, and converts it. This is
what lets a quoted string contain spaces while an integer stops at the first
non-digit.
*/

use std::{borrow::Cow, collections::HashMap, fmt, sync::Arc};

use argot_reader::Reader;

use crate::{error::ValueError, value::Value};

/// Identifies which strategy parses an argument's value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Int,
    Float,
    Str,
    Bool,

    /// A caller-defined type, registered with
    /// [`ArgParser::add_type`][crate::ArgParser::add_type].
    Custom(Cow<'static, str>),
}

impl TypeTag {
    #[inline]
    #[must_use]
    pub fn custom(name: impl Into<Cow<'static, str>>) -> Self {
        Self::Custom(name.into())
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::Int => f.write_str("int"),
            TypeTag::Float => f.write_str("float"),
            TypeTag::Str => f.write_str("str"),
            TypeTag::Bool => f.write_str("bool"),
            TypeTag::Custom(name) => f.write_str(name),
        }
    }
}

/**
A parsing strategy for one [`TypeTag`].

Implementations consume their token from `reader` and leave the cursor
immediately after it. Any closure of the right shape is a strategy.
*/
pub trait TypeStrategy: Send + Sync {
    fn parse(&self, reader: &mut Reader) -> Result<Value, ValueError>;
}

impl<F> TypeStrategy for F
where
    F: Fn(&mut Reader) -> Result<Value, ValueError> + Send + Sync,
{
    #[inline]
    fn parse(&self, reader: &mut Reader) -> Result<Value, ValueError> {
        self(reader)
    }
}

/// Mapping from [`TypeTag`] to [`TypeStrategy`]. One strategy per tag;
/// defining a tag again replaces the earlier strategy.
#[derive(Clone)]
pub struct TypeRegistry {
    strategies: HashMap<TypeTag, Arc<dyn TypeStrategy>>,
}

impl TypeRegistry {
    /// A registry with no strategies at all, not even the built-ins.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            strategies: HashMap::new(),
        }
    }

    /// A registry seeded with the built-in int, float, str and bool
    /// strategies.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self::empty();

        registry.define(TypeTag::Int, parse_int);
        registry.define(TypeTag::Float, parse_float);
        registry.define(TypeTag::Str, parse_str);
        registry.define(TypeTag::Bool, parse_bool);

        registry
    }

    pub fn define(&mut self, tag: TypeTag, strategy: impl TypeStrategy + 'static) {
        if self.strategies.insert(tag.clone(), Arc::new(strategy)).is_some() {
            tracing::debug!(%tag, "replaced type strategy");
        }
    }

    #[inline]
    #[must_use]
    pub fn lookup(&self, tag: &TypeTag) -> Option<&dyn TypeStrategy> {
        self.strategies.get(tag).map(|strategy| &**strategy)
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, tag: &TypeTag) -> bool {
        self.strategies.contains_key(tag)
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.strategies.keys()).finish()
    }
}

#[inline]
fn is_token_char(c: char) -> bool {
    !c.is_whitespace()
}

/// Collect `-` and digits, then convert to an integer.
pub fn parse_int(reader: &mut Reader) -> Result<Value, ValueError> {
    let text = reader.collect(|c| c.is_ascii_digit() || c == '-');

    match text.parse() {
        Ok(value) => Ok(Value::Int(value)),
        Err(error) => Err(ValueError::InvalidInt { text, error }),
    }
}

/// Collect `-`, `.` and digits, then convert to a float.
pub fn parse_float(reader: &mut Reader) -> Result<Value, ValueError> {
    let text = reader.collect(|c| c.is_ascii_digit() || c == '-' || c == '.');

    match text.parse() {
        Ok(value) => Ok(Value::Float(value)),
        Err(error) => Err(ValueError::InvalidFloat { text, error }),
    }
}

/**
Parse a string: either a quoted string, or a bare whitespace-delimited token.

A quoted string starts with `'` or `"` and runs to the next unescaped
instance of the same quote. A backslash includes the next character
verbatim. Both quotes are consumed; neither appears in the result. A string
with no closing quote runs to the end of the input.
*/
pub fn parse_str(reader: &mut Reader) -> Result<Value, ValueError> {
    let quote = match reader.current() {
        Some(quote @ ('\'' | '"')) => quote,
        _ => return Ok(Value::Str(reader.collect(is_token_char))),
    };

    let mut text = String::new();
    reader.next();

    while let Some(c) = reader.current().filter(|&c| c != quote) {
        match c {
            '\\' => match reader.next() {
                Some(escaped) => text.push(escaped),
                None => break,
            },
            c => text.push(c),
        }

        reader.next();
    }

    // closing quote
    reader.next();

    Ok(Value::Str(text))
}

/// Parse a bool: a lone `1` or `0`, otherwise a token that is true only if
/// it is exactly `true`.
pub fn parse_bool(reader: &mut Reader) -> Result<Value, ValueError> {
    let value = match reader.current() {
        Some('1') => true,
        Some('0') => false,
        _ => return Ok(Value::Bool(reader.collect(is_token_char) == "true")),
    };

    reader.next();
    Ok(Value::Bool(value))
}

#[cfg(test)]
mod tests {
    use argot_reader::Reader;

    use super::*;

    fn run(strategy: impl TypeStrategy, text: &str) -> (Result<Value, ValueError>, String) {
        let mut reader = Reader::new(text);
        let value = strategy.parse(&mut reader);
        (value, reader.remaining())
    }

    #[test]
    fn int_stops_at_non_digit() {
        let (value, rest) = run(parse_int, "-42 rest");
        assert_eq!(value, Ok(Value::Int(-42)));
        assert_eq!(rest, " rest");
    }

    #[test]
    fn int_rejects_empty() {
        let (value, _) = run(parse_int, "abc");
        assert!(matches!(value, Err(ValueError::InvalidInt { ref text, .. }) if text.is_empty()));
    }

    #[test]
    fn int_rejects_inner_minus() {
        let (value, _) = run(parse_int, "1-2");
        assert!(matches!(value, Err(ValueError::InvalidInt { .. })));
    }

    #[test]
    fn float_collects_one_token() {
        let (value, rest) = run(parse_float, "-1.5x");
        assert_eq!(value, Ok(Value::Float(-1.5)));
        assert_eq!(rest, "x");

        let (value, _) = run(parse_float, "1.2.3");
        assert!(matches!(value, Err(ValueError::InvalidFloat { .. })));
    }

    #[test]
    fn bare_string() {
        let (value, rest) = run(parse_str, "hello world");
        assert_eq!(value, Ok(Value::from("hello")));
        assert_eq!(rest, " world");
    }

    #[test]
    fn quoted_string_with_escapes() {
        let (value, rest) = run(parse_str, r#""a \"b\" c" next"#);
        assert_eq!(value, Ok(Value::from(r#"a "b" c"#)));
        assert_eq!(rest, " next");

        let (value, _) = run(parse_str, r"'it\'s'");
        assert_eq!(value, Ok(Value::from("it's")));
    }

    #[test]
    fn other_quote_kind_is_plain() {
        let (value, rest) = run(parse_str, r#"'say "hi"' x"#);
        assert_eq!(value, Ok(Value::from(r#"say "hi""#)));
        assert_eq!(rest, " x");
    }

    #[test]
    fn unterminated_quote_runs_to_end() {
        let (value, rest) = run(parse_str, "\"open ended");
        assert_eq!(value, Ok(Value::from("open ended")));
        assert_eq!(rest, "");
    }

    #[test]
    fn bool_digits_consume_one_char() {
        let (value, rest) = run(parse_bool, "1 x");
        assert_eq!(value, Ok(Value::Bool(true)));
        assert_eq!(rest, " x");

        let (value, _) = run(parse_bool, "0");
        assert_eq!(value, Ok(Value::Bool(false)));
    }

    #[test]
    fn bool_words() {
        assert_eq!(run(parse_bool, "true").0, Ok(Value::Bool(true)));
        assert_eq!(run(parse_bool, "True").0, Ok(Value::Bool(false)));
        assert_eq!(run(parse_bool, "yes").0, Ok(Value::Bool(false)));
        assert_eq!(run(parse_bool, "").0, Ok(Value::Bool(false)));
    }

    #[test]
    fn redefining_replaces() {
        let mut registry = TypeRegistry::new();
        registry.define(TypeTag::Int, |_: &mut Reader| -> Result<Value, ValueError> {
            Ok(Value::Int(7))
        });

        let strategy = registry.lookup(&TypeTag::Int).expect("int is registered");
        let mut reader = Reader::new("123");
        assert_eq!(strategy.parse(&mut reader), Ok(Value::Int(7)));
    }

    #[test]
    fn empty_registry_has_nothing() {
        let registry = TypeRegistry::empty();
        assert!(!registry.contains(&TypeTag::Str));
        assert!(registry.lookup(&TypeTag::custom("version")).is_none());
    }
}
