/*!
Parsed values, and the [`Values`] mapping that [`ArgParser::parse`] fills.

[`ArgParser::parse`]: crate::parser::ArgParser::parse
*/

use std::{
    collections::{HashMap, hash_map},
    fmt,
};

use joinery::JoinableIterator;

/// A single parsed argument value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),

    /// Compound values, for custom type strategies that produce more than
    /// one scalar.
    List(Vec<Value>),
}

impl Value {
    /**
    Whether this value counts as "set" when deciding to apply a default.

    Zero, `0.0`, the empty string, `false` and the empty list are all
    falsy; everything else is truthy.
    */
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match *self {
            Value::Int(value) => value != 0,
            Value::Float(value) => value != 0.0,
            Value::Str(ref value) => !value.is_empty(),
            Value::Bool(value) => value,
            Value::List(ref values) => !values.is_empty(),
        }
    }

    #[inline]
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match *self {
            Value::Int(value) => Some(value),
            _ => None,
        }
    }

    /// Get this value as a float. Integers are widened.
    #[inline]
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match *self {
            Value::Float(value) => Some(value),
            Value::Int(value) => Some(value as f64),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match *self {
            Value::Str(ref value) => Some(value),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Value::Bool(value) => Some(value),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match *self {
            Value::List(ref values) => Some(values),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(value) => write!(f, "{value}"),
            Value::Float(value) => write!(f, "{value}"),
            Value::Str(value) => write!(f, "{value}"),
            Value::Bool(value) => write!(f, "{value}"),
            Value::List(values) => write!(f, "[{}]", values.iter().join_with(", ")),
        }
    }
}

macro_rules! from_scalar {
    ($($type:ty => $variant:ident,)*) => {
        $(
            impl From<$type> for Value {
                #[inline]
                fn from(value: $type) -> Self {
                    Value::$variant(value.into())
                }
            }
        )*
    };
}

from_scalar! {
    i64 => Int,
    i32 => Int,
    u32 => Int,
    f64 => Float,
    f32 => Float,
    bool => Bool,
    String => Str,
    &str => Str,
}

impl From<Vec<Value>> for Value {
    #[inline]
    fn from(values: Vec<Value>) -> Self {
        Value::List(values)
    }
}

/**
The output of a parse: argument name to parsed value.

A [`Values`] is never cleared by the parser. Passing the same instance to
several calls of [`ArgParser::parse_into`] accumulates bindings, with later
parses overwriting earlier ones for the same name.

[`ArgParser::parse_into`]: crate::parser::ArgParser::parse_into
*/
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Values {
    values: HashMap<String, Value>,
}

impl Values {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `value` to `name`, returning the previous binding if there was
    /// one.
    #[inline]
    pub fn insert(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.values.insert(name.into(), value)
    }

    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    #[inline]
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.values.remove(name)
    }

    #[inline]
    #[must_use]
    pub fn int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_int)
    }

    #[inline]
    #[must_use]
    pub fn float(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_float)
    }

    #[inline]
    #[must_use]
    pub fn str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    #[inline]
    #[must_use]
    pub fn bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    /// A switch-style lookup: true only if `name` is bound to a truthy value.
    #[inline]
    #[must_use]
    pub fn flag(&self, name: &str) -> bool {
        self.get(name).is_some_and(Value::is_truthy)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> hash_map::Iter<'_, String, Value> {
        self.values.iter()
    }
}

impl<'a> IntoIterator for &'a Values {
    type Item = (&'a String, &'a Value);
    type IntoIter = hash_map::Iter<'a, String, Value>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for Values {
    type Item = (String, Value);
    type IntoIter = hash_map::IntoIter<String, Value>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Values {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        }
    }
}
