/*!
Turning a list of separate command-line tokens back into the single string
that [`ArgParser::parse`][crate::ArgParser::parse] expects.
*/

use std::borrow::Cow;

use joinery::Joinable;

/**
Quote a single token so that the built-in string strategy reads it back as
exactly one value. Tokens without whitespace are left alone; tokens with
whitespace, empty tokens, and tokens that start with a quote are wrapped in
double quotes, with embedded quotes and backslashes escaped.
*/
#[must_use]
pub fn quote(token: &str) -> Cow<'_, str> {
    let bytes = token.as_bytes();

    let needs_quotes = match bytes.first() {
        None | Some(b'\'' | b'"') => true,
        Some(_) => token.chars().any(char::is_whitespace),
    };

    if !needs_quotes {
        return Cow::Borrowed(token);
    }

    if memchr::memchr2(b'"', b'\\', bytes).is_none() {
        return Cow::Owned(format!("\"{token}\""));
    }

    let mut quoted = String::with_capacity(token.len() + 4);
    quoted.push('"');
    for c in token.chars() {
        if matches!(c, '"' | '\\') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');

    Cow::Owned(quoted)
}

/// Join `tokens` with single spaces, quoting the ones that need it.
#[must_use]
pub fn stitch<I>(tokens: I) -> String
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let tokens: Vec<I::Item> = tokens.into_iter().collect();
    let quoted: Vec<Cow<'_, str>> = tokens.iter().map(|token| quote(token.as_ref())).collect();

    quoted.join_with(' ').to_string()
}

/// Like [`stitch`], but skips the first token, which is the program name in
/// an argv-style list.
#[must_use]
pub fn stitch_args<I>(args: I) -> String
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    stitch(args.into_iter().skip(1))
}
