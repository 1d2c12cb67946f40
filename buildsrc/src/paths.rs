//! Text helpers: `${name}` placeholder substitution and `%VAR%` path
//! expansion.

use std::{collections::HashMap, env};

use argot_reader::Reader;

/// Replace every `${name}` in `text` with its value from `vars`. Unknown
/// names are replaced with nothing.
pub fn replace_placeholders(text: &str, vars: &HashMap<&str, String>) -> String {
    let mut reader = Reader::new(text);
    let mut out = String::with_capacity(text.len());

    while let Some(c) = reader.current() {
        if c == '$' && reader.peek(1) == Some('{') {
            reader.next_by(2);
            let name = reader.collect(|c| c != '}');
            // closing brace
            reader.next();

            match vars.get(name.as_str()) {
                Some(value) => out.push_str(value),
                None => tracing::debug!(name = name.as_str(), "no value for placeholder"),
            }
        } else {
            out.push(c);
            reader.next();
        }
    }

    out
}

fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

/**
Normalize `path` to use `/` separators, expanding any segment of the form
`%VAR%` from the environment. Segments naming a variable that isn't set are
kept as written.
*/
pub fn fix_path(path: &str) -> String {
    let mut reader = Reader::new(path);
    let mut segments = Vec::new();

    loop {
        let segment = reader.collect(|c| !is_separator(c));
        segments.push(expand_segment(segment));

        if reader.current().is_none() {
            break;
        }

        reader.next();
    }

    segments.join("/")
}

fn expand_segment(segment: String) -> String {
    let Some(var) = segment
        .strip_prefix('%')
        .and_then(|rest| rest.strip_suffix('%'))
        .filter(|var| !var.is_empty())
    else {
        return segment;
    };

    match env::var(var) {
        Ok(value) => value,
        Err(_) => {
            tracing::debug!(var, "environment variable in path is not set");
            segment
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn placeholders_are_substituted() {
        let vars = HashMap::from([("name", "core".to_owned()), ("version", "2.0".to_owned())]);

        assert_eq!(
            replace_placeholders("module ${name} v${version}!", &vars),
            "module core v2.0!"
        );
    }

    #[test]
    fn unknown_placeholders_vanish() {
        let vars = HashMap::new();
        assert_eq!(replace_placeholders("a${missing}b", &vars), "ab");
    }

    #[test]
    fn lone_dollar_is_kept() {
        let vars = HashMap::new();
        assert_eq!(replace_placeholders("cost: $5 {x}", &vars), "cost: $5 {x}");
    }

    #[test]
    fn separators_are_normalized() {
        assert_eq!(fix_path(r"a\b/c"), "a/b/c");
        assert_eq!(fix_path(r"dir\"), "dir/");
        assert_eq!(fix_path("/abs"), "/abs");
    }

    #[test]
    fn env_segments_are_expanded() {
        let path = env::var("PATH").expect("PATH is set in the test environment");
        assert_eq!(fix_path(r"%PATH%\x"), format!("{path}/x"));
    }

    #[test]
    fn unset_env_segments_are_kept() {
        assert_eq!(
            fix_path("%BUILDSRC_SURELY_NOT_SET_ANYWHERE%/x"),
            "%BUILDSRC_SURELY_NOT_SET_ANYWHERE%/x"
        );
        assert_eq!(fix_path("%%/x"), "%%/x");
    }
}
