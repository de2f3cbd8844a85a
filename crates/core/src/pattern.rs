//! Glob matching for object keys
//!
//! Keys are matched as `/`-separated paths: `*` and `?` stay within one
//! segment, while a `**` component spans any number of segments, including
//! none. On top of what `glob::Pattern` understands, patterns accept brace
//! alternatives (`{csv,tsv}`), `[^...]` negated classes and `\` escapes.
//! A run of stars that is not a whole path component acts as a single `*`.

use glob::{MatchOptions, Pattern};

use crate::error::{Error, Result};

const KEY_MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Upper bound on the patterns a single brace expression may expand to
const MAX_ALTERNATIVES: usize = 1024;

/// A validated glob pattern matched against whole object keys
#[derive(Debug, Clone)]
pub struct KeyMatcher {
    source: String,
    alternatives: Vec<Pattern>,
}

impl KeyMatcher {
    /// Compile `pattern`, failing with [`Error::Pattern`] on invalid syntax
    pub fn new(pattern: &str) -> Result<Self> {
        let invalid = |reason: &dyn std::fmt::Display| Error::Pattern(format!("'{pattern}': {reason}"));

        let expanded = expand_braces(pattern).map_err(|reason| invalid(&reason))?;
        let alternatives = expanded
            .iter()
            .map(|alternative| {
                let translated = translate(alternative).map_err(|reason| invalid(&reason))?;
                Pattern::new(&translated).map_err(|e| invalid(&e))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            source: pattern.to_string(),
            alternatives,
        })
    }

    /// Check whether `key` matches the full pattern
    pub fn matches(&self, key: &str) -> bool {
        self.alternatives
            .iter()
            .any(|pattern| pattern.matches_with(key, KEY_MATCH_OPTIONS))
    }

    /// The pattern source text
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

/// Index of the `]` closing a class opened at `open`, if there is one
///
/// A `]` right after `[`, `[!` or `[^` belongs to the class.
fn class_end(chars: &[char], open: usize) -> Option<usize> {
    let mut i = open + 1;
    if matches!(chars.get(i), Some('!' | '^')) {
        i += 1;
    }
    if chars.get(i) == Some(&']') {
        i += 1;
    }
    chars[i.min(chars.len())..]
        .iter()
        .position(|&c| c == ']')
        .map(|offset| i + offset)
}

/// Expand the first brace expression of `pattern`, recursively
///
/// Escaped characters and character classes are copied through untouched so
/// that [`translate`] still sees them.
fn expand_braces(pattern: &str) -> std::result::Result<Vec<String>, String> {
    let chars: Vec<char> = pattern.chars().collect();

    let mut open = None;
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '\\' => i += 1,
            '[' => i = class_end(&chars, i).unwrap_or(i),
            '{' => {
                open = Some(i);
                break;
            }
            _ => {}
        }
        i += 1;
    }
    let Some(open) = open else {
        return Ok(vec![pattern.to_string()]);
    };

    let mut depth = 0usize;
    let mut bounds = vec![open];
    let mut close = None;
    let mut i = open;
    while i < chars.len() {
        match chars[i] {
            '\\' => i += 1,
            '[' => i = class_end(&chars, i).unwrap_or(i),
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    close = Some(i);
                    break;
                }
            }
            ',' if depth == 1 => bounds.push(i),
            _ => {}
        }
        i += 1;
    }
    let close = close.ok_or_else(|| "unclosed '{'".to_string())?;
    bounds.push(close);

    let head: String = chars[..open].iter().collect();
    let tail: String = chars[close + 1..].iter().collect();

    let mut expanded = Vec::new();
    for window in bounds.windows(2) {
        let option: String = chars[window[0] + 1..window[1]].iter().collect();
        expanded.extend(expand_braces(&format!("{head}{option}{tail}"))?);
        if expanded.len() > MAX_ALTERNATIVES {
            return Err(format!("expands to more than {MAX_ALTERNATIVES} alternatives"));
        }
    }
    Ok(expanded)
}

/// Rewrite a brace-free pattern into `glob::Pattern` syntax
fn translate(pattern: &str) -> std::result::Result<String, String> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len());

    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '\\' => {
                let escaped = chars
                    .get(i + 1)
                    .ok_or_else(|| "trailing '\\'".to_string())?;
                push_literal(&mut out, *escaped);
                i += 2;
            }
            '*' => {
                let start = i;
                while chars.get(i) == Some(&'*') {
                    i += 1;
                }
                let whole_component = (start == 0 || chars[start - 1] == '/')
                    && (i == chars.len() || chars[i] == '/');
                out.push_str(if i - start >= 2 && whole_component {
                    "**"
                } else {
                    "*"
                });
            }
            '[' => match class_end(&chars, i) {
                Some(end) => {
                    out.push('[');
                    let mut j = i + 1;
                    if matches!(chars[j], '!' | '^') {
                        out.push('!');
                        j += 1;
                    }
                    out.extend(&chars[j..end]);
                    out.push(']');
                    i = end + 1;
                }
                // Unterminated, left for glob to reject
                None => {
                    out.push('[');
                    i += 1;
                }
            },
            c => {
                out.push(c);
                i += 1;
            }
        }
    }
    Ok(out)
}

fn push_literal(out: &mut String, c: char) {
    if matches!(c, '*' | '?' | '[' | ']') {
        out.push('[');
        out.push(c);
        out.push(']');
    } else {
        out.push(c);
    }
}
