//! Path expressions addressing nodes inside a parsed body.
//!
//! Supported syntax: `$` for the root, then any sequence of `.name`, `.*`,
//! `['name']`, `[n]` and `[*]`. The empty string also addresses the root.

use crate::error::{PactError, PactResult};
use serde_json::Value;
use std::fmt;

/// One step of a parsed path expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathToken {
    /// Document root (`$`)
    Root,
    /// Named field (`.name` or `['name']`)
    Field(String),
    /// Array index (`[n]`)
    Index(usize),
    /// Any field (`.*`)
    Star,
    /// Any index (`[*]`)
    StarIndex,
}

impl fmt::Display for PathToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => f.write_str("$"),
            Self::Field(name) if name.chars().all(is_identifier_char) => write!(f, ".{name}"),
            Self::Field(name) => write!(f, "['{name}']"),
            Self::Index(index) => write!(f, "[{index}]"),
            Self::Star => f.write_str(".*"),
            Self::StarIndex => f.write_str("[*]"),
        }
    }
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '-' | '_' | ':' | '@' | '#' | '$')
}

/// Parse a path expression into tokens. The first token is always [`PathToken::Root`].
///
/// # Errors
///
/// Returns [`PactError::InvalidPath`] if the expression is malformed.
pub fn parse_path(expression: &str) -> PactResult<Vec<PathToken>> {
    let mut tokens = vec![PathToken::Root];
    if expression.is_empty() {
        return Ok(tokens);
    }

    let fail = |message: String| PactError::invalid_path(expression, message);
    let mut chars = expression.char_indices().peekable();

    match chars.next() {
        Some((_, '$')) => {}
        _ => return Err(fail("path must start with '$'".to_string())),
    }

    while let Some((position, c)) = chars.next() {
        match c {
            '.' => {
                if chars.next_if(|&(_, c)| c == '*').is_some() {
                    tokens.push(PathToken::Star);
                    continue;
                }
                let mut name = String::new();
                while let Some((_, c)) = chars.next_if(|&(_, c)| is_identifier_char(c)) {
                    name.push(c);
                }
                if name.is_empty() {
                    return Err(fail(format!("expected a field name at position {}", position + 1)));
                }
                tokens.push(PathToken::Field(name));
            }
            '[' => {
                let token = match chars.next() {
                    Some((_, '\'')) => {
                        let mut name = String::new();
                        loop {
                            match chars.next() {
                                Some((_, '\'')) => break,
                                Some((_, c)) => name.push(c),
                                None => return Err(fail("unterminated quoted field name".to_string())),
                            }
                        }
                        PathToken::Field(name)
                    }
                    Some((_, '*')) => PathToken::StarIndex,
                    Some((_, d)) if d.is_ascii_digit() => {
                        let mut digits = String::from(d);
                        while let Some((_, d)) = chars.next_if(|&(_, c)| c.is_ascii_digit()) {
                            digits.push(d);
                        }
                        let index = digits
                            .parse()
                            .map_err(|_| fail(format!("index {digits} is out of range")))?;
                        PathToken::Index(index)
                    }
                    Some((i, other)) => {
                        return Err(fail(format!("unexpected character '{other}' at position {i}")));
                    }
                    None => return Err(fail("unterminated bracket".to_string())),
                };
                match chars.next() {
                    Some((_, ']')) => tokens.push(token),
                    _ => return Err(fail(format!("expected ']' after position {position}"))),
                }
            }
            other => {
                return Err(fail(format!("unexpected character '{other}' at position {position}")));
            }
        }
    }

    Ok(tokens)
}

/// A parsed path expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathExpression {
    expression: String,
    tokens: Vec<PathToken>,
}

impl PathExpression {
    /// Parse a path expression.
    ///
    /// # Errors
    ///
    /// Returns [`PactError::InvalidPath`] if the expression is malformed.
    pub fn parse(expression: &str) -> PactResult<Self> {
        Ok(Self {
            expression: expression.to_string(),
            tokens: parse_path(expression)?,
        })
    }

    /// The expression as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.expression
    }

    /// Parsed tokens, starting with [`PathToken::Root`].
    #[must_use]
    pub fn tokens(&self) -> &[PathToken] {
        &self.tokens
    }

    /// Check if this expression addresses the whole document.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.tokens.len() == 1
    }

    /// Call `f` on every node this expression addresses in `document`.
    ///
    /// Returns the number of nodes visited. Missing fields, out-of-range
    /// indices and type mismatches simply match nothing.
    pub fn apply<F>(&self, document: &mut Value, mut f: F) -> usize
    where
        F: FnMut(&mut Value),
    {
        visit(document, &self.tokens[1..], &mut f)
    }
}

impl fmt::Display for PathExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expression)
    }
}

fn visit<F>(node: &mut Value, tokens: &[PathToken], f: &mut F) -> usize
where
    F: FnMut(&mut Value),
{
    let Some((token, rest)) = tokens.split_first() else {
        f(node);
        return 1;
    };

    match (token, node) {
        (PathToken::Field(name), Value::Object(map)) => {
            map.get_mut(name).map_or(0, |child| visit(child, rest, f))
        }
        (PathToken::Index(index), Value::Array(items)) => {
            items.get_mut(*index).map_or(0, |child| visit(child, rest, f))
        }
        (PathToken::Star | PathToken::StarIndex, Value::Object(map)) => {
            map.values_mut().map(|child| visit(child, rest, f)).sum()
        }
        (PathToken::Star | PathToken::StarIndex, Value::Array(items)) => {
            items.iter_mut().map(|child| visit(child, rest, f)).sum()
        }
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_simple_paths() {
        assert_eq!(parse_path("").unwrap(), vec![PathToken::Root]);
        assert_eq!(parse_path("$").unwrap(), vec![PathToken::Root]);
        assert_eq!(
            parse_path("$.user.id").unwrap(),
            vec![
                PathToken::Root,
                PathToken::Field("user".to_string()),
                PathToken::Field("id".to_string()),
            ]
        );
    }

    #[test]
    fn test_unicode_field_names() {
        assert_eq!(
            parse_path("$.名前.größe").unwrap(),
            vec![
                PathToken::Root,
                PathToken::Field("名前".to_string()),
                PathToken::Field("größe".to_string()),
            ]
        );
        assert_eq!(PathToken::Field("名前".to_string()).to_string(), ".名前");

        let mut doc = json!({"名前": "x", "id": 1});
        let path = PathExpression::parse("$.名前").unwrap();
        assert_eq!(path.apply(&mut doc, |node| *node = json!("y")), 1);
        assert_eq!(doc, json!({"名前": "y", "id": 1}));
    }

    #[test]
    fn test_parse_brackets_and_wildcards() {
        assert_eq!(
            parse_path("$.items[0]['first name'][*].*").unwrap(),
            vec![
                PathToken::Root,
                PathToken::Field("items".to_string()),
                PathToken::Index(0),
                PathToken::Field("first name".to_string()),
                PathToken::StarIndex,
                PathToken::Star,
            ]
        );
    }

    #[test]
    fn test_parse_errors() {
        for bad in ["id", "$.", "$[", "$['id'", "$[abc]", "$[1", "$ id", "$..id"] {
            let err = parse_path(bad).unwrap_err();
            assert!(err.is_validation(), "{bad} should fail validation");
        }
    }

    #[test]
    fn test_apply_single_field() {
        let mut doc = json!({"id": 1, "name": "x"});
        let path = PathExpression::parse("$.id").unwrap();
        let count = path.apply(&mut doc, |node| *node = json!(42));
        assert_eq!(count, 1);
        assert_eq!(doc, json!({"id": 42, "name": "x"}));
    }

    #[test]
    fn test_apply_wildcards() {
        let mut doc = json!({"items": [{"id": 1}, {"id": 2}, {"other": 3}]});
        let path = PathExpression::parse("$.items[*].id").unwrap();
        let count = path.apply(&mut doc, |node| *node = json!(0));
        assert_eq!(count, 2);
        assert_eq!(doc, json!({"items": [{"id": 0}, {"id": 0}, {"other": 3}]}));

        let path = PathExpression::parse("$.*").unwrap();
        let mut flat = json!({"a": 1, "b": 2});
        assert_eq!(path.apply(&mut flat, |node| *node = json!(null)), 2);
    }

    #[test]
    fn test_apply_no_match() {
        let mut doc = json!({"id": 1, "list": [1]});
        let original = doc.clone();
        for expr in ["$.missing", "$.list[5]", "$.id.nested", "$.id[0]"] {
            let path = PathExpression::parse(expr).unwrap();
            assert_eq!(path.apply(&mut doc, |node| *node = json!("x")), 0);
        }
        assert_eq!(doc, original);
    }

    #[test]
    fn test_apply_root() {
        let mut doc = json!([1, 2]);
        let path = PathExpression::parse("").unwrap();
        assert!(path.is_root());
        assert_eq!(path.apply(&mut doc, |node| *node = json!("all")), 1);
        assert_eq!(doc, json!("all"));
    }

    #[test]
    fn test_token_display() {
        assert_eq!(PathToken::Field("id".to_string()).to_string(), ".id");
        assert_eq!(PathToken::Field("a b".to_string()).to_string(), "['a b']");
        assert_eq!(PathToken::Index(3).to_string(), "[3]");
    }
}
