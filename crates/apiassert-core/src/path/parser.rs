//! Hand-written parser for the path dialect.

use super::{FilterOp, Segment};
use serde_json::Value;

pub(super) fn parse_segments(source: &str) -> Result<Vec<Segment>, String> {
    let src = source.trim();
    if src.is_empty() {
        return Err("empty path expression".to_string());
    }

    let mut cursor = Cursor { src, pos: 0 };
    let mut segments = Vec::new();

    // `$` is optional; a bare leading name is a child of the root.
    if !cursor.eat('$') && !matches!(cursor.peek(), Some('.') | Some('[')) {
        segments.push(Segment::Child(cursor.name()?));
    }

    while let Some(c) = cursor.peek() {
        match c {
            '.' => {
                cursor.bump();
                if cursor.eat('.') {
                    if matches!(cursor.peek(), Some('*') | Some('[')) {
                        return Err(format!(
                            "descendant selector at offset {} needs a key name",
                            cursor.pos
                        ));
                    }
                    segments.push(Segment::Descendant(cursor.name()?));
                } else if cursor.eat('*') {
                    segments.push(Segment::Wildcard);
                } else {
                    segments.push(Segment::Child(cursor.name()?));
                }
            }
            '[' => {
                cursor.bump();
                segments.push(cursor.bracket()?);
            }
            other => {
                return Err(format!(
                    "unexpected `{}` at offset {}",
                    other, cursor.pos
                ))
            }
        }
    }

    Ok(segments)
}

struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), String> {
        self.skip_ws();
        if self.eat(expected) {
            Ok(())
        } else {
            Err(format!("expected `{}` at offset {}", expected, self.pos))
        }
    }

    /// Unquoted key: everything up to the next `.` or `[`.
    fn name(&mut self) -> Result<String, String> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c == '.' || c == '[' {
                break;
            }
            self.bump();
        }
        let name = &self.src[start..self.pos];
        if name.is_empty() {
            Err(format!("missing key name at offset {}", start))
        } else {
            Ok(name.to_string())
        }
    }

    fn quoted(&mut self) -> Result<String, String> {
        let start = self.pos;
        let quote = self.bump().ok_or("unexpected end of path")?;
        let mut out = String::new();
        loop {
            match self.bump() {
                Some('\\') => match self.bump() {
                    Some(c) => out.push(c),
                    None => break,
                },
                Some(c) if c == quote => return Ok(out),
                Some(c) => out.push(c),
                None => break,
            }
        }
        Err(format!("unterminated string starting at offset {}", start))
    }

    /// Raw bracket content up to the closing `]`, honouring quotes.
    fn until_close(&mut self) -> Result<&'a str, String> {
        let start = self.pos;
        let mut quote: Option<char> = None;
        while let Some(c) = self.bump() {
            match (quote, c) {
                (Some(_), '\\') => {
                    self.bump();
                }
                (Some(q), c) if c == q => quote = None,
                (None, '\'') | (None, '"') => quote = Some(c),
                (None, ']') => return Ok(&self.src[start..self.pos - 1]),
                _ => {}
            }
        }
        Err(format!("unterminated `[` starting at offset {}", start - 1))
    }

    fn bracket(&mut self) -> Result<Segment, String> {
        self.skip_ws();
        match self.peek() {
            Some('*') => {
                self.bump();
                self.expect(']')?;
                Ok(Segment::Wildcard)
            }
            Some('\'') | Some('"') => {
                let key = self.quoted()?;
                self.expect(']')?;
                Ok(Segment::Child(key))
            }
            _ => {
                let offset = self.pos;
                let content = self.until_close()?.trim();
                bracket_content(content).map_err(|e| format!("{} (offset {})", e, offset))
            }
        }
    }
}

fn bracket_content(content: &str) -> Result<Segment, String> {
    if content.is_empty() {
        return Err("empty brackets".to_string());
    }
    if let Some(inner) = content.strip_prefix('?') {
        let inner = inner.trim();
        let inner = inner
            .strip_prefix('(')
            .and_then(|s| s.strip_suffix(')'))
            .unwrap_or(inner);
        return filter(inner);
    }
    if let Ok(index) = content.parse::<i64>() {
        return Ok(Segment::Index(index));
    }
    if content
        .chars()
        .all(|c| c.is_ascii_digit() || c == '-' || c == ':' || c.is_whitespace())
    {
        return slice(content);
    }
    if content.contains('=') {
        return filter(content);
    }
    Err(format!("unsupported selector `[{}]`", content))
}

fn slice(content: &str) -> Result<Segment, String> {
    let parts: Vec<&str> = content.split(':').collect();
    if parts.len() != 2 {
        return Err(format!("slice `[{}]` must have the form start:end", content));
    }
    let bound = |part: &str| -> Result<Option<i64>, String> {
        let part = part.trim();
        if part.is_empty() {
            Ok(None)
        } else {
            part.parse::<i64>()
                .map(Some)
                .map_err(|_| format!("invalid slice bound `{}`", part))
        }
    };
    Ok(Segment::Slice {
        start: bound(parts[0])?,
        end: bound(parts[1])?,
    })
}

fn filter(content: &str) -> Result<Segment, String> {
    let (field, op, literal) = split_comparison(content)
        .ok_or_else(|| format!("filter `{}` has no `=` or `!=`", content))?;
    let field = field.trim();
    let field = field.strip_prefix("@.").unwrap_or(field).trim();
    if field.is_empty() {
        return Err(format!("filter `{}` has no field name", content));
    }
    Ok(Segment::Filter {
        field: field.to_string(),
        op,
        value: literal_value(literal.trim())?,
    })
}

/// Split on the first comparison operator outside quotes.
fn split_comparison(content: &str) -> Option<(&str, FilterOp, &str)> {
    let bytes = content.as_bytes();
    let mut quote: Option<u8> = None;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        match quote {
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None => match b {
                b'\'' | b'"' => quote = Some(b),
                b'!' if bytes.get(i + 1) == Some(&b'=') => {
                    return Some((&content[..i], FilterOp::Ne, &content[i + 2..]));
                }
                b'=' => {
                    let skip = if bytes.get(i + 1) == Some(&b'=') { 2 } else { 1 };
                    return Some((&content[..i], FilterOp::Eq, &content[i + skip..]));
                }
                _ => {}
            },
        }
        i += 1;
    }
    None
}

fn literal_value(literal: &str) -> Result<Value, String> {
    if literal.len() >= 2 {
        let first = literal.as_bytes()[0];
        let last = literal.as_bytes()[literal.len() - 1];
        if (first == b'\'' || first == b'"') && first == last {
            let mut cursor = Cursor {
                src: literal,
                pos: 0,
            };
            return cursor.quoted().map(Value::String);
        }
    }
    match literal {
        "true" => Ok(Value::Bool(true)),
        "false" => Ok(Value::Bool(false)),
        "null" => Ok(Value::Null),
        _ => match serde_json::from_str::<Value>(literal) {
            Ok(v @ Value::Number(_)) => Ok(v),
            _ => Err(format!("invalid filter literal `{}`", literal)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_dot_and_bracket_children() {
        let segs = parse_segments("$.data['odd key'][\"x\"]").unwrap();
        assert_eq!(
            segs,
            vec![
                Segment::Child("data".to_string()),
                Segment::Child("odd key".to_string()),
                Segment::Child("x".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_index_slice_wildcard() {
        let segs = parse_segments("$.a[-1][1:][*].*").unwrap();
        assert_eq!(
            segs,
            vec![
                Segment::Child("a".to_string()),
                Segment::Index(-1),
                Segment::Slice {
                    start: Some(1),
                    end: None
                },
                Segment::Wildcard,
                Segment::Wildcard,
            ]
        );
    }

    #[test]
    fn test_parse_filters() {
        assert_eq!(
            parse_segments("$[className='com.x.LoginTest']").unwrap(),
            vec![Segment::Filter {
                field: "className".to_string(),
                op: FilterOp::Eq,
                value: json!("com.x.LoginTest"),
            }]
        );
        assert_eq!(
            parse_segments("$.list[?(@.n != 3)]").unwrap(),
            vec![
                Segment::Child("list".to_string()),
                Segment::Filter {
                    field: "n".to_string(),
                    op: FilterOp::Ne,
                    value: json!(3),
                }
            ]
        );
    }

    #[test]
    fn test_quoted_bracket_may_contain_close_bracket() {
        let segs = parse_segments("$[name='a]b']").unwrap();
        assert_eq!(
            segs,
            vec![Segment::Filter {
                field: "name".to_string(),
                op: FilterOp::Eq,
                value: json!("a]b"),
            }]
        );
    }

    #[test]
    fn test_parse_errors() {
        for bad in ["", "   ", "$.", "$..", "$[", "$[]", "$[1:2:3]", "$[a=]", "$x", "$..[0]"] {
            assert!(parse_segments(bad).is_err(), "`{}` should not parse", bad);
        }
    }
}
