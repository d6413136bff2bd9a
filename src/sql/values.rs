use crate::models::SqlValue;

/// One entry of a VALUES list, before typing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub quoted: bool,
}

impl Token {
    fn from_raw(raw: &str) -> Self {
        let trimmed = raw.trim();

        if let Some(inner) = quoted_body(trimmed) {
            return Token {
                text: inner.replace("''", "'"),
                quoted: true,
            };
        }

        Token {
            text: trimmed.to_string(),
            quoted: false,
        }
    }

    pub fn into_value(self) -> SqlValue {
        if self.quoted {
            SqlValue::Text(self.text)
        } else {
            SqlValue::from_bare(&self.text)
        }
    }
}

/// Body of a `'...'` literal, optionally followed by a `::type` cast.
fn quoted_body(token: &str) -> Option<&str> {
    let rest = token.strip_prefix('\'')?;
    let close = rest.rfind('\'')?;
    let tail = &rest[close + 1..];

    if tail.is_empty() || is_cast_suffix(tail) {
        Some(&rest[..close])
    } else {
        None
    }
}

fn is_cast_suffix(tail: &str) -> bool {
    match tail.strip_prefix("::") {
        Some(ty) => {
            !ty.is_empty()
                && ty
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | ' ' | '[' | ']' | '"' | '.'))
        }
        None => false,
    }
}

/// Split the raw text between `VALUES (` and the final `)` on top-level commas.
pub fn tokenize_values(raw: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_string = false;
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\'' if in_string && chars.peek() == Some(&'\'') => {
                current.push_str("''");
                chars.next();
            }
            '\'' => {
                in_string = !in_string;
                current.push(c);
            }
            ',' if !in_string => {
                tokens.push(Token::from_raw(&current));
                current.clear();
            }
            _ => current.push(c),
        }
    }

    // last value has no trailing comma
    if !current.trim().is_empty() || !tokens.is_empty() {
        tokens.push(Token::from_raw(&current));
    }

    tokens
}

pub fn parse_values(raw: &str) -> Vec<SqlValue> {
    tokenize_values(raw)
        .into_iter()
        .map(Token::into_value)
        .collect()
}
