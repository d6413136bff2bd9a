use serde::Serialize;
use serde_json::Number;
use std::fmt;

/// A single value decoded from an INSERT statement's VALUES list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SqlValue {
    Null,
    Bool(bool),
    Number(Number),
    Text(String),
}

impl SqlValue {
    /// Map a bare (unquoted) token: NULL, TRUE/FALSE, numbers, otherwise text.
    pub fn from_bare(token: &str) -> Self {
        if token.eq_ignore_ascii_case("null") {
            return SqlValue::Null;
        }
        if token.eq_ignore_ascii_case("true") {
            return SqlValue::Bool(true);
        }
        if token.eq_ignore_ascii_case("false") {
            return SqlValue::Bool(false);
        }
        if let Some(n) = parse_number(token) {
            return SqlValue::Number(n);
        }
        SqlValue::Text(token.to_string())
    }

    /// Plain text rendering used by CSV export (NULL → empty field).
    pub fn to_field(&self) -> String {
        match self {
            SqlValue::Null => String::new(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Null => write!(f, "NULL"),
            SqlValue::Bool(b) => write!(f, "{}", b),
            SqlValue::Number(n) => write!(f, "{}", n),
            SqlValue::Text(s) => write!(f, "{}", s),
        }
    }
}

fn parse_number(token: &str) -> Option<Number> {
    if token.is_empty() {
        return None;
    }
    if let Ok(i) = token.parse::<i64>() {
        return Some(Number::from(i));
    }
    if let Ok(u) = token.parse::<u64>() {
        return Some(Number::from(u));
    }
    // integers wider than 64 bits would lose digits as f64; keep them as text
    let digits = token.strip_prefix(['-', '+']).unwrap_or(token);
    if digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    // "inf"/"NaN" parse as f64 but are not SQL numbers
    if !token
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
    {
        return None;
    }
    token.parse::<f64>().ok().and_then(Number::from_f64)
}
