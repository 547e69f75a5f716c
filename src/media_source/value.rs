use std::fmt;

/// A typed literal from a replay directive line.
///
/// Directive values are written as literals: decimal or `0x` hex integers,
/// decimals, single- or double-quoted strings, and booleans. Anything else is
/// not a value, and the line carrying it is skipped.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
}

impl Value {
    /// Parses one literal, `None` when the text is not a recognized literal.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }

        if s.len() >= 2 {
            for quote in ['"', '\''] {
                if s.starts_with(quote) && s.ends_with(quote) {
                    return Some(Value::Str(s[1..s.len() - 1].to_string()));
                }
            }
        }

        match s {
            "true" | "True" => return Some(Value::Bool(true)),
            "false" | "False" => return Some(Value::Bool(false)),
            _ => {}
        }

        let (sign, digits) = match s.strip_prefix('-') {
            Some(rest) => (-1i64, rest),
            None => (1i64, s),
        };
        if let Some(hex) = digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
            return i64::from_str_radix(hex, 16)
                .ok()
                .map(|v| Value::Int(sign * v));
        }

        if let Ok(v) = s.parse::<i64>() {
            return Some(Value::Int(v));
        }
        s.parse::<f64>().ok().map(Value::Float)
    }

    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Accepts both numeric forms, so `period=1` and `period=0.02` work.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_u8(&self) -> Option<u8> {
        self.as_i64().and_then(|v| u8::try_from(v).ok())
    }

    #[must_use]
    pub fn into_str(self) -> Option<String> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Str(v) => write!(f, "{v:?}"),
            Value::Bool(v) => write!(f, "{v}"),
        }
    }
}
