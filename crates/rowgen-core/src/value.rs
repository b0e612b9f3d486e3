use crate::{
    error::ModelError,
    model::{Column, ColumnKind},
};
use derive_more::Display;
use rust_decimal::Decimal as WrappedDecimal;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

///
/// CONSTANTS
///

/// Rendered in place of a selected column that carries no value.
pub const NULL_MARKER: &str = "'null'";

///
/// Decimal
///
/// Parsed decimal number. Renders as plain digits with an optional sign and
/// fraction, so it is always a numeric literal.
///

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct Decimal(WrappedDecimal);

impl Decimal {
    pub fn parse(text: &str) -> Result<Self, ModelError> {
        let trimmed = text.trim();
        let digits = trimmed.strip_prefix('-').unwrap_or(trimmed);
        let (whole, fraction) = digits.split_once('.').unwrap_or((digits, "0"));

        let is_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        if !is_digits(whole) || !is_digits(fraction) {
            return Err(ModelError::InvalidDecimal {
                text: text.to_string(),
            });
        }

        WrappedDecimal::from_str_exact(trimmed)
            .map(Self)
            .map_err(|_| ModelError::InvalidDecimal {
                text: text.to_string(),
            })
    }
}

impl FromStr for Decimal {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Decimal {
    type Error = ModelError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Decimal> for String {
    fn from(d: Decimal) -> Self {
        d.to_string()
    }
}

impl From<WrappedDecimal> for Decimal {
    fn from(d: WrappedDecimal) -> Self {
        Self(d)
    }
}

///
/// Value
///
/// A populated record field.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[remain::sorted]
pub enum Value {
    Boolean(bool),
    Decimal(Decimal),
    Integer(i64),
    Text(String),
    Timestamp(String),
}

impl Value {
    /// Decimal value from its text form; rejects anything that is not a
    /// plain number.
    pub fn decimal(text: &str) -> Result<Self, ModelError> {
        Decimal::parse(text).map(Self::Decimal)
    }

    #[must_use]
    pub const fn kind(&self) -> ColumnKind {
        match self {
            Self::Boolean(_) => ColumnKind::Boolean,
            Self::Decimal(_) => ColumnKind::Decimal,
            Self::Integer(_) => ColumnKind::Integer,
            Self::Text(_) => ColumnKind::Text,
            Self::Timestamp(_) => ColumnKind::Timestamp,
        }
    }

    /// SQL literal form: numbers bare, booleans as `1`/`0`, strings quoted.
    #[must_use]
    pub fn to_literal(&self) -> String {
        match self {
            Self::Boolean(b) => u8::from(*b).to_string(),
            Self::Decimal(d) => d.to_string(),
            Self::Integer(n) => n.to_string(),
            Self::Text(s) | Self::Timestamp(s) => quote(s),
        }
    }

    /// Unquoted text form, as a bound parameter prints inside a criteria
    /// fragment.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::Boolean(b) => u8::from(*b).to_string(),
            Self::Decimal(d) => d.to_string(),
            Self::Integer(n) => n.to_string(),
            Self::Text(s) | Self::Timestamp(s) => escape(s),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_literal())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Integer(i64::from(n))
    }
}

impl From<Decimal> for Value {
    fn from(d: Decimal) -> Self {
        Self::Decimal(d)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

///
/// RenderedValue
///
/// Value expression chosen for an included column.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RenderedValue {
    Present(Value),
    NullMarker,
}

impl RenderedValue {
    /// Render against the owning column. Never produces a bare `NULL`.
    #[must_use]
    pub fn render(&self, column: &Column) -> String {
        match self {
            Self::Present(value) => value.to_literal(),
            Self::NullMarker if column.renders_null_as_literal => NULL_MARKER.to_string(),
            Self::NullMarker => column.kind.empty_literal().to_string(),
        }
    }

    #[must_use]
    pub const fn value(&self) -> Option<&Value> {
        match self {
            Self::Present(value) => Some(value),
            Self::NullMarker => None,
        }
    }
}

// escape
// doubles quotes and backslashes so the text is inert inside '...'
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\'' => out.push_str("''"),
            '\\' => out.push_str("\\\\"),
            _ => out.push(c),
        }
    }

    out
}

fn quote(s: &str) -> String {
    format!("'{}'", escape(s))
}
