use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// Role
///
/// Ordinary     : plain data column
/// PrimaryKey   : identifies the row; used for key predicates
/// Incrementing : counter-like column, written like any other column
///

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    #[default]
    Ordinary,
    PrimaryKey,
    Incrementing,
}

///
/// ColumnKind
///
/// Value shape of a column; drives literal and null-marker rendering.
///

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(rename_all = "kebab-case")]
#[remain::sorted]
pub enum ColumnKind {
    Boolean,
    Decimal,
    Integer,
    Text,
    Timestamp,
}

impl ColumnKind {
    /// Literal written for a selected column with no value when the column
    /// does not render the quoted null marker.
    #[must_use]
    pub const fn empty_literal(self) -> &'static str {
        match self {
            Self::Boolean | Self::Decimal | Self::Integer => "0",
            Self::Text | Self::Timestamp => "''",
        }
    }
}

///
/// ColumnId
/// Ordinal of a column within its table model.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[display("#{_0}")]
pub struct ColumnId(usize);

impl ColumnId {
    pub(crate) const fn new(ordinal: usize) -> Self {
        Self(ordinal)
    }

    #[must_use]
    pub const fn ordinal(self) -> usize {
        self.0
    }
}

///
/// Column
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Column {
    pub name: String,
    pub sql_name: String,
    pub kind: ColumnKind,
    pub role: Role,
    pub renders_null_as_literal: bool,
}

impl Column {
    #[must_use]
    pub fn new(name: impl Into<String>, sql_name: impl Into<String>, kind: ColumnKind) -> Self {
        Self {
            name: name.into(),
            sql_name: sql_name.into(),
            kind,
            role: Role::Ordinary,
            renders_null_as_literal: true,
        }
    }

    #[must_use]
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    #[must_use]
    pub fn with_null_literal(mut self, renders_null_as_literal: bool) -> Self {
        self.renders_null_as_literal = renders_null_as_literal;
        self
    }

    #[must_use]
    pub fn is_primary_key(&self) -> bool {
        self.role == Role::PrimaryKey
    }
}
