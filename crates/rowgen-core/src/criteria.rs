use crate::{
    error::{ModelError, StatementError},
    model::{ColumnId, TableColumn, TableModel},
    record::Row,
    value::Value,
};
use std::fmt;

///
/// Condition
/// One equality produced by the by-example builder.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Condition {
    pub column: ColumnId,
    pub value: Value,
}

///
/// Criteria
///
/// Predicate fragment used by the by-criteria statement shapes. The
/// fragment is concatenated verbatim; `match_columns` names the columns it
/// locates rows by.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Criteria {
    fragment: String,
    match_columns: Vec<ColumnId>,
    conditions: Vec<Condition>,
}

impl Criteria {
    /// Wrap an externally built fragment.
    #[must_use]
    pub fn raw(fragment: impl Into<String>, match_columns: impl IntoIterator<Item = ColumnId>) -> Self {
        let mut match_columns: Vec<_> = match_columns.into_iter().collect();
        match_columns.sort_unstable();
        match_columns.dedup();

        Self {
            fragment: fragment.into(),
            match_columns,
            conditions: Vec::new(),
        }
    }

    #[must_use]
    pub const fn builder(model: &TableModel) -> CriteriaBuilder<'_> {
        CriteriaBuilder {
            model,
            conditions: Vec::new(),
        }
    }

    #[must_use]
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    #[must_use]
    pub fn match_columns(&self) -> &[ColumnId] {
        &self.match_columns
    }

    /// True when the fragment has no predicate text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fragment.trim().is_empty()
    }

    /// Structured equalities, empty for raw fragments.
    #[must_use]
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }
}

impl fmt::Display for Criteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WHERE (  {} )", self.fragment)
    }
}

///
/// CriteriaBuilder
///
/// Minimal by-example builder: a conjunction of column equalities.
///

#[derive(Debug)]
pub struct CriteriaBuilder<'a> {
    model: &'a TableModel,
    conditions: Vec<Condition>,
}

impl CriteriaBuilder<'_> {
    pub fn and_equal_to<C: TableColumn>(
        mut self,
        column: C,
        value: impl Into<Value>,
    ) -> Result<Self, ModelError> {
        let id = self.model.id_of(column)?;
        let value = value.into();
        let column = self.model.column(id)?;
        if column.kind != value.kind() {
            return Err(ModelError::KindMismatch {
                table: self.model.name().to_string(),
                column: column.name.clone(),
                expected: column.kind.to_string(),
                actual: value.kind().to_string(),
            });
        }

        self.conditions.push(Condition { column: id, value });

        Ok(self)
    }

    #[must_use]
    pub fn build(self) -> Criteria {
        let fragment = self
            .conditions
            .iter()
            .map(|condition| {
                let sql_name = self
                    .model
                    .get(condition.column)
                    .map_or("", |column| column.sql_name.as_str());
                format!("{sql_name} = '{}'", condition.value.to_text())
            })
            .collect::<Vec<_>>()
            .join(" and ");

        let mut criteria = Criteria::raw(fragment, self.conditions.iter().map(|c| c.column));
        criteria.conditions = self.conditions;

        criteria
    }
}

///
/// KeyPredicate
///
/// Primary-key equalities rendered as `k1 = v1 and k2 = v2`.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct KeyPredicate {
    keys: Vec<Condition>,
    text: String,
}

impl KeyPredicate {
    /// Derive the predicate from a row's primary key values.
    pub fn from_row(model: &TableModel, row: &Row) -> Result<Self, StatementError> {
        if **row.model() != *model {
            return Err(ModelError::ForeignRecord {
                table: model.name().to_string(),
                record_table: row.model().name().to_string(),
            }
            .into());
        }

        let mut keys = Vec::new();
        let mut parts = Vec::new();
        for (id, column) in model.primary_key() {
            let value = row
                .get(id)
                .ok_or_else(|| StatementError::MissingKeyValue {
                    table: model.name().to_string(),
                    column: column.sql_name.clone(),
                })?;
            parts.push(format!("{} = {}", column.sql_name, value.to_literal()));
            keys.push(Condition {
                column: id,
                value: value.clone(),
            });
        }

        if keys.is_empty() {
            return Err(StatementError::NoPrimaryKey {
                table: model.name().to_string(),
            });
        }

        Ok(Self {
            keys,
            text: parts.join(" and "),
        })
    }

    #[must_use]
    pub fn keys(&self) -> &[Condition] {
        &self.keys
    }
}

impl fmt::Display for KeyPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
