use crate::{
    error::ModelError,
    model::{Column, ColumnId, TableColumn},
};
use serde::Serialize;
use std::collections::BTreeSet;

///
/// TableModel
///
/// Ordered column list for one table. Declaration order is authoritative:
/// it fixes column ids and the textual column order of every statement.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct TableModel {
    name: String,
    columns: Vec<Column>,
}

impl TableModel {
    /// Build a model, rejecting empty names and duplicate columns.
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Result<Self, ModelError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ModelError::EmptyTableName);
        }
        if columns.is_empty() {
            return Err(ModelError::NoColumns { table: name });
        }

        let mut names = BTreeSet::new();
        let mut sql_names = BTreeSet::new();
        for column in &columns {
            if column.name.is_empty() || column.sql_name.is_empty() {
                return Err(ModelError::EmptyColumnName { table: name });
            }
            if !names.insert(column.name.as_str()) {
                return Err(ModelError::DuplicateColumn {
                    table: name.clone(),
                    column: column.name.clone(),
                });
            }
            if !sql_names.insert(column.sql_name.as_str()) {
                return Err(ModelError::DuplicateSqlName {
                    table: name.clone(),
                    sql_name: column.sql_name.clone(),
                });
            }
        }

        Ok(Self { name, columns })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Columns paired with their ids, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (ColumnId, &Column)> {
        self.columns
            .iter()
            .enumerate()
            .map(|(ordinal, column)| (ColumnId::new(ordinal), column))
    }

    /// Primary key columns, in declaration order.
    pub fn primary_key(&self) -> impl Iterator<Item = (ColumnId, &Column)> {
        self.iter().filter(|(_, column)| column.is_primary_key())
    }

    #[must_use]
    pub fn get(&self, id: ColumnId) -> Option<&Column> {
        self.columns.get(id.ordinal())
    }

    pub fn column(&self, id: ColumnId) -> Result<&Column, ModelError> {
        self.get(id).ok_or_else(|| ModelError::OrdinalOutOfRange {
            table: self.name.clone(),
            ordinal: id.ordinal(),
        })
    }

    /// Look up a column id by record field name.
    pub fn column_id(&self, name: &str) -> Result<ColumnId, ModelError> {
        self.iter()
            .find(|(_, column)| column.name == name)
            .map(|(id, _)| id)
            .ok_or_else(|| ModelError::UnknownColumn {
                table: self.name.clone(),
                name: name.to_string(),
            })
    }

    /// Look up a column id by rendered SQL name.
    pub fn column_id_by_sql_name(&self, sql_name: &str) -> Result<ColumnId, ModelError> {
        self.iter()
            .find(|(_, column)| column.sql_name == sql_name)
            .map(|(id, _)| id)
            .ok_or_else(|| ModelError::UnknownSqlName {
                table: self.name.clone(),
                sql_name: sql_name.to_string(),
            })
    }

    /// Map an enum column onto this model.
    ///
    /// The enum must belong to this table and agree with the model on the
    /// column's ordinal and SQL name.
    pub fn id_of<C: TableColumn>(&self, column: C) -> Result<ColumnId, ModelError> {
        let foreign = || ModelError::ForeignColumn {
            table: self.name.clone(),
            column_table: C::TABLE.to_string(),
            column: column.sql_name().to_string(),
        };

        if C::TABLE != self.name {
            return Err(foreign());
        }

        let id = ColumnId::new(column.ordinal());
        match self.get(id) {
            Some(declared) if declared.sql_name == column.sql_name() => Ok(id),
            _ => Err(foreign()),
        }
    }
}
