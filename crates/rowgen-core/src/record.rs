//! Record field values and the caller-supplied explicit selection.
//!
//! `Row` is the schema-derived field-value struct; `RecordSnapshot` pairs it
//! with the optional selection so that the override is explicit at the call
//! site and the row itself stays free of transient state.

use crate::{
    error::ModelError,
    model::{ColumnId, TableColumn, TableModel},
    value::Value,
};
use derive_more::Deref;
use std::{collections::BTreeSet, sync::Arc};

///
/// Row
///
/// One table row's current field values, indexed by column id.
/// Unset fields are `None`.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Row {
    model: Arc<TableModel>,
    values: Vec<Option<Value>>,
}

impl Row {
    #[must_use]
    pub fn new(model: Arc<TableModel>) -> Self {
        let values = vec![None; model.len()];

        Self { model, values }
    }

    #[must_use]
    pub const fn model(&self) -> &Arc<TableModel> {
        &self.model
    }

    #[must_use]
    pub fn get(&self, id: ColumnId) -> Option<&Value> {
        self.values.get(id.ordinal()).and_then(Option::as_ref)
    }

    #[must_use]
    pub fn is_present(&self, id: ColumnId) -> bool {
        self.get(id).is_some()
    }

    pub fn set<C: TableColumn>(
        &mut self,
        column: C,
        value: impl Into<Value>,
    ) -> Result<(), ModelError> {
        let id = self.model.id_of(column)?;
        self.set_id(id, value)
    }

    /// Set a field by its record field name.
    pub fn set_named(&mut self, name: &str, value: impl Into<Value>) -> Result<(), ModelError> {
        let id = self.model.column_id(name)?;
        self.set_id(id, value)
    }

    pub fn set_id(&mut self, id: ColumnId, value: impl Into<Value>) -> Result<(), ModelError> {
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

        self.values[id.ordinal()] = Some(value);

        Ok(())
    }

    pub fn unset<C: TableColumn>(&mut self, column: C) -> Result<(), ModelError> {
        let id = self.model.id_of(column)?;
        self.values[id.ordinal()] = None;

        Ok(())
    }
}

///
/// Selection
/// Explicitly chosen columns of one table.
///

#[derive(Clone, Debug, Default, Deref, Eq, PartialEq)]
pub struct Selection(BTreeSet<ColumnId>);

impl Selection {
    #[must_use]
    pub fn includes(&self, id: ColumnId) -> bool {
        self.0.contains(&id)
    }
}

impl FromIterator<ColumnId> for Selection {
    fn from_iter<I: IntoIterator<Item = ColumnId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

///
/// RecordSnapshot
///
/// A row plus the optional explicit selection. Built fresh per statement
/// invocation; `select*` calls replace any earlier selection.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordSnapshot {
    row: Row,
    selection: Option<Selection>,
}

impl RecordSnapshot {
    #[must_use]
    pub fn new(model: Arc<TableModel>) -> Self {
        Self::from(Row::new(model))
    }

    #[must_use]
    pub const fn row(&self) -> &Row {
        &self.row
    }

    pub const fn row_mut(&mut self) -> &mut Row {
        &mut self.row
    }

    #[must_use]
    pub fn into_row(self) -> Row {
        self.row
    }

    #[must_use]
    pub const fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn set<C: TableColumn>(
        &mut self,
        column: C,
        value: impl Into<Value>,
    ) -> Result<(), ModelError> {
        self.row.set(column, value)
    }

    /// Replace the selection with the given enum columns.
    pub fn select<C: TableColumn>(
        &mut self,
        columns: impl IntoIterator<Item = C>,
    ) -> Result<(), ModelError> {
        let model = Arc::clone(&self.row.model);
        let selection = columns
            .into_iter()
            .map(|column| model.id_of(column))
            .collect::<Result<Selection, _>>()?;
        self.selection = Some(selection);

        Ok(())
    }

    /// Replace the selection with the columns carrying the given SQL names.
    pub fn select_names<'a>(
        &mut self,
        sql_names: impl IntoIterator<Item = &'a str>,
    ) -> Result<(), ModelError> {
        let model = Arc::clone(&self.row.model);
        let selection = sql_names
            .into_iter()
            .map(|name| model.column_id_by_sql_name(name))
            .collect::<Result<Selection, _>>()?;
        self.selection = Some(selection);

        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// True iff a non-empty selection is in place.
    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.selection.as_ref().is_some_and(|s| !s.is_empty())
    }

    /// True iff the column rendered as `sql_name` is selected.
    #[must_use]
    pub fn is_column_selected(&self, sql_name: &str) -> bool {
        let Some(selection) = &self.selection else {
            return false;
        };

        self.row
            .model
            .column_id_by_sql_name(sql_name)
            .is_ok_and(|id| selection.includes(id))
    }
}

impl From<Row> for RecordSnapshot {
    fn from(row: Row) -> Self {
        Self {
            row,
            selection: None,
        }
    }
}
