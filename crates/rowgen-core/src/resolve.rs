//! Inclusion resolver.
//!
//! Decides, per statement kind and branch, which columns a write statement
//! carries and with what value expression. This is the only implementation
//! of the policy; generation-time preparation and runtime statement building
//! both go through it.
//!
//! Policies:
//! - presence: include a column iff its value is set
//! - selective: include a column iff it is in the explicit selection, with a
//!   null marker standing in for an unset value
//!
//! The existing-row branch of an upsert by criteria always uses presence and
//! never rewrites the columns that locate the row.

use crate::{
    error::ModelError,
    model::{ColumnId, TableModel},
    record::{RecordSnapshot, Row, Selection},
    value::RenderedValue,
};
use derive_more::{Deref, Display};
use serde::Serialize;

///
/// StatementKind
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum StatementKind {
    #[display("insert")]
    Insert,
    #[display("update by key")]
    UpdateByKey,
    #[display("update by criteria")]
    UpdateByCriteria,
    #[display("upsert by key")]
    UpsertByKey,
    #[display("upsert by criteria")]
    UpsertByCriteria,
}

impl StatementKind {
    pub const ALL: [Self; 5] = [
        Self::Insert,
        Self::UpdateByKey,
        Self::UpdateByCriteria,
        Self::UpsertByKey,
        Self::UpsertByCriteria,
    ];

    #[must_use]
    pub const fn is_upsert(self) -> bool {
        matches!(self, Self::UpsertByKey | Self::UpsertByCriteria)
    }
}

///
/// Branch
///
/// Insert : the column list written when no row exists (and the only
///          branch of single-branch statements)
/// Update : the column list written to an existing row by an upsert
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Branch {
    Insert,
    Update,
}

///
/// Included
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Included {
    pub column: ColumnId,
    pub value: RenderedValue,
}

///
/// InclusionDecision
/// Included columns in table declaration order.
///

#[derive(Clone, Debug, Default, Deref, Eq, PartialEq)]
pub struct InclusionDecision(Vec<Included>);

impl InclusionDecision {
    pub fn columns(&self) -> impl Iterator<Item = ColumnId> + '_ {
        self.0.iter().map(|included| included.column)
    }

    #[must_use]
    pub fn includes(&self, id: ColumnId) -> bool {
        self.0.iter().any(|included| included.column == id)
    }
}

/// Resolve the column list of one statement branch.
pub fn resolve(
    model: &TableModel,
    snapshot: &RecordSnapshot,
    kind: StatementKind,
    branch: Branch,
) -> Result<InclusionDecision, ModelError> {
    resolve_matched(model, snapshot, kind, branch, &[])
}

/// Resolve with the match columns of the statement's criteria, which the
/// existing-row branch of an upsert by criteria leaves untouched.
pub fn resolve_matched(
    model: &TableModel,
    snapshot: &RecordSnapshot,
    kind: StatementKind,
    branch: Branch,
    match_columns: &[ColumnId],
) -> Result<InclusionDecision, ModelError> {
    resolve_row(
        model,
        snapshot.row(),
        snapshot.selection(),
        kind,
        branch,
        match_columns,
    )
}

// resolve_row
// shared by the public entry points and by TableStatements, which may drop
// the selection when the table's selective policy does not cover a kind
pub(crate) fn resolve_row(
    model: &TableModel,
    row: &Row,
    selection: Option<&Selection>,
    kind: StatementKind,
    branch: Branch,
    match_columns: &[ColumnId],
) -> Result<InclusionDecision, ModelError> {
    check_row(model, row)?;
    if let Some(selection) = selection {
        check_selection(model, selection)?;
    }

    let decision = match kind {
        StatementKind::Insert
        | StatementKind::UpdateByKey
        | StatementKind::UpdateByCriteria
        | StatementKind::UpsertByKey => governed(model, row, selection),

        StatementKind::UpsertByCriteria => match branch {
            Branch::Insert => governed(model, row, selection),
            Branch::Update => existing_row(model, row, match_columns),
        },
    };

    Ok(decision)
}

// governed
// selective when a selection is in place, presence otherwise
fn governed(model: &TableModel, row: &Row, selection: Option<&Selection>) -> InclusionDecision {
    match selection {
        Some(selection) => selective(model, row, selection),
        None => presence(model, row, |_| true),
    }
}

fn selective(model: &TableModel, row: &Row, selection: &Selection) -> InclusionDecision {
    let included = model
        .iter()
        .filter(|(id, _)| selection.includes(*id))
        .map(|(id, _)| Included {
            column: id,
            value: row
                .get(id)
                .cloned()
                .map_or(RenderedValue::NullMarker, RenderedValue::Present),
        })
        .collect();

    InclusionDecision(included)
}

fn presence(model: &TableModel, row: &Row, keep: impl Fn(ColumnId) -> bool) -> InclusionDecision {
    let included = model
        .iter()
        .filter(|(id, _)| keep(*id))
        .filter_map(|(id, _)| {
            row.get(id).map(|value| Included {
                column: id,
                value: RenderedValue::Present(value.clone()),
            })
        })
        .collect();

    InclusionDecision(included)
}

// existing_row
// presence minus the columns the row was located by (match columns and
// primary key columns)
fn existing_row(model: &TableModel, row: &Row, match_columns: &[ColumnId]) -> InclusionDecision {
    presence(model, row, |id| {
        let is_key = model.get(id).is_some_and(|column| column.is_primary_key());

        !is_key && !match_columns.contains(&id)
    })
}

fn check_row(model: &TableModel, row: &Row) -> Result<(), ModelError> {
    let record = row.model();
    if !std::ptr::eq(&**record, model) && **record != *model {
        return Err(ModelError::ForeignRecord {
            table: model.name().to_string(),
            record_table: record.name().to_string(),
        });
    }

    Ok(())
}

fn check_selection(model: &TableModel, selection: &Selection) -> Result<(), ModelError> {
    match selection.iter().find(|id| model.get(**id).is_none()) {
        Some(id) => Err(ModelError::OrdinalOutOfRange {
            table: model.name().to_string(),
            ordinal: id.ordinal(),
        }),
        None => Ok(()),
    }
}
