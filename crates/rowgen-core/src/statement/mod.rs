//! Statement assembler.
//!
//! Renders the five write statement shapes from inclusion decisions. The
//! text is byte-stable for identical inputs; every `Statement` also keeps
//! its structured form so an execution channel can interpret it directly.

mod assemble;

pub use assemble::{
    assemble_insert, assemble_update_by_criteria, assemble_update_by_key,
    assemble_upsert_by_criteria, assemble_upsert_by_key,
};

use crate::{
    criteria::{Criteria, KeyPredicate},
    resolve::{InclusionDecision, StatementKind},
};
use std::fmt;

///
/// Shape
///
/// Insert                 : `insert into T (...) values (...)`
/// InsertOnDuplicateKey   : insert, rewriting the same columns on key conflict
/// InsertWhereNotExists   : insert guarded by the absence of matching rows
/// UpdateByKey            : update addressed by primary key values
/// UpdateByCriteria       : update addressed by a criteria fragment
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Shape {
    Insert,
    InsertOnDuplicateKey,
    InsertWhereNotExists(Criteria),
    UpdateByKey(KeyPredicate),
    UpdateByCriteria(Criteria),
}

///
/// Statement
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Statement {
    kind: StatementKind,
    table: String,
    shape: Shape,
    assignments: InclusionDecision,
    sql: String,
}

impl Statement {
    #[must_use]
    pub const fn kind(&self) -> StatementKind {
        self.kind
    }

    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    #[must_use]
    pub const fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Columns written by this statement, with their value expressions.
    #[must_use]
    pub const fn assignments(&self) -> &InclusionDecision {
        &self.assignments
    }

    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}

///
/// UpsertStatements
///
/// Guarded insert plus the separate existing-row update. The update is
/// absent when no column would be rewritten.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UpsertStatements {
    pub insert: Statement,
    pub update: Option<Statement>,
}

impl UpsertStatements {
    /// Both statements as one multi-statement text.
    #[must_use]
    pub fn to_sql(&self) -> String {
        match &self.update {
            Some(update) => format!("{} ; {}", self.insert.sql, update.sql),
            None => self.insert.sql.clone(),
        }
    }
}

impl fmt::Display for UpsertStatements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}
