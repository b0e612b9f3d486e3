//! Core runtime for rowgen: column models, record snapshots, the inclusion
//! resolver, and the statement assembler behind generated data-access code.

pub mod criteria;
pub mod error;
pub mod model;
pub mod record;
pub mod resolve;
pub mod runtime;
pub mod statement;
pub mod value;

#[cfg(test)]
pub(crate) mod test_fixtures;

///
/// Prelude
///
/// Domain vocabulary used by generated data-access code.
///

pub mod prelude {
    pub use crate::{
        criteria::Criteria,
        model::{Column, ColumnKind, Role, TableColumn, TableModel},
        record::{RecordSnapshot, Row},
        resolve::StatementKind,
        runtime::{Execute, SelectivePolicy, TableStatements, UpsertOutcome},
        statement::Statement,
        value::Value,
    };
}
