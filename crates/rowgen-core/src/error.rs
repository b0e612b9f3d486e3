use crate::resolve::StatementKind;
use thiserror::Error as ThisError;

///
/// ModelError
///
/// Mismatches between a table model and the columns, values, or records
/// used against it. Fatal at generation time.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[remain::sorted]
pub enum ModelError {
    #[error("column '{column}' declared twice on table '{table}'")]
    DuplicateColumn { table: String, column: String },

    #[error("sql name '{sql_name}' declared twice on table '{table}'")]
    DuplicateSqlName { table: String, sql_name: String },

    #[error("table '{table}' declares a column with an empty name")]
    EmptyColumnName { table: String },

    #[error("table name is empty")]
    EmptyTableName,

    #[error("column '{column}' of table '{column_table}' cannot be used with table '{table}'")]
    ForeignColumn {
        table: String,
        column_table: String,
        column: String,
    },

    #[error("record of table '{record_table}' cannot be resolved against table '{table}'")]
    ForeignRecord { table: String, record_table: String },

    #[error("'{text}' is not a decimal number")]
    InvalidDecimal { text: String },

    #[error("column '{column}' on table '{table}' expects {expected} values, got {actual}")]
    KindMismatch {
        table: String,
        column: String,
        expected: String,
        actual: String,
    },

    #[error("table '{table}' declares no columns")]
    NoColumns { table: String },

    #[error("column ordinal {ordinal} is out of range for table '{table}'")]
    OrdinalOutOfRange { table: String, ordinal: usize },

    #[error("table '{table}' has no column named '{name}'")]
    UnknownColumn { table: String, name: String },

    #[error("table '{table}' has no column with sql name '{sql_name}'")]
    UnknownSqlName { table: String, sql_name: String },
}

///
/// StatementError
///
/// Failures while turning an inclusion decision into statement text.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[remain::sorted]
pub enum StatementError {
    #[error("{kind} statement for table '{table}' has no columns to write")]
    EmptyColumnList { table: String, kind: StatementKind },

    #[error("{kind} statement for table '{table}' has an empty criteria")]
    EmptyCriteria { table: String, kind: StatementKind },

    #[error("primary key column '{column}' of table '{table}' has no value")]
    MissingKeyValue { table: String, column: String },

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("table '{table}' has no primary key columns")]
    NoPrimaryKey { table: String },

    #[error("{kind} statements were not generated for table '{table}'")]
    NotGenerated { table: String, kind: StatementKind },
}

///
/// ExecuteError
///
/// Either the statement could not be built, or the execution channel
/// rejected it. Channel errors pass through unchanged.
///

#[derive(Debug, ThisError)]
pub enum ExecuteError<E>
where
    E: std::error::Error + 'static,
{
    #[error(transparent)]
    Channel(E),

    #[error(transparent)]
    Statement(#[from] StatementError),
}
