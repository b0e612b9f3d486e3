//! Per-table column metadata.
//!
//! A `TableModel` is built once per table (from configuration or schema
//! introspection) and is read-only afterwards. `TableColumn` is the closed
//! enum view of the same columns used by generated data-access code.
pub mod column;
pub mod table;

pub use column::{Column, ColumnId, ColumnKind, Role};
pub use table::TableModel;

///
/// TableColumn
///
/// One variant per schema column of a single table. Ordinals follow the
/// table model's declaration order.
///

pub trait TableColumn: Copy + Eq + 'static {
    /// Table this column enumeration belongs to.
    const TABLE: &'static str;

    /// Every column, in declaration order.
    const ALL: &'static [Self];

    fn ordinal(self) -> usize;

    /// Record field name (e.g. `tsIncF2`).
    fn name(self) -> &'static str;

    /// Rendered SQL column name (e.g. `inc_f2`).
    fn sql_name(self) -> &'static str;
}
