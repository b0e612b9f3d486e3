use crate::model::{Column, ColumnKind, Role, TableColumn, TableModel};
use std::sync::Arc;

///
/// Tb
/// Hand-written column enum for the `tb` fixture table.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Tb {
    Id,
    Field1,
    IncF1,
    TsIncF2,
    IncF3,
}

impl TableColumn for Tb {
    const TABLE: &'static str = "tb";
    const ALL: &'static [Self] = &[Self::Id, Self::Field1, Self::IncF1, Self::TsIncF2, Self::IncF3];

    fn ordinal(self) -> usize {
        self as usize
    }

    fn name(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Field1 => "field1",
            Self::IncF1 => "incF1",
            Self::TsIncF2 => "tsIncF2",
            Self::IncF3 => "incF3",
        }
    }

    fn sql_name(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Field1 => "field_1",
            Self::IncF1 => "inc_f1",
            Self::TsIncF2 => "inc_f2",
            Self::IncF3 => "inc_f3",
        }
    }
}

pub(crate) fn tb_model() -> Arc<TableModel> {
    let columns = Tb::ALL
        .iter()
        .map(|column| {
            let kind = match column {
                Tb::Field1 => ColumnKind::Text,
                _ => ColumnKind::Integer,
            };
            let role = match column {
                Tb::Id => Role::PrimaryKey,
                Tb::Field1 => Role::Ordinary,
                Tb::IncF1 | Tb::TsIncF2 | Tb::IncF3 => Role::Incrementing,
            };

            Column::new(column.name(), column.sql_name(), kind).with_role(role)
        })
        .collect();

    Arc::new(TableModel::new("tb", columns).expect("tb fixture model is valid"))
}
