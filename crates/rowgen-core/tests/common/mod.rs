#![allow(dead_code)]

use rowgen_core::{
    criteria::Condition,
    model::{Column, ColumnKind, Role, TableColumn, TableModel},
    resolve::InclusionDecision,
    runtime::Execute,
    statement::{Shape, Statement},
    value::Value,
};
use std::sync::Arc;
use thiserror::Error as ThisError;

///
/// Tb
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Tb {
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

pub fn tb_model() -> Arc<TableModel> {
    let columns = vec![
        Column::new("id", "id", ColumnKind::Integer).with_role(Role::PrimaryKey),
        Column::new("field1", "field_1", ColumnKind::Text),
        Column::new("incF1", "inc_f1", ColumnKind::Integer).with_role(Role::Incrementing),
        Column::new("tsIncF2", "inc_f2", ColumnKind::Integer).with_role(Role::Incrementing),
        Column::new("incF3", "inc_f3", ColumnKind::Integer).with_role(Role::Incrementing),
    ];

    Arc::new(TableModel::new("tb", columns).expect("tb model"))
}

///
/// StoreError
///

#[derive(Debug, ThisError)]
pub enum StoreError {
    #[error("duplicate primary key on table '{0}'")]
    DuplicateKey(String),

    #[error("raw criteria fragments cannot be evaluated in memory")]
    RawCriteria,
}

///
/// MemoryStore
///
/// In-memory execution channel for a single table. Interprets the
/// structured form of each statement and records the SQL text it was sent.
///

pub struct MemoryStore {
    model: Arc<TableModel>,
    rows: Vec<Vec<Option<Value>>>,
    pub log: Vec<String>,
}

impl MemoryStore {
    pub fn new(model: Arc<TableModel>) -> Self {
        Self {
            model,
            rows: Vec::new(),
            log: Vec::new(),
        }
    }

    pub fn rows(&self) -> &[Vec<Option<Value>>] {
        &self.rows
    }

    fn materialize(&self, assignments: &InclusionDecision) -> Vec<Option<Value>> {
        let mut row = vec![None; self.model.len()];
        for included in assignments.iter() {
            row[included.column.ordinal()] = included.value.value().cloned();
        }

        row
    }

    fn apply(&mut self, index: usize, assignments: &InclusionDecision) {
        for included in assignments.iter() {
            self.rows[index][included.column.ordinal()] = included.value.value().cloned();
        }
    }

    fn find_key(&self, row: &[Option<Value>]) -> Option<usize> {
        let keys: Vec<_> = self.model.primary_key().map(|(id, _)| id.ordinal()).collect();

        self.rows.iter().position(|existing| {
            keys.iter()
                .all(|&k| existing[k].is_some() && existing[k] == row[k])
        })
    }

    fn matching(&self, conditions: &[Condition]) -> Vec<usize> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| {
                conditions
                    .iter()
                    .all(|c| row[c.column.ordinal()].as_ref() == Some(&c.value))
            })
            .map(|(index, _)| index)
            .collect()
    }

    fn update(&mut self, indexes: Vec<usize>, assignments: &InclusionDecision) -> u64 {
        let count = indexes.len() as u64;
        for index in indexes {
            self.apply(index, assignments);
        }

        count
    }
}

impl Execute for MemoryStore {
    type Error = StoreError;

    fn execute(&mut self, statement: &Statement) -> Result<u64, Self::Error> {
        self.log.push(statement.sql().to_string());
        let assignments = statement.assignments();

        match statement.shape() {
            Shape::Insert => {
                let row = self.materialize(assignments);
                if self.find_key(&row).is_some() {
                    return Err(StoreError::DuplicateKey(statement.table().to_string()));
                }
                self.rows.push(row);

                Ok(1)
            }
            Shape::InsertOnDuplicateKey => {
                let row = self.materialize(assignments);
                match self.find_key(&row) {
                    Some(index) => {
                        self.apply(index, assignments);
                        Ok(2)
                    }
                    None => {
                        self.rows.push(row);
                        Ok(1)
                    }
                }
            }
            Shape::InsertWhereNotExists(criteria) => {
                if criteria.conditions().is_empty() {
                    return Err(StoreError::RawCriteria);
                }
                if !self.matching(criteria.conditions()).is_empty() {
                    return Ok(0);
                }
                let row = self.materialize(assignments);
                self.rows.push(row);

                Ok(1)
            }
            Shape::UpdateByKey(key) => {
                let indexes = self.matching(key.keys());

                Ok(self.update(indexes, assignments))
            }
            Shape::UpdateByCriteria(criteria) => {
                if criteria.conditions().is_empty() {
                    return Err(StoreError::RawCriteria);
                }
                let indexes = self.matching(criteria.conditions());

                Ok(self.update(indexes, assignments))
            }
        }
    }
}
