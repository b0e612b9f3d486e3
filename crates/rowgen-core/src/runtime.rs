//! Runtime statement building for generated data-access code.
//!
//! `TableStatements` is prepared once per table by the generation pass and
//! then shared. It applies the table's selective policy before calling the
//! resolver, so a table prepared without selective support behaves with
//! presence semantics even when a caller sets a selection.

use crate::{
    criteria::{Criteria, KeyPredicate},
    error::{ExecuteError, StatementError},
    model::{ColumnId, TableModel},
    record::{RecordSnapshot, Selection},
    resolve::{Branch, InclusionDecision, StatementKind, resolve_row},
    statement::{
        Statement, UpsertStatements, assemble_insert, assemble_update_by_criteria,
        assemble_update_by_key, assemble_upsert_by_criteria, assemble_upsert_by_key,
    },
};
use serde::Serialize;
use std::{collections::BTreeSet, sync::Arc};

///
/// Execute
///
/// Database execution channel. Receives finished statements and reports the
/// affected-row count; connection and transaction handling stay with the
/// implementor.
///

pub trait Execute {
    type Error: std::error::Error + 'static;

    fn execute(&mut self, statement: &Statement) -> Result<u64, Self::Error>;
}

///
/// SelectivePolicy
///
/// Which statement kinds honor an explicit selection for a table.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct SelectivePolicy {
    pub honor_selection: bool,
    pub honor_selection_in_upserts: bool,
}

impl SelectivePolicy {
    pub const ENHANCED: Self = Self {
        honor_selection: true,
        honor_selection_in_upserts: true,
    };

    pub const PRESENCE_ONLY: Self = Self {
        honor_selection: false,
        honor_selection_in_upserts: false,
    };

    #[must_use]
    pub const fn honors(self, kind: StatementKind) -> bool {
        if kind.is_upsert() {
            self.honor_selection && self.honor_selection_in_upserts
        } else {
            self.honor_selection
        }
    }
}

impl Default for SelectivePolicy {
    fn default() -> Self {
        Self::ENHANCED
    }
}

///
/// UpsertOutcome
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct UpsertOutcome {
    pub inserted: u64,
    pub updated: u64,
}

///
/// TableStatements
///

#[derive(Clone, Debug)]
pub struct TableStatements {
    model: Arc<TableModel>,
    policy: SelectivePolicy,
    kinds: BTreeSet<StatementKind>,
}

impl TableStatements {
    /// Every statement kind, fully selective.
    #[must_use]
    pub fn new(model: Arc<TableModel>) -> Self {
        Self {
            model,
            policy: SelectivePolicy::ENHANCED,
            kinds: StatementKind::ALL.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: SelectivePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Restrict the statement kinds available on this table.
    #[must_use]
    pub fn with_kinds(mut self, kinds: impl IntoIterator<Item = StatementKind>) -> Self {
        self.kinds = kinds.into_iter().collect();
        self
    }

    #[must_use]
    pub const fn model(&self) -> &Arc<TableModel> {
        &self.model
    }

    #[must_use]
    pub const fn policy(&self) -> SelectivePolicy {
        self.policy
    }

    #[must_use]
    pub fn supports(&self, kind: StatementKind) -> bool {
        self.kinds.contains(&kind)
    }

    pub fn kinds(&self) -> impl Iterator<Item = StatementKind> + '_ {
        self.kinds.iter().copied()
    }

    /// Fresh snapshot for one statement invocation.
    #[must_use]
    pub fn snapshot(&self) -> RecordSnapshot {
        RecordSnapshot::new(Arc::clone(&self.model))
    }

    pub fn insert(&self, snapshot: &RecordSnapshot) -> Result<Statement, StatementError> {
        let kind = StatementKind::Insert;
        let decision = self.decide(snapshot, kind, Branch::Insert, &[])?;

        assemble_insert(&self.model, &decision)
    }

    pub fn update_by_key(&self, snapshot: &RecordSnapshot) -> Result<Statement, StatementError> {
        let kind = StatementKind::UpdateByKey;
        let decision = self.decide(snapshot, kind, Branch::Insert, &[])?;
        let key = KeyPredicate::from_row(&self.model, snapshot.row())?;

        assemble_update_by_key(&self.model, &decision, &key)
    }

    pub fn update_by_criteria(
        &self,
        snapshot: &RecordSnapshot,
        criteria: &Criteria,
    ) -> Result<Statement, StatementError> {
        let kind = StatementKind::UpdateByCriteria;
        let decision = self.decide(snapshot, kind, Branch::Insert, criteria.match_columns())?;

        assemble_update_by_criteria(&self.model, &decision, criteria)
    }

    pub fn upsert_by_key(&self, snapshot: &RecordSnapshot) -> Result<Statement, StatementError> {
        let kind = StatementKind::UpsertByKey;
        let decision = self.decide(snapshot, kind, Branch::Insert, &[])?;

        assemble_upsert_by_key(&self.model, &decision)
    }

    pub fn upsert_by_criteria(
        &self,
        snapshot: &RecordSnapshot,
        criteria: &Criteria,
    ) -> Result<UpsertStatements, StatementError> {
        let kind = StatementKind::UpsertByCriteria;
        let insert = self.decide(snapshot, kind, Branch::Insert, criteria.match_columns())?;
        let update = self.decide(snapshot, kind, Branch::Update, criteria.match_columns())?;

        assemble_upsert_by_criteria(&self.model, &insert, &update, criteria)
    }

    pub fn execute_insert<E: Execute>(
        &self,
        executor: &mut E,
        snapshot: &RecordSnapshot,
    ) -> Result<u64, ExecuteError<E::Error>> {
        let statement = self.insert(snapshot)?;

        run(executor, &statement)
    }

    pub fn execute_update_by_key<E: Execute>(
        &self,
        executor: &mut E,
        snapshot: &RecordSnapshot,
    ) -> Result<u64, ExecuteError<E::Error>> {
        let statement = self.update_by_key(snapshot)?;

        run(executor, &statement)
    }

    pub fn execute_update_by_criteria<E: Execute>(
        &self,
        executor: &mut E,
        snapshot: &RecordSnapshot,
        criteria: &Criteria,
    ) -> Result<u64, ExecuteError<E::Error>> {
        let statement = self.update_by_criteria(snapshot, criteria)?;

        run(executor, &statement)
    }

    pub fn execute_upsert_by_key<E: Execute>(
        &self,
        executor: &mut E,
        snapshot: &RecordSnapshot,
    ) -> Result<u64, ExecuteError<E::Error>> {
        let statement = self.upsert_by_key(snapshot)?;

        run(executor, &statement)
    }

    /// Run the guarded insert; only when it inserted nothing, run the
    /// existing-row update.
    pub fn execute_upsert_by_criteria<E: Execute>(
        &self,
        executor: &mut E,
        snapshot: &RecordSnapshot,
        criteria: &Criteria,
    ) -> Result<UpsertOutcome, ExecuteError<E::Error>> {
        let statements = self.upsert_by_criteria(snapshot, criteria)?;

        let inserted = run(executor, &statements.insert)?;
        let updated = match (&statements.update, inserted) {
            (Some(update), 0) => run(executor, update)?,
            _ => 0,
        };

        Ok(UpsertOutcome { inserted, updated })
    }

    fn decide(
        &self,
        snapshot: &RecordSnapshot,
        kind: StatementKind,
        branch: Branch,
        match_columns: &[ColumnId],
    ) -> Result<InclusionDecision, StatementError> {
        if !self.supports(kind) {
            return Err(StatementError::NotGenerated {
                table: self.model.name().to_string(),
                kind,
            });
        }

        let selection: Option<&Selection> =
            snapshot.selection().filter(|_| self.policy.honors(kind));

        Ok(resolve_row(
            &self.model,
            snapshot.row(),
            selection,
            kind,
            branch,
            match_columns,
        )?)
    }
}

fn run<E: Execute>(executor: &mut E, statement: &Statement) -> Result<u64, ExecuteError<E::Error>> {
    let affected = executor
        .execute(statement)
        .map_err(ExecuteError::Channel)?;
    tracing::debug!(
        table = statement.table(),
        kind = %statement.kind(),
        affected,
        "executed statement"
    );

    Ok(affected)
}
