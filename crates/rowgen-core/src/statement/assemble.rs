use crate::{
    criteria::{Criteria, KeyPredicate},
    error::StatementError,
    model::TableModel,
    resolve::{InclusionDecision, StatementKind},
    statement::{Shape, Statement, UpsertStatements},
};

/// `insert into T ( c1, c2 )  values ( v1, v2 )`
pub fn assemble_insert(
    model: &TableModel,
    decision: &InclusionDecision,
) -> Result<Statement, StatementError> {
    let kind = StatementKind::Insert;
    let parts = Parts::render(model, decision, kind)?;
    let sql = format!(
        "insert into {} ( {} )  values ( {} )",
        model.name(),
        parts.columns,
        parts.values
    );

    Ok(finish(model, kind, Shape::Insert, decision, sql))
}

/// `update T SET c1 = v1, c2 = v2  where k = kv`
pub fn assemble_update_by_key(
    model: &TableModel,
    decision: &InclusionDecision,
    key: &KeyPredicate,
) -> Result<Statement, StatementError> {
    let kind = StatementKind::UpdateByKey;
    let parts = Parts::render(model, decision, kind)?;
    let sql = format!("update {} SET {}  where {key}", model.name(), parts.sets);

    Ok(finish(
        model,
        kind,
        Shape::UpdateByKey(key.clone()),
        decision,
        sql,
    ))
}

/// `update T SET c1 = v1, c2 = v2  WHERE (  <criteria> )`
pub fn assemble_update_by_criteria(
    model: &TableModel,
    decision: &InclusionDecision,
    criteria: &Criteria,
) -> Result<Statement, StatementError> {
    let kind = StatementKind::UpdateByCriteria;
    check_criteria(model, criteria, kind)?;
    let parts = Parts::render(model, decision, kind)?;
    let sql = format!("update {} SET {}  {criteria}", model.name(), parts.sets);

    Ok(finish(
        model,
        kind,
        Shape::UpdateByCriteria(criteria.clone()),
        decision,
        sql,
    ))
}

/// `insert into T ( ... )  values ( ... )  on duplicate key update  c1 = v1, ...`
///
/// Both branches write the same decision.
pub fn assemble_upsert_by_key(
    model: &TableModel,
    decision: &InclusionDecision,
) -> Result<Statement, StatementError> {
    let kind = StatementKind::UpsertByKey;
    let parts = Parts::render(model, decision, kind)?;
    let sql = format!(
        "insert into {} ( {} )  values ( {} )  on duplicate key update  {}",
        model.name(),
        parts.columns,
        parts.values,
        parts.sets
    );

    Ok(finish(
        model,
        kind,
        Shape::InsertOnDuplicateKey,
        decision,
        sql,
    ))
}

/// Guarded insert followed by the existing-row update:
///
/// `insert into T ( ... )  select ...  from dual where not exists ( select 1
/// from T WHERE (  <criteria> )  ) ; update T set ...  WHERE (  <criteria> )`
pub fn assemble_upsert_by_criteria(
    model: &TableModel,
    insert: &InclusionDecision,
    update: &InclusionDecision,
    criteria: &Criteria,
) -> Result<UpsertStatements, StatementError> {
    let kind = StatementKind::UpsertByCriteria;
    let table = model.name();
    check_criteria(model, criteria, kind)?;

    let parts = Parts::render(model, insert, kind)?;
    let insert_sql = format!(
        "insert into {table} ( {} )  select {}  from dual where not exists ( select 1 from {table} {criteria}  )",
        parts.columns, parts.values
    );
    let insert = finish(
        model,
        kind,
        Shape::InsertWhereNotExists(criteria.clone()),
        insert,
        insert_sql,
    );

    let update = if update.is_empty() {
        None
    } else {
        let parts = Parts::render(model, update, kind)?;
        let update_sql = format!("update {table} set {}  {criteria}", parts.sets);

        Some(finish(
            model,
            kind,
            Shape::UpdateByCriteria(criteria.clone()),
            update,
            update_sql,
        ))
    };

    Ok(UpsertStatements { insert, update })
}

fn check_criteria(
    model: &TableModel,
    criteria: &Criteria,
    kind: StatementKind,
) -> Result<(), StatementError> {
    if criteria.is_empty() {
        return Err(StatementError::EmptyCriteria {
            table: model.name().to_string(),
            kind,
        });
    }

    Ok(())
}

fn finish(
    model: &TableModel,
    kind: StatementKind,
    shape: Shape,
    decision: &InclusionDecision,
    sql: String,
) -> Statement {
    tracing::debug!(table = model.name(), %kind, %sql, "assembled statement");

    Statement {
        kind,
        table: model.name().to_string(),
        shape,
        assignments: decision.clone(),
        sql,
    }
}

///
/// Parts
/// Rendered column list, value list, and assignment list of one decision.
///

struct Parts {
    columns: String,
    values: String,
    sets: String,
}

impl Parts {
    fn render(
        model: &TableModel,
        decision: &InclusionDecision,
        kind: StatementKind,
    ) -> Result<Self, StatementError> {
        if decision.is_empty() {
            return Err(StatementError::EmptyColumnList {
                table: model.name().to_string(),
                kind,
            });
        }

        let mut columns = Vec::with_capacity(decision.len());
        let mut values = Vec::with_capacity(decision.len());
        let mut sets = Vec::with_capacity(decision.len());
        for included in decision.iter() {
            let column = model.column(included.column)?;
            let value = included.value.render(column);

            sets.push(format!("{} = {value}", column.sql_name));
            columns.push(column.sql_name.as_str());
            values.push(value);
        }

        Ok(Self {
            columns: columns.join(", "),
            values: values.join(", "),
            sets: sets.join(", "),
        })
    }
}
