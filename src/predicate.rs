//! Constraint-derived WHERE clause assembly.
//!
//! The parallel entry point: no syntax tree involved. User-issued filter
//! constraints arrive as a structured object, get compiled to conjunct
//! fragments with `{column}` slots, and the slots are filled through the
//! same type dispatch the plan path uses - keyed by column name here rather
//! than by positional index.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dialect::quote_identifier;
use crate::encode::{encode, EncodeError, EncodedLiteral};
use crate::schema::{Field, LiteralValue, Schema, SemanticType, TypedLiteral};
use crate::template::SqlTemplate;

/// Comparison operator of a single constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintOp {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl ConstraintOp {
    pub fn as_sql(&self) -> &'static str {
        match self {
            ConstraintOp::Eq => "=",
            ConstraintOp::Ne => "<>",
            ConstraintOp::Gt => ">",
            ConstraintOp::Gte => ">=",
            ConstraintOp::Lt => "<",
            ConstraintOp::Lte => "<=",
        }
    }
}

/// One user-issued filter condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueConstraint {
    pub column: String,
    pub op: ConstraintOp,
    pub value: LiteralValue,
}

impl ValueConstraint {
    pub fn new(column: impl Into<String>, op: ConstraintOp, value: LiteralValue) -> Self {
        Self {
            column: column.into(),
            op,
            value,
        }
    }
}

/// The structured constraint object for one export request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraints {
    pub items: Vec<ValueConstraint>,
}

impl Constraints {
    pub fn new(items: Vec<ValueConstraint>) -> Self {
        Self { items }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Expand constraints into WHERE-fragment strings plus a by-column
/// accumulator of typed values.
///
/// Each fragment carries a `{column}` slot for its value. Constraints on
/// columns absent from the schema are dropped: they cannot be typed and the
/// engine would reject them anyway.
pub fn to_conjuncts(
    fields: &[Field],
    constraints: &Constraints,
) -> (Vec<String>, HashMap<String, TypedLiteral>) {
    let mut clauses = Vec::new();
    let mut accumulator = HashMap::new();

    for constraint in &constraints.items {
        let Some(field) = fields
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(&constraint.column))
        else {
            continue;
        };
        clauses.push(format!(
            "{} {} {{{}}}",
            quote_identifier(&field.name),
            constraint.op.as_sql(),
            field.name
        ));
        accumulator.insert(
            field.name.clone(),
            TypedLiteral::new(field.ty, constraint.value.clone()),
        );
    }

    (clauses, accumulator)
}

/// Assemble the full `WHERE ...` text for a constraint-derived export query.
///
/// Returns an empty string when no conjunct applies. String-typed values are
/// pre-quoted here before binding; every other type goes through the literal
/// encoder unchanged.
pub fn where_clause(schema: &Schema, constraints: &Constraints) -> Result<String, EncodeError> {
    let (clauses, accumulator) = to_conjuncts(&schema.fields, constraints);
    if clauses.is_empty() {
        return Ok(String::new());
    }

    let mut template = SqlTemplate::new(format!("WHERE {}", clauses.join(" AND ")));
    for (column, typed) in &accumulator {
        let encoded = match typed.ty {
            SemanticType::Varchar => {
                EncodedLiteral::Text(format!("'{}'", typed.value.as_text()))
            }
            _ => encode(typed.ty, &typed.value)?,
        };
        template.add(column, encoded);
    }

    let rendered = template.render();
    debug!(clause = %rendered, "assembled constraint WHERE clause");
    Ok(rendered)
}
