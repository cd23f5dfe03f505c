//! Boundary to the external plan-decoding service.
//!
//! Decoding serialized plan bytes into a syntax tree and schema happens
//! outside this crate; the pipeline only consumes the result. [`DecodedPlan`]
//! is that result, and [`PlanDecoder`] is the seam a decoding collaborator
//! implements.

use sqlparser::ast::Statement;
use sqlparser::dialect::GenericDialect;
use sqlparser::parser::Parser;
use thiserror::Error;

use crate::schema::Schema;

/// Decoding failure at the collaborator boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("plan decoding failed: {0}")]
pub struct PlanDecodeError(pub String);

/// A relational plan decoded into a generic syntax tree plus the plan's
/// typed output schema.
///
/// The statement arrives in the standard grammar, with the decoder's
/// synthetic positional aliases still attached; the pipeline owns the tree
/// exclusively while it rewrites it.
#[derive(Debug, Clone)]
pub struct DecodedPlan {
    pub statement: Statement,
    pub schema: Schema,
}

impl DecodedPlan {
    /// Build a decoded plan from the SQL text a decoder would print.
    ///
    /// The generic grammar accepts both backtick and double-quote delimited
    /// identifiers, matching decoder output.
    pub fn from_sql(sql: &str, schema: Schema) -> Result<Self, PlanDecodeError> {
        let mut statements = Parser::parse_sql(&GenericDialect {}, sql)
            .map_err(|e| PlanDecodeError(e.to_string()))?;
        if statements.len() != 1 {
            return Err(PlanDecodeError(format!(
                "expected a single statement, got {}",
                statements.len()
            )));
        }
        Ok(Self {
            statement: statements.remove(0),
            schema,
        })
    }

    /// Build a decoded plan from SQL text and (column name, type name) pairs
    /// as a decoder would report them.
    ///
    /// Types outside the closed set (structs, lists, maps) are rejected
    /// here, before the plan enters the pipeline.
    pub fn from_sql_typed(
        sql: &str,
        columns: &[(&str, &str)],
    ) -> Result<Self, PlanDecodeError> {
        let schema = Schema::from_decoded(columns.iter().copied())
            .map_err(|name| PlanDecodeError(format!("unsupported column type: {name}")))?;
        Self::from_sql(sql, schema)
    }
}

/// External collaborator that turns serialized plan bytes into a
/// [`DecodedPlan`].
pub trait PlanDecoder {
    fn decode(&self, plan_bytes: &[u8]) -> Result<DecodedPlan, PlanDecodeError>;
}
