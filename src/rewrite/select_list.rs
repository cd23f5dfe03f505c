//! Select-list normalization.
//!
//! Two rewrites happen here, both schema-driven:
//!
//! 1. Synthetic alias removal. The decoder adds a positional alias to every
//!    simple column reference (`SELECT name AS name0`); those are stripped so
//!    the exported column names match what was requested. Aliases on computed
//!    expressions (`COUNT(*) AS total`) are meaningful and survive.
//! 2. Timestamp casting. Vertica exports timestamp columns as a 26-digit
//!    INT96, corrupting the data; a timestamp-typed column becomes
//!    `CAST("col" AS VARCHAR) AS "col"` so it exports as text.
//!
//! A `*` projection is expanded to one bare column per schema field first,
//! so that after expansion `projection[i]` lines up with `schema.fields[i]`.

use sqlparser::ast::{Expr, Ident, SelectItem};
use sqlparser::dialect::GenericDialect;
use sqlparser::parser::Parser;

use crate::dialect::quote_identifier;
use crate::schema::{Field, Schema};

/// Normalize a projection list against the plan's output schema.
///
/// Preserves the positional invariant: after wildcard expansion the list has
/// exactly one item per schema field, in schema order.
pub fn normalize_projection(projection: Vec<SelectItem>, schema: &Schema) -> Vec<SelectItem> {
    let expanded = expand_wildcard(projection, schema);

    expanded
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            let field = schema.fields.get(i);
            match item {
                // Simple column reference without alias.
                SelectItem::UnnamedExpr(Expr::Identifier(ident)) => {
                    cast_if_timestamp(ident, field)
                }
                // Simple column behind a synthetic alias: strip the alias,
                // then treat like the bare column.
                SelectItem::ExprWithAlias {
                    expr: Expr::Identifier(ident),
                    alias: _,
                } => cast_if_timestamp(ident, field),
                // Computed expression (aliased or not): meaningful, keep.
                other => other,
            }
        })
        .collect()
}

/// Replace `*` with explicit column references, in schema order.
fn expand_wildcard(projection: Vec<SelectItem>, schema: &Schema) -> Vec<SelectItem> {
    let mut expanded = Vec::with_capacity(projection.len().max(schema.len()));
    for item in projection {
        match item {
            SelectItem::Wildcard(_) => {
                for field in &schema.fields {
                    expanded.push(SelectItem::UnnamedExpr(Expr::Identifier(
                        Ident::with_quote('"', &field.name),
                    )));
                }
            }
            other => expanded.push(other),
        }
    }
    expanded
}

/// Emit the column as-is, or wrap a timestamp-typed column in a VARCHAR cast
/// re-aliased to its own name.
///
/// The cast expression is built as text and parsed back; if that parse fails
/// the original column reference is kept rather than failing the build.
fn cast_if_timestamp(ident: Ident, field: Option<&Field>) -> SelectItem {
    match field {
        Some(f) if f.ty.is_timestamp() => {
            let column = ident.value.clone();
            let cast_text = format!("CAST({} AS VARCHAR)", quote_identifier(&column));
            match parse_expression(&cast_text) {
                Ok(cast) => SelectItem::ExprWithAlias {
                    expr: cast,
                    alias: Ident::with_quote('"', column),
                },
                Err(_) => SelectItem::UnnamedExpr(Expr::Identifier(ident)),
            }
        }
        _ => SelectItem::UnnamedExpr(Expr::Identifier(ident)),
    }
}

fn parse_expression(text: &str) -> Result<Expr, sqlparser::parser::ParserError> {
    Parser::new(&GenericDialect {}).try_with_sql(text)?.parse_expr()
}
