//! Ordered literal accumulation from the filter tree.
//!
//! Walks the WHERE clause in the same left-to-right order as the
//! parameterizer and captures each literal as a (semantic type, raw value)
//! pair. Types resolve through the alias-restored schema: a literal compared
//! against a column takes that column's declared type; a literal with no
//! column context falls back to inference from its own shape.
//!
//! NULL literals are skipped, mirroring the parameterizer, so position `i`
//! in the result always corresponds to placeholder `paramI`.

use sqlparser::ast::{
    BinaryOperator, Expr, FunctionArg, FunctionArgExpr, FunctionArguments, Value,
};

use crate::schema::{LiteralValue, Schema, SemanticType, TypedLiteral};

/// Collect the filter tree's literals in encounter order.
pub fn collect_literals(selection: Option<&Expr>, schema: &Schema) -> Vec<TypedLiteral> {
    let mut out = Vec::new();
    if let Some(expr) = selection {
        walk(expr, schema, &mut out);
    }
    out
}

fn walk(expr: &Expr, schema: &Schema, out: &mut Vec<TypedLiteral>) {
    match expr {
        Expr::Value(value) => push_by_shape(value, out),

        Expr::BinaryOp { left, op, right } => {
            if comparison(op) {
                // `col <op> literal` (or reversed): the literal takes the
                // column's declared type.
                match (column_name(left), literal(right)) {
                    (Some(column), Some(value)) => {
                        push_typed(column, value, schema, out);
                        return;
                    }
                    _ => {}
                }
                if let (Some(value), Some(column)) = (literal(left), column_name(right)) {
                    push_typed(column, value, schema, out);
                    return;
                }
            }
            walk(left, schema, out);
            walk(right, schema, out);
        }

        Expr::InList { expr, list, .. } => {
            let column = column_name(expr);
            // A literal subject is parameterized too; walk it so indices
            // stay aligned with the placeholders.
            if column.is_none() {
                walk(expr, schema, out);
            }
            for item in list {
                match (column, literal(item)) {
                    (Some(col), Some(value)) => push_typed(col, value, schema, out),
                    _ => walk(item, schema, out),
                }
            }
        }

        Expr::Between {
            expr, low, high, ..
        } => {
            let column = column_name(expr);
            if column.is_none() {
                walk(expr, schema, out);
            }
            for bound in [low.as_ref(), high.as_ref()] {
                match (column, literal(bound)) {
                    (Some(col), Some(value)) => push_typed(col, value, schema, out),
                    _ => walk(bound, schema, out),
                }
            }
        }

        Expr::Like { expr, pattern, .. } | Expr::ILike { expr, pattern, .. } => {
            let column = column_name(expr);
            if column.is_none() {
                walk(expr, schema, out);
            }
            match (column, literal(pattern)) {
                (Some(col), Some(value)) => push_typed(col, value, schema, out),
                _ => walk(pattern, schema, out),
            }
        }

        Expr::UnaryOp { expr, .. } => walk(expr, schema, out),
        Expr::Nested(inner) => walk(inner, schema, out),
        Expr::IsNull(inner) | Expr::IsNotNull(inner) => walk(inner, schema, out),
        Expr::Cast { expr, .. } => walk(expr, schema, out),

        Expr::Function(func) => {
            if let FunctionArguments::List(list) = &func.args {
                for arg in &list.args {
                    match arg {
                        FunctionArg::Unnamed(FunctionArgExpr::Expr(e)) => walk(e, schema, out),
                        FunctionArg::Named {
                            arg: FunctionArgExpr::Expr(e),
                            ..
                        } => walk(e, schema, out),
                        _ => {}
                    }
                }
            }
        }

        _ => {}
    }
}

fn comparison(op: &BinaryOperator) -> bool {
    matches!(
        op,
        BinaryOperator::Eq
            | BinaryOperator::NotEq
            | BinaryOperator::Gt
            | BinaryOperator::GtEq
            | BinaryOperator::Lt
            | BinaryOperator::LtEq
    )
}

fn column_name(expr: &Expr) -> Option<&str> {
    match expr {
        Expr::Identifier(ident) => Some(&ident.value),
        Expr::CompoundIdentifier(parts) => parts.last().map(|i| i.value.as_str()),
        _ => None,
    }
}

fn literal(expr: &Expr) -> Option<&Value> {
    match expr {
        Expr::Value(Value::Null) => None,
        Expr::Value(value) => Some(value),
        _ => None,
    }
}

fn push_typed(column: &str, value: &Value, schema: &Schema, out: &mut Vec<TypedLiteral>) {
    match schema.field_type(column) {
        Some(ty) => out.push(TypedLiteral::new(ty, raw_value(value))),
        None => push_by_shape(value, out),
    }
}

/// No column context: infer the type from the literal's own shape.
fn push_by_shape(value: &Value, out: &mut Vec<TypedLiteral>) {
    let typed = match value {
        Value::Null => return,
        Value::Boolean(b) => TypedLiteral::new(SemanticType::Boolean, LiteralValue::Bool(*b)),
        Value::Number(text, _) => {
            let ty = if text.contains(['.', 'e', 'E']) {
                SemanticType::Float64
            } else {
                SemanticType::Int64
            };
            TypedLiteral::new(ty, LiteralValue::text(text.clone()))
        }
        other => TypedLiteral::new(SemanticType::Varchar, raw_value(other)),
    };
    out.push(typed);
}

fn raw_value(value: &Value) -> LiteralValue {
    match value {
        Value::Boolean(b) => LiteralValue::Bool(*b),
        Value::Number(text, _) => LiteralValue::text(text.clone()),
        Value::SingleQuotedString(s)
        | Value::DoubleQuotedString(s)
        | Value::NationalStringLiteral(s)
        | Value::HexStringLiteral(s) => LiteralValue::text(s.clone()),
        other => LiteralValue::text(other.to_string()),
    }
}
