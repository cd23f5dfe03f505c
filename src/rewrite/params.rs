//! Literal parameterization of the filter tree.
//!
//! Every literal in the WHERE clause is replaced, in left-to-right traversal
//! order, by a `{paramN}` placeholder with a strictly increasing index. The
//! placeholder is a [`Value::Placeholder`], so the printer emits it verbatim
//! and the renderer can substitute the encoded value after printing. Nothing
//! outside the filter is touched.
//!
//! NULL literals stay inline: they are already dialect-correct text and
//! carry no user data, so there is nothing to encode. The literal
//! accumulator skips them the same way, keeping indices aligned.

use sqlparser::ast::{
    Expr, FunctionArg, FunctionArgExpr, FunctionArguments, Select, Value,
};

/// Replace filter literals with positional placeholders.
///
/// Returns the statement unchanged when there is no filter.
pub fn parameterize(mut select: Select) -> Select {
    if let Some(mut selection) = select.selection.take() {
        let mut index = 0usize;
        replace_literals(&mut selection, &mut index);
        select.selection = Some(selection);
    }
    select
}

fn replace_literals(expr: &mut Expr, index: &mut usize) {
    match expr {
        Expr::Value(Value::Null) => {}
        Expr::Value(value) => {
            *value = Value::Placeholder(format!("{{param{}}}", index));
            *index += 1;
        }
        Expr::BinaryOp { left, right, .. } => {
            replace_literals(left, index);
            replace_literals(right, index);
        }
        Expr::UnaryOp { expr, .. } => replace_literals(expr, index),
        Expr::Nested(inner) => replace_literals(inner, index),
        Expr::IsNull(inner) | Expr::IsNotNull(inner) => replace_literals(inner, index),
        Expr::InList { expr, list, .. } => {
            replace_literals(expr, index);
            for item in list {
                replace_literals(item, index);
            }
        }
        Expr::Between {
            expr, low, high, ..
        } => {
            replace_literals(expr, index);
            replace_literals(low, index);
            replace_literals(high, index);
        }
        Expr::Like { expr, pattern, .. } | Expr::ILike { expr, pattern, .. } => {
            replace_literals(expr, index);
            replace_literals(pattern, index);
        }
        Expr::Cast { expr, .. } => replace_literals(expr, index),
        Expr::Function(func) => {
            if let FunctionArguments::List(list) = &mut func.args {
                for arg in &mut list.args {
                    match arg {
                        FunctionArg::Unnamed(FunctionArgExpr::Expr(e)) => {
                            replace_literals(e, index)
                        }
                        FunctionArg::Named {
                            arg: FunctionArgExpr::Expr(e),
                            ..
                        } => replace_literals(e, index),
                        _ => {}
                    }
                }
            }
        }
        // Column references and anything else are copied unchanged.
        _ => {}
    }
}
