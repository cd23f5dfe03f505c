//! Alias resolution.
//!
//! The plan decoder injects a positional alias on every simple column
//! projection (`name` becomes `name AS name0`), and the plan's output schema
//! names its fields after those aliases. Later type lookups need the real
//! column names, so we record `alias -> original` from the untouched
//! projection list and derive a schema view with originals restored.

use sqlparser::ast::{Expr, SelectItem};
use std::collections::HashMap;

use crate::schema::{Field, Schema};

/// Scan the projection list for `column AS alias` items and record
/// `alias -> original column name`.
///
/// Only bare identifiers on the left count: an alias on a computed
/// expression is user-meaningful, not synthetic, and maps to no column.
/// Identifier text comes back with any quoting already stripped.
pub fn alias_mapping(projection: &[SelectItem]) -> HashMap<String, String> {
    let mut mapping = HashMap::new();
    for item in projection {
        if let SelectItem::ExprWithAlias {
            expr: Expr::Identifier(ident),
            alias,
        } = item
        {
            mapping.insert(alias.value.clone(), ident.value.clone());
        }
    }
    mapping
}

/// Derive a schema whose field names are restored to their originals where
/// an alias mapping exists; types are preserved unchanged.
///
/// The mapping is consumed here and discarded; it is never persisted.
pub fn schema_with_original_names(schema: &Schema, mapping: &HashMap<String, String>) -> Schema {
    let fields = schema
        .fields
        .iter()
        .map(|field| {
            let name = mapping
                .get(&field.name)
                .cloned()
                .unwrap_or_else(|| field.name.clone());
            Field::new(name, field.ty)
        })
        .collect();
    Schema::new(fields)
}
