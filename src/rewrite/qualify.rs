//! Table qualification.
//!
//! The decoded plan references the table by bare name; the export statement
//! must name it `"schema"."table"` so identically-named tables in other
//! schemas cannot shadow it.

use sqlparser::ast::{Ident, ObjectName, Select, TableFactor};

/// Qualify the statement's source with its schema name.
///
/// Only the single-table case is rewritten: the source must be a simple
/// identifier equal to `table_name`. Anything else (already qualified, a
/// derived table, a join) is left untouched.
pub fn qualify_table(mut select: Select, schema_name: &str, table_name: &str) -> Select {
    if let Some(table_with_joins) = select.from.first_mut() {
        if let TableFactor::Table { name, .. } = &mut table_with_joins.relation {
            if let [ident] = name.0.as_slice() {
                if ident.value == table_name {
                    *name = ObjectName(vec![
                        Ident::with_quote('"', schema_name),
                        Ident::with_quote('"', table_name),
                    ]);
                }
            }
        }
    }
    select
}
