//! Test utilities for SQL emission validation.
//!
//! Re-parses emitted SQL with sqlparser to catch syntactically broken output.
//! sqlparser has no Vertica dialect; the generic grammar accepts the subset
//! this crate emits inside the EXPORT wrapper.

use sqlparser::dialect::GenericDialect;
use sqlparser::parser::Parser;

/// Validate that a SQL string parses under the generic grammar.
///
/// Only the inner query is checkable this way: `EXPORT TO PARQUET(...)` and
/// Vertica's `OFFSET n LIMIT n` clause ordering are not standard grammar, so
/// callers validate the pieces the parser understands.
pub fn validate_sql(sql: &str) -> Result<(), String> {
    Parser::parse_sql(&GenericDialect {}, sql)
        .map(|_| ())
        .map_err(|e| format!("Invalid SQL: {}\nSQL: {}", e, sql))
}
