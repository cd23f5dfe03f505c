//! Vertica dialect particulars applied to printed SQL text.
//!
//! The AST printer only knows the standard grammar; the differences Vertica
//! cares about (pagination spelling, identifier quoting) are fixed up here
//! as narrow text post-passes.

use regex::Regex;
use std::sync::LazyLock;

/// `OFFSET n ROWS` in the standard grammar; Vertica wants `OFFSET n`.
static OFFSET_ROWS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"OFFSET (\d+) ROWS").unwrap());

/// `FETCH FIRST|NEXT n ROWS ONLY` in the standard grammar; Vertica wants
/// `LIMIT n`. The printer normalizes both spellings to FIRST, the decoder
/// emits NEXT; accept either.
static FETCH_ROWS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"FETCH (?:FIRST|NEXT) (\d+) ROWS ONLY").unwrap());

/// Quote an identifier for Vertica (double quotes, ANSI style).
pub fn quote_identifier(ident: &str) -> String {
    format!("\"{}\"", ident)
}

/// Normalize backtick-quoted identifiers left over from the generic printer
/// to Vertica's double-quote syntax.
pub fn normalize_identifier_quotes(sql: &str) -> String {
    sql.replace('`', "\"")
}

/// Convert standard FETCH/OFFSET pagination text to Vertica LIMIT/OFFSET.
///
/// This is a deliberate workaround for the printer emitting standard-grammar
/// pagination only. It is pattern-anchored text substitution, not a parser,
/// and must not be broadened: the patterns run only when the statement
/// actually carries the corresponding clause (`has_offset` / `has_fetch`),
/// which keeps clause-free statements untouched. When a clause IS present, a
/// string literal that happens to contain matching text would also be
/// rewritten; that limitation is inherited from the upstream design and is
/// documented by test rather than silently fixed.
pub fn convert_fetch_to_limit(sql: &str, has_offset: bool, has_fetch: bool) -> String {
    let mut sql = sql.to_string();

    if has_offset {
        sql = OFFSET_ROWS.replace_all(&sql, "OFFSET $1").into_owned();
    }

    if has_fetch {
        sql = FETCH_ROWS.replace_all(&sql, "LIMIT $1").into_owned();
    }

    sql
}
