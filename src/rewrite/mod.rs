//! AST post-processing passes over the decoded statement.
//!
//! Each pass is a pure transformation: it takes ownership of the tree (or a
//! borrowed view of it), and produces a new value. No stage aliases nodes
//! with another, so the passes compose without coordination:
//!
//! 1. [`alias`] - recover original column names behind synthetic aliases
//! 2. [`select_list`] - wildcard expansion, alias stripping, timestamp casts
//! 3. [`qualify`] - schema-qualify the single table source
//! 4. [`accumulate`] - collect (type, value) pairs from the filter tree
//! 5. [`params`] - replace filter literals with `{paramN}` placeholders

pub mod accumulate;
pub mod alias;
pub mod params;
pub mod qualify;
pub mod select_list;

pub use accumulate::collect_literals;
pub use alias::{alias_mapping, schema_with_original_names};
pub use params::parameterize;
pub use qualify::qualify_table;
pub use select_list::normalize_projection;
