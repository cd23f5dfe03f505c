//! # vertica-export
//!
//! Builds the SQL that a data-export pipeline hands to Vertica to unload
//! query results to S3.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │        Decoded relational plan (sqlparser AST)           │
//! │              + typed output schema                       │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [rewrite]
//! ┌─────────────────────────────────────────────────────────┐
//! │   Alias resolution → select-list normalization →         │
//! │   table qualification → literal parameterization         │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [dialect + template]
//! ┌─────────────────────────────────────────────────────────┐
//! │   Printed SQL → pagination fixup → typed literal         │
//! │   binding → Vertica-quoted statement text                │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [builder]
//! ┌─────────────────────────────────────────────────────────┐
//! │          EXPORT TO PARQUET(...) AS <statement>           │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! A second entry point bypasses the tree rewrite entirely: structured
//! user constraints are compiled straight to WHERE-clause text through
//! the same typed literal encoding ([`predicate`]).

pub mod builder;
pub mod dialect;
pub mod encode;
pub mod plan;
pub mod predicate;
pub mod rewrite;
pub mod schema;
pub mod template;

pub mod test_utils;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::builder::{BuildError, ExportQueryBuilder};
    pub use crate::encode::{encode, EncodeError, EncodedLiteral};
    pub use crate::plan::{DecodedPlan, PlanDecoder};
    pub use crate::predicate::{ConstraintOp, Constraints, ValueConstraint};
    pub use crate::schema::{Field, LiteralValue, Schema, SemanticType, TypedLiteral};
    pub use crate::template::SqlTemplate;
}

// Also export the core types at the crate root.
pub use builder::{BuildError, ExportQueryBuilder};
pub use encode::{encode, EncodeError, EncodedLiteral};
pub use plan::{DecodedPlan, PlanDecoder};
pub use schema::{Field, LiteralValue, Schema, SemanticType, TypedLiteral};
