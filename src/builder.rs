//! Fluent assembly of Vertica `EXPORT TO PARQUET` statements.
//!
//! Three mutually exclusive query sources feed the same outer template:
//! a table name plus schema-driven column list, caller-supplied prepared
//! SQL, or a decoded relational plan run through the full rewrite pipeline.
//! [`ExportQueryBuilder::build`] validates that exactly one source is set
//! and renders the final statement.

use sqlparser::ast::{SetExpr, Statement};
use thiserror::Error;
use tracing::debug;

use crate::dialect;
use crate::encode::{encode, EncodeError};
use crate::plan::DecodedPlan;
use crate::predicate::{self, Constraints};
use crate::rewrite;
use crate::schema::Schema;
use crate::template::SqlTemplate;

// =============================================================================
// Templates
// =============================================================================

/// Outer template for the table-driven source.
pub const EXPORT_TEMPLATE: &str = "EXPORT TO PARQUET(directory = 's3://{s3ExportBucket}/{queryID}') AS SELECT {colNames} FROM {table} {constraintValues}";

/// Outer template for caller-supplied prepared SQL.
pub const PREPARED_EXPORT_TEMPLATE: &str =
    "EXPORT TO PARQUET(directory = 's3://{s3ExportBucket}/{queryID}') AS {preparedStatementSQL}";

/// Outer template for a plan-derived query.
pub const PLAN_EXPORT_TEMPLATE: &str =
    "EXPORT TO PARQUET(directory = 's3://{s3ExportBucket}/{queryID}') AS {queryFromPlan}";

const SET_REGION_TEMPLATE: &str = "ALTER SESSION SET AWSRegion='{defaultRegion}'";
const DEFAULT_AWS_REGION: &str = "us-east-1";

/// Emit the session statement pointing Vertica's S3 export at a region.
///
/// `None` and the empty string both fall back to the default region.
pub fn build_set_aws_region_sql(region: Option<&str>) -> String {
    let region = region.filter(|r| !r.is_empty()).unwrap_or(DEFAULT_AWS_REGION);
    let mut template = SqlTemplate::new(SET_REGION_TEMPLATE);
    template.add("defaultRegion", region);
    let sql = template.render();
    debug!(%sql, "generated region session statement");
    sql
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum BuildError {
    /// A required builder field was never set.
    #[error("required field missing: {0}")]
    MissingField(&'static str),

    /// More than one query source was set.
    #[error("conflicting query sources: provide exactly one of table, prepared SQL, or a decoded plan")]
    ConflictingSources,

    /// The decoded plan was not a plain SELECT query.
    #[error("unsupported statement: {0}. Only SELECT queries can be exported.")]
    UnsupportedStatement(String),

    /// A filter literal could not be encoded for its column type.
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

// =============================================================================
// Builder
// =============================================================================

/// Builder for one export statement.
#[derive(Debug, Clone)]
pub struct ExportQueryBuilder {
    template: String,
    s3_export_bucket: Option<String>,
    query_id: Option<String>,
    table: Option<String>,
    col_names: Option<String>,
    constraint_values: Option<String>,
    prepared_statement_sql: Option<String>,
    query_from_plan: Option<String>,
}

impl ExportQueryBuilder {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            s3_export_bucket: None,
            query_id: None,
            table: None,
            col_names: None,
            constraint_values: None,
            prepared_statement_sql: None,
            query_from_plan: None,
        }
    }

    // -------------------------------------------------------------------------
    // Destination
    // -------------------------------------------------------------------------

    pub fn with_s3_export_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.s3_export_bucket = Some(bucket.into());
        self
    }

    pub fn with_query_id(mut self, query_id: impl Into<String>) -> Self {
        self.query_id = Some(query_id.into());
        self
    }

    // -------------------------------------------------------------------------
    // Source: table + columns + constraints
    // -------------------------------------------------------------------------

    /// Target a table directly, qualified as `"schema"."table"`.
    ///
    /// An empty schema name leaves the table unqualified.
    pub fn from_table(mut self, schema_name: &str, table_name: &str) -> Self {
        let table = if schema_name.is_empty() {
            dialect::quote_identifier(table_name)
        } else {
            format!(
                "{}.{}",
                dialect::quote_identifier(schema_name),
                dialect::quote_identifier(table_name)
            )
        };
        self.table = Some(table);
        self
    }

    /// Derive the exported column list from the schema.
    ///
    /// Timestamp columns get the VARCHAR cast workaround, re-aliased to their
    /// own name, so they export as text instead of a corrupted INT96.
    pub fn with_columns(mut self, schema: &Schema) -> Self {
        let cols: Vec<String> = schema
            .fields
            .iter()
            .map(|field| {
                if field.ty.is_timestamp() {
                    format!("CAST({name} AS VARCHAR) AS {name}", name = field.name)
                } else {
                    field.name.clone()
                }
            })
            .collect();
        self.col_names = Some(cols.join(","));
        self
    }

    /// Compile user constraints into the WHERE clause for the table source.
    pub fn with_constraints(
        mut self,
        constraints: &Constraints,
        schema: &Schema,
    ) -> Result<Self, BuildError> {
        self.constraint_values = Some(predicate::where_clause(schema, constraints)?);
        Ok(self)
    }

    // -------------------------------------------------------------------------
    // Source: prepared SQL
    // -------------------------------------------------------------------------

    pub fn with_prepared_statement_sql(mut self, sql: impl Into<String>) -> Self {
        self.prepared_statement_sql = Some(sql.into());
        self
    }

    // -------------------------------------------------------------------------
    // Source: decoded plan
    // -------------------------------------------------------------------------

    /// Run the full rewrite pipeline over a decoded plan.
    ///
    /// Stages, in order: synthetic alias removal and timestamp casting on the
    /// select list, table qualification, literal accumulation against the
    /// alias-restored schema, parameterization, printing, pagination fixup,
    /// typed literal binding, and identifier quote normalization.
    pub fn with_query_plan(
        mut self,
        plan: DecodedPlan,
        schema_name: &str,
        table_name: &str,
    ) -> Result<Self, BuildError> {
        let DecodedPlan { statement, schema } = plan;

        let mut query = match statement {
            Statement::Query(query) => *query,
            other => return Err(BuildError::UnsupportedStatement(other.to_string())),
        };
        let mut select = match *query.body {
            SetExpr::Select(select) => *select,
            other => return Err(BuildError::UnsupportedStatement(other.to_string())),
        };

        // The synthetic aliases are about to be stripped, but the filter still
        // references original column names; restore those names in the schema
        // before the literal walk so type lookup succeeds.
        let alias_map = rewrite::alias_mapping(&select.projection);
        let adapted_schema = rewrite::schema_with_original_names(&schema, &alias_map);

        let projection = std::mem::take(&mut select.projection);
        select.projection = rewrite::normalize_projection(projection, &schema);

        let select = rewrite::qualify_table(select, schema_name, table_name);

        let literals = rewrite::collect_literals(select.selection.as_ref(), &adapted_schema);
        let select = rewrite::parameterize(select);

        let has_offset = query.offset.is_some();
        let has_fetch = query.fetch.is_some();
        query.body = Box::new(SetExpr::Select(Box::new(select)));

        let printed = query.to_string();
        let printed = dialect::convert_fetch_to_limit(&printed, has_offset, has_fetch);

        let mut template = SqlTemplate::new(printed);
        for (i, literal) in literals.iter().enumerate() {
            template.add(format!("param{i}"), encode(literal.ty, &literal.value)?);
        }

        let rendered = dialect::normalize_identifier_quotes(&template.render());
        debug!(sql = %rendered, "rewrote decoded plan into export query");
        self.query_from_plan = Some(rendered);
        Ok(self)
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }

    pub fn col_names(&self) -> Option<&str> {
        self.col_names.as_deref()
    }

    pub fn constraint_values(&self) -> Option<&str> {
        self.constraint_values.as_deref()
    }

    pub fn prepared_statement_sql(&self) -> Option<&str> {
        self.prepared_statement_sql.as_deref()
    }

    pub fn query_from_plan(&self) -> Option<&str> {
        self.query_from_plan.as_deref()
    }

    pub fn s3_export_bucket(&self) -> Option<&str> {
        self.s3_export_bucket.as_deref()
    }

    pub fn query_id(&self) -> Option<&str> {
        self.query_id.as_deref()
    }

    // -------------------------------------------------------------------------
    // Assembly
    // -------------------------------------------------------------------------

    /// Validate the destination and source fields, then render the statement.
    pub fn build(&self) -> Result<String, BuildError> {
        if self.template.is_empty() {
            return Err(BuildError::MissingField("template"));
        }
        let bucket = self
            .s3_export_bucket
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or(BuildError::MissingField("s3ExportBucket"))?;
        let query_id = self
            .query_id
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or(BuildError::MissingField("queryID"))?;

        let sources = [
            self.table.as_deref(),
            self.prepared_statement_sql.as_deref(),
            self.query_from_plan.as_deref(),
        ];
        match sources.iter().flatten().filter(|s| !s.is_empty()).count() {
            0 => return Err(BuildError::MissingField("table")),
            1 => {}
            _ => return Err(BuildError::ConflictingSources),
        }

        let mut template = SqlTemplate::new(&self.template);
        template
            .add("s3ExportBucket", bucket)
            .add("queryID", query_id)
            .add("colNames", self.col_names.clone().unwrap_or_default())
            .add("table", self.table.clone().unwrap_or_default())
            .add(
                "constraintValues",
                self.constraint_values.clone().unwrap_or_default(),
            )
            .add(
                "preparedStatementSQL",
                self.prepared_statement_sql.clone().unwrap_or_default(),
            )
            .add(
                "queryFromPlan",
                self.query_from_plan.clone().unwrap_or_default(),
            );

        let sql = template.render().trim_end().to_string();
        debug!(%sql, "built export statement");
        Ok(sql)
    }
}
