// tests/pipeline/builder_test.rs
//
// Builder surface behavior: validation, the three source paths, and the
// region session statement.

#[cfg(test)]
mod tests {
    use vertica_export::builder::{
        build_set_aws_region_sql, BuildError, ExportQueryBuilder, EXPORT_TEMPLATE,
        PLAN_EXPORT_TEMPLATE, PREPARED_EXPORT_TEMPLATE,
    };
    use vertica_export::plan::DecodedPlan;
    use vertica_export::schema::{Field, Schema, SemanticType};

    #[test]
    fn test_region_session_statement() {
        assert_eq!(
            build_set_aws_region_sql(None),
            "ALTER SESSION SET AWSRegion='us-east-1'"
        );
        assert_eq!(
            build_set_aws_region_sql(Some("ap-southeast-2")),
            "ALTER SESSION SET AWSRegion='ap-southeast-2'"
        );
    }

    #[test]
    fn test_prepared_statement_export() {
        let sql = ExportQueryBuilder::new(PREPARED_EXPORT_TEMPLATE)
            .with_s3_export_bucket("bucket")
            .with_query_id("q-7")
            .with_prepared_statement_sql("SELECT \"id\" FROM \"public\".\"orders\" WHERE \"id\" = 3")
            .build()
            .unwrap();
        assert_eq!(
            sql,
            "EXPORT TO PARQUET(directory = 's3://bucket/q-7') AS \
             SELECT \"id\" FROM \"public\".\"orders\" WHERE \"id\" = 3"
        );
    }

    #[test]
    fn test_plan_export_end_to_end() {
        let schema = Schema::new(vec![Field::new("employee_id", SemanticType::Varchar)]);
        let plan = DecodedPlan::from_sql(
            "SELECT `employee_id` AS `employee_id0` FROM `emp` WHERE `employee_id` = 'EMP001'",
            schema,
        )
        .unwrap();
        let sql = ExportQueryBuilder::new(PLAN_EXPORT_TEMPLATE)
            .with_s3_export_bucket("bucket")
            .with_query_id("q-9")
            .with_query_plan(plan, "public", "emp")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(
            sql,
            "EXPORT TO PARQUET(directory = 's3://bucket/q-9') AS \
             SELECT \"employee_id\" FROM \"public\".\"emp\" WHERE \"employee_id\" = 'EMP001'"
        );
    }

    #[test]
    fn test_missing_destination_fields() {
        let err = ExportQueryBuilder::new(EXPORT_TEMPLATE)
            .from_table("public", "t")
            .build()
            .unwrap_err();
        assert!(matches!(err, BuildError::MissingField("s3ExportBucket")));

        let err = ExportQueryBuilder::new(EXPORT_TEMPLATE)
            .with_s3_export_bucket("bucket")
            .from_table("public", "t")
            .build()
            .unwrap_err();
        assert!(matches!(err, BuildError::MissingField("queryID")));

        let err = ExportQueryBuilder::new("")
            .with_s3_export_bucket("bucket")
            .with_query_id("q")
            .from_table("public", "t")
            .build()
            .unwrap_err();
        assert!(matches!(err, BuildError::MissingField("template")));
    }

    #[test]
    fn test_exactly_one_source_is_enforced() {
        let err = ExportQueryBuilder::new(EXPORT_TEMPLATE)
            .with_s3_export_bucket("bucket")
            .with_query_id("q")
            .build()
            .unwrap_err();
        assert!(matches!(err, BuildError::MissingField("table")));

        let err = ExportQueryBuilder::new(EXPORT_TEMPLATE)
            .with_s3_export_bucket("bucket")
            .with_query_id("q")
            .from_table("public", "t")
            .with_prepared_statement_sql("SELECT 1")
            .build()
            .unwrap_err();
        assert!(matches!(err, BuildError::ConflictingSources));
    }

    #[test]
    fn test_accessors_reflect_builder_state() {
        let builder = ExportQueryBuilder::new(EXPORT_TEMPLATE)
            .with_s3_export_bucket("bucket")
            .with_query_id("q-1")
            .from_table("public", "orders");
        assert_eq!(builder.s3_export_bucket(), Some("bucket"));
        assert_eq!(builder.query_id(), Some("q-1"));
        assert_eq!(builder.table(), Some("\"public\".\"orders\""));
        assert_eq!(builder.prepared_statement_sql(), None);
        assert_eq!(builder.query_from_plan(), None);
    }
}
