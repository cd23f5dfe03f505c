// tests/pipeline/plan_pipeline_test.rs
//
// End-to-end coverage of the decoded-plan rewrite pipeline: decoder-shaped
// SQL in, Vertica-ready query text out.

#[cfg(test)]
mod tests {
    use vertica_export::builder::{BuildError, ExportQueryBuilder, PLAN_EXPORT_TEMPLATE};
    use vertica_export::plan::DecodedPlan;
    use vertica_export::schema::{Field, Schema, SemanticType};
    use vertica_export::test_utils::validate_sql;

    fn rewrite(sql: &str, schema: Schema, schema_name: &str, table_name: &str) -> String {
        let plan = DecodedPlan::from_sql(sql, schema).unwrap();
        let builder = ExportQueryBuilder::new(PLAN_EXPORT_TEMPLATE)
            .with_query_plan(plan, schema_name, table_name)
            .unwrap();
        builder.query_from_plan().unwrap().to_string()
    }

    #[test]
    fn test_string_filter_round_trip() {
        let schema = Schema::new(vec![Field::new("employee_id", SemanticType::Varchar)]);
        let sql = rewrite(
            "SELECT `employee_id` AS `employee_id0` FROM `basic_write_nonexist` \
             WHERE `employee_id` = 'EMP001'",
            schema,
            "public",
            "basic_write_nonexist",
        );
        assert_eq!(
            sql,
            "SELECT \"employee_id\" FROM \"public\".\"basic_write_nonexist\" \
             WHERE \"employee_id\" = 'EMP001'"
        );
        validate_sql(&sql).unwrap();
    }

    #[test]
    fn test_timestamp_column_is_cast_and_filter_becomes_epoch_millis() {
        let schema = Schema::new(vec![
            Field::new("id", SemanticType::Int32),
            Field::new("created_at", SemanticType::TimestampMillis),
        ]);
        let sql = rewrite(
            "SELECT `id` AS `id0`, `created_at` AS `created_at0` FROM `events` \
             WHERE `created_at` > '2023-01-01T00:00:00'",
            schema,
            "public",
            "events",
        );
        assert_eq!(
            sql,
            "SELECT \"id\", CAST(\"created_at\" AS VARCHAR) AS \"created_at\" \
             FROM \"public\".\"events\" WHERE \"created_at\" > 1672531200000"
        );
        validate_sql(&sql).unwrap();
    }

    #[test]
    fn test_wildcard_expands_from_schema() {
        let schema = Schema::new(vec![
            Field::new("id", SemanticType::Int32),
            Field::new("ts", SemanticType::TimestampMillis),
        ]);
        let sql = rewrite("SELECT * FROM `orders`", schema, "sales", "orders");
        assert_eq!(
            sql,
            "SELECT \"id\", CAST(\"ts\" AS VARCHAR) AS \"ts\" FROM \"sales\".\"orders\""
        );
        validate_sql(&sql).unwrap();
    }

    #[test]
    fn test_typed_numeric_and_date_literals() {
        // Schema fields carry the decoder's synthetic alias names; the filter
        // references the originals, exercising alias restoration.
        let schema = Schema::new(vec![
            Field::new(
                "price0",
                SemanticType::Decimal {
                    precision: 10,
                    scale: 2,
                },
            ),
            Field::new("qty0", SemanticType::Int64),
            Field::new("ratio0", SemanticType::Float32),
            Field::new("d0", SemanticType::DateDays),
        ]);
        let sql = rewrite(
            "SELECT `price` AS `price0`, `qty` AS `qty0`, `ratio` AS `ratio0`, `d` AS `d0` \
             FROM `t` WHERE `price` = 99.99 AND `qty` = 500 AND `ratio` = 500.0 \
             AND `d` = '2023-02-01'",
            schema,
            "hr",
            "t",
        );
        assert_eq!(
            sql,
            "SELECT \"price\", \"qty\", \"ratio\", \"d\" FROM \"hr\".\"t\" \
             WHERE \"price\" = 99.99 AND \"qty\" = 500 AND \"ratio\" = 500.0 AND \"d\" = 19389"
        );
        validate_sql(&sql).unwrap();
    }

    #[test]
    fn test_boolean_filter_renders_as_bit() {
        let schema = Schema::new(vec![
            Field::new("id", SemanticType::Int32),
            Field::new("active", SemanticType::Boolean),
        ]);
        let sql = rewrite(
            "SELECT `id` AS `id0`, `active` AS `active0` FROM `t` WHERE `active` = true",
            schema,
            "public",
            "t",
        );
        assert_eq!(
            sql,
            "SELECT \"id\", \"active\" FROM \"public\".\"t\" WHERE \"active\" = 1"
        );
    }

    #[test]
    fn test_pagination_is_rewritten_to_vertica_spelling() {
        let schema = Schema::new(vec![Field::new("id", SemanticType::Int32)]);
        let sql = rewrite(
            "SELECT `id` AS `id0` FROM `t` ORDER BY `id` OFFSET 10 ROWS FETCH NEXT 5 ROWS ONLY",
            schema,
            "public",
            "t",
        );
        assert_eq!(
            sql,
            "SELECT \"id\" FROM \"public\".\"t\" ORDER BY \"id\" OFFSET 10 LIMIT 5"
        );
        assert!(!sql.contains("ROWS"));
        assert!(!sql.contains("FETCH"));
    }

    #[test]
    fn test_order_by_survives_untouched() {
        let schema = Schema::new(vec![
            Field::new("id", SemanticType::Int32),
            Field::new("salary", SemanticType::Int64),
        ]);
        let sql = rewrite(
            "SELECT `id` AS `id0`, `salary` AS `salary0` FROM `emp` ORDER BY `salary` DESC",
            schema,
            "public",
            "emp",
        );
        assert_eq!(
            sql,
            "SELECT \"id\", \"salary\" FROM \"public\".\"emp\" ORDER BY \"salary\" DESC"
        );
        validate_sql(&sql).unwrap();
    }

    #[test]
    fn test_string_value_shaped_like_a_placeholder_survives() {
        // A user-supplied filter string that looks like a binding slot must
        // come through verbatim, never rewritten by a later binding.
        let schema = Schema::new(vec![
            Field::new("name", SemanticType::Varchar),
            Field::new("salary", SemanticType::Int64),
        ]);
        let sql = rewrite(
            "SELECT `name` AS `name0`, `salary` AS `salary0` FROM `t` \
             WHERE `name` = '{param1}' AND `salary` = 5000",
            schema,
            "public",
            "t",
        );
        assert_eq!(
            sql,
            "SELECT \"name\", \"salary\" FROM \"public\".\"t\" \
             WHERE \"name\" = '{param1}' AND \"salary\" = 5000"
        );
    }

    #[test]
    fn test_literal_subject_filter_keeps_bindings_aligned() {
        // `'EMP001' IN (col)` puts a literal in subject position; its
        // binding must land on the first placeholder, not shift the rest.
        let schema = Schema::new(vec![
            Field::new("employee_id", SemanticType::Varchar),
            Field::new("salary", SemanticType::Int64),
        ]);
        let sql = rewrite(
            "SELECT `employee_id` AS `employee_id0`, `salary` AS `salary0` FROM `t` \
             WHERE 'EMP001' IN (`employee_id`) AND `salary` = 5000",
            schema,
            "public",
            "t",
        );
        assert_eq!(
            sql,
            "SELECT \"employee_id\", \"salary\" FROM \"public\".\"t\" \
             WHERE 'EMP001' IN (\"employee_id\") AND \"salary\" = 5000"
        );
        assert!(!sql.contains("{param"));
    }

    #[test]
    fn test_non_select_statement_is_rejected() {
        let schema = Schema::new(vec![Field::new("id", SemanticType::Int32)]);
        let plan = DecodedPlan::from_sql("INSERT INTO `t` VALUES (1)", schema).unwrap();
        let err = ExportQueryBuilder::new(PLAN_EXPORT_TEMPLATE)
            .with_query_plan(plan, "public", "t")
            .unwrap_err();
        assert!(matches!(err, BuildError::UnsupportedStatement(_)));
    }

    #[test]
    fn test_set_operation_is_rejected() {
        let schema = Schema::new(vec![Field::new("id", SemanticType::Int32)]);
        let plan = DecodedPlan::from_sql("SELECT 1 UNION SELECT 2", schema).unwrap();
        let err = ExportQueryBuilder::new(PLAN_EXPORT_TEMPLATE)
            .with_query_plan(plan, "public", "t")
            .unwrap_err();
        assert!(matches!(err, BuildError::UnsupportedStatement(_)));
    }

    #[test]
    fn test_malformed_timestamp_literal_fails_recoverably() {
        let schema = Schema::new(vec![Field::new("created_at", SemanticType::TimestampMillis)]);
        let plan = DecodedPlan::from_sql(
            "SELECT `created_at` AS `created_at0` FROM `t` \
             WHERE `created_at` = '2023-01-01T00:00:00Z'",
            schema,
        )
        .unwrap();
        let err = ExportQueryBuilder::new(PLAN_EXPORT_TEMPLATE)
            .with_query_plan(plan, "public", "t")
            .unwrap_err();
        assert!(matches!(err, BuildError::Encode(_)));
    }
}
