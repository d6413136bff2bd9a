use dumprestore::core::parse::ParseLogic;
use dumprestore::models::SqlValue;
use dumprestore::sql::{
    ParseError, SplitOptions, parse_insert, parse_values, split_sql_statements,
    split_sql_statements_with, tokenize_values,
};
use serde_json::Number;

fn text(s: &str) -> SqlValue {
    SqlValue::Text(s.to_string())
}

fn int(i: i64) -> SqlValue {
    SqlValue::Number(Number::from(i))
}

#[test]
fn test_semicolon_inside_string_does_not_split() {
    let stmts = split_sql_statements("INSERT INTO t (a) VALUES ('x;y');");
    assert_eq!(stmts, vec!["INSERT INTO t (a) VALUES ('x;y')"]);
}

#[test]
fn test_split_keeps_order_and_trailing_statement() {
    let stmts = split_sql_statements("  SELECT 1 ;\n\n;INSERT INTO a (x) VALUES (1);\nINSERT INTO b (y) VALUES (2)  ");
    assert_eq!(
        stmts,
        vec![
            "SELECT 1",
            "INSERT INTO a (x) VALUES (1)",
            "INSERT INTO b (y) VALUES (2)"
        ]
    );
}

#[test]
fn test_split_copies_doubled_quotes_verbatim() {
    let stmts = split_sql_statements("INSERT INTO p (n) VALUES ('O''Brien; Jr');SELECT 2;");
    assert_eq!(stmts.len(), 2);
    assert_eq!(stmts[0], "INSERT INTO p (n) VALUES ('O''Brien; Jr')");
}

#[test]
fn test_split_line_comments_only_when_enabled() {
    let dump = "--\n-- Name: teams; Type: TABLE DATA; Schema: public\n--\nINSERT INTO teams (id, name) VALUES (1, 'A--B');\n";

    let plain = split_sql_statements(dump);
    assert!(plain.len() > 1);

    let stripped = split_sql_statements_with(
        dump,
        SplitOptions {
            strip_line_comments: true,
        },
    );
    assert_eq!(stripped, vec!["INSERT INTO teams (id, name) VALUES (1, 'A--B')"]);
}

#[test]
fn test_doubled_quote_unescaped_in_value() {
    assert_eq!(parse_values("'O''Brien'"), vec![text("O'Brien")]);
}

#[test]
fn test_bare_and_quoted_tokens_are_typed() {
    let values = parse_values("42, 3.14, NULL, TRUE, false, '42', abc, -7");
    assert_eq!(
        values,
        vec![
            int(42),
            SqlValue::Number(Number::from_f64(3.14).unwrap()),
            SqlValue::Null,
            SqlValue::Bool(true),
            SqlValue::Bool(false),
            text("42"),
            text("abc"),
            int(-7),
        ]
    );
}

#[test]
fn test_wide_integers_keep_every_digit() {
    let values = parse_values("12345678901234567890, 123456789012345678901234, -99999999999999999999");
    assert_eq!(
        values,
        vec![
            SqlValue::Number(Number::from(12345678901234567890u64)),
            text("123456789012345678901234"),
            text("-99999999999999999999"),
        ]
    );
    assert_eq!(values[0].to_string(), "12345678901234567890");
}

#[test]
fn test_quoted_null_stays_text() {
    assert_eq!(parse_values("'NULL', ''"), vec![text("NULL"), text("")]);
}

#[test]
fn test_tokenizer_marks_quoted_tokens() {
    let tokens = tokenize_values("1, 'a,b'");
    assert_eq!(tokens.len(), 2);
    assert!(!tokens[0].quoted);
    assert!(tokens[1].quoted);
    assert_eq!(tokens[1].text, "a,b");
}

#[test]
fn test_cast_suffix_is_dropped() {
    let values = parse_values(r#"'{"a": 1}'::jsonb, '2025-01-01'::date"#);
    assert_eq!(values, vec![text(r#"{"a": 1}"#), text("2025-01-01")]);
}

#[test]
fn test_end_to_end_teams_insert() {
    let stmt = parse_insert(r#"INSERT INTO "teams" ("id","name") VALUES (1,'Acme, Inc.');"#)
        .expect("parses")
        .expect("is an insert");

    assert_eq!(stmt.table, "teams");
    assert_eq!(stmt.schema, None);
    assert_eq!(stmt.columns, vec!["id", "name"]);
    assert_eq!(stmt.rows, vec![vec![int(1), text("Acme, Inc.")]]);
}

#[test]
fn test_schema_qualified_table() {
    let stmt = parse_insert("insert into public.events (id, title) values (5, 'Gala')")
        .expect("parses")
        .expect("is an insert");

    assert_eq!(stmt.schema.as_deref(), Some("public"));
    assert_eq!(stmt.table, "events");
}

#[test]
fn test_multi_row_values() {
    let stmt = parse_insert("INSERT INTO t (a, b) VALUES (1, 'x'), (2, 'y), (z')")
        .expect("parses")
        .expect("is an insert");

    assert_eq!(
        stmt.rows,
        vec![vec![int(1), text("x")], vec![int(2), text("y), (z")]]
    );
}

#[test]
fn test_column_mismatch_is_rejected() {
    let err = parse_insert("INSERT INTO t (a, b) VALUES (1)").unwrap_err();
    assert_eq!(
        err,
        ParseError::ColumnMismatch {
            table: "t".to_string(),
            columns: 2,
            values: 1,
        }
    );
}

#[test]
fn test_unmatched_shape_is_rejected() {
    let err = parse_insert("INSERT INTO t VALUES (1, 2)").unwrap_err();
    assert!(matches!(err, ParseError::Shape(_)));
}

#[test]
fn test_non_insert_is_ignored() {
    assert_eq!(parse_insert("UPDATE t SET a = 1"), Ok(None));
}

#[test]
fn test_parse_dump_skips_bad_statement_and_continues() {
    let dump = "\
        INSERT INTO teams (id, name) VALUES (1, 'A');\n\
        INSERT INTO teams (id, name) VALUES (2);\n\
        SET client_encoding = 'UTF8';\n\
        INSERT INTO personnel (id, name) VALUES (7, 'Bia');\n\
        INSERT INTO teams (id, name) VALUES (3, 'C');\n";

    let report = ParseLogic::parse_dump(dump, &SplitOptions::default());

    assert_eq!(report.statements, 5);
    assert_eq!(report.inserts, 4);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].index, 2);
    assert_eq!(report.batches.table_names(), vec!["teams", "personnel"]);
    assert_eq!(report.batches.rows("teams").len(), 2);
    assert_eq!(report.batches.rows("teams")[1]["id"], int(3));
    assert_eq!(report.rows(), 3);
}

#[test]
fn test_batch_columns_are_union_in_first_seen_order() {
    let dump = "\
        INSERT INTO p (id, name) VALUES (1, 'a');\n\
        INSERT INTO p (id, email, name) VALUES (2, 'b@x', 'b');\n";

    let report = ParseLogic::parse_dump(dump, &SplitOptions::default());
    assert_eq!(report.batches.columns("p"), vec!["id", "name", "email"]);
}
