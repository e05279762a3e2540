//! Integration tests exercising the crate through its public `validate`
//! entry point, covering the concrete input/outcome scenarios a reviewer
//! would check by hand.

use sqlvet::diagnostic::ErrorKind;

fn ok(sql: &str) {
    assert!(sqlvet::validate(sql).is_none(), "expected {sql:?} to validate");
}

fn err(sql: &str) -> ErrorKind {
    sqlvet::validate(sql)
        .unwrap_or_else(|| panic!("expected {sql:?} to fail validation"))
        .error
}

#[test]
fn minimal_select_is_valid() {
    ok("SELECT a FROM t");
}

#[test]
fn full_clause_set_is_valid() {
    ok("SELECT a, SUM(b) FROM t GROUP BY a HAVING SUM(b) > 10 ORDER BY a DESC LIMIT 5");
}

#[test]
fn aggregate_in_where_is_rejected() {
    assert_eq!(err("SELECT a FROM t WHERE SUM(a) > 1"), ErrorKind::AggregateInWhere);
}

#[test]
fn mixed_aggregate_without_group_by_is_rejected() {
    assert_eq!(err("SELECT a, SUM(b) FROM t"), ErrorKind::GroupByRequired);
}

#[test]
fn unknown_alias_in_join_condition_is_rejected() {
    assert!(matches!(
        err("SELECT a FROM t JOIN u ON t.id = x.id"),
        ErrorKind::UnknownAliasInOn { .. }
    ));
}

#[test]
fn multi_column_in_subquery_is_rejected() {
    assert_eq!(
        err("SELECT a FROM t WHERE a IN (SELECT x, y FROM u)"),
        ErrorKind::MultiColumnScalarSubquery
    );
}

#[test]
fn order_by_before_limit_out_of_order_is_rejected() {
    assert!(matches!(
        err("SELECT a FROM t LIMIT 5 ORDER BY a"),
        ErrorKind::ClauseOrderError { .. }
    ));
}

#[test]
fn alter_table_add_column_is_valid() {
    ok("ALTER TABLE users ADD age INT");
}

#[test]
fn misspelled_table_keyword_suggests_the_fix() {
    let diag = sqlvet::validate("ALTER TABLR users ADD age INT").unwrap();
    assert_eq!(diag.error, ErrorKind::InvalidAlterGrammar);
    assert_eq!(diag.suggestion.as_deref(), Some("table"));
}

#[test]
fn delete_with_empty_where_is_rejected() {
    assert_eq!(err("DELETE FROM users WHERE"), ErrorKind::EmptyWhereClause);
}

#[test]
fn dropping_two_databases_at_once_is_rejected() {
    assert_eq!(err("DROP DATABASE a, b;"), ErrorKind::MultipleDatabaseDrop);
}

#[test]
fn clause_order_is_enforced_universally() {
    assert!(matches!(
        err("SELECT a FROM t GROUP BY a WHERE a > 1"),
        ErrorKind::ClauseOrderError { .. }
    ));
}

#[test]
fn qualified_columns_require_a_known_alias() {
    assert!(matches!(
        err("SELECT x.a FROM t y"),
        ErrorKind::UnknownAlias(_)
    ));
}

#[test]
fn strip_outer_parens_does_not_change_meaning() {
    ok("SELECT a FROM t WHERE (a = 1)");
    ok("SELECT a FROM t WHERE ((a = 1))");
}

#[test]
fn trailing_semicolon_is_accepted_exactly_once() {
    ok("SELECT a FROM t;");
    assert_eq!(
        err("SELECT a FROM t;;"),
        ErrorKind::InvalidSemicolonUsage
    );
}

#[test]
fn create_table_round_trips_through_dispatch() {
    ok("CREATE TABLE orders (id INT PRIMARY KEY, total DECIMAL(10, 2))");
}

#[test]
fn transaction_control_statements_are_valid() {
    ok("COMMIT");
    ok("ROLLBACK");
    ok("ROLLBACK TO sp1");
    ok("SAVEPOINT sp1");
}

#[test]
fn insert_arity_mismatch_is_rejected() {
    assert_eq!(
        err("INSERT INTO orders (id, total) VALUES (1)"),
        ErrorKind::InsertArityMismatch
    );
}

#[test]
fn update_with_subquery_value_is_valid() {
    ok("UPDATE orders SET total = (SELECT MAX(amount) FROM payments) WHERE id = 1");
}

#[test]
fn having_column_must_be_grouped_or_aliased() {
    assert_eq!(
        err("SELECT a, count(b) FROM t GROUP BY a HAVING c > 1"),
        ErrorKind::InvalidHavingExpression
    );
}

#[test]
fn having_on_grouped_column_is_valid() {
    ok("SELECT a, count(b) FROM t GROUP BY a HAVING a > 1");
}

#[test]
fn multiplication_in_value_expressions_is_recognized() {
    ok("SELECT a * b FROM t");
    ok("SELECT a FROM t WHERE a * 2 = b");
    ok("SELECT a * b FROM t GROUP BY a * b");
}
