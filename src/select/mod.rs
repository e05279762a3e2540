//! SELECT statement validation (C6) — orchestration.
//!
//! Ties together clause segmentation, the FROM/JOIN alias table, the
//! expression validator, and each clause-specific validator into one
//! recursive entry point. [`SelectValidator`] also implements
//! [`crate::expr::SubqueryValidator`], which is how a subquery nested
//! inside a WHERE/HAVING/SELECT-list expression gets validated by calling
//! straight back into [`validate_select`] — the cycle between the
//! expression validator (C5) and this module (C6) is broken by routing
//! through that trait object instead of a direct function call.

pub mod clause;
pub mod from;
pub mod group_by;
pub mod having;
pub mod limit;
pub mod order_by;
pub mod select_list;

use crate::config::Config;
use crate::diagnostic::{Diagnostic, ErrorKind};
use crate::expr::{self, ExprContext, SubqueryValidator};
use crate::ident;
use crate::sql::Token;

/// Entry point: `tokens` is a full `SELECT ...` statement (no leading
/// keyword stripped, no trailing semicolon).
pub fn validate_select(tokens: &[Token], config: &Config) -> Option<Diagnostic> {
    let validator = SelectValidator {
        max_depth: config.max_nesting_depth,
    };
    validate_select_inner(tokens, &validator, 0).err()
}

pub struct SelectValidator {
    max_depth: usize,
}

impl SelectValidator {
    pub fn new(max_depth: usize) -> Self {
        SelectValidator { max_depth }
    }
}

impl SubqueryValidator for SelectValidator {
    fn validate_subquery(&self, inner: &[Token], scalar: bool, depth: usize) -> Option<Diagnostic> {
        if depth > self.max_depth {
            return Some(Diagnostic::new(ErrorKind::NestingTooDeep));
        }
        match validate_select_inner(inner, self, depth) {
            Ok(items) => {
                if scalar && items > 1 {
                    Some(Diagnostic::new(ErrorKind::MultiColumnScalarSubquery))
                } else {
                    None
                }
            }
            Err(d) => Some(Diagnostic::new(ErrorKind::InvalidSubquery).with_details(d)),
        }
    }

    fn max_depth(&self) -> usize {
        self.max_depth
    }
}

/// Validate one SELECT statement, returning the number of projected columns
/// on success (used by the caller to enforce scalar-subquery arity).
fn validate_select_inner(
    tokens: &[Token],
    subq: &dyn SubqueryValidator,
    depth: usize,
) -> Result<usize, Diagnostic> {
    let clauses = clause::split_clauses(tokens)?;
    let max_depth = subq.max_depth();

    let select_list =
        select_list::validate_select_list(clauses.select_list, subq, max_depth)?;
    let from_result = from::validate_from(clauses.from, subq, max_depth)?;
    let known_aliases: Vec<&str> = from_result.items.iter().map(|i| i.alias.as_str()).collect();

    check_qualified_refs(clauses.select_list, &known_aliases)?;

    if let Some(where_tokens) = clauses.r#where {
        check_qualified_refs(where_tokens, &known_aliases)?;
        if where_tokens.is_empty() {
            return Err(Diagnostic::new(ErrorKind::EmptyWhereClause));
        }
        if let Some(err) = expr::validate_expr(where_tokens, ExprContext::Predicate, subq, max_depth)
        {
            return Err(err);
        }
    }

    let group_by = match clauses.group_by {
        Some(gb) => Some(group_by::validate_group_by(gb, subq, max_depth)?),
        None => None,
    };
    group_by::cross_check(&select_list.items, group_by.as_deref())?;

    if let Some(having_tokens) = clauses.having {
        check_qualified_refs(having_tokens, &known_aliases)?;
        let select_aliases: Vec<String> = select_list.items.iter().filter_map(|it| it.alias.clone()).collect();
        having::validate_having(having_tokens, group_by.as_deref(), &select_aliases, subq, max_depth)?;
    }

    if let Some(order_by_tokens) = clauses.order_by {
        check_qualified_refs(order_by_tokens, &known_aliases)?;
        order_by::validate_order_by(order_by_tokens, &select_list.items, subq, max_depth)?;
    }

    if let Some(limit_tokens) = clauses.limit {
        limit::validate_limit(limit_tokens)?;
    }

    Ok(select_list.items.len())
}

/// Every `alias.column` reference in `tokens` must qualify a known FROM
/// alias.
fn check_qualified_refs(tokens: &[Token], known_aliases: &[&str]) -> Result<(), Diagnostic> {
    let mut i = 0;
    while i < tokens.len() {
        if ident::is_qualified_column_at(tokens, i) {
            let alias = tokens[i].ident().unwrap();
            if !known_aliases.contains(&alias) {
                return Err(
                    Diagnostic::new(ErrorKind::UnknownAlias(alias.to_string()))
                        .with_suggestion_opt(expr::suggest_identifier(alias, known_aliases.iter().copied())),
                );
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::sql::tokenize;

    fn check(sql: &str) -> Option<Diagnostic> {
        let toks = tokenize(sql).unwrap();
        validate_select(&toks, &Config::default())
    }

    #[test]
    fn minimal_valid_select() {
        assert!(check("select a from t").is_none());
    }

    #[test]
    fn select_with_every_clause() {
        assert!(
            check(
                "select a, count(b) from t where a > 0 group by a having count(b) > 1 order by a desc limit 10"
            )
            .is_none()
        );
    }

    #[test]
    fn unknown_alias_in_select_list() {
        let err = check("select x.a from t y").unwrap();
        assert!(matches!(err.error, ErrorKind::UnknownAlias(_)));
    }

    #[test]
    fn scalar_subquery_with_two_columns_rejected() {
        let err = check("select a from t where a = (select x, y from u)").unwrap();
        assert_eq!(err.error, ErrorKind::MultiColumnScalarSubquery);
    }

    #[test]
    fn in_subquery_allows_multiple_rows_single_column() {
        assert!(check("select a from t where a in (select b from u)").is_none());
    }

    #[test]
    fn in_subquery_rejects_multiple_columns() {
        let err = check("select a from t where a in (select x, y from u)").unwrap();
        assert_eq!(err.error, ErrorKind::MultiColumnScalarSubquery);
    }

    #[test]
    fn mixed_aggregate_without_group_by_rejected() {
        let err = check("select a, count(b) from t").unwrap();
        assert_eq!(err.error, ErrorKind::GroupByRequired);
    }
}
