//! ORDER BY validation (§4.7).
//!
//! Grounded on `orderByHelpers.py`'s resolution order for each ORDER BY
//! item, tried in priority:
//! 1. a bare positional integer referencing a 1-based SELECT list position;
//! 2. a bare identifier matching a SELECT item's alias;
//! 3. an expression structurally identical to a SELECT item's expression
//!    (compared via [`crate::ident::normalize`]);
//! 4. an arbitrary value expression, validated independently — if it
//!    contains an aggregate call, that aggregate must also appear in the
//!    SELECT list (an ORDER BY clause cannot invent a new aggregation).
//!
//! `ASC`/`DESC` are not part of the closed keyword vocabulary (§6): they are
//! ordinary identifier tokens, recognized here by comparing their
//! already-lowercased text, exactly as the original treats them as plain
//! strings with no grammatical significance elsewhere.

use crate::diagnostic::{Diagnostic, ErrorKind};
use crate::expr::{self, ExprContext, SubqueryValidator};
use crate::ident;
use crate::select::select_list::SelectItem;
use crate::sql::{Token, TokenKind};

pub fn validate_order_by(
    tokens: &[Token],
    items: &[SelectItem<'_>],
    subq: &dyn SubqueryValidator,
    max_depth: usize,
) -> Result<(), Diagnostic> {
    if tokens.is_empty() {
        return Err(Diagnostic::new(ErrorKind::EmptyOrderBy));
    }

    for part in ident::split_top_level(tokens, |t| matches!(t.kind, TokenKind::Comma)) {
        validate_item(part, items, subq, max_depth)?;
    }
    Ok(())
}

fn validate_item(
    part: &[Token],
    items: &[SelectItem<'_>],
    subq: &dyn SubqueryValidator,
    max_depth: usize,
) -> Result<(), Diagnostic> {
    let key = strip_direction(part);
    if key.is_empty() {
        return Err(Diagnostic::new(ErrorKind::OrderByMissingExpression));
    }

    // 1. Positional reference.
    if key.len() == 1 {
        if let TokenKind::Number(n) = &key[0].kind {
            let pos: usize = n.parse().map_err(|_| {
                Diagnostic::new(ErrorKind::InvalidOrderByExpression)
            })?;
            if pos == 0 || pos > items.len() {
                return Err(Diagnostic::new(ErrorKind::InvalidOrderByExpression));
            }
            return Ok(());
        }
    }

    // 2. Alias reference.
    if key.len() == 1 {
        if let Some(name) = key[0].ident() {
            if items.iter().any(|it| it.alias.as_deref() == Some(name)) {
                return Ok(());
            }
        }
    }

    // 3. Structural match against a SELECT expression.
    let normalized_key = ident::normalize(key);
    if items
        .iter()
        .any(|it| !it.is_star && ident::normalize(it.expr) == normalized_key)
    {
        return Ok(());
    }

    // 4. Arbitrary value expression.
    if let Some(err) = expr::validate_expr(key, ExprContext::Value, subq, max_depth) {
        return Err(err);
    }
    if ident::contains_aggregate(key)
        && !items
            .iter()
            .any(|it| ident::contains_aggregate(it.expr) && ident::normalize(it.expr) == normalized_key)
    {
        return Err(Diagnostic::new(ErrorKind::AggregateOrderByNotInSelect));
    }
    Ok(())
}

/// Strip a trailing `asc`/`desc` direction marker, matched case-insensitively
/// by text since the tokenizer already lowercases unquoted identifiers.
fn strip_direction(tokens: &[Token]) -> &[Token] {
    match tokens.last() {
        Some(t) if t.ident() == Some("asc") || t.ident() == Some("desc") => {
            &tokens[..tokens.len() - 1]
        }
        _ => tokens,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::tokenize;

    struct NoSubqueries;
    impl SubqueryValidator for NoSubqueries {
        fn validate_subquery(&self, _inner: &[Token], _scalar: bool, _depth: usize) -> Option<Diagnostic> {
            None
        }

        fn max_depth(&self) -> usize {
            128
        }
    }

    fn items_from(exprs: &[Vec<Token>]) -> Vec<SelectItem<'_>> {
        exprs
            .iter()
            .map(|e| SelectItem {
                expr: e,
                alias: None,
                is_star: false,
            })
            .collect()
    }

    #[test]
    fn positional_reference() {
        let a = tokenize("a").unwrap();
        let b = tokenize("b").unwrap();
        let items = items_from(&[a, b]);
        let order = tokenize("2").unwrap();
        assert!(validate_order_by(&order, &items, &NoSubqueries, 128).is_ok());
    }

    #[test]
    fn positional_reference_out_of_range() {
        let a = tokenize("a").unwrap();
        let items = items_from(&[a]);
        let order = tokenize("5").unwrap();
        let err = validate_order_by(&order, &items, &NoSubqueries, 128).unwrap_err();
        assert_eq!(err.error, ErrorKind::InvalidOrderByExpression);
    }

    #[test]
    fn direction_suffix_is_stripped() {
        let a = tokenize("a").unwrap();
        let items = items_from(&[a]);
        let order = tokenize("1 desc").unwrap();
        assert!(validate_order_by(&order, &items, &NoSubqueries, 128).is_ok());
    }

    #[test]
    fn alias_reference() {
        let a = tokenize("a").unwrap();
        let items = vec![SelectItem {
            expr: &a,
            alias: Some("total".to_string()),
            is_star: false,
        }];
        let order = tokenize("total asc").unwrap();
        assert!(validate_order_by(&order, &items, &NoSubqueries, 128).is_ok());
    }

    #[test]
    fn structural_expression_match() {
        let expr_tok = tokenize("a + b").unwrap();
        let items = items_from(&[expr_tok]);
        let order = tokenize("a + b").unwrap();
        assert!(validate_order_by(&order, &items, &NoSubqueries, 128).is_ok());
    }

    #[test]
    fn aggregate_not_in_select_is_rejected() {
        let a = tokenize("a").unwrap();
        let items = items_from(&[a]);
        let order = tokenize("sum(b)").unwrap();
        let err = validate_order_by(&order, &items, &NoSubqueries, 128).unwrap_err();
        assert_eq!(err.error, ErrorKind::AggregateOrderByNotInSelect);
    }
}
