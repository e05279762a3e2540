//! GROUP BY validation (§4.5).
//!
//! Grounded on `groupByChecksHelper.py`: GROUP BY expressions may not
//! contain aggregate calls, and the *set* (not list — order and duplicates
//! don't matter) of non-aggregate SELECT expressions must equal the set of
//! GROUP BY expressions whenever the SELECT list mixes aggregate and
//! non-aggregate items.

use std::collections::BTreeSet;

use crate::diagnostic::{Diagnostic, ErrorKind};
use crate::expr::{self, ExprContext, SubqueryValidator};
use crate::ident;
use crate::select::select_list::SelectItem;
use crate::sql::{Token, TokenKind};

pub fn validate_group_by(
    tokens: &[Token],
    subq: &dyn SubqueryValidator,
    max_depth: usize,
) -> Result<Vec<String>, Diagnostic> {
    if tokens.is_empty() {
        return Err(Diagnostic::new(ErrorKind::EmptyGroupBy));
    }

    let mut normalized = Vec::new();
    for part in ident::split_top_level(tokens, |t| matches!(t.kind, TokenKind::Comma)) {
        if part.is_empty() {
            return Err(Diagnostic::new(ErrorKind::EmptyGroupBy));
        }
        if ident::contains_aggregate(part) {
            return Err(Diagnostic::new(ErrorKind::AggregateInGroupBy));
        }
        if let Some(err) = expr::validate_expr(part, ExprContext::Value, subq, max_depth) {
            return Err(err);
        }
        normalized.push(ident::normalize(part));
    }
    Ok(normalized)
}

/// Cross-check the SELECT list against a (possibly absent) GROUP BY list.
/// `group_by` is `None` when no GROUP BY clause is present.
///
/// - If the SELECT list is entirely non-aggregate (or entirely aggregate),
///   GROUP BY is not required.
/// - If it mixes aggregate and non-aggregate expressions, GROUP BY is
///   required and its expression *set* must equal the non-aggregate SELECT
///   expression set.
pub fn cross_check(items: &[SelectItem<'_>], group_by: Option<&[String]>) -> Result<(), Diagnostic> {
    let non_aggregate: Vec<String> = items
        .iter()
        .filter(|it| !it.is_star && !ident::contains_aggregate(it.expr))
        .map(|it| ident::normalize(it.expr))
        .collect();
    let has_aggregate = items.iter().any(|it| ident::contains_aggregate(it.expr));
    let has_non_aggregate = !non_aggregate.is_empty();

    match group_by {
        None => {
            if has_aggregate && has_non_aggregate {
                return Err(Diagnostic::new(ErrorKind::GroupByRequired));
            }
            Ok(())
        }
        Some(group_by) => {
            let select_set: BTreeSet<String> = non_aggregate.iter().cloned().collect();
            let group_set: BTreeSet<String> = group_by.iter().cloned().collect();
            if select_set != group_set {
                return Err(Diagnostic::new(ErrorKind::GroupByMismatch {
                    select: select_set.into_iter().collect(),
                    group_by: group_set.into_iter().collect(),
                }));
            }
            Ok(())
        }
    }
}
