//! HAVING validation (§4.6).
//!
//! Grounded on `havingChecksHelper.py`: syntactically HAVING is a boolean
//! expression exactly like WHERE, except aggregate calls are legal (they're
//! the entire point of HAVING existing separately from WHERE) — validated by
//! reusing [`crate::expr::ExprContext::Having`] mode. On top of that, the
//! original enforces a semantic membership rule on every top-level
//! comparison's operands: `isValidHavingLHS`/`isValidHavingRHS` require each
//! side to be an aggregate expression, a grouped column, or a SELECT alias
//! (the RHS additionally allows a bare numeric literal) — `validateHavingExpr`
//! walks the same top-level `AND`/`OR` split as the generic boolean-expression
//! validator to apply it to every leaf comparison.

use crate::diagnostic::{Diagnostic, ErrorKind};
use crate::expr::{self, ExprContext, SubqueryValidator};
use crate::ident;
use crate::sql::{Keyword, Token};

pub fn validate_having(
    tokens: &[Token],
    group_by: Option<&[String]>,
    aliases: &[String],
    subq: &dyn SubqueryValidator,
    max_depth: usize,
) -> Result<(), Diagnostic> {
    if tokens.is_empty() {
        return Err(Diagnostic::new(ErrorKind::EmptyHaving));
    }
    if let Some(d) = expr::validate_expr(tokens, ExprContext::Having, subq, max_depth) {
        return Err(remap(d));
    }
    check_members(tokens, group_by.unwrap_or(&[]), aliases)
}

/// HAVING has its own vocabulary of a couple of error variants distinct
/// from WHERE's, even though the underlying grammar is identical — mirrors
/// the original reporting `invalid HAVING expression`/`invalid value in
/// HAVING expression` instead of the generic comparison errors.
fn remap(d: Diagnostic) -> Diagnostic {
    use crate::diagnostic::ErrorKind::*;
    match d.error {
        IncompleteComparison | UnexpectedOperator(_) => {
            Diagnostic::new(InvalidHavingExpression)
        }
        UnexpectedOperand(_) => Diagnostic::new(InvalidHavingValue),
        _ => d,
    }
}

/// Walk the same top-level `OR`/`AND` split the generic boolean-expression
/// validator uses, and at each leaf comparison enforce the LHS/RHS
/// membership rule. Leaves that aren't a plain comparison (`BETWEEN`, `IN`,
/// `IS NULL`) are left to the generic structural validation above — the
/// original's membership rule only ever inspects `splitComparison` leaves.
fn check_members(tokens: &[Token], group_by: &[String], aliases: &[String]) -> Result<(), Diagnostic> {
    let tokens = ident::strip_outer_parens(tokens);

    let or_parts = ident::split_top_level(tokens, |t| t.is_keyword(Keyword::Or));
    if or_parts.len() > 1 {
        for part in or_parts {
            check_members(part, group_by, aliases)?;
        }
        return Ok(());
    }
    let and_parts = ident::split_top_level(tokens, |t| t.is_keyword(Keyword::And));
    if and_parts.len() > 1 {
        for part in and_parts {
            check_members(part, group_by, aliases)?;
        }
        return Ok(());
    }

    let Some(op_idx) = ident::find_top_level(tokens, |t| t.kind.as_op().is_some()) else {
        return Ok(());
    };
    let lhs = ident::strip_outer_parens(&tokens[..op_idx]);
    let rhs = ident::strip_outer_parens(&tokens[op_idx + 1..]);

    if !is_valid_having_lhs(lhs, group_by, aliases) {
        return Err(Diagnostic::new(ErrorKind::InvalidHavingExpression));
    }
    if !is_valid_having_rhs(rhs, group_by, aliases) {
        return Err(Diagnostic::new(ErrorKind::InvalidHavingValue));
    }
    Ok(())
}

/// LHS: an aggregate expression, or a single column that's a SELECT alias
/// or a member of the normalized GROUP BY set.
fn is_valid_having_lhs(expr: &[Token], group_by: &[String], aliases: &[String]) -> bool {
    if ident::contains_aggregate(expr) {
        return true;
    }
    if expr.len() == 1 && ident::is_identifier(&expr[0]) {
        let name = expr[0].ident().unwrap_or_default();
        return aliases.iter().any(|a| a == name) || group_by.iter().any(|g| g == &ident::normalize(expr));
    }
    false
}

/// RHS: the same as LHS, plus a bare numeric literal.
fn is_valid_having_rhs(expr: &[Token], group_by: &[String], aliases: &[String]) -> bool {
    if ident::contains_aggregate(expr) {
        return true;
    }
    if expr.len() == 1 && ident::is_identifier(&expr[0]) {
        let name = expr[0].ident().unwrap_or_default();
        return aliases.iter().any(|a| a == name) || group_by.iter().any(|g| g == &ident::normalize(expr));
    }
    if expr.len() == 1 && expr[0].kind.is_number() {
        return true;
    }
    false
}
