//! Boolean and scalar expression validation (C5): WHERE, ON, HAVING
//! predicates, and the value-expressions inside the SELECT list / GROUP BY
//! / ORDER BY.
//!
//! Grounded on the original `whereChecksHelper.py`: a boolean expression is
//! recursively split on top-level `AND`/`OR`, each leaf is either a
//! comparison, a `BETWEEN ... AND ...`, an `IN (...)`, or (depending on
//! `ExprContext`) a bare value expression. Recursion depth is bounded by
//! [`crate::config::Config::max_nesting_depth`] to guard against stack
//! overflow on adversarial input, returning [`ErrorKind::NestingTooDeep`].

use crate::diagnostic::{Diagnostic, ErrorKind};
use crate::ident::{self, consume_aggregate, is_aggregate_start, is_subquery};
use crate::sql::{Keyword, Token, TokenKind};
use crate::suggest::suggest_word;

/// Which clause an expression is being validated for. Controls whether
/// aggregate calls and bare boolean predicates are legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExprContext {
    /// WHERE / ON: boolean predicate, aggregates forbidden.
    Predicate,
    /// HAVING: boolean predicate, aggregates allowed.
    Having,
    /// SELECT list / GROUP BY / ORDER BY: a value expression, not a
    /// standalone predicate.
    Value,
}

/// Callback into the SELECT validator (C6), used to validate subqueries
/// that appear inside an expression (`IN (SELECT ...)`, scalar subqueries).
/// Breaks the C5 <-> C6 dependency cycle: C6 calls into C5 directly, C5
/// calls back into C6 only through this trait object.
pub trait SubqueryValidator {
    /// Validate a parenthesized subquery's inner tokens (`select ...`,
    /// parens already stripped). `scalar` requires exactly one output
    /// column (used for `= (SELECT ...)` and `IN (SELECT ...)`, both of
    /// which compare against a single column); when false, arbitrary
    /// column counts are allowed (used for a derived table in FROM).
    fn validate_subquery(&self, inner: &[Token], scalar: bool, depth: usize) -> Option<Diagnostic>;

    /// The configured nesting-depth ceiling, shared with every expression
    /// validated through this callback.
    fn max_depth(&self) -> usize;
}

/// Validate `tokens` as an expression in the given `ctx`, recursing at most
/// `max_depth` levels. Returns the first diagnostic found, or `None`.
pub fn validate_expr(
    tokens: &[Token],
    ctx: ExprContext,
    subq: &dyn SubqueryValidator,
    max_depth: usize,
) -> Option<Diagnostic> {
    validate_bool_expr(tokens, ctx, subq, max_depth, 0)
}

fn validate_bool_expr(
    tokens: &[Token],
    ctx: ExprContext,
    subq: &dyn SubqueryValidator,
    max_depth: usize,
    depth: usize,
) -> Option<Diagnostic> {
    if depth > max_depth {
        return Some(Diagnostic::new(ErrorKind::NestingTooDeep));
    }

    let tokens = ident::strip_outer_parens(tokens);
    if tokens.is_empty() {
        return Some(Diagnostic::new(ErrorKind::EmptyExpression));
    }
    if !ident::is_balanced(tokens) {
        return Some(Diagnostic::new(ErrorKind::UnmatchedParenthesis));
    }

    // Split on top-level OR first (lowest precedence), then AND, mirroring
    // the original's recursive-descent structure.
    let or_parts = ident::split_top_level(tokens, |t| t.is_keyword(Keyword::Or));
    if or_parts.len() > 1 {
        return validate_conjunction_list(&or_parts, ctx, subq, max_depth, depth);
    }

    let and_parts = ident::split_top_level(tokens, |t| t.is_keyword(Keyword::And));
    if and_parts.len() > 1 {
        return validate_conjunction_list(&and_parts, ctx, subq, max_depth, depth);
    }

    validate_predicate(tokens, ctx, subq, max_depth, depth)
}

fn validate_conjunction_list(
    parts: &[&[Token]],
    ctx: ExprContext,
    subq: &dyn SubqueryValidator,
    max_depth: usize,
    depth: usize,
) -> Option<Diagnostic> {
    for part in parts {
        if part.is_empty() {
            return Some(Diagnostic::new(ErrorKind::LogicalOperatorWithoutOperand));
        }
        if let Some(err) = validate_bool_expr(part, ctx, subq, max_depth, depth + 1) {
            return Some(err);
        }
    }
    None
}

/// Validate a single leaf predicate: a comparison, `BETWEEN`, `IN`, or (in
/// `Value` context) a bare value expression.
fn validate_predicate(
    tokens: &[Token],
    ctx: ExprContext,
    subq: &dyn SubqueryValidator,
    max_depth: usize,
    depth: usize,
) -> Option<Diagnostic> {
    if let Some(idx) = ident::find_top_level(tokens, |t| t.is_keyword(Keyword::Between)) {
        return validate_between(tokens, idx, ctx, subq, max_depth, depth);
    }

    if let Some(idx) = ident::find_top_level(tokens, |t| t.is_keyword(Keyword::In)) {
        return validate_in(tokens, idx, ctx, subq, max_depth, depth);
    }

    if let Some(idx) = ident::find_top_level(tokens, |t| t.kind.as_op().is_some()) {
        return validate_comparison(tokens, idx, ctx, subq, max_depth, depth);
    }

    // `IS [NOT] NULL`
    if let Some(idx) = ident::find_top_level(tokens, |t| t.is_keyword(Keyword::Is)) {
        return validate_is_null(tokens, idx, ctx, subq, max_depth, depth);
    }

    match ctx {
        ExprContext::Predicate | ExprContext::Having => {
            Some(Diagnostic::new(ErrorKind::IncompleteComparison))
        }
        ExprContext::Value => validate_value_expr(tokens, ctx, subq, max_depth, depth),
    }
}

fn validate_comparison(
    tokens: &[Token],
    op_idx: usize,
    ctx: ExprContext,
    subq: &dyn SubqueryValidator,
    max_depth: usize,
    depth: usize,
) -> Option<Diagnostic> {
    let lhs = &tokens[..op_idx];
    let rhs = &tokens[op_idx + 1..];

    if ident::find_top_level(rhs, |t| t.kind.as_op().is_some()).is_some() {
        return Some(Diagnostic::new(ErrorKind::MultipleComparisonOperators));
    }
    if lhs.is_empty() || rhs.is_empty() {
        return Some(Diagnostic::new(ErrorKind::IncompleteComparison));
    }

    if let Some(inner) = extract_parenthesized_whole(rhs) {
        if is_subquery(inner) {
            return subq.validate_subquery(inner, true, depth + 1);
        }
    }

    if let Some(err) = validate_value_expr(lhs, ctx, subq, max_depth, depth + 1) {
        return Some(err);
    }
    validate_value_expr(rhs, ctx, subq, max_depth, depth + 1)
}

fn validate_is_null(
    tokens: &[Token],
    is_idx: usize,
    ctx: ExprContext,
    subq: &dyn SubqueryValidator,
    max_depth: usize,
    depth: usize,
) -> Option<Diagnostic> {
    let lhs = &tokens[..is_idx];
    let mut rest = &tokens[is_idx + 1..];
    if rest.first().is_some_and(|t| t.is_keyword(Keyword::Not)) {
        rest = &rest[1..];
    }
    if lhs.is_empty() || rest.len() != 1 || !rest[0].is_keyword(Keyword::Null) {
        return Some(Diagnostic::new(ErrorKind::IncompleteComparison));
    }
    validate_value_expr(lhs, ctx, subq, max_depth, depth + 1)
}

fn validate_between(
    tokens: &[Token],
    between_idx: usize,
    ctx: ExprContext,
    subq: &dyn SubqueryValidator,
    max_depth: usize,
    depth: usize,
) -> Option<Diagnostic> {
    let lhs = &tokens[..between_idx];
    let rest = &tokens[between_idx + 1..];

    let Some(and_idx) = ident::find_top_level(rest, |t| t.is_keyword(Keyword::And)) else {
        return Some(Diagnostic::new(ErrorKind::BetweenMissingAnd));
    };
    let low = &rest[..and_idx];
    let high = &rest[and_idx + 1..];

    if lhs.is_empty() || low.is_empty() || high.is_empty() {
        return Some(Diagnostic::new(ErrorKind::IncompleteBetweenBounds));
    }

    validate_value_expr(lhs, ctx, subq, max_depth, depth + 1)
        .or_else(|| validate_value_expr(low, ctx, subq, max_depth, depth + 1))
        .or_else(|| validate_value_expr(high, ctx, subq, max_depth, depth + 1))
}

fn validate_in(
    tokens: &[Token],
    in_idx: usize,
    ctx: ExprContext,
    subq: &dyn SubqueryValidator,
    max_depth: usize,
    depth: usize,
) -> Option<Diagnostic> {
    let lhs = &tokens[..in_idx];
    let rest = &tokens[in_idx + 1..];

    if lhs.is_empty() {
        return Some(Diagnostic::new(ErrorKind::IncompleteComparison));
    }
    if let Some(err) = validate_value_expr(lhs, ctx, subq, max_depth, depth + 1) {
        return Some(err);
    }

    let Some(inner) = extract_parenthesized_whole(rest) else {
        return Some(Diagnostic::new(ErrorKind::InRequiresParenList));
    };
    if inner.is_empty() {
        return Some(Diagnostic::new(ErrorKind::EmptyInList));
    }
    if is_subquery(inner) {
        // The RHS of IN is a single-column scalar subquery, not an arbitrary
        // row set: `a IN (SELECT x, y FROM u)` is rejected the same way a
        // two-column `=` subquery would be.
        return subq.validate_subquery(inner, true, depth + 1);
    }

    for item in ident::split_top_level(inner, |t| matches!(t.kind, TokenKind::Comma)) {
        if item.is_empty() {
            return Some(Diagnostic::new(ErrorKind::EmptyInList));
        }
        if let Some(err) = validate_value_expr(item, ctx, subq, max_depth, depth + 1) {
            return Some(err);
        }
    }
    None
}

/// If `tokens` is exactly one parenthesized group (`( ... )` spanning the
/// whole slice) — possibly under several redundant layers — return its
/// innermost tokens.
fn extract_parenthesized_whole(tokens: &[Token]) -> Option<&[Token]> {
    if tokens.is_empty() || !matches!(tokens[0].kind, TokenKind::ParenOpen) {
        return None;
    }
    let end = ident::consume_parenthesized(tokens, 0)?;
    if end != tokens.len() {
        return None;
    }
    Some(ident::strip_outer_parens(&tokens[1..tokens.len() - 1]))
}

/// Validate a bare value expression: column/qualified-column reference,
/// literal, arithmetic combination, aggregate call, or scalar subquery.
/// Depending on `ctx`, aggregates are forbidden (`Predicate`) or allowed
/// (`Having`, `Value`).
fn validate_value_expr(
    tokens: &[Token],
    ctx: ExprContext,
    subq: &dyn SubqueryValidator,
    max_depth: usize,
    depth: usize,
) -> Option<Diagnostic> {
    if depth > max_depth {
        return Some(Diagnostic::new(ErrorKind::NestingTooDeep));
    }
    let tokens = ident::strip_outer_parens(tokens);
    if tokens.is_empty() {
        return Some(Diagnostic::new(ErrorKind::EmptyExpression));
    }

    // Arithmetic: split on top-level + - * / %, recursing on each operand.
    let arith_parts = ident::split_top_level(tokens, |t| {
        matches!(
            t.kind,
            TokenKind::Plus | TokenKind::Minus | TokenKind::Star | TokenKind::Slash | TokenKind::Percent
        )
    });
    if arith_parts.len() > 1 {
        if arith_parts.iter().any(|p| p.is_empty()) {
            return Some(Diagnostic::new(ErrorKind::UnexpectedOperand(
                "(missing operand around arithmetic operator)".into(),
            )));
        }
        for part in &arith_parts {
            if let Some(subquery_inner) = whole_subquery(part) {
                if let Some(err) = subq.validate_subquery(subquery_inner, true, depth + 1) {
                    return Some(err);
                }
                return Some(Diagnostic::new(ErrorKind::ArithmeticOnSubquery));
            }
            if let Some(err) = validate_value_expr(part, ctx, subq, max_depth, depth + 1) {
                return Some(err);
            }
        }
        return None;
    }

    if tokens.len() == 1 {
        return validate_atom(&tokens[0], ctx);
    }

    if ident::is_qualified_column_at(tokens, 0) && tokens.len() == 3 {
        return None;
    }

    if is_aggregate_start(tokens, 0) && tokens.len() >= 3 {
        if !matches!(ctx, ExprContext::Having | ExprContext::Value) {
            return Some(Diagnostic::new(ErrorKind::AggregateInWhere));
        }
        let Some((end, inner)) = consume_aggregate(tokens, 0) else {
            return Some(Diagnostic::new(ErrorKind::UnmatchedParenthesis));
        };
        if end != tokens.len() {
            return Some(Diagnostic::new(ErrorKind::UnexpectedOperator(
                tokens[end].kind.display(),
            )));
        }
        if matches!(&tokens[0].kind, TokenKind::Keyword(Keyword::Count))
            && inner.len() == 1
            && matches!(inner[0].kind, TokenKind::Star)
        {
            return None;
        }
        if inner.is_empty() {
            return Some(Diagnostic::new(ErrorKind::EmptyAggregateArg));
        }
        if ident::contains_aggregate(inner) {
            return Some(Diagnostic::new(ErrorKind::NestedAggregate));
        }
        return validate_value_expr(inner, ExprContext::Value, subq, max_depth, depth + 1);
    }

    if let Some(inner) = whole_subquery(tokens) {
        return subq.validate_subquery(inner, true, depth + 1);
    }

    Some(Diagnostic::new(ErrorKind::UnexpectedOperand(
        ident::normalize(tokens),
    )))
}

/// If `tokens` is a single parenthesized subquery spanning the whole slice,
/// return its inner tokens.
fn whole_subquery(tokens: &[Token]) -> Option<&[Token]> {
    if tokens.first().map(|t| &t.kind) != Some(&TokenKind::ParenOpen) {
        return None;
    }
    let end = ident::consume_parenthesized(tokens, 0)?;
    if end != tokens.len() {
        return None;
    }
    let inner = &tokens[1..tokens.len() - 1];
    is_subquery(inner).then_some(inner)
}

fn validate_atom(tok: &Token, ctx: ExprContext) -> Option<Diagnostic> {
    match &tok.kind {
        TokenKind::Ident { .. } | TokenKind::Number(_) | TokenKind::Str(_) => None,
        TokenKind::Keyword(Keyword::Null) => None,
        TokenKind::Star if matches!(ctx, ExprContext::Value) => None,
        other => Some(Diagnostic::new(ErrorKind::UnexpectedOperand(
            other.display(),
        ))),
    }
}

/// Suggest a correction for an unknown identifier against a known set of
/// aliases/columns, used by the FROM/SELECT validators when a reference
/// can't be resolved. Thin wrapper kept here to avoid every caller importing
/// `suggest` directly.
pub fn suggest_identifier<'a>(word: &str, known: impl IntoIterator<Item = &'a str>) -> Option<String> {
    suggest_word(word, known)
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

    fn check(sql: &str, ctx: ExprContext) -> Option<Diagnostic> {
        let toks = tokenize(sql).unwrap();
        validate_expr(&toks, ctx, &NoSubqueries, 128)
    }

    #[test]
    fn simple_comparison_is_valid() {
        assert!(check("a = 1", ExprContext::Predicate).is_none());
    }

    #[test]
    fn and_or_chains() {
        assert!(check("a = 1 AND b = 2 OR c = 3", ExprContext::Predicate).is_none());
    }

    #[test]
    fn dangling_and_is_an_error() {
        assert!(check("a = 1 AND", ExprContext::Predicate).is_some());
    }

    #[test]
    fn between_requires_and() {
        assert!(check("a BETWEEN 1 AND 10", ExprContext::Predicate).is_none());
        assert!(check("a BETWEEN 1", ExprContext::Predicate).is_some());
    }

    #[test]
    fn in_requires_paren_list() {
        assert!(check("a IN (1, 2, 3)", ExprContext::Predicate).is_none());
        assert!(check("a IN 1", ExprContext::Predicate).is_some());
        assert!(check("a IN ()", ExprContext::Predicate).is_some());
    }

    #[test]
    fn aggregate_forbidden_in_where() {
        let err = check("count(a) = 1", ExprContext::Predicate).unwrap();
        assert_eq!(err.error, ErrorKind::AggregateInWhere);
    }

    #[test]
    fn aggregate_allowed_in_having() {
        assert!(check("count(a) = 1", ExprContext::Having).is_none());
    }

    #[test]
    fn nested_aggregate_is_rejected() {
        let err = check("sum(avg(a)) = 1", ExprContext::Having).unwrap();
        assert_eq!(err.error, ErrorKind::NestedAggregate);
    }

    #[test]
    fn count_star_is_valid() {
        assert!(check("count(*) = 1", ExprContext::Having).is_none());
    }

    #[test]
    fn is_null_forms() {
        assert!(check("a IS NULL", ExprContext::Predicate).is_none());
        assert!(check("a IS NOT NULL", ExprContext::Predicate).is_none());
    }

    #[test]
    fn arithmetic_value_expr() {
        assert!(check("a + b * 2", ExprContext::Value).is_none());
    }
}
