//! `UPDATE` validation (§4.9).
//!
//! Grounded on `update_module/update.py`: `UPDATE <table> SET col = expr [,
//! col = expr ...] [WHERE <predicate>]`. Only a single target table is
//! supported — a comma-separated table list after `UPDATE` is rejected
//! rather than silently validated as a join target.

use crate::config::Config;
use crate::diagnostic::{Diagnostic, ErrorKind};
use crate::expr::{self, ExprContext};
use crate::ident;
use crate::select::SelectValidator;
use crate::sql::{Keyword, Op, Token, TokenKind};

pub fn validate_update(tokens: &[Token], config: &Config) -> Option<Diagnostic> {
    validate(tokens, config).err()
}

fn validate(tokens: &[Token], config: &Config) -> Result<(), Diagnostic> {
    let [update, name, set_kw, rest @ ..] = tokens else {
        return Err(Diagnostic::new(ErrorKind::InvalidUpdateGrammar));
    };
    if !update.is_keyword(Keyword::Update) {
        return Err(Diagnostic::new(ErrorKind::InvalidUpdateGrammar));
    }
    if matches!(name.kind, TokenKind::Comma) {
        return Err(Diagnostic::new(ErrorKind::UpdateMultipleTables));
    }
    if !ident::is_identifier(name) || !set_kw.is_keyword(Keyword::Set) {
        return Err(Diagnostic::new(ErrorKind::InvalidUpdateGrammar));
    }

    let validator = SelectValidator::new(config.max_nesting_depth);

    let where_idx = ident::find_top_level(rest, |t| t.is_keyword(Keyword::Where));
    let (assignments, predicate) = match where_idx {
        Some(i) => (&rest[..i], Some(&rest[i + 1..])),
        None => (rest, None),
    };

    if assignments.is_empty() {
        return Err(Diagnostic::new(ErrorKind::InvalidUpdateGrammar));
    }
    for assignment in ident::split_top_level(assignments, |t| matches!(t.kind, TokenKind::Comma)) {
        validate_assignment(assignment, &validator, config.max_nesting_depth)?;
    }

    if let Some(predicate) = predicate {
        if predicate.is_empty() {
            return Err(Diagnostic::new(ErrorKind::EmptyWhereClause));
        }
        if let Some(err) = expr::validate_expr(
            predicate,
            ExprContext::Predicate,
            &validator,
            config.max_nesting_depth,
        ) {
            return Err(err);
        }
    }
    Ok(())
}

/// `<column> = <expr>`
fn validate_assignment(
    tokens: &[Token],
    validator: &SelectValidator,
    max_depth: usize,
) -> Result<(), Diagnostic> {
    let [col, eq, value @ ..] = tokens else {
        return Err(Diagnostic::new(ErrorKind::InvalidUpdateGrammar));
    };
    let is_eq = matches!(&eq.kind, TokenKind::Op(op) if *op == Op::Eq);
    if !ident::is_identifier(col) || !is_eq || value.is_empty() {
        return Err(Diagnostic::new(ErrorKind::InvalidUpdateGrammar));
    }
    match expr::validate_expr(value, ExprContext::Value, validator, max_depth) {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::tokenize;

    fn check(sql: &str) -> Option<Diagnostic> {
        validate_update(&tokenize(sql).unwrap(), &Config::default())
    }

    #[test]
    fn single_assignment() {
        assert!(check("update orders set status = 1").is_none());
    }

    #[test]
    fn multiple_assignments_with_where() {
        assert!(check("update orders set status = 1, total = total + 5 where id = 9").is_none());
    }

    #[test]
    fn multiple_tables_rejected() {
        let err = check("update orders, customers set status = 1").unwrap();
        assert_eq!(err.error, ErrorKind::UpdateMultipleTables);
    }

    #[test]
    fn missing_set_is_rejected() {
        let err = check("update orders status = 1").unwrap();
        assert_eq!(err.error, ErrorKind::InvalidUpdateGrammar);
    }

    #[test]
    fn empty_where_is_rejected() {
        let err = check("update orders set status = 1 where").unwrap();
        assert_eq!(err.error, ErrorKind::EmptyWhereClause);
    }

    #[test]
    fn subquery_in_assignment_value() {
        assert!(check("update orders set total = (select max(amount) from payments)").is_none());
    }
}
