//! `DELETE` validation (§4.9).
//!
//! Grounded on `Delete_module/delete.py`: `DELETE FROM <table> [WHERE
//! <predicate>]`. `WHERE` is optional (an unconditional delete is valid
//! SQL), but if present its predicate must be non-empty and well-formed —
//! reuses the same boolean-expression validator WHERE uses in a SELECT,
//! with subqueries resolved through the full SELECT validator.

use crate::config::Config;
use crate::diagnostic::{Diagnostic, ErrorKind};
use crate::expr::{self, ExprContext};
use crate::ident;
use crate::select::SelectValidator;
use crate::sql::{Keyword, Token};

pub fn validate_delete(tokens: &[Token], config: &Config) -> Option<Diagnostic> {
    validate(tokens, config).err()
}

fn validate(tokens: &[Token], config: &Config) -> Result<(), Diagnostic> {
    let [delete, from, name, rest @ ..] = tokens else {
        return Err(Diagnostic::new(ErrorKind::InvalidDeleteGrammar));
    };
    if !delete.is_keyword(Keyword::Delete) || !from.is_keyword(Keyword::From) || !ident::is_identifier(name)
    {
        return Err(Diagnostic::new(ErrorKind::InvalidDeleteGrammar));
    }

    if rest.is_empty() {
        return Ok(());
    }

    let [where_kw, predicate @ ..] = rest else {
        return Err(Diagnostic::new(ErrorKind::InvalidDeleteGrammar));
    };
    if !where_kw.is_keyword(Keyword::Where) {
        return Err(Diagnostic::new(ErrorKind::InvalidDeleteGrammar));
    }
    if predicate.is_empty() {
        return Err(Diagnostic::new(ErrorKind::EmptyWhereClause));
    }

    let validator = SelectValidator::new(config.max_nesting_depth);
    if let Some(err) = expr::validate_expr(
        predicate,
        ExprContext::Predicate,
        &validator,
        config.max_nesting_depth,
    ) {
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::tokenize;

    fn check(sql: &str) -> Option<Diagnostic> {
        validate_delete(&tokenize(sql).unwrap(), &Config::default())
    }

    #[test]
    fn unconditional_delete() {
        assert!(check("delete from orders").is_none());
    }

    #[test]
    fn delete_with_where() {
        assert!(check("delete from orders where id = 1").is_none());
    }

    #[test]
    fn delete_with_empty_where_is_rejected() {
        let err = check("delete from orders where").unwrap();
        assert_eq!(err.error, ErrorKind::EmptyWhereClause);
    }

    #[test]
    fn delete_with_subquery_in_where() {
        assert!(check("delete from orders where customer_id in (select id from customers)").is_none());
    }

    #[test]
    fn malformed_grammar_is_rejected() {
        let err = check("delete orders").unwrap();
        assert_eq!(err.error, ErrorKind::InvalidDeleteGrammar);
    }
}
