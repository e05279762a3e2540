//! Statement dispatch (C4).
//!
//! Splits off the mandatory single trailing semicolon, then routes on the
//! statement's leading keyword to the matching validator. Mirrors the
//! original `QueryParser.analyse` dispatch table, but as an explicit
//! `match` over [`Keyword::is_statement_starter`] rather than a registry of
//! callables — there is no plugin surface here, so a closed `match` is the
//! more direct idiom.

use crate::config::Config;
use crate::diagnostic::{Diagnostic, ErrorKind};
use crate::select;
use crate::sql::{Keyword, Token, TokenKind};
use crate::statements::{alter, create, delete, drop, insert, tcl, truncate, update};

/// Validate one fully tokenized statement (leading/trailing whitespace
/// already trimmed by the caller, no semicolon stripped yet).
pub fn validate_statement(tokens: &[Token], config: &Config) -> Option<Diagnostic> {
    let tokens = match strip_semicolon(tokens) {
        Ok(t) => t,
        Err(e) => return Some(e),
    };

    let Some(first) = tokens.first() else {
        return Some(Diagnostic::new(ErrorKind::EmptyStatement));
    };
    let TokenKind::Keyword(kw) = &first.kind else {
        return Some(Diagnostic::new(ErrorKind::UnknownStatementKind));
    };
    if !kw.is_statement_starter() {
        return Some(Diagnostic::new(ErrorKind::UnknownStatementKind));
    }

    match kw {
        Keyword::Select => select::validate_select(tokens, config),
        Keyword::Insert => insert::validate_insert(tokens),
        Keyword::Update => update::validate_update(tokens, config),
        Keyword::Delete => delete::validate_delete(tokens, config),
        Keyword::Alter => alter::validate_alter(tokens),
        Keyword::Create => create::validate_create(tokens),
        Keyword::Drop => drop::validate_drop(tokens),
        Keyword::Truncate => truncate::validate_truncate(tokens),
        Keyword::Commit => tcl::validate_commit(tokens),
        Keyword::Rollback => tcl::validate_rollback(tokens),
        Keyword::Savepoint => tcl::validate_savepoint(tokens),
        _ => Some(Diagnostic::new(ErrorKind::UnknownStatementKind)),
    }
}

/// At most one trailing `;` is allowed; any semicolon elsewhere, or more
/// than one, is an error. Returns the statement tokens with the trailing
/// semicolon (if present) removed.
fn strip_semicolon(tokens: &[Token]) -> Result<&[Token], Diagnostic> {
    let semicolons = tokens.iter().filter(|t| matches!(t.kind, TokenKind::Semicolon)).count();
    match semicolons {
        0 => Ok(tokens),
        1 if matches!(tokens.last().map(|t| &t.kind), Some(TokenKind::Semicolon)) => {
            Ok(&tokens[..tokens.len() - 1])
        }
        _ => Err(Diagnostic::new(ErrorKind::InvalidSemicolonUsage)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::tokenize;

    fn check(sql: &str) -> Option<Diagnostic> {
        let toks = tokenize(sql).unwrap();
        validate_statement(&toks, &Config::default())
    }

    #[test]
    fn trailing_semicolon_is_stripped() {
        assert!(check("select a from t;").is_none());
    }

    #[test]
    fn no_semicolon_is_fine() {
        assert!(check("select a from t").is_none());
    }

    #[test]
    fn semicolon_in_the_middle_is_rejected() {
        let err = check("select a from t; select b from u").unwrap();
        assert_eq!(err.error, ErrorKind::InvalidSemicolonUsage);
    }

    #[test]
    fn double_trailing_semicolon_is_rejected() {
        let err = check("select a from t;;").unwrap();
        assert_eq!(err.error, ErrorKind::InvalidSemicolonUsage);
    }

    #[test]
    fn unrecognized_leading_keyword_is_rejected() {
        let err = check("grant all on t to u").unwrap();
        assert_eq!(err.error, ErrorKind::UnknownStatementKind);
    }

    #[test]
    fn routes_to_delete_validator() {
        assert!(check("delete from orders where id = 1").is_none());
    }

    #[test]
    fn routes_to_commit() {
        assert!(check("commit").is_none());
    }
}
