//! Transaction-control validation (§4.9).
//!
//! Grounded on `tcl/{commit_checker,rollback_checker,savepoint_checker}.py`:
//! `COMMIT`, `ROLLBACK [TO <savepoint>]`, `SAVEPOINT <name>` are each a
//! single keyword optionally followed by a name. The original dispatches on
//! whichever checker's prefix matches; here the dispatch is already done by
//! the caller (the leading keyword), so each function only validates the
//! remainder.

use crate::diagnostic::{Diagnostic, ErrorKind};
use crate::ident;
use crate::sql::{Keyword, Token};

pub fn validate_commit(tokens: &[Token]) -> Option<Diagnostic> {
    match tokens {
        [commit] if commit.is_keyword(Keyword::Commit) => None,
        _ => Some(Diagnostic::new(ErrorKind::InvalidTclGrammar)),
    }
}

pub fn validate_rollback(tokens: &[Token]) -> Option<Diagnostic> {
    match tokens {
        [rollback] if rollback.is_keyword(Keyword::Rollback) => None,
        [rollback, to, name] if rollback.is_keyword(Keyword::Rollback) && to.is_keyword(Keyword::To) && ident::is_identifier(name) => None,
        _ => Some(Diagnostic::new(ErrorKind::InvalidTclGrammar)),
    }
}

pub fn validate_savepoint(tokens: &[Token]) -> Option<Diagnostic> {
    match tokens {
        [savepoint, name] if savepoint.is_keyword(Keyword::Savepoint) && ident::is_identifier(name) => None,
        _ => Some(Diagnostic::new(ErrorKind::InvalidTclGrammar)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::tokenize;

    #[test]
    fn commit_bare() {
        assert!(validate_commit(&tokenize("commit").unwrap()).is_none());
    }

    #[test]
    fn commit_with_extra_tokens_rejected() {
        let err = validate_commit(&tokenize("commit now").unwrap()).unwrap();
        assert_eq!(err.error, ErrorKind::InvalidTclGrammar);
    }

    #[test]
    fn rollback_bare() {
        assert!(validate_rollback(&tokenize("rollback").unwrap()).is_none());
    }

    #[test]
    fn rollback_to_savepoint() {
        assert!(validate_rollback(&tokenize("rollback to sp1").unwrap()).is_none());
    }

    #[test]
    fn rollback_to_without_name_rejected() {
        let err = validate_rollback(&tokenize("rollback to").unwrap()).unwrap();
        assert_eq!(err.error, ErrorKind::InvalidTclGrammar);
    }

    #[test]
    fn savepoint_with_name() {
        assert!(validate_savepoint(&tokenize("savepoint sp1").unwrap()).is_none());
    }

    #[test]
    fn savepoint_without_name_rejected() {
        let err = validate_savepoint(&tokenize("savepoint").unwrap()).unwrap();
        assert_eq!(err.error, ErrorKind::InvalidTclGrammar);
    }
}
