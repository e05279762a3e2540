//! A static SQL validator: checks a SQL statement's grammar and semantics
//! without ever touching a database. SELECT gets full clause/expression
//! validation (C2-C6); every other statement kind gets shallow
//! grammar-level validation (C7). Every validator shares the tokenizer
//! (C1), the uniform diagnostic surface (C8), and the dispatch table (C4).

pub mod config;
pub mod diagnostic;
pub mod dispatch;
pub mod expr;
pub mod ident;
pub mod select;
pub mod sql;
pub mod statements;
pub mod suggest;

use diagnostic::{Diagnostic, ErrorKind};

/// Validate a single SQL statement. Returns `None` if it is well-formed,
/// `Some(diagnostic)` describing the first problem found otherwise.
pub fn validate(text: &str) -> Option<Diagnostic> {
    validate_with(text, config::config())
}

/// Like [`validate`], but against an explicit [`config::Config`] rather
/// than the process-wide one loaded from the environment.
pub fn validate_with(text: &str, config: &config::Config) -> Option<Diagnostic> {
    if text.trim().is_empty() {
        return Some(Diagnostic::new(ErrorKind::EmptyStatement));
    }
    let tokens = match sql::tokenize(text) {
        Ok(t) => t,
        Err(e) => return Some(e),
    };
    if tokens.is_empty() {
        return Some(Diagnostic::new(ErrorKind::EmptyStatement));
    }
    dispatch::validate_statement(&tokens, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_select_passes() {
        assert!(validate("SELECT id, name FROM users WHERE active = 1").is_none());
    }

    #[test]
    fn empty_input_is_rejected() {
        let err = validate("   ").unwrap();
        assert_eq!(err.error, ErrorKind::EmptyStatement);
    }

    #[test]
    fn valid_insert_passes() {
        assert!(validate("INSERT INTO orders (id, total) VALUES (1, 9.99)").is_none());
    }

    #[test]
    fn valid_delete_passes() {
        assert!(validate("DELETE FROM orders WHERE id = 1").is_none());
    }

    #[test]
    fn unterminated_string_is_a_lexical_error() {
        let err = validate("SELECT 'oops FROM users").unwrap();
        assert_eq!(err.error, ErrorKind::UnterminatedString);
    }
}
