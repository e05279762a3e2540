//! `DROP` validation (§4.9).
//!
//! Grounded on `drop/DropDDL.py`: `DROP TABLE|VIEW|INDEX|DATABASE [IF
//! EXISTS] <name> [, <name> ...] [CASCADE|RESTRICT]`. `DATABASE` is a
//! special case that permits exactly one name and no CASCADE/RESTRICT
//! option, matching the original's separate branch for it.

use crate::diagnostic::{Diagnostic, ErrorKind};
use crate::ident;
use crate::sql::{Keyword, Token, TokenKind};

pub fn validate_drop(tokens: &[Token]) -> Option<Diagnostic> {
    validate(tokens).err()
}

fn validate(tokens: &[Token]) -> Result<(), Diagnostic> {
    let [drop, object_type, rest @ ..] = tokens else {
        return Err(Diagnostic::new(ErrorKind::InvalidDropGrammar));
    };
    if !drop.is_keyword(Keyword::Drop) {
        return Err(Diagnostic::new(ErrorKind::InvalidDropGrammar));
    }
    let TokenKind::Keyword(kind) = &object_type.kind else {
        return Err(Diagnostic::new(ErrorKind::InvalidDropGrammar));
    };
    if !matches!(kind, Keyword::Table | Keyword::View | Keyword::Index | Keyword::Database) {
        return Err(Diagnostic::new(ErrorKind::InvalidDropGrammar));
    }

    let rest = match rest {
        [a, b, tail @ ..] if a.is_keyword(Keyword::If) && b.is_keyword(Keyword::Exists) => tail,
        _ => rest,
    };
    if rest.is_empty() {
        return Err(Diagnostic::new(ErrorKind::InvalidDropGrammar));
    }

    if *kind == Keyword::Database {
        return match rest {
            [name] if ident::is_identifier(name) => Ok(()),
            [_, _, ..] => Err(Diagnostic::new(ErrorKind::MultipleDatabaseDrop)),
            _ => Err(Diagnostic::new(ErrorKind::InvalidDropGrammar)),
        };
    }

    let (names, option) = match rest.last() {
        Some(t) if t.is_keyword(Keyword::Cascade) || t.is_keyword(Keyword::Restrict) => {
            (&rest[..rest.len() - 1], Some(&rest[rest.len() - 1]))
        }
        _ => (rest, None),
    };
    if names.is_empty() {
        return Err(Diagnostic::new(ErrorKind::InvalidDropGrammar));
    }
    let _ = option;

    for part in ident::split_top_level(names, |t| matches!(t.kind, TokenKind::Comma)) {
        match part {
            [name] if ident::is_identifier(name) => {}
            _ => return Err(Diagnostic::new(ErrorKind::InvalidDropGrammar)),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::tokenize;

    fn check(sql: &str) -> Option<Diagnostic> {
        validate_drop(&tokenize(sql).unwrap())
    }

    #[test]
    fn drop_table_basic() {
        assert!(check("drop table orders").is_none());
    }

    #[test]
    fn drop_if_exists() {
        assert!(check("drop table if exists orders").is_none());
    }

    #[test]
    fn drop_multiple_tables() {
        assert!(check("drop table orders, customers").is_none());
    }

    #[test]
    fn drop_with_cascade() {
        assert!(check("drop view active_orders cascade").is_none());
    }

    #[test]
    fn drop_multiple_databases_rejected() {
        let err = check("drop database a, b").unwrap();
        assert_eq!(err.error, ErrorKind::MultipleDatabaseDrop);
    }

    #[test]
    fn drop_database_basic() {
        assert!(check("drop database analytics").is_none());
    }

    #[test]
    fn drop_unsupported_object_rejected() {
        let err = check("drop sequence seq1").unwrap();
        assert_eq!(err.error, ErrorKind::InvalidDropGrammar);
    }
}
