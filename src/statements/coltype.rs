//! Shared column-type grammar for ALTER/CREATE (§4.9).
//!
//! Grounded on `Alter_module/alter.py`'s type whitelist regex:
//! `INT | INTEGER | VARCHAR(n) | CHAR(n) | TEXT | DATE | DATETIME |
//! DECIMAL(p,s)? | FLOAT | BOOLEAN`, case-insensitive. `VARCHAR`/`CHAR`
//! require a single numeric argument; `DECIMAL` takes an optional
//! `(precision, scale)` pair.

use crate::diagnostic::{Diagnostic, ErrorKind};
use crate::suggest::suggest_word;
use crate::sql::{Token, TokenKind};

const SIMPLE_TYPES: &[&str] = &["int", "integer", "text", "date", "datetime", "float", "boolean"];
const SIZED_TYPES: &[&str] = &["varchar", "char"];
const DECIMAL: &str = "decimal";

pub fn validate_column_type(tokens: &[Token]) -> Result<(), Diagnostic> {
    let Some(head) = tokens.first() else {
        return Err(Diagnostic::new(ErrorKind::UnknownAlterType));
    };
    let Some(name) = head.ident() else {
        return Err(Diagnostic::new(ErrorKind::UnknownAlterType));
    };

    if SIMPLE_TYPES.contains(&name) {
        return if tokens.len() == 1 {
            Ok(())
        } else {
            Err(Diagnostic::new(ErrorKind::UnknownAlterType))
        };
    }

    if SIZED_TYPES.contains(&name) {
        return match tokens.get(1..) {
            Some([p1, p2, p3]) if is_paren_open(p1) && is_number(p2) && is_paren_close(p3) => Ok(()),
            _ => Err(Diagnostic::new(ErrorKind::UnknownAlterType)),
        };
    }

    if name == DECIMAL {
        if tokens.len() == 1 {
            return Ok(());
        }
        return match tokens.get(1..) {
            Some([p1, n1, comma, n2, p2])
                if is_paren_open(p1)
                    && is_number(n1)
                    && matches!(comma.kind, TokenKind::Comma)
                    && is_number(n2)
                    && is_paren_close(p2) =>
            {
                Ok(())
            }
            _ => Err(Diagnostic::new(ErrorKind::UnknownAlterType)),
        };
    }

    let all_type_names = SIMPLE_TYPES.iter().chain(SIZED_TYPES).chain([&DECIMAL]).copied();
    Err(Diagnostic::new(ErrorKind::UnknownAlterType)
        .with_suggestion_opt(suggest_word(name, all_type_names)))
}

fn is_paren_open(t: &Token) -> bool {
    matches!(t.kind, TokenKind::ParenOpen)
}
fn is_paren_close(t: &Token) -> bool {
    matches!(t.kind, TokenKind::ParenClose)
}
fn is_number(t: &Token) -> bool {
    t.kind.is_number()
}
