//! `INSERT` validation (§4.9).
//!
//! Grounded on `insert_module/{insert_parser,insert_validator}.py`:
//! `INSERT INTO <table> [(col [, col ...])] VALUES (val [, val ...]) [, (val
//! [, val ...]) ...]`. When an explicit column list is given, every VALUES
//! row's arity must match it; without one, only non-empty rows are
//! enforced — the table's real column count isn't knowable statically.

use crate::diagnostic::{Diagnostic, ErrorKind};
use crate::ident;
use crate::sql::{Keyword, Token, TokenKind};

pub fn validate_insert(tokens: &[Token]) -> Option<Diagnostic> {
    validate(tokens).err()
}

fn validate(tokens: &[Token]) -> Result<(), Diagnostic> {
    let [insert, into, name, rest @ ..] = tokens else {
        return Err(Diagnostic::new(ErrorKind::InvalidInsertGrammar));
    };
    if !insert.is_keyword(Keyword::Insert) || !into.is_keyword(Keyword::Into) || !ident::is_identifier(name)
    {
        return Err(Diagnostic::new(ErrorKind::InvalidInsertGrammar));
    }

    let (columns, rest) = if rest.first().is_some_and(|t| matches!(t.kind, TokenKind::ParenOpen)) {
        let Some(end) = ident::consume_parenthesized(rest, 0) else {
            return Err(Diagnostic::new(ErrorKind::InvalidInsertGrammar));
        };
        let inner = &rest[1..end - 1];
        let cols = parse_column_list(inner)?;
        (Some(cols), &rest[end..])
    } else {
        (None, rest)
    };

    let [values_kw, rows @ ..] = rest else {
        return Err(Diagnostic::new(ErrorKind::InvalidInsertGrammar));
    };
    if !values_kw.is_keyword(Keyword::Values) || rows.is_empty() {
        return Err(Diagnostic::new(ErrorKind::InvalidInsertGrammar));
    }

    for row in ident::split_top_level(rows, |t| matches!(t.kind, TokenKind::Comma)) {
        validate_row(row, columns.as_deref())?;
    }
    Ok(())
}

fn parse_column_list(tokens: &[Token]) -> Result<Vec<String>, Diagnostic> {
    if tokens.is_empty() {
        return Err(Diagnostic::new(ErrorKind::InvalidInsertGrammar));
    }
    let mut cols = Vec::new();
    for part in ident::split_top_level(tokens, |t| matches!(t.kind, TokenKind::Comma)) {
        match part {
            [name] if ident::is_identifier(name) => cols.push(name.ident().unwrap().to_string()),
            _ => return Err(Diagnostic::new(ErrorKind::InvalidInsertGrammar)),
        }
    }
    Ok(cols)
}

fn validate_row(row: &[Token], columns: Option<&[String]>) -> Result<(), Diagnostic> {
    if row.is_empty() || !matches!(row[0].kind, TokenKind::ParenOpen) {
        return Err(Diagnostic::new(ErrorKind::InvalidInsertGrammar));
    }
    let Some(end) = ident::consume_parenthesized(row, 0) else {
        return Err(Diagnostic::new(ErrorKind::InvalidInsertGrammar));
    };
    if end != row.len() {
        return Err(Diagnostic::new(ErrorKind::InvalidInsertGrammar));
    }
    let inner = &row[1..end - 1];
    if inner.is_empty() {
        return Err(Diagnostic::new(ErrorKind::EmptyValueRow));
    }

    let values = ident::split_top_level(inner, |t| matches!(t.kind, TokenKind::Comma));
    for v in &values {
        if v.len() != 1 || !is_value_token(&v[0]) {
            return Err(Diagnostic::new(ErrorKind::InvalidInsertGrammar));
        }
    }

    if let Some(cols) = columns {
        if values.len() != cols.len() {
            return Err(Diagnostic::new(ErrorKind::InsertArityMismatch));
        }
    }
    Ok(())
}

fn is_value_token(t: &Token) -> bool {
    t.kind.is_number() || t.kind.is_string() || matches!(t.kind, TokenKind::Keyword(Keyword::Null))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::tokenize;

    fn check(sql: &str) -> Option<Diagnostic> {
        validate_insert(&tokenize(sql).unwrap())
    }

    #[test]
    fn insert_with_column_list() {
        assert!(check("insert into orders (id, total) values (1, 2)").is_none());
    }

    #[test]
    fn insert_without_column_list() {
        assert!(check("insert into orders values (1, 2, 3)").is_none());
    }

    #[test]
    fn arity_mismatch_rejected() {
        let err = check("insert into orders (id, total) values (1)").unwrap();
        assert_eq!(err.error, ErrorKind::InsertArityMismatch);
    }

    #[test]
    fn multi_row_insert() {
        assert!(check("insert into orders (id) values (1), (2), (3)").is_none());
    }

    #[test]
    fn empty_row_rejected() {
        let err = check("insert into orders (id) values ()").unwrap();
        assert_eq!(err.error, ErrorKind::EmptyValueRow);
    }

    #[test]
    fn null_literal_is_a_valid_value() {
        assert!(check("insert into orders (id, note) values (1, null)").is_none());
    }
}
