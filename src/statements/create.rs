//! `CREATE` validation (§4.9).
//!
//! Grounded on `create/CreateDDL.py`: four independent forms share only the
//! `CREATE` keyword — TABLE, VIEW, INDEX, and DATABASE are dispatched on the
//! second token and validated by separate functions below, mirroring the
//! original's four `validateCreate*Query` entry points.

use crate::diagnostic::{Diagnostic, ErrorKind};
use crate::ident;
use crate::sql::{Keyword, Token, TokenKind};
use crate::statements::coltype::validate_column_type;
use crate::suggest::suggest_keyword;

const TABLE_CONSTRAINTS: &[Keyword] = &[Keyword::Primary, Keyword::Unique, Keyword::Check, Keyword::References];

pub fn validate_create(tokens: &[Token]) -> Option<Diagnostic> {
    validate(tokens).err()
}

fn validate(tokens: &[Token]) -> Result<(), Diagnostic> {
    let [create, kind, rest @ ..] = tokens else {
        return Err(Diagnostic::new(ErrorKind::InvalidCreateGrammar));
    };
    if !create.is_keyword(Keyword::Create) {
        return Err(Diagnostic::new(ErrorKind::InvalidCreateGrammar));
    }

    match &kind.kind {
        TokenKind::Keyword(Keyword::Table) => validate_table(rest),
        TokenKind::Keyword(Keyword::View) => validate_view(rest),
        TokenKind::Keyword(Keyword::Index) => validate_index(rest),
        TokenKind::Keyword(Keyword::Database) => validate_database(rest),
        TokenKind::Keyword(Keyword::Unique)
            if rest.first().is_some_and(|t| t.is_keyword(Keyword::Index)) =>
        {
            validate_index(&rest[1..])
        }
        _ => Err(Diagnostic::new(ErrorKind::InvalidCreateGrammar)),
    }
}

fn strip_if_not_exists(tokens: &[Token]) -> &[Token] {
    match tokens {
        [a, b, c, rest @ ..]
            if a.is_keyword(Keyword::If) && b.is_keyword(Keyword::Not) && c.is_keyword(Keyword::Exists) =>
        {
            rest
        }
        _ => tokens,
    }
}

/// `<name> ( <col-or-constraint> [, ...] )`
fn validate_table(tokens: &[Token]) -> Result<(), Diagnostic> {
    let tokens = strip_if_not_exists(tokens);
    let [name, body @ ..] = tokens else {
        return Err(Diagnostic::new(ErrorKind::InvalidCreateGrammar));
    };
    if !ident::is_identifier(name) {
        return Err(Diagnostic::new(ErrorKind::InvalidCreateGrammar));
    }
    let [open, inner @ .., close] = body else {
        return Err(Diagnostic::new(ErrorKind::InvalidCreateGrammar));
    };
    if !matches!(open.kind, TokenKind::ParenOpen) || !matches!(close.kind, TokenKind::ParenClose) {
        return Err(Diagnostic::new(ErrorKind::InvalidCreateGrammar));
    }
    if inner.is_empty() {
        return Err(Diagnostic::new(ErrorKind::InvalidCreateGrammar));
    }

    let defs = ident::split_top_level(inner, |t| matches!(t.kind, TokenKind::Comma));
    let mut has_column = false;
    for def in defs {
        if def.is_empty() {
            return Err(Diagnostic::new(ErrorKind::InvalidCreateGrammar));
        }
        if is_table_constraint(def) {
            continue;
        }
        validate_column_definition(def)?;
        has_column = true;
    }
    if !has_column {
        return Err(Diagnostic::new(ErrorKind::InvalidCreateGrammar));
    }
    Ok(())
}

fn is_table_constraint(def: &[Token]) -> bool {
    matches!(&def[0].kind, TokenKind::Keyword(k) if TABLE_CONSTRAINTS.contains(k))
}

/// `<name> <type> [column-constraint ...]`
fn validate_column_definition(tokens: &[Token]) -> Result<(), Diagnostic> {
    let [name, rest @ ..] = tokens else {
        return Err(Diagnostic::new(ErrorKind::InvalidCreateGrammar));
    };
    if !ident::is_identifier(name) || rest.is_empty() {
        return Err(Diagnostic::new(ErrorKind::InvalidCreateGrammar));
    }

    let type_end = type_token_span(rest);
    validate_column_type(&rest[..type_end])?;
    let mut i = type_end;

    while i < rest.len() {
        match &rest[i].kind {
            TokenKind::Keyword(Keyword::Primary) if rest.get(i + 1).is_some_and(|t| t.is_keyword(Keyword::Key)) => {
                i += 2;
            }
            TokenKind::Keyword(Keyword::Unique) => i += 1,
            TokenKind::Keyword(Keyword::Not) if rest.get(i + 1).is_some_and(|t| t.is_keyword(Keyword::Null)) => {
                i += 2;
            }
            TokenKind::Keyword(Keyword::Default) => {
                if i + 1 >= rest.len() {
                    return Err(Diagnostic::new(ErrorKind::InvalidCreateGrammar));
                }
                i += 2;
            }
            TokenKind::Keyword(Keyword::Check) => {
                return consume_parenthesized_tail(&rest[i + 1..]);
            }
            TokenKind::Keyword(Keyword::References) => {
                let after = &rest[i + 1..];
                let Some(ref_table) = after.first() else {
                    return Err(Diagnostic::new(ErrorKind::InvalidCreateGrammar));
                };
                if !ident::is_identifier(ref_table) {
                    return Err(Diagnostic::new(ErrorKind::InvalidCreateGrammar));
                }
                return consume_parenthesized_tail(&after[1..]);
            }
            _ => return Err(unknown_constraint(&rest[i])),
        }
    }
    Ok(())
}

fn consume_parenthesized_tail(tokens: &[Token]) -> Result<(), Diagnostic> {
    match tokens {
        [open, .., close]
            if matches!(open.kind, TokenKind::ParenOpen) && matches!(close.kind, TokenKind::ParenClose) =>
        {
            Ok(())
        }
        _ => Err(Diagnostic::new(ErrorKind::InvalidCreateGrammar)),
    }
}

/// The type name plus its own optional `(n)` / `(p, s)` argument list, not
/// consuming anything that belongs to a following column constraint.
fn type_token_span(tokens: &[Token]) -> usize {
    if tokens.len() > 1 && matches!(tokens[1].kind, TokenKind::ParenOpen) {
        if let Some(end) = ident::consume_parenthesized(tokens, 1) {
            return end;
        }
    }
    1
}

fn unknown_constraint(tok: &Token) -> Diagnostic {
    let text = tok.ident().unwrap_or_default();
    Diagnostic::new(ErrorKind::InvalidCreateGrammar)
        .with_suggestion_opt(suggest_keyword(text).map(|k| k.to_string()))
}

/// `[OR REPLACE] <name> [( col [, col ...] )] AS SELECT ...` — the embedded
/// SELECT's own grammar is validated by the SELECT validator, not here; this
/// only checks that an AS SELECT actually follows.
fn validate_view(tokens: &[Token]) -> Result<(), Diagnostic> {
    let tokens = match tokens {
        [a, b, rest @ ..] if a.is_keyword(Keyword::Or) && b.is_keyword(Keyword::Replace) => rest,
        _ => tokens,
    };
    let tokens = strip_if_not_exists(tokens);
    let [name, rest @ ..] = tokens else {
        return Err(Diagnostic::new(ErrorKind::InvalidCreateGrammar));
    };
    if !ident::is_identifier(name) {
        return Err(Diagnostic::new(ErrorKind::InvalidCreateGrammar));
    }

    let rest = if rest.first().is_some_and(|t| matches!(t.kind, TokenKind::ParenOpen)) {
        let Some(end) = ident::consume_parenthesized(rest, 0) else {
            return Err(Diagnostic::new(ErrorKind::InvalidCreateGrammar));
        };
        let inner = &rest[1..end - 1];
        if inner.is_empty() {
            return Err(Diagnostic::new(ErrorKind::InvalidCreateGrammar));
        }
        for col in ident::split_top_level(inner, |t| matches!(t.kind, TokenKind::Comma)) {
            match col {
                [c] if ident::is_identifier(c) => {}
                _ => return Err(Diagnostic::new(ErrorKind::InvalidCreateGrammar)),
            }
        }
        &rest[end..]
    } else {
        rest
    };

    match rest {
        [as_kw, select_kw, ..] if as_kw.is_keyword(Keyword::As) && select_kw.is_keyword(Keyword::Select) => Ok(()),
        _ => Err(Diagnostic::new(ErrorKind::InvalidCreateGrammar)),
    }
}

/// `[UNIQUE] <name> ON <table> ( col [ASC|DESC] [, ...] )`
fn validate_index(tokens: &[Token]) -> Result<(), Diagnostic> {
    let [name, on, table, open, inner @ .., close] = tokens else {
        return Err(Diagnostic::new(ErrorKind::InvalidCreateGrammar));
    };
    if !ident::is_identifier(name)
        || !on.is_keyword(Keyword::On)
        || !ident::is_identifier(table)
        || !matches!(open.kind, TokenKind::ParenOpen)
        || !matches!(close.kind, TokenKind::ParenClose)
    {
        return Err(Diagnostic::new(ErrorKind::InvalidCreateGrammar));
    }
    if inner.is_empty() {
        return Err(Diagnostic::new(ErrorKind::InvalidCreateGrammar));
    }
    for col in ident::split_top_level(inner, |t| matches!(t.kind, TokenKind::Comma)) {
        match col {
            [c] if ident::is_identifier(c) => {}
            [c, dir] if ident::is_identifier(c) && matches!(dir.ident(), Some("asc") | Some("desc")) => {}
            _ => return Err(Diagnostic::new(ErrorKind::InvalidCreateGrammar)),
        }
    }
    Ok(())
}

/// `[IF NOT EXISTS] <name>`, nothing following.
fn validate_database(tokens: &[Token]) -> Result<(), Diagnostic> {
    let tokens = strip_if_not_exists(tokens);
    match tokens {
        [name] if ident::is_identifier(name) => Ok(()),
        _ => Err(Diagnostic::new(ErrorKind::InvalidCreateGrammar)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::tokenize;

    fn check(sql: &str) -> Option<Diagnostic> {
        validate_create(&tokenize(sql).unwrap())
    }

    #[test]
    fn create_table_basic() {
        assert!(check("create table users (id int primary key, name varchar(50))").is_none());
    }

    #[test]
    fn create_table_with_check_and_references() {
        assert!(
            check(
                "create table orders (id int, customer_id int references customers (id), total int check (total > 0))"
            )
            .is_none()
        );
    }

    #[test]
    fn create_table_requires_at_least_one_column() {
        let err = check("create table t (primary key (x))").unwrap();
        assert_eq!(err.error, ErrorKind::InvalidCreateGrammar);
    }

    #[test]
    fn create_table_if_not_exists() {
        assert!(check("create table if not exists t (id int)").is_none());
    }

    #[test]
    fn create_view_basic() {
        assert!(check("create view active_users as select id from users where active = 1").is_none());
    }

    #[test]
    fn create_index_basic() {
        assert!(check("create index idx_users_name on users (name)").is_none());
    }

    #[test]
    fn create_unique_index_with_direction() {
        assert!(check("create unique index idx_users_email on users (email desc)").is_none());
    }

    #[test]
    fn create_database_basic() {
        assert!(check("create database analytics").is_none());
    }

    #[test]
    fn create_database_rejects_trailing_tokens() {
        let err = check("create database analytics extra").unwrap();
        assert_eq!(err.error, ErrorKind::InvalidCreateGrammar);
    }
}
