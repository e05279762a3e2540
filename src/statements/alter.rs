//! `ALTER TABLE` validation (§4.9).
//!
//! Grounded on `Alter_module/alter.py`'s `AlterCommand`: a header
//! `ALTER TABLE <name>` followed by one or more comma-separated
//! sub-commands, each `ADD|DROP|MODIFY [COLUMN] <name> [<type>]`, or the
//! dialect-hint form `ALTER COLUMN <name> TYPE <type>`. An optional
//! `COLUMN` keyword after the sub-command verb is always allowed and never
//! required.

use crate::diagnostic::{Diagnostic, ErrorKind};
use crate::ident;
use crate::statements::coltype::validate_column_type;
use crate::suggest::suggest_keyword;
use crate::sql::{Keyword, Token, TokenKind};

pub fn validate_alter(tokens: &[Token]) -> Option<Diagnostic> {
    if let Err(e) = validate(tokens) {
        return Some(e);
    }
    None
}

fn validate(tokens: &[Token]) -> Result<(), Diagnostic> {
    let [alter, table, name, rest @ ..] = tokens else {
        return Err(Diagnostic::new(ErrorKind::InvalidAlterGrammar));
    };
    if !alter.is_keyword(Keyword::Alter) {
        return Err(Diagnostic::new(ErrorKind::InvalidAlterGrammar));
    }
    if !table.is_keyword(Keyword::Table) {
        let text = table.ident().unwrap_or_default();
        return Err(Diagnostic::new(ErrorKind::InvalidAlterGrammar)
            .with_suggestion_opt(suggest_keyword(text).map(|k| k.to_string())));
    }
    if !ident::is_identifier(name) {
        return Err(Diagnostic::new(ErrorKind::InvalidAlterGrammar));
    }
    if rest.is_empty() {
        return Err(Diagnostic::new(ErrorKind::InvalidAlterGrammar));
    }

    for sub in ident::split_top_level(rest, |t| matches!(t.kind, TokenKind::Comma)) {
        validate_subcommand(sub)?;
    }
    Ok(())
}

fn validate_subcommand(tokens: &[Token]) -> Result<(), Diagnostic> {
    let Some(verb) = tokens.first() else {
        return Err(Diagnostic::new(ErrorKind::InvalidAlterGrammar));
    };

    let TokenKind::Keyword(kw) = &verb.kind else {
        return Err(unknown_subcommand(verb));
    };

    match kw {
        Keyword::Add => validate_add_or_modify(&tokens[1..], true),
        Keyword::Modify => validate_add_or_modify(&tokens[1..], true),
        Keyword::Drop => validate_drop_column(&tokens[1..]),
        Keyword::Alter if tokens.get(1).is_some_and(|t| t.is_keyword(Keyword::Column)) => {
            validate_alter_column(&tokens[2..])
        }
        _ => Err(unknown_subcommand(verb)),
    }
}

/// `[COLUMN] <name> <type>`
fn validate_add_or_modify(tokens: &[Token], require_type: bool) -> Result<(), Diagnostic> {
    let tokens = strip_column_keyword(tokens);
    let Some((name, type_tokens)) = tokens.split_first() else {
        return Err(Diagnostic::new(ErrorKind::InvalidAlterGrammar));
    };
    if !ident::is_identifier(name) {
        return Err(Diagnostic::new(ErrorKind::InvalidAlterGrammar));
    }
    if require_type {
        if type_tokens.is_empty() {
            return Err(Diagnostic::new(ErrorKind::InvalidAlterGrammar));
        }
        validate_column_type(type_tokens)?;
    }
    Ok(())
}

/// `[COLUMN] <name>`
fn validate_drop_column(tokens: &[Token]) -> Result<(), Diagnostic> {
    let tokens = strip_column_keyword(tokens);
    match tokens {
        [name] if ident::is_identifier(name) => Ok(()),
        _ => Err(Diagnostic::new(ErrorKind::InvalidAlterGrammar)),
    }
}

/// `<name> TYPE <type>` — the dialect-hint `ALTER COLUMN` form.
fn validate_alter_column(tokens: &[Token]) -> Result<(), Diagnostic> {
    let [name, type_kw, type_tokens @ ..] = tokens else {
        return Err(Diagnostic::new(ErrorKind::InvalidAlterGrammar));
    };
    if !ident::is_identifier(name) || type_kw.ident() != Some("type") || type_tokens.is_empty() {
        return Err(Diagnostic::new(ErrorKind::InvalidAlterGrammar));
    }
    validate_column_type(type_tokens)
}

fn strip_column_keyword(tokens: &[Token]) -> &[Token] {
    if tokens.first().is_some_and(|t| t.is_keyword(Keyword::Column)) {
        &tokens[1..]
    } else {
        tokens
    }
}

fn unknown_subcommand(verb: &Token) -> Diagnostic {
    let text = verb.ident().unwrap_or_default();
    Diagnostic::new(ErrorKind::UnknownAlterSubcommand)
        .with_suggestion_opt(suggest_keyword(text).map(|k| k.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::tokenize;

    fn check(sql: &str) -> Option<Diagnostic> {
        validate_alter(&tokenize(sql).unwrap())
    }

    #[test]
    fn add_column() {
        assert!(check("alter table users add column age int").is_none());
    }

    #[test]
    fn add_without_column_keyword() {
        assert!(check("alter table users add age int").is_none());
    }

    #[test]
    fn drop_column() {
        assert!(check("alter table users drop column age").is_none());
    }

    #[test]
    fn modify_column() {
        assert!(check("alter table users modify age varchar(100)").is_none());
    }

    #[test]
    fn alter_column_type_form() {
        assert!(check("alter table users alter column age type int").is_none());
    }

    #[test]
    fn alter_column_unknown_type_is_rejected() {
        let err = check("alter table users alter column age type bigint").unwrap();
        assert_eq!(err.error, ErrorKind::UnknownAlterType);
    }

    #[test]
    fn multiple_subcommands() {
        assert!(check("alter table users add age int, drop column legacy_flag").is_none());
    }

    #[test]
    fn unknown_subcommand_suggests_fix() {
        let err = check("alter table users ad age int").unwrap();
        assert_eq!(err.error, ErrorKind::UnknownAlterSubcommand);
    }

    #[test]
    fn misspelled_table_keyword_suggests_fix() {
        let err = check("alter tablr users add age int").unwrap();
        assert_eq!(err.error, ErrorKind::InvalidAlterGrammar);
        assert_eq!(err.suggestion.as_deref(), Some("table"));
    }

    #[test]
    fn missing_table_name_is_rejected() {
        let err = check("alter table add age int").unwrap();
        assert_eq!(err.error, ErrorKind::InvalidAlterGrammar);
    }
}
