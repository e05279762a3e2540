//! FROM / JOIN validation (§4.3).
//!
//! Grounded on `fromChecksHelper.py`'s `validateTableRef` (plain table
//! references, with or without alias) supplemented with derived-table
//! support (`(subquery) alias`) that the original never implements: a
//! parenthesized group whose first inner token is `select` is a derived
//! table and, per §4.3, it always requires an alias.
//!
//! JOIN validation enforces that an `ON` condition may only reference
//! aliases introduced by a prior table reference or by the table it
//! immediately qualifies — forward references to tables joined later are
//! rejected, matching the original's left-to-right alias accumulation.

use crate::diagnostic::{Diagnostic, ErrorKind};
use crate::expr::{self, ExprContext, SubqueryValidator};
use crate::ident;
use crate::sql::{Keyword, Token, TokenKind};

/// One resolved FROM entry: a base table or a derived (subquery) table,
/// always paired with the alias it is addressable by (its own name when no
/// alias was given).
pub struct FromItem {
    pub alias: String,
    pub is_derived: bool,
}

pub struct FromResult {
    pub items: Vec<FromItem>,
}

const JOIN_PREFIXES: &[Keyword] = &[Keyword::Inner, Keyword::Left, Keyword::Right, Keyword::Full];

pub fn validate_from(
    tokens: &[Token],
    subq: &dyn SubqueryValidator,
    max_depth: usize,
) -> Result<FromResult, Diagnostic> {
    if tokens.is_empty() {
        return Err(Diagnostic::new(ErrorKind::EmptyTableRef));
    }

    let has_join = ident::find_top_level(tokens, |t| t.is_keyword(Keyword::Join)).is_some();
    let has_comma = ident::find_top_level(tokens, |t| matches!(t.kind, TokenKind::Comma)).is_some();
    if has_join && has_comma {
        return Err(Diagnostic::new(ErrorKind::MixedJoinStyles));
    }

    if has_join {
        validate_join_chain(tokens, subq, max_depth)
    } else {
        let mut items = Vec::new();
        for part in ident::split_top_level(tokens, |t| matches!(t.kind, TokenKind::Comma)) {
            items.push(validate_table_ref(part, subq, max_depth)?);
        }
        reject_duplicate_aliases(&items)?;
        Ok(FromResult { items })
    }
}

/// `t1 [JOIN-kind] JOIN t2 ON cond [[JOIN-kind] JOIN t3 ON cond ...]`
fn validate_join_chain(
    tokens: &[Token],
    subq: &dyn SubqueryValidator,
    max_depth: usize,
) -> Result<FromResult, Diagnostic> {
    // `boundary_start` is where the segment header begins (the join-kind
    // keyword if present, else JOIN itself); `join_idx` is JOIN's own index,
    // so the table reference starts right after it.
    let mut boundaries = Vec::new();
    let mut depth = 0i32;
    for (i, tok) in tokens.iter().enumerate() {
        match tok.kind {
            TokenKind::ParenOpen => depth += 1,
            TokenKind::ParenClose => depth -= 1,
            _ if depth == 0 && tok.is_keyword(Keyword::Join) => {
                let boundary_start = if i > 0
                    && matches!(&tokens[i - 1].kind, TokenKind::Keyword(k) if JOIN_PREFIXES.contains(k))
                {
                    i - 1
                } else {
                    i
                };
                boundaries.push((boundary_start, i));
            }
            _ => {}
        }
    }

    let first_table_tokens = &tokens[..boundaries.first().map(|(s, _)| *s).unwrap_or(tokens.len())];
    let first = validate_table_ref(first_table_tokens, subq, max_depth)?;
    let mut items = vec![first];

    for (n, &(_, join_idx)) in boundaries.iter().enumerate() {
        let segment_end = boundaries.get(n + 1).map(|(s, _)| *s).unwrap_or(tokens.len());
        let segment = &tokens[join_idx + 1..segment_end];

        let Some(on_idx) = ident::find_top_level(segment, |t| t.is_keyword(Keyword::On)) else {
            return Err(Diagnostic::new(ErrorKind::MissingOnClause));
        };
        let table_part = &segment[..on_idx];
        let on_part = &segment[on_idx + 1..];
        if on_part.is_empty() {
            return Err(Diagnostic::new(ErrorKind::EmptyOnClause));
        }

        let joined = validate_table_ref(table_part, subq, max_depth)?;

        let allowed: Vec<&str> = items
            .iter()
            .map(|i| i.alias.as_str())
            .chain(std::iter::once(joined.alias.as_str()))
            .collect();
        validate_on_references(on_part, &allowed)?;

        if let Some(err) = expr::validate_expr(on_part, ExprContext::Predicate, subq, max_depth) {
            return Err(err);
        }

        items.push(joined);
    }

    reject_duplicate_aliases(&items)?;
    Ok(FromResult { items })
}

/// Every qualified-column reference (`alias.col`) inside `on_tokens` must
/// qualify an alias in `allowed` — the tables introduced so far plus the
/// table this ON clause belongs to. Forward references to tables joined
/// later are never in `allowed` and are rejected.
fn validate_on_references(on_tokens: &[Token], allowed: &[&str]) -> Result<(), Diagnostic> {
    let mut i = 0;
    while i < on_tokens.len() {
        if ident::is_qualified_column_at(on_tokens, i) {
            let alias = on_tokens[i].ident().unwrap();
            if !allowed.contains(&alias) {
                return Err(Diagnostic::new(ErrorKind::UnknownAliasInOn {
                    alias: alias.to_string(),
                })
                .with_suggestion_opt(expr::suggest_identifier(alias, allowed.iter().copied())));
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    Ok(())
}

fn validate_table_ref(
    tokens: &[Token],
    subq: &dyn SubqueryValidator,
    max_depth: usize,
) -> Result<FromItem, Diagnostic> {
    if tokens.is_empty() {
        return Err(Diagnostic::new(ErrorKind::EmptyTableRef));
    }

    if matches!(tokens[0].kind, TokenKind::ParenOpen) {
        let Some(end) = ident::consume_parenthesized(tokens, 0) else {
            return Err(Diagnostic::new(ErrorKind::UnmatchedParenthesis));
        };
        let inner = &tokens[1..end - 1];
        if !ident::is_subquery(inner) {
            return Err(Diagnostic::new(ErrorKind::InvalidSubqueryInFrom));
        }
        let alias_tokens = &tokens[end..];
        let alias_tokens = strip_as(alias_tokens);
        if alias_tokens.len() != 1 || !ident::is_identifier(&alias_tokens[0]) {
            return Err(Diagnostic::new(ErrorKind::DerivedTableMissingAlias));
        }
        if let Some(err) = subq.validate_subquery(inner, false, 1) {
            return Err(err);
        }
        return Ok(FromItem {
            alias: alias_tokens[0].ident().unwrap().to_string(),
            is_derived: true,
        });
    }

    // Plain table reference: `[schema.]table [[AS] alias]`.
    let mut rest = tokens;
    let table_name = if ident::is_qualified_column_at(rest, 0) {
        let name = rest[2].ident().map(str::to_string);
        rest = &rest[3..];
        name
    } else if ident::is_identifier(&rest[0]) {
        let name = rest[0].ident().map(str::to_string);
        rest = &rest[1..];
        name
    } else {
        None
    };
    let Some(table_name) = table_name else {
        return Err(Diagnostic::new(ErrorKind::InvalidTable));
    };

    let alias_tokens = strip_as(rest);
    let alias = if alias_tokens.is_empty() {
        table_name.clone()
    } else if alias_tokens.len() == 1 && ident::is_identifier(&alias_tokens[0]) {
        alias_tokens[0].ident().unwrap().to_string()
    } else {
        return Err(Diagnostic::new(ErrorKind::InvalidTable));
    };

    if alias_tokens.len() == 1 && alias == table_name {
        return Err(Diagnostic::new(ErrorKind::AliasEqualsTable));
    }

    Ok(FromItem {
        alias,
        is_derived: false,
    })
}

fn strip_as(tokens: &[Token]) -> &[Token] {
    if tokens.first().is_some_and(|t| t.is_keyword(Keyword::As)) {
        &tokens[1..]
    } else {
        tokens
    }
}

fn reject_duplicate_aliases(items: &[FromItem]) -> Result<(), Diagnostic> {
    let mut seen = Vec::new();
    for item in items {
        if seen.contains(&item.alias) {
            return Err(Diagnostic::new(ErrorKind::DuplicateAlias(item.alias.clone())));
        }
        seen.push(item.alias.clone());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::tokenize;

    struct NoSubqueries;
    impl SubqueryValidator for NoSubqueries {
        fn validate_subquery(&self, _inner: &[Token], _scalar: bool, _depth: usize) -> Option<Diagnostic> {
            None
        }

        fn max_depth(&self) -> usize {
            128
        }
    }

    #[test]
    fn single_table() {
        let toks = tokenize("orders").unwrap();
        let r = validate_from(&toks, &NoSubqueries, 128).unwrap();
        assert_eq!(r.items.len(), 1);
        assert_eq!(r.items[0].alias, "orders");
    }

    #[test]
    fn table_with_alias() {
        let toks = tokenize("orders o").unwrap();
        let r = validate_from(&toks, &NoSubqueries, 128).unwrap();
        assert_eq!(r.items[0].alias, "o");
    }

    #[test]
    fn alias_equals_table_is_rejected() {
        let toks = tokenize("orders orders").unwrap();
        let err = validate_from(&toks, &NoSubqueries, 128).unwrap_err();
        assert_eq!(err.error, ErrorKind::AliasEqualsTable);
    }

    #[test]
    fn comma_join_list() {
        let toks = tokenize("orders o, customers c").unwrap();
        let r = validate_from(&toks, &NoSubqueries, 128).unwrap();
        assert_eq!(r.items.len(), 2);
    }

    #[test]
    fn mixed_join_styles_rejected() {
        let toks = tokenize("orders o, customers c join products p on p.id = o.id").unwrap();
        let err = validate_from(&toks, &NoSubqueries, 128).unwrap_err();
        assert_eq!(err.error, ErrorKind::MixedJoinStyles);
    }

    #[test]
    fn join_chain_with_on() {
        let toks =
            tokenize("orders o join customers c on o.customer_id = c.id").unwrap();
        let r = validate_from(&toks, &NoSubqueries, 128).unwrap();
        assert_eq!(r.items.len(), 2);
    }

    #[test]
    fn join_forward_reference_rejected() {
        let toks = tokenize(
            "orders o join customers c on o.id = p.id join products p on p.id = o.id",
        )
        .unwrap();
        let err = validate_from(&toks, &NoSubqueries, 128).unwrap_err();
        assert!(matches!(err.error, ErrorKind::UnknownAliasInOn { .. }));
    }

    #[test]
    fn missing_on_clause_rejected() {
        let toks = tokenize("orders o join customers c").unwrap();
        let err = validate_from(&toks, &NoSubqueries, 128).unwrap_err();
        assert_eq!(err.error, ErrorKind::MissingOnClause);
    }

    #[test]
    fn derived_table_requires_alias() {
        let toks = tokenize("(select id from orders)").unwrap();
        let err = validate_from(&toks, &NoSubqueries, 128).unwrap_err();
        assert_eq!(err.error, ErrorKind::DerivedTableMissingAlias);
    }

    #[test]
    fn derived_table_with_alias_is_valid() {
        let toks = tokenize("(select id from orders) sub").unwrap();
        let r = validate_from(&toks, &NoSubqueries, 128).unwrap();
        assert_eq!(r.items[0].alias, "sub");
        assert!(r.items[0].is_derived);
    }
}
