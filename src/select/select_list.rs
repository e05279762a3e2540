//! SELECT list validation (§4.2).
//!
//! Grounded on the original `selectChecksHelper.py`'s three-state machine
//! (`EXPECT_COLUMN` -> `EXPECT_ALIAS_OR_COMMA` -> `EXPECT_ALIAS_NAME`):
//! each comma-separated item is a value expression optionally followed by
//! an alias, either explicit (`AS name`) or bare (`expr name`). `*` is only
//! legal as the sole item in the list.

use crate::diagnostic::{Diagnostic, ErrorKind};
use crate::expr::{self, ExprContext, SubqueryValidator};
use crate::ident;
use crate::sql::{Keyword, Token, TokenKind};

/// One parsed SELECT-list item.
pub struct SelectItem<'a> {
    pub expr: &'a [Token],
    pub alias: Option<String>,
    pub is_star: bool,
}

pub struct SelectListResult<'a> {
    pub items: Vec<SelectItem<'a>>,
}

pub fn validate_select_list<'a>(
    tokens: &'a [Token],
    subq: &dyn SubqueryValidator,
    max_depth: usize,
) -> Result<SelectListResult<'a>, Diagnostic> {
    if tokens.is_empty() {
        return Err(Diagnostic::new(ErrorKind::EmptySelect));
    }

    let parts = ident::split_top_level(tokens, |t| matches!(t.kind, TokenKind::Comma));
    if parts.last().is_some_and(|p| p.is_empty()) {
        return Err(Diagnostic::new(ErrorKind::TrailingComma));
    }
    if parts.iter().any(|p| p.is_empty()) {
        return Err(Diagnostic::new(ErrorKind::MissingCommaBetweenItems));
    }

    if parts.len() > 1 {
        for part in &parts {
            if part.len() == 1 && matches!(part[0].kind, TokenKind::Star) {
                return Err(Diagnostic::new(ErrorKind::InvalidStarUsage));
            }
        }
    }

    let mut items = Vec::with_capacity(parts.len());
    for part in parts {
        items.push(validate_item(part, subq, max_depth)?);
    }
    Ok(SelectListResult { items })
}

fn validate_item<'a>(
    item: &'a [Token],
    subq: &dyn SubqueryValidator,
    max_depth: usize,
) -> Result<SelectItem<'a>, Diagnostic> {
    if item.len() == 1 && matches!(item[0].kind, TokenKind::Star) {
        return Ok(SelectItem {
            expr: item,
            alias: None,
            is_star: true,
        });
    }

    if let Some(as_idx) = ident::find_top_level(item, |t| t.is_keyword(Keyword::As)) {
        let expr_tokens = &item[..as_idx];
        let alias_tokens = &item[as_idx + 1..];
        if expr_tokens.is_empty() || alias_tokens.len() != 1 || !ident::is_identifier(&alias_tokens[0])
        {
            return Err(Diagnostic::new(ErrorKind::InvalidAlias));
        }
        validate_item_expr(expr_tokens, subq, max_depth)?;
        return Ok(SelectItem {
            expr: expr_tokens,
            alias: alias_tokens[0].ident().map(str::to_string),
            is_star: false,
        });
    }

    // Try the whole item as an expression first; only back off to treating
    // the trailing token as a bare alias if that fails and the shape fits.
    if validate_item_expr(item, subq, max_depth).is_ok() {
        return Ok(SelectItem {
            expr: item,
            alias: None,
            is_star: false,
        });
    }

    if item.len() >= 2
        && ident::is_identifier(&item[item.len() - 1])
        && !matches!(item[item.len() - 2].kind, TokenKind::Dot)
    {
        let expr_tokens = &item[..item.len() - 1];
        validate_item_expr(expr_tokens, subq, max_depth)?;
        return Ok(SelectItem {
            expr: expr_tokens,
            alias: item.last().and_then(|t| t.ident()).map(str::to_string),
            is_star: false,
        });
    }

    Err(validate_item_expr(item, subq, max_depth).unwrap_err())
}

fn validate_item_expr(
    tokens: &[Token],
    subq: &dyn SubqueryValidator,
    max_depth: usize,
) -> Result<(), Diagnostic> {
    match expr::validate_expr(tokens, ExprContext::Value, subq, max_depth) {
        None => Ok(()),
        Some(d) => Err(d),
    }
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
    fn star_alone_is_valid() {
        let toks = tokenize("*").unwrap();
        let r = validate_select_list(&toks, &NoSubqueries, 128).unwrap();
        assert_eq!(r.items.len(), 1);
        assert!(matches!(r.items[0].expr[0].kind, TokenKind::Star));
    }

    #[test]
    fn star_mixed_with_columns_is_rejected() {
        let toks = tokenize("a, *").unwrap();
        let err = validate_select_list(&toks, &NoSubqueries, 128).unwrap_err();
        assert_eq!(err.error, ErrorKind::InvalidStarUsage);
    }

    #[test]
    fn trailing_comma_is_rejected() {
        let toks = tokenize("a, b,").unwrap();
        let err = validate_select_list(&toks, &NoSubqueries, 128).unwrap_err();
        assert_eq!(err.error, ErrorKind::TrailingComma);
    }

    #[test]
    fn explicit_alias() {
        let toks = tokenize("a as b").unwrap();
        let r = validate_select_list(&toks, &NoSubqueries, 128).unwrap();
        assert_eq!(r.items[0].alias.as_deref(), Some("b"));
    }

    #[test]
    fn bare_alias() {
        let toks = tokenize("sum(a) total").unwrap();
        let r = validate_select_list(&toks, &NoSubqueries, 128).unwrap();
        assert_eq!(r.items[0].alias.as_deref(), Some("total"));
    }

    #[test]
    fn qualified_column_is_not_mistaken_for_alias() {
        let toks = tokenize("t.a").unwrap();
        let r = validate_select_list(&toks, &NoSubqueries, 128).unwrap();
        assert!(r.items[0].alias.is_none());
    }

    #[test]
    fn empty_select_list_is_rejected() {
        let toks: Vec<Token> = Vec::new();
        let err = validate_select_list(&toks, &NoSubqueries, 128).unwrap_err();
        assert_eq!(err.error, ErrorKind::EmptySelect);
    }
}
