//! Identifier shape and parenthesis utilities (C2).
//!
//! Shared by every validator that needs to walk a token window at "depth
//! 0" — the FROM/JOIN parser, the expression validator, GROUP BY/ORDER BY
//! normalization, and the shallow statement validators.

use crate::sql::{Keyword, Token, TokenKind};

/// True if `tok` is usable as a column/table/alias identifier: an `Ident`
/// token (quoted or bare) that isn't a reserved keyword. Bare identifiers
/// never collide with a keyword because the tokenizer classifies a
/// recognized keyword as `TokenKind::Keyword`, never as `Ident` — this
/// check exists for clarity at call sites and to reject quoted identifiers
/// that happen to spell a keyword only where the grammar forbids it.
pub fn is_identifier(tok: &Token) -> bool {
    tok.kind.is_ident()
}

/// True if `tok` is a column-shaped token: identifier or numeric literal.
/// Mirrors the original's loose `isColumnToken`/numeric checks collapsed to
/// "anything usable as an operand atom".
pub fn is_column_token(tok: &Token) -> bool {
    tok.kind.is_ident() || tok.kind.is_number()
}

/// True if tokens `[i, i+1, i+2]` form a qualified column `ident . ident`.
pub fn is_qualified_column_at(tokens: &[Token], i: usize) -> bool {
    i + 2 < tokens.len()
        && is_identifier(&tokens[i])
        && matches!(tokens[i + 1].kind, TokenKind::Dot)
        && is_identifier(&tokens[i + 2])
}

/// Balanced-parenthesis check over an entire token window.
pub fn is_balanced(tokens: &[Token]) -> bool {
    let mut depth: i32 = 0;
    for tok in tokens {
        match tok.kind {
            TokenKind::ParenOpen => depth += 1,
            TokenKind::ParenClose => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}

/// Scan `tokens` at depth 0 for the first token satisfying `pred`, skipping
/// anything nested inside parentheses. Returns its index.
pub fn find_top_level(tokens: &[Token], pred: impl Fn(&Token) -> bool) -> Option<usize> {
    let mut depth = 0i32;
    for (i, tok) in tokens.iter().enumerate() {
        match tok.kind {
            TokenKind::ParenOpen => depth += 1,
            TokenKind::ParenClose => depth -= 1,
            _ if depth == 0 && pred(tok) => return Some(i),
            _ => {}
        }
    }
    None
}

/// Split `tokens` on every top-level occurrence of a separator token
/// (matched via `is_sep`), the way a SELECT list or GROUP BY list splits on
/// commas while leaving parenthesized groups untouched. Always yields at
/// least one (possibly empty) slice per separator plus the trailing part.
pub fn split_top_level<'a>(
    tokens: &'a [Token],
    is_sep: impl Fn(&Token) -> bool,
) -> Vec<&'a [Token]> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0usize;

    for (i, tok) in tokens.iter().enumerate() {
        match tok.kind {
            TokenKind::ParenOpen => depth += 1,
            TokenKind::ParenClose => depth -= 1,
            _ if depth == 0 && is_sep(tok) => {
                parts.push(&tokens[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&tokens[start..]);
    parts
}

/// Remove layers of redundant outer parentheses: an outer `(` whose
/// matching `)` sits at the very last index. Idempotent — calling it again
/// on its own output is a no-op.
pub fn strip_outer_parens(mut tokens: &[Token]) -> &[Token] {
    loop {
        let Some((first, last)) = tokens.first().zip(tokens.last()) else {
            return tokens;
        };
        if !matches!(first.kind, TokenKind::ParenOpen) || !matches!(last.kind, TokenKind::ParenClose)
        {
            return tokens;
        }

        let mut depth = 0i32;
        let mut redundant = true;
        for (i, tok) in tokens.iter().enumerate() {
            match tok.kind {
                TokenKind::ParenOpen => depth += 1,
                TokenKind::ParenClose => depth -= 1,
                _ => {}
            }
            if depth == 0 && i < tokens.len() - 1 {
                redundant = false;
                break;
            }
        }

        if !redundant {
            return tokens;
        }
        tokens = &tokens[1..tokens.len() - 1];
    }
}

/// Given `tokens[i] == (`, find the index just past its matching `)`.
/// Returns `None` if unbalanced.
pub fn consume_parenthesized(tokens: &[Token], i: usize) -> Option<usize> {
    debug_assert!(matches!(tokens[i].kind, TokenKind::ParenOpen));
    let mut depth = 1i32;
    let mut j = i + 1;
    while j < tokens.len() && depth > 0 {
        match tokens[j].kind {
            TokenKind::ParenOpen => depth += 1,
            TokenKind::ParenClose => depth -= 1,
            _ => {}
        }
        j += 1;
    }
    if depth != 0 { None } else { Some(j) }
}

/// Normalize a token window to a string for structural comparisons between
/// SELECT / GROUP BY / ORDER BY expressions: strip redundant outer
/// parentheses, then join each token's display form with single spaces.
pub fn normalize(tokens: &[Token]) -> String {
    strip_outer_parens(tokens)
        .iter()
        .map(|t| t.kind.display())
        .collect::<Vec<_>>()
        .join(" ")
}

/// True if `tokens` is an aggregate-call window: `agg ( ... )` possibly
/// followed by more tokens (the caller decides how much to consume).
pub fn is_aggregate_start(tokens: &[Token], i: usize) -> bool {
    matches!(&tokens[i].kind, TokenKind::Keyword(k) if k.is_aggregate())
        && tokens.get(i + 1).is_some_and(|t| matches!(t.kind, TokenKind::ParenOpen))
}

/// Consume an aggregate call starting at `tokens[i]` (`tokens[i]` is the
/// aggregate keyword). Returns `(end, inner_tokens)` where `end` is the
/// index just past the matching `)`.
pub fn consume_aggregate(tokens: &[Token], i: usize) -> Option<(usize, &[Token])> {
    if !is_aggregate_start(tokens, i) {
        return None;
    }
    let end = consume_parenthesized(tokens, i + 1)?;
    Some((end, &tokens[i + 2..end - 1]))
}

/// True if the parenthesized window's first inner token is `select` — the
/// definition of a scalar/derived subquery.
pub fn is_subquery(inner: &[Token]) -> bool {
    inner.first().is_some_and(|t| t.is_keyword(Keyword::Select))
}

/// Whether any token in the window is an aggregate-call start — used to
/// forbid nested aggregates and to classify SELECT/GROUP BY expressions.
pub fn contains_aggregate(tokens: &[Token]) -> bool {
    (0..tokens.len()).any(|i| is_aggregate_start(tokens, i))
}
