//! Clause segmentation for a SELECT statement (§4.1).
//!
//! Grounded on the original `clauseChecksHelper.py`: scan the statement's
//! tokens at depth 0 for the six clause-introducing keywords, in the fixed
//! order `SELECT FROM WHERE GROUP BY HAVING ORDER BY LIMIT`, rejecting
//! duplicates and out-of-order clauses before any clause body is inspected.

use crate::diagnostic::{Diagnostic, ErrorKind};
use crate::sql::{Keyword, Token, TokenKind};

/// The token ranges making up one SELECT statement, sliced at clause
/// boundaries. Every field except `select_list` and `from` is optional.
pub struct Clauses<'a> {
    pub select_list: &'a [Token],
    pub from: &'a [Token],
    pub r#where: Option<&'a [Token]>,
    pub group_by: Option<&'a [Token]>,
    pub having: Option<&'a [Token]>,
    pub order_by: Option<&'a [Token]>,
    pub limit: Option<&'a [Token]>,
}

/// One entry per clause this dialect recognizes, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClauseTag {
    Select,
    From,
    Where,
    GroupBy,
    Having,
    OrderBy,
    Limit,
}

impl ClauseTag {
    fn name(self) -> &'static str {
        match self {
            ClauseTag::Select => "SELECT",
            ClauseTag::From => "FROM",
            ClauseTag::Where => "WHERE",
            ClauseTag::GroupBy => "GROUP BY",
            ClauseTag::Having => "HAVING",
            ClauseTag::OrderBy => "ORDER BY",
            ClauseTag::Limit => "LIMIT",
        }
    }
}

/// `tokens` is the full statement, starting at the `select` keyword
/// (trailing semicolon, if any, already stripped by the dispatcher).
pub fn split_clauses(tokens: &[Token]) -> Result<Clauses<'_>, Diagnostic> {
    let markers = scan_markers(tokens)?;

    let select_at = markers
        .iter()
        .find(|(tag, _)| *tag == ClauseTag::Select)
        .map(|(_, i)| *i)
        .ok_or_else(|| Diagnostic::new(ErrorKind::UnknownStatementKind))?;
    let from_at = markers
        .iter()
        .find(|(tag, _)| *tag == ClauseTag::From)
        .map(|(_, i)| *i)
        .ok_or_else(|| {
            Diagnostic::new(ErrorKind::MissingMandatoryClause {
                missing: vec!["FROM"],
            })
        })?;

    let has_group_by = markers.iter().any(|(t, _)| *t == ClauseTag::GroupBy);
    if markers.iter().any(|(t, _)| *t == ClauseTag::Having) && !has_group_by {
        return Err(Diagnostic::new(ErrorKind::HavingWithoutGroupBy));
    }

    let slice_for = |tag: ClauseTag| -> Option<&[Token]> {
        let start = markers.iter().find(|(t, _)| *t == tag).map(|(_, i)| *i)?;
        let end = markers
            .iter()
            .filter(|(_, i)| *i > start)
            .map(|(_, i)| *i)
            .min()
            .unwrap_or(tokens.len());
        Some(&tokens[start + clause_header_len(tag)..end])
    };

    Ok(Clauses {
        select_list: slice_for(ClauseTag::Select).unwrap(),
        from: {
            let end = markers
                .iter()
                .filter(|(_, i)| *i > from_at)
                .map(|(_, i)| *i)
                .min()
                .unwrap_or(tokens.len());
            &tokens[from_at + 1..end]
        },
        r#where: slice_for(ClauseTag::Where),
        group_by: slice_for(ClauseTag::GroupBy),
        having: slice_for(ClauseTag::Having),
        order_by: slice_for(ClauseTag::OrderBy),
        limit: slice_for(ClauseTag::Limit),
    })
}

fn clause_header_len(tag: ClauseTag) -> usize {
    match tag {
        ClauseTag::GroupBy | ClauseTag::OrderBy => 2, // "group by" / "order by"
        _ => 1,
    }
}

/// Walk `tokens` at depth 0, recording the index of every clause-starting
/// keyword (or keyword pair) in the order encountered. Rejects duplicates
/// and out-of-canonical-order occurrences immediately.
fn scan_markers(tokens: &[Token]) -> Result<Vec<(ClauseTag, usize)>, Diagnostic> {
    let mut found: Vec<(ClauseTag, usize)> = Vec::new();
    let mut depth = 0i32;
    let mut i = 0usize;

    while i < tokens.len() {
        match tokens[i].kind {
            TokenKind::ParenOpen => {
                depth += 1;
                i += 1;
                continue;
            }
            TokenKind::ParenClose => {
                depth -= 1;
                i += 1;
                continue;
            }
            _ => {}
        }
        if depth != 0 {
            i += 1;
            continue;
        }

        let tag = if tokens[i].is_keyword(Keyword::Select) {
            Some(ClauseTag::Select)
        } else if tokens[i].is_keyword(Keyword::From) {
            Some(ClauseTag::From)
        } else if tokens[i].is_keyword(Keyword::Where) {
            Some(ClauseTag::Where)
        } else if tokens[i].is_keyword(Keyword::Having) {
            Some(ClauseTag::Having)
        } else if tokens[i].is_keyword(Keyword::Group)
            && tokens.get(i + 1).is_some_and(|t| t.is_keyword(Keyword::By))
        {
            Some(ClauseTag::GroupBy)
        } else if tokens[i].is_keyword(Keyword::Order)
            && tokens.get(i + 1).is_some_and(|t| t.is_keyword(Keyword::By))
        {
            Some(ClauseTag::OrderBy)
        } else if tokens[i].is_keyword(Keyword::Limit) {
            Some(ClauseTag::Limit)
        } else {
            None
        };

        if let Some(tag) = tag {
            if let Some((_, first_at)) = found.iter().find(|(t, _)| *t == tag) {
                return Err(Diagnostic::new(ErrorKind::DuplicateClause {
                    clause: tag.name(),
                    first_at: *first_at,
                    again_at: i,
                }));
            }
            if let Some((prev_tag, _)) = found.last() {
                if canonical_rank(tag) < canonical_rank(*prev_tag) {
                    return Err(Diagnostic::new(ErrorKind::ClauseOrderError {
                        clause: tag.name(),
                        position: i,
                    }));
                }
            }
            found.push((tag, i));
        }
        i += 1;
    }

    Ok(found)
}

fn canonical_rank(tag: ClauseTag) -> u8 {
    match tag {
        ClauseTag::Select => 0,
        ClauseTag::From => 1,
        ClauseTag::Where => 2,
        ClauseTag::GroupBy => 3,
        ClauseTag::Having => 4,
        ClauseTag::OrderBy => 5,
        ClauseTag::Limit => 6,
    }
}
