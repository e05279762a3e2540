use crate::diagnostic::{Diagnostic, ErrorKind};
use crate::sql::{keyword::Keyword, token::Token, token_kind::TokenKind};

/// Tokenize a single SQL statement into a flat stream of `Token`s.
///
/// Behavior:
/// - Skips ASCII whitespace.
/// - Aggregates `[A-Za-z0-9_]` runs starting with a letter or `_` into
///   identifiers; the lexeme is lowercased once to attempt keyword
///   classification, and the *lowercased* text is kept for unquoted
///   identifiers (case-normalization is centralized here, never scattered
///   downstream).
/// - A run of ASCII digits becomes a numeric literal.
/// - `'...'` is a string literal; a doubled `''` inside it is an escaped
///   single quote. Unterminated strings are a lexical error.
/// - `"..."` is a quoted identifier; case and inner spaces are preserved
///   verbatim. Unterminated quoted identifiers are a lexical error.
/// - `=`, `!=`, `<`, `>`, `<=`, `>=` are grouped into comparison operators.
/// - `, . ; ( ) * + - / %` are single-char punctuators.
/// - Anything else is a lexical error (a stray character with no meaning in
///   this dialect).
///
/// Complexity: O(n) time, O(t) space where `t` is the number of tokens.
pub fn tokenize(sql: &str) -> Result<Vec<Token>, Diagnostic> {
    let mut out = Vec::new();
    let bytes = sql.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        let c = bytes[i] as char;

        if c.is_ascii_whitespace() {
            i += 1;
            continue;
        }

        let start = i;

        if c.is_ascii_alphabetic() || c == '_' {
            i += 1;
            while i < bytes.len() {
                let cc = bytes[i] as char;
                if cc.is_ascii_alphanumeric() || cc == '_' {
                    i += 1;
                } else {
                    break;
                }
            }
            let text = &sql[start..i];
            let lower = text.to_ascii_lowercase();
            let kind = Keyword::from_lower(&lower)
                .map(TokenKind::Keyword)
                .unwrap_or_else(|| TokenKind::ident(lower));
            out.push(Token::new(kind, start, i));
            continue;
        }

        if c.is_ascii_digit() {
            i += 1;
            while i < bytes.len() && (bytes[i] as char).is_ascii_digit() {
                i += 1;
            }
            out.push(Token::new(
                TokenKind::Number(sql[start..i].to_string()),
                start,
                i,
            ));
            continue;
        }

        if c == '\'' {
            let mut text = String::new();
            i += 1;
            let mut closed = false;
            while i < bytes.len() {
                if bytes[i] as char == '\'' {
                    if i + 1 < bytes.len() && bytes[i + 1] as char == '\'' {
                        text.push('\'');
                        i += 2;
                        continue;
                    }
                    i += 1;
                    closed = true;
                    break;
                }
                let ch_start = i;
                i = next_char_boundary(sql, i);
                text.push_str(&sql[ch_start..i]);
            }
            if !closed {
                return Err(Diagnostic::new(ErrorKind::UnterminatedString)
                    .with_context(format!("starting at byte {start}")));
            }
            out.push(Token::new(TokenKind::Str(text), start, i));
            continue;
        }

        if c == '"' {
            let mut text = String::new();
            i += 1;
            let mut closed = false;
            while i < bytes.len() {
                if bytes[i] as char == '"' {
                    i += 1;
                    closed = true;
                    break;
                }
                let ch_start = i;
                i = next_char_boundary(sql, i);
                text.push_str(&sql[ch_start..i]);
            }
            if !closed {
                return Err(Diagnostic::new(ErrorKind::UnterminatedQuotedIdent)
                    .with_context(format!("starting at byte {start}")));
            }
            out.push(Token::new(TokenKind::quoted_ident(text), start, i));
            continue;
        }

        // Operators and single-char punctuators.
        i += 1;
        let kind = match c {
            '=' => TokenKind::Op(crate::sql::token_kind::Op::Eq),
            '!' if bytes.get(i).copied() == Some(b'=') => {
                i += 1;
                TokenKind::Op(crate::sql::token_kind::Op::Neq)
            }
            '<' if bytes.get(i).copied() == Some(b'=') => {
                i += 1;
                TokenKind::Op(crate::sql::token_kind::Op::Le)
            }
            '<' => TokenKind::Op(crate::sql::token_kind::Op::Lt),
            '>' if bytes.get(i).copied() == Some(b'=') => {
                i += 1;
                TokenKind::Op(crate::sql::token_kind::Op::Ge)
            }
            '>' => TokenKind::Op(crate::sql::token_kind::Op::Gt),
            ',' => TokenKind::Comma,
            '.' => TokenKind::Dot,
            ';' => TokenKind::Semicolon,
            '(' => TokenKind::ParenOpen,
            ')' => TokenKind::ParenClose,
            '*' => TokenKind::Star,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            other => {
                return Err(Diagnostic::new(ErrorKind::StrayCharacter(other))
                    .with_context(format!("at byte {start}")));
            }
        };
        out.push(Token::new(kind, start, i));
    }

    Ok(out)
}

/// Advance past one UTF-8 character starting at byte index `i`.
fn next_char_boundary(s: &str, i: usize) -> usize {
    let mut j = i + 1;
    while j < s.len() && !s.is_char_boundary(j) {
        j += 1;
    }
    j
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::keyword::Keyword;
    use crate::sql::token_kind::{Op, TokenKind};

    #[test]
    fn basic_select_sequence() {
        let toks = tokenize("SELECT a, b FROM t").unwrap();
        assert!(toks.iter().any(|t| t.is_keyword(Keyword::Select)));
        assert!(toks.iter().any(|t| t.is_keyword(Keyword::From)));
        assert!(toks.iter().any(|t| t.ident() == Some("a")));
        assert!(toks.iter().any(|t| t.ident() == Some("b")));
        assert!(toks.iter().any(|t| t.ident() == Some("t")));
    }

    #[test]
    fn unquoted_identifiers_are_lowercased() {
        let toks = tokenize("From MyTable").unwrap();
        assert!(toks.iter().any(|t| t.ident() == Some("mytable")));
    }

    #[test]
    fn quoted_identifier_preserves_case_and_spaces() {
        let toks = tokenize(r#"SELECT "My Col" FROM t"#).unwrap();
        let quoted = toks.iter().find(|t| t.kind.is_quoted_ident()).unwrap();
        assert_eq!(quoted.ident(), Some("My Col"));
    }

    #[test]
    fn unterminated_quoted_identifier_is_a_lexical_error() {
        let err = tokenize(r#"SELECT "oops FROM t"#).unwrap_err();
        assert_eq!(err.error, ErrorKind::UnterminatedQuotedIdent);
    }

    #[test]
    fn string_literal_with_escaped_quote() {
        let toks = tokenize("SELECT a FROM t WHERE b = 'it''s'").unwrap();
        let s = toks
            .iter()
            .find_map(|t| match &t.kind {
                TokenKind::Str(s) => Some(s.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(s, "it's");
    }

    #[test]
    fn unterminated_string_is_a_lexical_error() {
        let err = tokenize("SELECT a FROM t WHERE b = 'oops").unwrap_err();
        assert_eq!(err.error, ErrorKind::UnterminatedString);
    }

    #[test]
    fn multi_char_operators() {
        let toks = tokenize("a <= b AND c != d AND e >= f").unwrap();
        let ops: Vec<Op> = toks.iter().filter_map(|t| t.kind.as_op()).collect();
        assert_eq!(ops, vec![Op::Le, Op::Neq, Op::Ge]);
    }

    #[test]
    fn numeric_literal() {
        let toks = tokenize("LIMIT 042").unwrap();
        assert!(
            toks.iter()
                .any(|t| matches!(&t.kind, TokenKind::Number(n) if n == "042"))
        );
    }

    #[test]
    fn punctuation_tokens() {
        let toks = tokenize("(a.b,c);").unwrap();
        assert!(toks.iter().any(|t| matches!(t.kind, TokenKind::ParenOpen)));
        assert!(toks.iter().any(|t| matches!(t.kind, TokenKind::Dot)));
        assert!(toks.iter().any(|t| matches!(t.kind, TokenKind::Comma)));
        assert!(toks.iter().any(|t| matches!(t.kind, TokenKind::ParenClose)));
        assert!(toks.iter().any(|t| matches!(t.kind, TokenKind::Semicolon)));
    }

    #[test]
    fn stray_character_is_a_lexical_error() {
        let err = tokenize("SELECT a FROM t WHERE a @ 1").unwrap_err();
        assert_eq!(err.error, ErrorKind::StrayCharacter('@'));
    }
}
