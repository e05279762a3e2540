//! Tokenization building blocks shared by every statement validator.
//!
//! Modules:
//! - `keyword`    : the closed SQL keyword vocabulary (§6).
//! - `token_kind` : classification of lexical atoms (identifiers, literals,
//!                  operators, punctuation, keywords).
//! - `token`      : a `TokenKind` paired with its source span.
//! - `tokenizer`  : single-pass tokenizer producing `Result<Vec<Token>, Diagnostic>`.
//!
//! Design principles:
//! 1. Case-normalization happens exactly once, here: unquoted identifiers are
//!    lowercased on the way out; quoted identifiers keep their original case.
//! 2. Lexical errors (unterminated literal, stray character) are reported
//!    from this module, not discovered downstream.
//! 3. No other module in the crate re-derives tokenization rules.

pub mod keyword;
pub mod token;
pub mod token_kind;
pub mod tokenizer;

pub use keyword::Keyword;
pub use token::Token;
pub use token_kind::{Op, TokenKind};
pub use tokenizer::tokenize;

/// Re-exports the most commonly used items.
pub mod prelude {
    pub use super::{Keyword, Op, Token, TokenKind, tokenize};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_and_access() {
        let sql = "SELECT col FROM tbl";
        let tokens = tokenize(sql).unwrap();
        assert!(tokens.iter().any(|t| t.is_keyword(Keyword::Select)));
        assert!(tokens.iter().any(|t| t.is_keyword(Keyword::From)));
        assert!(tokens.iter().any(|t| t.ident() == Some("col")));
        assert!(tokens.iter().any(|t| t.ident() == Some("tbl")));
    }

    #[test]
    fn prelude_import_works() {
        use super::prelude::*;
        let toks = tokenize("FROM x").unwrap();
        assert!(toks.iter().any(|t| t.is_keyword(Keyword::From)));
        assert!(toks.iter().any(|t| t.ident() == Some("x")));
    }
}
