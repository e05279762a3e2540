//! LIMIT validation (§4.8).
//!
//! Grounded on `utils.py::extractLimit`: the clause body must be exactly
//! one numeric literal. Leading zeros (`LIMIT 007`) are accepted — the
//! tokenizer already treats any digit run as one `Number` token, and the
//! original imposes no additional format constraint once it parses as an
//! integer.

use crate::diagnostic::{Diagnostic, ErrorKind};
use crate::sql::{Token, TokenKind};

pub fn validate_limit(tokens: &[Token]) -> Result<u64, Diagnostic> {
    if tokens.is_empty() {
        return Err(Diagnostic::new(ErrorKind::EmptyLimit));
    }
    if tokens.len() != 1 {
        return Err(Diagnostic::new(ErrorKind::LimitRequiresInteger));
    }
    match &tokens[0].kind {
        TokenKind::Number(n) => n.parse().map_err(|_| Diagnostic::new(ErrorKind::LimitRequiresInteger)),
        _ => Err(Diagnostic::new(ErrorKind::LimitRequiresInteger)),
    }
}
