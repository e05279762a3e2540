//! `TRUNCATE` validation (§4.9).
//!
//! Grounded on `truncate/TruncateDDL.py`: `TRUNCATE TABLE <name>
//! [RESTART IDENTITY | CONTINUE IDENTITY] [CASCADE | RESTRICT]`. The two
//! option families are independent and each may appear at most once, in
//! either order.

use crate::diagnostic::{Diagnostic, ErrorKind};
use crate::ident;
use crate::sql::{Keyword, Token};

pub fn validate_truncate(tokens: &[Token]) -> Option<Diagnostic> {
    validate(tokens).err()
}

fn validate(tokens: &[Token]) -> Result<(), Diagnostic> {
    let [truncate, table, name, rest @ ..] = tokens else {
        return Err(Diagnostic::new(ErrorKind::InvalidTruncateGrammar));
    };
    if !truncate.is_keyword(Keyword::Truncate) || !table.is_keyword(Keyword::Table) || !ident::is_identifier(name)
    {
        return Err(Diagnostic::new(ErrorKind::InvalidTruncateGrammar));
    }

    let mut identity_option = false;
    let mut referential_option = false;
    let mut i = 0;
    while i < rest.len() {
        let tok = &rest[i];
        if tok.is_keyword(Keyword::Restart) || tok.is_keyword(Keyword::Continue) {
            if identity_option {
                return Err(Diagnostic::new(ErrorKind::InvalidTruncateGrammar));
            }
            if !rest.get(i + 1).is_some_and(|t| t.is_keyword(Keyword::Identity)) {
                return Err(Diagnostic::new(ErrorKind::InvalidTruncateGrammar));
            }
            identity_option = true;
            i += 2;
            continue;
        }
        if tok.is_keyword(Keyword::Cascade) || tok.is_keyword(Keyword::Restrict) {
            if referential_option {
                return Err(Diagnostic::new(ErrorKind::InvalidTruncateGrammar));
            }
            referential_option = true;
            i += 1;
            continue;
        }
        return Err(Diagnostic::new(ErrorKind::InvalidTruncateGrammar));
    }
    Ok(())
}
