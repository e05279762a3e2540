//! Shallow statement validators (C7).
//!
//! Everything outside SELECT gets grammar-level validation only: the
//! clause shape, identifiers, and constant grammar are checked, but there
//! is no schema to cross-reference against (no column list, no type
//! catalog), so a statement that is syntactically sound is accepted even
//! if it would fail at the database. WHERE predicates reuse the full
//! expression validator (C5) and therefore transitively support
//! subqueries through [`crate::select::SelectValidator`].

pub mod alter;
pub mod coltype;
pub mod create;
pub mod delete;
pub mod drop;
pub mod insert;
pub mod tcl;
pub mod truncate;
pub mod update;
