//! The uniform diagnostic surface (C8).
//!
//! Every validator in this crate returns `Option<Diagnostic>`: `None` means
//! the input is well-formed, `Some(diag)` carries the first error found
//! (validation is fail-fast throughout). `ErrorKind` is the closed taxonomy
//! from which every diagnostic is built; `Diagnostic` wraps a kind with an
//! optional spell-suggestion, a nested `details` diagnostic (for errors
//! surfaced from a subquery), and a free-text `context` hint.

use std::fmt;

/// The closed set of validation failures. Every variant maps to exactly one
/// of the five taxonomy classes from the error handling design (lexical,
/// structural, syntax, semantic, unsupported); `class()` reports it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorKind {
    // --- Lexical ---
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unterminated quoted identifier")]
    UnterminatedQuotedIdent,
    #[error("unrecognized character '{0}'")]
    StrayCharacter(char),

    // --- Structural: statement shape ---
    #[error("statement is empty")]
    EmptyStatement,
    #[error("unrecognized statement kind")]
    UnknownStatementKind,
    #[error("invalid use of ';': a single trailing semicolon is allowed")]
    InvalidSemicolonUsage,
    #[error("expression nesting exceeds the maximum allowed depth")]
    NestingTooDeep,

    // --- Structural: clause index (§4.1) ---
    #[error("clause '{clause}' appears more than once")]
    DuplicateClause {
        clause: &'static str,
        first_at: usize,
        again_at: usize,
    },
    #[error("missing mandatory clause(s): {missing:?}")]
    MissingMandatoryClause { missing: Vec<&'static str> },
    #[error("HAVING is only legal when GROUP BY is present")]
    HavingWithoutGroupBy,
    #[error("clause '{clause}' appears out of order")]
    ClauseOrderError {
        clause: &'static str,
        position: usize,
    },

    // --- SELECT list (§4.2) ---
    #[error("SELECT list is empty")]
    EmptySelect,
    #[error("SELECT list has a trailing comma")]
    TrailingComma,
    #[error("'*' must be the only item in the SELECT list")]
    InvalidStarUsage,
    #[error("missing comma between SELECT list items")]
    MissingCommaBetweenItems,
    #[error("nested aggregate functions are not allowed")]
    NestedAggregate,
    #[error("aggregate function call has an empty argument")]
    EmptyAggregateArg,
    #[error("invalid alias")]
    InvalidAlias,
    #[error("invalid subquery")]
    InvalidSubquery,
    #[error("a scalar subquery must project exactly one column")]
    MultiColumnScalarSubquery,
    #[error("arithmetic is not allowed directly on a subquery result")]
    ArithmeticOnSubquery,

    // --- FROM (§4.3) ---
    #[error("empty table reference")]
    EmptyTableRef,
    #[error("invalid table reference")]
    InvalidTable,
    #[error("alias must not equal its base table name")]
    AliasEqualsTable,
    #[error("duplicate alias '{0}' in FROM clause")]
    DuplicateAlias(String),
    #[error("derived table requires an alias")]
    DerivedTableMissingAlias,
    #[error("invalid subquery in FROM clause")]
    InvalidSubqueryInFrom,
    #[error("JOIN requires an ON clause")]
    MissingOnClause,
    #[error("ON clause is empty")]
    EmptyOnClause,
    #[error("Unknown table alias in JOIN condition")]
    UnknownAliasInOn { alias: String },
    #[error("cannot mix comma-joins and JOIN in a single FROM clause")]
    MixedJoinStyles,
    #[error("column alias '{0}' is not a known FROM alias")]
    UnknownAlias(String),

    // --- Expression validator (§4.4) ---
    #[error("expression is empty")]
    EmptyExpression,
    #[error("logical operator without a following operand")]
    LogicalOperatorWithoutOperand,
    #[error("invalid comparison operator '{0}'")]
    InvalidComparator(String),
    #[error("more than one comparison operator at the top level")]
    MultipleComparisonOperators,
    #[error("incomplete comparison expression")]
    IncompleteComparison,
    #[error("IN requires a parenthesized list or subquery")]
    InRequiresParenList,
    #[error("IN list is empty")]
    EmptyInList,
    #[error("BETWEEN is missing its AND")]
    BetweenMissingAnd,
    #[error("BETWEEN bounds are incomplete")]
    IncompleteBetweenBounds,
    #[error("Aggregate functions are not allowed in WHERE clause")]
    AggregateInWhere,
    #[error("unbalanced parentheses")]
    UnmatchedParenthesis,
    #[error("unexpected token where an operand was expected: '{0}'")]
    UnexpectedOperand(String),
    #[error("unexpected token where an operator was expected: '{0}'")]
    UnexpectedOperator(String),
    #[error("expression ends while expecting an operand")]
    DanglingOperator,

    // --- GROUP BY (§4.5) ---
    #[error("GROUP BY clause is empty")]
    EmptyGroupBy,
    #[error("aggregate functions are not allowed in GROUP BY")]
    AggregateInGroupBy,
    #[error("GROUP BY is required when mixing aggregate and non-aggregate expressions")]
    GroupByRequired,
    #[error("SELECT expressions do not match GROUP BY expressions")]
    GroupByMismatch {
        select: Vec<String>,
        group_by: Vec<String>,
    },

    // --- HAVING (§4.6) ---
    #[error("HAVING clause is empty")]
    EmptyHaving,
    #[error("invalid HAVING expression")]
    InvalidHavingExpression,
    #[error("invalid value in HAVING expression")]
    InvalidHavingValue,

    // --- ORDER BY (§4.7) ---
    #[error("ORDER BY clause is empty")]
    EmptyOrderBy,
    #[error("ORDER BY item is missing its expression")]
    OrderByMissingExpression,
    #[error("invalid ORDER BY expression")]
    InvalidOrderByExpression,
    #[error("ORDER BY aggregate must also appear in SELECT or GROUP BY")]
    AggregateOrderByNotInSelect,

    // --- LIMIT (§4.8) ---
    #[error("LIMIT clause is empty")]
    EmptyLimit,
    #[error("LIMIT requires a non-negative integer")]
    LimitRequiresInteger,

    // --- Shallow statement validators (§4.9 / C7) ---
    #[error("invalid ALTER TABLE statement")]
    InvalidAlterGrammar,
    #[error("unknown ALTER sub-command")]
    UnknownAlterSubcommand,
    #[error("unknown column type")]
    UnknownAlterType,
    #[error("invalid DELETE statement")]
    InvalidDeleteGrammar,
    #[error("Empty WHERE clause")]
    EmptyWhereClause,
    #[error("invalid INSERT statement")]
    InvalidInsertGrammar,
    #[error("number of values does not match number of columns")]
    InsertArityMismatch,
    #[error("a VALUES row is empty")]
    EmptyValueRow,
    #[error("invalid UPDATE statement")]
    InvalidUpdateGrammar,
    #[error("UPDATE supports exactly one table")]
    UpdateMultipleTables,
    #[error("invalid CREATE statement")]
    InvalidCreateGrammar,
    #[error("invalid DROP statement")]
    InvalidDropGrammar,
    #[error("Only one database can be dropped at a time")]
    MultipleDatabaseDrop,
    #[error("invalid TRUNCATE statement")]
    InvalidTruncateGrammar,
    #[error("invalid transaction-control statement")]
    InvalidTclGrammar,

    // --- Unsupported ---
    #[error("unsupported: {0}")]
    Unsupported(&'static str),
}

impl ErrorKind {
    /// The taxonomy class this error reduces to (§7).
    pub fn class(&self) -> &'static str {
        use ErrorKind::*;
        match self {
            UnterminatedString | UnterminatedQuotedIdent | StrayCharacter(_) => "LexicalError",

            EmptyStatement
            | UnknownStatementKind
            | InvalidSemicolonUsage
            | NestingTooDeep
            | DuplicateClause { .. }
            | MissingMandatoryClause { .. }
            | HavingWithoutGroupBy
            | ClauseOrderError { .. }
            | EmptySelect
            | TrailingComma
            | EmptyTableRef
            | MissingOnClause
            | EmptyOnClause
            | EmptyExpression
            | EmptyGroupBy
            | EmptyHaving
            | EmptyOrderBy
            | EmptyLimit
            | EmptyWhereClause
            | EmptyValueRow
            | UnmatchedParenthesis => "StructuralError",

            UnknownAlias(_)
            | UnknownAliasInOn { .. }
            | AliasEqualsTable
            | DuplicateAlias(_)
            | GroupByMismatch { .. }
            | GroupByRequired
            | AggregateInWhere
            | AggregateInGroupBy
            | NestedAggregate
            | MultiColumnScalarSubquery
            | AggregateOrderByNotInSelect
            | InsertArityMismatch
            | UpdateMultipleTables
            | MultipleDatabaseDrop => "SemanticError",

            Unsupported(_) => "Unsupported",

            _ => "SyntaxError",
        }
    }
}

/// A validation failure: an error kind plus an optional fix suggestion,
/// nested details (for subquery errors), and a free-text location hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub error: ErrorKind,
    pub suggestion: Option<String>,
    pub details: Option<Box<Diagnostic>>,
    pub context: Option<String>,
}

impl Diagnostic {
    pub fn new(error: ErrorKind) -> Self {
        Diagnostic {
            error,
            suggestion: None,
            details: None,
            context: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn with_details(mut self, details: Diagnostic) -> Self {
        self.details = Some(Box::new(details));
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Like [`Self::with_suggestion`], but takes an already-optional
    /// suggestion (e.g. straight from [`crate::suggest::suggest_word`]) so
    /// call sites don't need an extra `if let`.
    pub fn with_suggestion_opt(self, suggestion: Option<String>) -> Self {
        match suggestion {
            Some(s) => self.with_suggestion(s),
            None => self,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;
        if let Some(s) = &self.suggestion {
            write!(f, " (suggestion: {s})")?;
        }
        if let Some(c) = &self.context {
            write!(f, " [{c}]")?;
        }
        Ok(())
    }
}
