//! The closed SQL keyword vocabulary.
//!
//! Every keyword the validator dialect recognizes lives here, matched
//! case-insensitively against the lower-cased lexeme produced by the
//! tokenizer. Adding a keyword the dialect doesn't actually define is worse
//! than leaving it out: an unrecognized word is exactly what drives the
//! spell-suggester, so the vocabulary is intentionally closed rather than
//! permissive.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Select,
    From,
    Where,
    Group,
    By,
    Having,
    Order,
    Limit,
    As,
    And,
    Or,
    Not,
    In,
    Between,
    Is,
    Null,
    Join,
    Inner,
    Left,
    Right,
    Full,
    On,
    Sum,
    Count,
    Avg,
    Min,
    Max,
    Insert,
    Update,
    Alter,
    Drop,
    Delete,
    Truncate,
    Create,
    Commit,
    Rollback,
    Savepoint,
    Table,
    View,
    Index,
    Database,
    Add,
    Modify,
    Column,
    Into,
    Values,
    Set,
    References,
    Primary,
    Key,
    Unique,
    Default,
    Check,
    If,
    Exists,
    Cascade,
    Restrict,
    Restart,
    Continue,
    Identity,
    Replace,
    To,
}

/// Every keyword recognized by the dialect, in declaration order. Used by the
/// spell-suggester as the candidate vocabulary.
pub const ALL_KEYWORDS: &[Keyword] = &[
    Keyword::Select,
    Keyword::From,
    Keyword::Where,
    Keyword::Group,
    Keyword::By,
    Keyword::Having,
    Keyword::Order,
    Keyword::Limit,
    Keyword::As,
    Keyword::And,
    Keyword::Or,
    Keyword::Not,
    Keyword::In,
    Keyword::Between,
    Keyword::Is,
    Keyword::Null,
    Keyword::Join,
    Keyword::Inner,
    Keyword::Left,
    Keyword::Right,
    Keyword::Full,
    Keyword::On,
    Keyword::Sum,
    Keyword::Count,
    Keyword::Avg,
    Keyword::Min,
    Keyword::Max,
    Keyword::Insert,
    Keyword::Update,
    Keyword::Alter,
    Keyword::Drop,
    Keyword::Delete,
    Keyword::Truncate,
    Keyword::Create,
    Keyword::Commit,
    Keyword::Rollback,
    Keyword::Savepoint,
    Keyword::Table,
    Keyword::View,
    Keyword::Index,
    Keyword::Database,
    Keyword::Add,
    Keyword::Modify,
    Keyword::Column,
    Keyword::Into,
    Keyword::Values,
    Keyword::Set,
    Keyword::References,
    Keyword::Primary,
    Keyword::Key,
    Keyword::Unique,
    Keyword::Default,
    Keyword::Check,
    Keyword::If,
    Keyword::Exists,
    Keyword::Cascade,
    Keyword::Restrict,
    Keyword::Restart,
    Keyword::Continue,
    Keyword::Identity,
    Keyword::Replace,
    Keyword::To,
];

impl Keyword {
    /// Attempt to classify a *lower-cased* word slice into a `Keyword`.
    /// Returns `None` if the word is not a recognized keyword.
    ///
    /// The caller is responsible for lower-casing the input; the tokenizer
    /// lower-cases every unquoted lexeme exactly once before this lookup.
    pub fn from_lower(word: &str) -> Option<Self> {
        use Keyword::*;
        let kw = match word {
            "select" => Select,
            "from" => From,
            "where" => Where,
            "group" => Group,
            "by" => By,
            "having" => Having,
            "order" => Order,
            "limit" => Limit,
            "as" => As,
            "and" => And,
            "or" => Or,
            "not" => Not,
            "in" => In,
            "between" => Between,
            "is" => Is,
            "null" => Null,
            "join" => Join,
            "inner" => Inner,
            "left" => Left,
            "right" => Right,
            "full" => Full,
            "on" => On,
            "sum" => Sum,
            "count" => Count,
            "avg" => Avg,
            "min" => Min,
            "max" => Max,
            "insert" => Insert,
            "update" => Update,
            "alter" => Alter,
            "drop" => Drop,
            "delete" => Delete,
            "truncate" => Truncate,
            "create" => Create,
            "commit" => Commit,
            "rollback" => Rollback,
            "savepoint" => Savepoint,
            "table" => Table,
            "view" => View,
            "index" => Index,
            "database" => Database,
            "add" => Add,
            "modify" => Modify,
            "column" => Column,
            "into" => Into,
            "values" => Values,
            "set" => Set,
            "references" => References,
            "primary" => Primary,
            "key" => Key,
            "unique" => Unique,
            "default" => Default,
            "check" => Check,
            "if" => If,
            "exists" => Exists,
            "cascade" => Cascade,
            "restrict" => Restrict,
            "restart" => Restart,
            "continue" => Continue,
            "identity" => Identity,
            "replace" => Replace,
            "to" => To,
            _ => return None,
        };
        Some(kw)
    }

    /// Canonical lowercase string form of the keyword.
    pub const fn as_str(self) -> &'static str {
        use Keyword::*;
        match self {
            Select => "select",
            From => "from",
            Where => "where",
            Group => "group",
            By => "by",
            Having => "having",
            Order => "order",
            Limit => "limit",
            As => "as",
            And => "and",
            Or => "or",
            Not => "not",
            In => "in",
            Between => "between",
            Is => "is",
            Null => "null",
            Join => "join",
            Inner => "inner",
            Left => "left",
            Right => "right",
            Full => "full",
            On => "on",
            Sum => "sum",
            Count => "count",
            Avg => "avg",
            Min => "min",
            Max => "max",
            Insert => "insert",
            Update => "update",
            Alter => "alter",
            Drop => "drop",
            Delete => "delete",
            Truncate => "truncate",
            Create => "create",
            Commit => "commit",
            Rollback => "rollback",
            Savepoint => "savepoint",
            Table => "table",
            View => "view",
            Index => "index",
            Database => "database",
            Add => "add",
            Modify => "modify",
            Column => "column",
            Into => "into",
            Values => "values",
            Set => "set",
            References => "references",
            Primary => "primary",
            Key => "key",
            Unique => "unique",
            Default => "default",
            Check => "check",
            If => "if",
            Exists => "exists",
            Cascade => "cascade",
            Restrict => "restrict",
            Restart => "restart",
            Continue => "continue",
            Identity => "identity",
            Replace => "replace",
            To => "to",
        }
    }

    /// Whether this keyword names one of the five aggregate functions.
    pub const fn is_aggregate(self) -> bool {
        matches!(
            self,
            Keyword::Sum | Keyword::Count | Keyword::Avg | Keyword::Min | Keyword::Max
        )
    }

    /// Whether this keyword may start a statement (`QueryParser.analyse`'s
    /// dispatch set).
    pub const fn is_statement_starter(self) -> bool {
        matches!(
            self,
            Keyword::Select
                | Keyword::Insert
                | Keyword::Update
                | Keyword::Alter
                | Keyword::Drop
                | Keyword::Delete
                | Keyword::Truncate
                | Keyword::Create
                | Keyword::Commit
                | Keyword::Rollback
                | Keyword::Savepoint
        )
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
