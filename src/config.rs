use confique::Config as _;
use std::sync::OnceLock;

/// Runtime-tunable limits for the validator. The only knob exposed today is
/// the recursion ceiling shared by the expression validator and the SELECT
/// validator's subquery callback — everything else about the dialect is
/// fixed (the keyword vocabulary, the lexical rules) and not configuration.
#[derive(confique::Config, Debug, Clone)]
pub struct Config {
    /// Maximum recursion depth across nested boolean expressions,
    /// parenthesized groups, and subqueries before a statement is rejected
    /// with `NestingTooDeep` rather than risking a stack overflow.
    #[config(env = "SQLVET_MAX_NESTING_DEPTH", default = 128)]
    pub max_nesting_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_nesting_depth: 128,
        }
    }
}

/// Load configuration from the environment once per process.
pub fn config() -> &'static Config {
    static CONFIG: OnceLock<Config> = OnceLock::new();
    CONFIG.get_or_init(|| {
        Config::builder()
            .env()
            .load()
            .expect("failed to load configuration from the environment")
    })
}
