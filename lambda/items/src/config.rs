use std::env;

pub const TABLE_NAME_VAR: &str = "TABLE_NAME";
pub const DEFAULT_TABLE_NAME: &str = "resource";

/// Process-wide configuration, built once at start-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Name of the DynamoDB table holding the items.
    pub table_name: String,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// - `TABLE_NAME` - table name (default: "resource")
    pub fn from_env() -> Self {
        Self::with_table_name(env::var(TABLE_NAME_VAR).ok())
    }

    fn with_table_name(table_name: Option<String>) -> Self {
        let table_name = table_name
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_TABLE_NAME.to_string());
        Self { table_name }
    }
}
