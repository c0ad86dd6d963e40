//! Data store gateway.
//!
//! Every read the application performs goes through [`Gateway`]: a statement
//! template with `?` placeholders plus its ordered bound values goes in, rows
//! come back as ordered column-name to JSON-value maps. The production
//! implementation ([`MySqlGateway`]) opens one connection per statement and
//! closes it before returning.

mod mysql;

use std::time::Duration;

use async_trait::async_trait;
use sea_query::{MysqlQueryBuilder, SelectStatement, Values};
use thiserror::Error;

pub use mysql::MySqlGateway;

/// One fetched row: column name to value, in select-list order.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// A parameterized statement ready for execution.
///
/// `sql` never contains caller-supplied text; every such value sits in
/// `values`, in placeholder order.
#[derive(Debug, Clone)]
pub struct Statement {
    pub sql: String,
    pub values: Values,
}

impl Statement {
    /// Render a SeaQuery select into a MySQL template and its bound values.
    pub fn from_select(select: &SelectStatement) -> Self {
        let (sql, values) = select.build(MysqlQueryBuilder);
        Self { sql, values }
    }

    /// Number of `?` placeholders this statement expects to be bound.
    pub fn placeholder_count(&self) -> usize {
        self.values.0.len()
    }
}

/// Data access failures. None of these is ever reported as "no rows".
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to connect to store: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("statement failed: {0}")]
    Query(#[source] sqlx::Error),

    #[error("statement exceeded {0:?}")]
    Timeout(Duration),

    #[error("unsupported parameter value: {0}")]
    UnsupportedParameter(String),
}

/// Read access to the compound store.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Run a statement and return every row it yields.
    async fn execute(&self, statement: &Statement) -> Result<Vec<Row>, StoreError>;

    /// Run a point lookup and return its first row, if any.
    async fn execute_one(&self, statement: &Statement) -> Result<Option<Row>, StoreError>;

    /// Whether the store is reachable right now.
    async fn ping(&self) -> bool;
}
