//! MySQL gateway: one connection per statement.

use async_trait::async_trait;
use sea_query::{Value, Values};
use sqlx::mysql::{MySqlArguments, MySqlConnection, MySqlRow};
use sqlx::query::Query;
use sqlx::{Column, Connection, MySql, Row as _, TypeInfo};
use tracing::{debug, warn};

use super::{Gateway, Row, Statement, StoreError};
use crate::config::StoreConfig;

/// Gateway backed by a MySQL server.
///
/// Holds only connection options. Each call connects, runs exactly one
/// statement and closes the connection, on the error path as well.
pub struct MySqlGateway {
    config: StoreConfig,
}

#[derive(Clone, Copy)]
enum Fetch {
    All,
    One,
}

impl MySqlGateway {
    /// Create a gateway from store options. No connection is opened here.
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    async fn connect(&self) -> Result<MySqlConnection, StoreError> {
        MySqlConnection::connect_with(&self.config.connect_options())
            .await
            .map_err(StoreError::Connect)
    }

    /// Run `statement` under the configured statement timeout.
    ///
    /// A timed-out future is dropped together with its connection, which
    /// sqlx closes on drop.
    async fn fetch(&self, statement: &Statement, mode: Fetch) -> Result<Vec<Row>, StoreError> {
        let limit = self.config.statement_timeout;
        let result = tokio::time::timeout(limit, self.fetch_on_fresh_connection(statement, mode))
            .await
            .map_err(|_| StoreError::Timeout(limit))
            .and_then(|inner| inner);

        if let Err(e) = &result {
            warn!(error = %e, sql = %statement.sql, "store statement failed");
        }
        result
    }

    async fn fetch_on_fresh_connection(
        &self,
        statement: &Statement,
        mode: Fetch,
    ) -> Result<Vec<Row>, StoreError> {
        let query = bind_values(sqlx::query(&statement.sql), &statement.values)?;

        let mut conn = self.connect().await?;
        let fetched = match mode {
            Fetch::All => query.fetch_all(&mut conn).await,
            Fetch::One => query
                .fetch_optional(&mut conn)
                .await
                .map(|row| row.into_iter().collect()),
        };
        release(conn).await;

        let rows = fetched.map_err(StoreError::Query)?;
        debug!(
            sql = %statement.sql,
            params = statement.placeholder_count(),
            rows = rows.len(),
            "statement executed"
        );

        Ok(rows.iter().map(row_to_json).collect())
    }
}

#[async_trait]
impl Gateway for MySqlGateway {
    async fn execute(&self, statement: &Statement) -> Result<Vec<Row>, StoreError> {
        self.fetch(statement, Fetch::All).await
    }

    async fn execute_one(&self, statement: &Statement) -> Result<Option<Row>, StoreError> {
        let rows = self.fetch(statement, Fetch::One).await?;
        Ok(rows.into_iter().next())
    }

    async fn ping(&self) -> bool {
        let check = async {
            let mut conn = self.connect().await?;
            let result = sqlx::query("SELECT 1").execute(&mut conn).await;
            release(conn).await;
            result.map(|_| ()).map_err(StoreError::Query)
        };

        match tokio::time::timeout(self.config.statement_timeout, check).await {
            Ok(Ok(())) => true,
            Ok(Err(e)) => {
                warn!(error = %e, "store health check failed");
                false
            }
            Err(_) => {
                warn!("store health check timed out");
                false
            }
        }
    }
}

/// Close a connection, logging rather than failing if the goodbye is lost.
async fn release(conn: MySqlConnection) {
    if let Err(e) = conn.close().await {
        warn!(error = %e, "failed to close store connection cleanly");
    }
}

/// Bind SeaQuery values to a sqlx query in placeholder order.
fn bind_values<'q>(
    mut query: Query<'q, MySql, MySqlArguments>,
    values: &Values,
) -> Result<Query<'q, MySql, MySqlArguments>, StoreError> {
    for value in &values.0 {
        query = match value {
            Value::Bool(v) => query.bind(*v),
            Value::TinyInt(v) => query.bind(*v),
            Value::SmallInt(v) => query.bind(*v),
            Value::Int(v) => query.bind(*v),
            Value::BigInt(v) => query.bind(*v),
            Value::TinyUnsigned(v) => query.bind(*v),
            Value::SmallUnsigned(v) => query.bind(*v),
            Value::Unsigned(v) => query.bind(*v),
            Value::BigUnsigned(v) => query.bind(*v),
            Value::Float(v) => query.bind(*v),
            Value::Double(v) => query.bind(*v),
            Value::String(v) => query.bind(v.as_deref().cloned()),
            Value::Char(v) => query.bind(v.map(String::from)),
            Value::Bytes(v) => query.bind(v.as_deref().cloned()),
            #[allow(unreachable_patterns)]
            other => return Err(StoreError::UnsupportedParameter(format!("{other:?}"))),
        };
    }
    Ok(query)
}

/// Convert a MySQL row to a JSON object using column type metadata.
///
/// Column order follows the select list. SQL NULL and undecodable cells
/// become JSON null.
fn row_to_json(row: &MySqlRow) -> Row {
    let mut map = Row::new();
    for col in row.columns() {
        let idx = col.ordinal();
        let type_name = col.type_info().name();
        let value = match type_name {
            "NULL" => serde_json::Value::Null,
            "BOOLEAN" => row
                .try_get::<Option<bool>, _>(idx)
                .ok()
                .flatten()
                .map(serde_json::Value::Bool)
                .unwrap_or(serde_json::Value::Null),
            "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" => row
                .try_get::<Option<i64>, _>(idx)
                .ok()
                .flatten()
                .map(|v| serde_json::Value::Number(v.into()))
                .unwrap_or(serde_json::Value::Null),
            unsigned if unsigned.ends_with("UNSIGNED") => row
                .try_get::<Option<u64>, _>(idx)
                .ok()
                .flatten()
                .map(|v| serde_json::Value::Number(v.into()))
                .unwrap_or(serde_json::Value::Null),
            "FLOAT" => row
                .try_get::<Option<f32>, _>(idx)
                .ok()
                .flatten()
                .and_then(|v| serde_json::Number::from_f64(f64::from(v)))
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            "DOUBLE" => row
                .try_get::<Option<f64>, _>(idx)
                .ok()
                .flatten()
                .and_then(serde_json::Number::from_f64)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            // DECIMAL travels as text on the wire.
            "DECIMAL" => row
                .try_get_unchecked::<Option<String>, _>(idx)
                .ok()
                .flatten()
                .map(|text| {
                    text.parse::<f64>()
                        .ok()
                        .and_then(serde_json::Number::from_f64)
                        .map(serde_json::Value::Number)
                        .unwrap_or(serde_json::Value::String(text))
                })
                .unwrap_or(serde_json::Value::Null),
            "DATE" => row
                .try_get::<Option<chrono::NaiveDate>, _>(idx)
                .ok()
                .flatten()
                .map(|v| serde_json::Value::String(v.to_string()))
                .unwrap_or(serde_json::Value::Null),
            "DATETIME" => row
                .try_get::<Option<chrono::NaiveDateTime>, _>(idx)
                .ok()
                .flatten()
                .map(|v| serde_json::Value::String(v.format("%Y-%m-%dT%H:%M:%S").to_string()))
                .unwrap_or(serde_json::Value::Null),
            "TIMESTAMP" => row
                .try_get::<Option<chrono::DateTime<chrono::Utc>>, _>(idx)
                .ok()
                .flatten()
                .map(|v| serde_json::Value::String(v.to_rfc3339()))
                .unwrap_or(serde_json::Value::Null),
            "JSON" => row
                .try_get::<Option<serde_json::Value>, _>(idx)
                .ok()
                .flatten()
                .unwrap_or(serde_json::Value::Null),
            // VARCHAR, CHAR, TEXT, ENUM and everything else → string
            _ => row
                .try_get_unchecked::<Option<String>, _>(idx)
                .ok()
                .flatten()
                .map(serde_json::Value::String)
                .unwrap_or(serde_json::Value::Null),
        };
        map.insert(col.name().to_string(), value);
    }
    map
}
