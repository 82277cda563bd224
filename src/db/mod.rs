use crate::config::Config;
use anyhow::Result;
use sqlx::{Connection, Executor, MySqlConnection};
use std::fs;
use thiserror::Error;

pub mod query;

/// Failures split by blast radius: a connect failure kills the whole
/// response, a query failure is the caller's problem to fold into the
/// page. Both carry the raw driver text, which the client gets to see.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Database connection failed: {0}")]
    Connect(sqlx::Error),
    #[error("{0}")]
    Query(sqlx::Error),
}

/// Per-request backend handle. The connection opens on first use and is
/// held for the rest of the request. No pooling, no retry, no timeout.
pub struct Backend {
    url: String,
    conn: Option<MySqlConnection>,
}

impl Backend {
    pub fn new(config: &Config) -> Self {
        Backend {
            url: config.mysql_url(),
            conn: None,
        }
    }

    pub async fn conn(&mut self) -> Result<&mut MySqlConnection, sqlx::Error> {
        if self.conn.is_none() {
            tracing::debug!("opening backend connection");
            self.conn = Some(MySqlConnection::connect(&self.url).await?);
        }
        // filled by the branch above
        Ok(self.conn.as_mut().unwrap())
    }
}

/// Applies `migrations/*.sql` in path order over a single connection.
/// Used at startup to provision the lab schema and fixtures.
pub async fn run_migrations(config: &Config) -> Result<()> {
    let mut entries: Vec<_> = fs::read_dir("migrations")?.filter_map(|e| e.ok()).collect();
    entries.sort_by_key(|e| e.path());
    let mut conn = MySqlConnection::connect(&config.mysql_url()).await?;
    for e in entries {
        let p = e.path();
        if p.extension().and_then(|s| s.to_str()) == Some("sql") {
            let sql = fs::read_to_string(&p)?;
            // MySQL takes one statement per call
            for stmt in sql.split(';') {
                let stmt = stmt.trim();
                if stmt.is_empty() {
                    continue;
                }
                conn.execute(stmt).await?;
            }
            tracing::debug!(file = %p.display(), "applied migration");
        }
    }
    Ok(())
}
