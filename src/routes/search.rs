use crate::db::{query::SplicedQuery, Backend, BackendError};
use crate::models::Product;

pub struct SearchOutcome {
    pub message: String,
    /// Rows exactly as the backend yielded them; no ordering is requested.
    pub results: Vec<Product>,
}

/// Echoes the raw term into the info message, then runs the spliced LIKE
/// lookup. The echo happens before the query so it survives a query
/// failure; the failure text is appended after it.
pub async fn run(backend: &mut Backend, term: &str) -> Result<SearchOutcome, BackendError> {
    let mut message = echo(term);

    let sql = SplicedQuery::product_search(term);
    let conn = backend.conn().await.map_err(BackendError::Connect)?;

    match sqlx::query_as::<_, Product>(sql.as_sql())
        .fetch_all(conn)
        .await
    {
        Ok(results) => Ok(SearchOutcome { message, results }),
        Err(e) => {
            tracing::warn!(error = %e, "search query failed");
            message.push_str(&format!(
                r#"<div class="alert error">Search error: {e}</div>"#
            ));
            Ok(SearchOutcome {
                message,
                results: Vec::new(),
            })
        }
    }
}

/// The term goes into the message verbatim, byte for byte. No encoding.
fn echo(term: &str) -> String {
    format!(r#"<div class="alert info">Search results for: {term}</div>"#)
}
