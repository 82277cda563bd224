use crate::db::{query::SplicedQuery, Backend, BackendError};
use crate::models::UserSummary;

/// Full user listing for the panel. Only called after the router's role
/// check has passed; a failure here aborts the whole response.
pub async fn user_list(backend: &mut Backend) -> Result<Vec<UserSummary>, BackendError> {
    let conn = backend.conn().await.map_err(BackendError::Connect)?;
    sqlx::query_as::<_, UserSummary>(SplicedQuery::user_list().as_sql())
        .fetch_all(conn)
        .await
        .map_err(BackendError::Query)
}
