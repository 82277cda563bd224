use crate::db::{query::SplicedQuery, Backend, BackendError};
use crate::models::User;
use crate::session::{session_cookie, Session, SessionStore};

/// What a login attempt produced: always a message, plus a session and its
/// cookie when a row matched.
pub struct LoginOutcome {
    pub message: String,
    pub session: Option<Session>,
    pub set_cookie: Option<String>,
}

/// Runs the credential lookup with both values spliced in verbatim and
/// takes the first matching row. Presence of a row is the entire
/// authentication decision; no hashing, no lockout, no rate limit.
///
/// The three outcomes answer differently on purpose: a matched row echoes
/// the stored username, no row gets the generic line, and a broken query
/// leaks the driver text. The divergence is what makes enumeration work.
pub async fn attempt(
    backend: &mut Backend,
    sessions: &SessionStore,
    username: &str,
    password: &str,
) -> Result<LoginOutcome, BackendError> {
    let sql = SplicedQuery::user_lookup(username, password);
    let conn = backend.conn().await.map_err(BackendError::Connect)?;

    match sqlx::query_as::<_, User>(sql.as_sql())
        .fetch_optional(conn)
        .await
    {
        Ok(Some(user)) => {
            let session = Session {
                user: user.username.clone(),
                role: user.role,
            };
            let token = sessions.create(session.clone()).await;
            tracing::info!(user = %session.user, role = %session.role, "login succeeded");
            Ok(LoginOutcome {
                message: format!(
                    r#"<div class="alert success">Welcome, {}!</div>"#,
                    user.username
                ),
                session: Some(session),
                set_cookie: Some(session_cookie(&token)),
            })
        }
        Ok(None) => {
            tracing::info!(username, "login rejected");
            Ok(LoginOutcome {
                message: r#"<div class="alert error">Invalid credentials</div>"#.to_string(),
                session: None,
                set_cookie: None,
            })
        }
        Err(e) => {
            tracing::warn!(error = %e, "login query failed");
            Ok(LoginOutcome {
                message: format!(r#"<div class="alert error">Query error: {e}</div>"#),
                session: None,
                set_cookie: None,
            })
        }
    }
}
