use axum::{
    extract::{Form, Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;

use crate::db::{Backend, BackendError};
use crate::session::{clear_cookie, CurrentSession, Session};
use crate::views;
use crate::AppState;

pub mod admin;
pub mod login;
pub mod search;

/// The page selector as the router sees it. `products` is a real page in
/// the nav with no body of its own; anything unrecognized collapses to
/// `Other` and renders the bare shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Home,
    Products,
    Login,
    Admin,
    Other,
}

impl Page {
    pub fn from_param(raw: &str) -> Page {
        match raw {
            "home" => Page::Home,
            "products" => Page::Products,
            "login" => Page::Login,
            "admin" => Page::Admin,
            _ => Page::Other,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<String>,
    pub search: Option<String>,
    pub logout: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    pub username: Option<String>,
    pub password: Option<String>,
    /// Presence flag from the submit button; the attempt only runs when
    /// the field arrived at all.
    pub login: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(index_get).post(index_post))
}

async fn index_get(
    State(state): State<AppState>,
    current: CurrentSession,
    Query(params): Query<PageParams>,
) -> Response {
    respond(state, current, params, None).await
}

async fn index_post(
    State(state): State<AppState>,
    current: CurrentSession,
    Query(params): Query<PageParams>,
    form: Option<Form<LoginForm>>,
) -> Response {
    respond(state, current, params, form.map(|Form(f)| f)).await
}

/// One pass over the request: logout short-circuits, then the login and
/// search handlers each run if their trigger is present, then the page
/// renders against whatever session survives.
async fn respond(
    state: AppState,
    current: CurrentSession,
    params: PageParams,
    form: Option<LoginForm>,
) -> Response {
    if params.logout.is_some() {
        if let Some(token) = &current.token {
            state.sessions.destroy(token).await;
        }
        return logout_redirect();
    }

    let page = Page::from_param(params.page.as_deref().unwrap_or("home"));
    let mut backend = Backend::new(&state.config);

    let mut login_message = None;
    let mut fresh_session = None;
    let mut set_cookie = None;
    if let Some(form) = form {
        if form.login.is_some() {
            let username = form.username.unwrap_or_default();
            let password = form.password.unwrap_or_default();
            match login::attempt(&mut backend, &state.sessions, &username, &password).await {
                Ok(outcome) => {
                    login_message = Some(outcome.message);
                    fresh_session = outcome.session;
                    set_cookie = outcome.set_cookie;
                }
                Err(e) => return fatal_page(&e),
            }
        }
    }

    let mut search_message = None;
    let mut results = Vec::new();
    if let Some(term) = &params.search {
        match search::run(&mut backend, term).await {
            Ok(outcome) => {
                search_message = Some(outcome.message);
                results = outcome.results;
            }
            Err(e) => return fatal_page(&e),
        }
    }

    // a login in this same request takes effect immediately
    let session = fresh_session.or(current.data);

    // search wins when both handlers produced a message
    let message = search_message.or(login_message).unwrap_or_default();

    let admin_users = if page == Page::Admin && is_admin(session.as_ref()) {
        match admin::user_list(&mut backend).await {
            Ok(rows) => Some(rows),
            Err(e) => return fatal_page(&e),
        }
    } else {
        None
    };

    let html = views::render(
        &page,
        session.as_ref(),
        &message,
        &results,
        admin_users.as_deref(),
    );
    let mut response = Html(html).into_response();
    if let Some(cookie) = set_cookie {
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            response.headers_mut().insert(header::SET_COOKIE, value);
        }
    }
    response
}

/// The panel gate: an exact, case-sensitive compare of the stored role
/// string. Nothing re-checks the role against the backend.
fn is_admin(session: Option<&Session>) -> bool {
    session.is_some_and(|s| s.role == "admin")
}

fn logout_redirect() -> Response {
    let mut response = StatusCode::FOUND.into_response();
    response
        .headers_mut()
        .insert(header::LOCATION, HeaderValue::from_static("?page=home"));
    if let Ok(value) = HeaderValue::from_str(&clear_cookie()) {
        response.headers_mut().insert(header::SET_COOKIE, value);
    }
    response
}

/// Fatal path: the raw driver text is the entire response body, visible
/// to the client. Verbose errors are one of the listed vulnerabilities.
fn fatal_page(err: &BackendError) -> Response {
    tracing::error!(error = %err, "request aborted");
    Html(err.to_string()).into_response()
}
