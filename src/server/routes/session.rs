use crate::server::guards::auth::{
    LOGIN_PATH, SESSION_COOKIE, password_matches, safe_next, session_cookie,
};
use crate::server::router::PagewrightState;
use crate::server::views;
use axum::{
    Form, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use axum_extra::extract::cookie::{Cookie, PrivateCookieJar};
use pagewright_schema::{LoginForm, ReloadQuery};
use tracing::{info, warn};

pub fn router() -> Router<PagewrightState> {
    Router::new()
        .route(LOGIN_PATH, get(login_form).post(login))
        .route("/logout", get(logout))
}

/// GET /login
async fn login_form(Query(query): Query<ReloadQuery>) -> Html<String> {
    let next = safe_next(query.next.as_deref());
    Html(views::login_form(next, None).into_string())
}

/// POST /login
async fn login(
    State(state): State<PagewrightState>,
    jar: PrivateCookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    let next = safe_next(form.next.as_deref());

    if !password_matches(&form.password, &state.admin_password) {
        warn!("admin login rejected");
        return (
            StatusCode::UNAUTHORIZED,
            Html(views::login_form(next, Some("Incorrect password.")).into_string()),
        )
            .into_response();
    }

    info!("admin logged in");
    let jar = jar.add(session_cookie(&state.session_token, !state.insecure_cookie));
    (jar, Redirect::to(next)).into_response()
}

/// GET /logout
async fn logout(jar: PrivateCookieJar) -> impl IntoResponse {
    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    (jar, Redirect::to(LOGIN_PATH))
}
