use crate::server::router::PagewrightState;
use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, Key, PrivateCookieJar, SameSite};
use subtle::ConstantTimeEq;
use time::Duration;

pub const SESSION_COOKIE: &str = "pagewright_session";
pub const LOGIN_PATH: &str = "/login";
const DEFAULT_NEXT: &str = "/pages/index";

/// Admin-only marker: the request carries a valid session cookie.
#[derive(Debug, Clone, Copy)]
pub struct RequireLogin;

impl FromRequestParts<PagewrightState> for RequireLogin {
    type Rejection = LoginRedirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &PagewrightState,
    ) -> Result<Self, Self::Rejection> {
        let Ok(jar) = PrivateCookieJar::<Key>::from_request_parts(parts, state).await;

        let authenticated = jar.get(SESSION_COOKIE).is_some_and(|c| {
            c.value()
                .as_bytes()
                .ct_eq(state.session_token.as_bytes())
                .into()
        });

        if authenticated {
            Ok(RequireLogin)
        } else {
            let next = parts
                .uri
                .path_and_query()
                .map_or_else(|| parts.uri.path().to_string(), ToString::to_string);
            Err(LoginRedirect { next })
        }
    }
}

pub struct LoginRedirect {
    next: String,
}

impl IntoResponse for LoginRedirect {
    fn into_response(self) -> Response {
        let next: String = url::form_urlencoded::byte_serialize(self.next.as_bytes()).collect();
        Redirect::to(&format!("{LOGIN_PATH}?next={next}")).into_response()
    }
}

/// Constant-time check of a submitted admin password.
pub fn password_matches(submitted: &str, expected: &str) -> bool {
    !expected.is_empty() && submitted.as_bytes().ct_eq(expected.as_bytes()).into()
}

/// Accepts only same-origin absolute paths, falling back to the admin index.
pub fn safe_next(next: Option<&str>) -> &str {
    match next {
        Some(n) if n.starts_with('/') && !n.starts_with("//") && !n.contains('\\') => n,
        _ => DEFAULT_NEXT,
    }
}

pub fn session_cookie(token: &str, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token.to_string()))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(Duration::hours(12))
        .build()
}
