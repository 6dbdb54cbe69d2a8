//! Flash messages carried across a redirect in a private cookie.

use axum_extra::extract::cookie::{Cookie, PrivateCookieJar, SameSite};
use pagewright_schema::Flash;
use tracing::{debug, warn};

pub const FLASH_COOKIE: &str = "pagewright_flash";

/// Appends `flash` to any messages already pending in the jar.
pub fn push_flash(jar: PrivateCookieJar, flash: Flash, secure: bool) -> PrivateCookieJar {
    let mut pending = jar
        .get(FLASH_COOKIE)
        .map(|c| Flash::decode_all(c.value()))
        .unwrap_or_default();
    debug!(message = %flash.to_plain_text(), "flash queued");
    pending.push(flash);

    match Flash::encode_all(&pending) {
        Ok(value) => jar.add(
            Cookie::build((FLASH_COOKIE, value))
                .path("/")
                .http_only(true)
                .secure(secure)
                .same_site(SameSite::Lax)
                .build(),
        ),
        Err(e) => {
            warn!(error = %e, "failed to encode flash messages");
            jar
        }
    }
}

/// Drains pending messages; the cookie is cleared when any were present.
pub fn take_flashes(jar: PrivateCookieJar) -> (PrivateCookieJar, Vec<Flash>) {
    let Some(raw) = jar.get(FLASH_COOKIE).map(|c| c.value().to_string()) else {
        return (jar, Vec::new());
    };
    let flashes = Flash::decode_all(&raw);
    let jar = jar.remove(Cookie::build(FLASH_COOKIE).path("/"));
    (jar, flashes)
}
