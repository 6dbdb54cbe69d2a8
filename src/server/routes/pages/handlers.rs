use crate::error::PagewrightError;
use crate::server::flash::{push_flash, take_flashes};
use crate::server::guards::auth::safe_next;
use crate::server::router::PagewrightState;
use crate::server::views;
use crate::service::{AddOutcome, EditOutcome};
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::PrivateCookieJar;
use maud::Markup;
use pagewright_schema::{DeleteQuery, Flash, PageForm, ReloadQuery};
use tracing::info;

const EDIT_PAGES: &str = "/edit-pages";
const DELETE_PAGES: &str = "/delete-pages";

/// Sends the browser through `/reload` so the published page set is refreshed first.
fn reload_then(next: &str) -> Redirect {
    Redirect::to(&format!("/reload?next={next}"))
}

fn render(jar: PrivateCookieJar, view: impl FnOnce(&[Flash]) -> Markup) -> Response {
    let (jar, flashes) = take_flashes(jar);
    (jar, Html(view(&flashes).into_string())).into_response()
}

/// GET /pages/index, GET /Add-pages
pub(crate) async fn module_index(jar: PrivateCookieJar) -> Response {
    render(jar, views::module_index)
}

/// GET /add-page
pub(crate) async fn add_page_form(jar: PrivateCookieJar) -> Response {
    render(jar, views::add_page_form)
}

/// POST /add-page
///
/// Writes `<page-name>.html` and a new `page` row. A title whose derived name is
/// already taken is not an error: the user is redirected with a notice instead.
pub(crate) async fn save_new_page(
    State(state): State<PagewrightState>,
    jar: PrivateCookieJar,
    Form(form): Form<PageForm>,
) -> Result<Response, PagewrightError> {
    let page = form.validate()?;

    let flash = match state.pages.add(page).await? {
        AddOutcome::Created(name) => Flash::page_created(&name),
        AddOutcome::AlreadyExists(name) => Flash::page_exists(&name),
    };

    let jar = push_flash(jar, flash, !state.insecure_cookie);
    Ok((jar, reload_then(EDIT_PAGES)).into_response())
}

/// GET /edit-pages
pub(crate) async fn edit_pages_list(
    State(state): State<PagewrightState>,
    jar: PrivateCookieJar,
) -> Result<Response, PagewrightError> {
    let pages = state.pages.list().await?;
    Ok(render(jar, |flashes| views::edit_pages_list(&pages, flashes)))
}

/// GET /edit-page/{path}
pub(crate) async fn edit_page_form(
    State(state): State<PagewrightState>,
    Path(path): Path<String>,
    jar: PrivateCookieJar,
) -> Result<Response, PagewrightError> {
    let (page, raw_content) = state.pages.load_for_edit(&path).await?;
    let title = page.title.as_deref().unwrap_or(page.path.as_str());
    Ok(render(jar, |flashes| {
        views::edit_page_form(&page.path, title, &raw_content, flashes)
    }))
}

/// POST /edit-page/{path}
pub(crate) async fn save_page_edit(
    State(state): State<PagewrightState>,
    Path(path): Path<String>,
    jar: PrivateCookieJar,
    Form(form): Form<PageForm>,
) -> Result<Response, PagewrightError> {
    let page = form.validate()?;

    let flash = match state.pages.edit(&path, page).await? {
        EditOutcome::Edited(name) => Flash::page_edited(&name),
        EditOutcome::Conflict(name) => Flash::page_exists(&name),
    };

    let jar = push_flash(jar, flash, !state.insecure_cookie);
    Ok((jar, reload_then(EDIT_PAGES)).into_response())
}

/// GET /delete-pages
pub(crate) async fn delete_pages_list(
    State(state): State<PagewrightState>,
    jar: PrivateCookieJar,
) -> Result<Response, PagewrightError> {
    let pages = state.pages.list().await?;
    Ok(render(jar, |flashes| views::delete_pages_list(&pages, flashes)))
}

/// GET|POST /delete-page/{path}
///
/// With `?confirm` only the confirmation screen is shown; otherwise the page is deleted.
pub(crate) async fn delete_page(
    State(state): State<PagewrightState>,
    Path(path): Path<String>,
    Query(query): Query<DeleteQuery>,
    jar: PrivateCookieJar,
) -> Result<Response, PagewrightError> {
    if query.wants_confirmation() {
        return Ok(render(jar, |flashes| views::delete_confirm(&path, flashes)));
    }

    state.pages.delete(&path).await?;

    let jar = push_flash(jar, Flash::page_deleted(&path), !state.insecure_cookie);
    Ok((jar, reload_then(DELETE_PAGES)).into_response())
}

/// GET /reload
///
/// Rebuilds the published page set from the database, then continues to `next`.
pub(crate) async fn reload(
    State(state): State<PagewrightState>,
    Query(query): Query<ReloadQuery>,
) -> Result<Redirect, PagewrightError> {
    let pages = state.pages.list().await?;
    let published = state.registry.rebuild(&pages).await;
    info!(published, "page registry reloaded");

    Ok(Redirect::to(safe_next(query.next.as_deref())))
}
