use crate::server::router::PagewrightState;
use axum::{Router, routing::get};

pub mod handlers;

/// Page administration routes. Callers are expected to add the login guard.
pub fn router() -> Router<PagewrightState> {
    Router::new()
        .route("/pages/index", get(handlers::module_index))
        .route("/Add-pages", get(handlers::module_index))
        .route(
            "/add-page",
            get(handlers::add_page_form).post(handlers::save_new_page),
        )
        .route("/edit-pages", get(handlers::edit_pages_list))
        .route(
            "/edit-page/{path}",
            get(handlers::edit_page_form).post(handlers::save_page_edit),
        )
        .route("/delete-pages", get(handlers::delete_pages_list))
        .route(
            "/delete-page/{path}",
            get(handlers::delete_page).post(handlers::delete_page),
        )
}
