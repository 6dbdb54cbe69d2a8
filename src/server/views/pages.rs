use super::layout;
use crate::db::DbPage;
use maud::{Markup, html};
use pagewright_schema::Flash;

pub fn module_index(flashes: &[Flash]) -> Markup {
    let content = html! {
        p { "Manage the static pages of your site." }
        ul {
            li { a href="/add-page" { "Add a page" } }
            li { a href="/edit-pages" { "Edit pages" } }
            li { a href="/delete-pages" { "Delete pages" } }
        }
    };
    layout("Pages", flashes, &content)
}

pub fn add_page_form(flashes: &[Flash]) -> Markup {
    let content = page_form("/add-page", "", "", "Save page");
    layout("Add page", flashes, &content)
}

pub fn edit_page_form(
    path: &str,
    page_title: &str,
    raw_content: &str,
    flashes: &[Flash],
) -> Markup {
    let action = format!("/edit-page/{path}");
    let content = page_form(&action, page_title, raw_content, "Save changes");
    layout(&format!("Edit {path}"), flashes, &content)
}

fn page_form(action: &str, title: &str, body: &str, submit: &str) -> Markup {
    html! {
        form method="post" action=(action) {
            p {
                label for="page-title" { "Title" }
                input #page-title type="text" name="page-title" value=(title) required;
            }
            p {
                label for="page-body" { "Body (HTML)" }
                textarea #page-body name="page-body" rows="20" cols="80" { (body) }
            }
            button type="submit" { (submit) }
        }
    }
}

pub fn edit_pages_list(pages: &[DbPage], flashes: &[Flash]) -> Markup {
    let content = html! {
        @if pages.is_empty() {
            p { "There are no pages yet. " a href="/add-page" { "Add one." } }
        } @else {
            ul.pages {
                @for page in pages {
                    li {
                        a href={ "/edit-page/" (page.path) } { (page_label(page)) }
                        " "
                        a href={ "/" (page.path) } { "view" }
                    }
                }
            }
        }
    };
    layout("Edit pages", flashes, &content)
}

pub fn delete_pages_list(pages: &[DbPage], flashes: &[Flash]) -> Markup {
    let content = html! {
        @if pages.is_empty() {
            p { "There are no pages to delete." }
        } @else {
            ul.pages {
                @for page in pages {
                    li {
                        (page_label(page))
                        " "
                        a href={ "/delete-page/" (page.path) "?confirm" } { "delete" }
                    }
                }
            }
        }
    };
    layout("Delete pages", flashes, &content)
}

pub fn delete_confirm(path: &str, flashes: &[Flash]) -> Markup {
    let content = html! {
        p { "Delete the page " strong { (path) } "? This removes its template file too." }
        form method="post" action={ "/delete-page/" (path) } {
            button type="submit" { "Yes, delete it" }
            " "
            a href="/delete-pages" { "Cancel" }
        }
    };
    layout("Delete page", flashes, &content)
}

fn page_label(page: &DbPage) -> &str {
    page.title.as_deref().unwrap_or(page.page_name.as_str())
}
