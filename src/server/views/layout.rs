use maud::{DOCTYPE, Markup, html};
use pagewright_schema::Flash;

pub fn layout(title: &str, flashes: &[Flash], content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " | Pages" }
            }
            body {
                nav {
                    a href="/pages/index" { "Pages" }
                    " · "
                    a href="/add-page" { "Add" }
                    " · "
                    a href="/edit-pages" { "Edit" }
                    " · "
                    a href="/delete-pages" { "Delete" }
                    " · "
                    a href="/logout" { "Log out" }
                }
                @if !flashes.is_empty() {
                    ul.flashes {
                        @for flash in flashes {
                            li { (flash_markup(flash)) }
                        }
                    }
                }
                main {
                    h1 { (title) }
                    (content)
                }
            }
        }
    }
}

fn flash_markup(flash: &Flash) -> Markup {
    html! {
        (flash.text)
        @if let Some(link) = &flash.link {
            a href={ "/" (link) } { (link) }
        }
        (flash.suffix)
    }
}
