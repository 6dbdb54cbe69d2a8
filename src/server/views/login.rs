use maud::{DOCTYPE, Markup, html};

pub fn login_form(next: &str, error: Option<&str>) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { "Log in" }
            }
            body {
                main {
                    h1 { "Log in" }
                    @if let Some(error) = error {
                        p.error { (error) }
                    }
                    form method="post" action="/login" {
                        input type="hidden" name="next" value=(next);
                        label for="password" { "Password" }
                        input #password type="password" name="password" autofocus;
                        button type="submit" { "Log in" }
                    }
                }
            }
        }
    }
}
