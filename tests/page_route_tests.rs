use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response, StatusCode, header},
};
use pagewright::{PageRegistry, PageService, PagewrightState, ThemeStore};
use std::{
    collections::BTreeMap,
    fs,
    path::PathBuf,
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};
use tower::ServiceExt;

const PASSWORD: &str = "pwd";

struct Harness {
    app: Router,
    db: pagewright::db::DbActorHandle,
    theme_dir: PathBuf,
    db_path: PathBuf,
    cookies: BTreeMap<String, String>,
}

impl Harness {
    async fn new(tag: &str) -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before UNIX_EPOCH")
            .as_nanos();
        let stem = format!("pagewright-{tag}-{}-{nanos}", std::process::id());

        let db_path = std::env::temp_dir().join(format!("{stem}.sqlite"));
        let theme_dir = std::env::temp_dir().join(format!("{stem}-theme"));

        let db = pagewright::db::spawn(&format!("sqlite:{}", db_path.display()))
            .await
            .expect("failed to spawn db actor");
        let theme = ThemeStore::new(theme_dir.clone());
        theme.ensure_root().await.expect("failed to create theme dir");

        let state = PagewrightState::new(
            PageService::new(db.clone(), theme),
            PageRegistry::new(),
            Arc::from(PASSWORD),
            true,
        );

        Self {
            app: pagewright::pagewright_router(state),
            db,
            theme_dir,
            db_path,
            cookies: BTreeMap::new(),
        }
    }

    async fn send(
        &mut self,
        method: &str,
        uri: &str,
        form: Option<&[(&str, &str)]>,
    ) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if !self.cookies.is_empty() {
            let cookie = self
                .cookies
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
                .join("; ");
            builder = builder.header(header::COOKIE, cookie);
        }
        let body = match form {
            Some(fields) => {
                builder =
                    builder.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
                let encoded = url::form_urlencoded::Serializer::new(String::new())
                    .extend_pairs(fields.iter())
                    .finish();
                Body::from(encoded)
            }
            None => Body::empty(),
        };

        let resp = self
            .app
            .clone()
            .oneshot(builder.body(body).expect("failed to build request"))
            .await
            .expect("request failed");

        for value in resp.headers().get_all(header::SET_COOKIE) {
            let raw = value.to_str().expect("set-cookie was not ascii");
            let pair = raw.split(';').next().unwrap_or_default();
            let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
            if value.is_empty() {
                self.cookies.remove(name);
            } else {
                self.cookies.insert(name.to_string(), value.to_string());
            }
        }

        resp
    }

    async fn get(&mut self, uri: &str) -> Response<Body> {
        self.send("GET", uri, None).await
    }

    async fn post(&mut self, uri: &str, form: &[(&str, &str)]) -> Response<Body> {
        self.send("POST", uri, Some(form)).await
    }

    async fn login(&mut self) {
        let resp = self
            .post("/login", &[("password", PASSWORD), ("next", "/pages/index")])
            .await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&resp), "/pages/index");
        assert!(self.cookies.contains_key("pagewright_session"));
    }

    fn theme_file(&self, name: &str) -> PathBuf {
        self.theme_dir.join(name)
    }

    fn cleanup(&self) {
        let _ = fs::remove_dir_all(&self.theme_dir);
        let _ = fs::remove_file(format!("{}-wal", self.db_path.display()));
        let _ = fs::remove_file(format!("{}-shm", self.db_path.display()));
        let _ = fs::remove_file(&self.db_path);
    }
}

fn location(resp: &Response<Body>) -> String {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

async fn body_string(resp: Response<Body>) -> String {
    let body = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    String::from_utf8(body.to_vec()).expect("response body was not utf-8")
}

#[tokio::test]
async fn admin_routes_require_login() {
    let mut h = Harness::new("auth").await;

    for uri in [
        "/pages/index",
        "/Add-pages",
        "/add-page",
        "/edit-pages",
        "/delete-pages",
        "/edit-page/AboutUs",
        "/delete-page/AboutUs",
        "/reload?next=/edit-pages",
    ] {
        let resp = h.get(uri).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER, "{uri} should redirect");
        assert!(location(&resp).starts_with("/login?next=%2F"), "{uri}");
    }

    // Unauthenticated POSTs must not touch the stores.
    let resp = h
        .post("/add-page", &[("page-title", "Sneaky"), ("page-body", "x")])
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert!(!h.theme_file("Sneaky.html").exists());
    assert!(h.db.list_pages().await.unwrap().is_empty());

    let resp = h.post("/login", &[("password", "wrong")]).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(body_string(resp).await.contains("Incorrect password."));
    assert!(!h.cookies.contains_key("pagewright_session"));

    h.login().await;

    let resp = h.get("/pages/index").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let resp = h.get("/Add-pages").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_string(resp).await.contains("href=\"/delete-pages\""));

    let resp = h.get("/logout").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let resp = h.get("/pages/index").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    h.cleanup();
}

#[tokio::test]
async fn add_page_validates_and_writes_both_stores() {
    let mut h = Harness::new("add").await;
    h.login().await;

    let resp = h.post("/add-page", &[("page-body", "<p>x</p>")]).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_string(resp).await, "Error: Page title is required");

    let resp = h.post("/add-page", &[("page-title", "About Us")]).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_string(resp).await, "Error: Page body is required");

    let resp = h
        .post("/add-page", &[("page-title", "?!"), ("page-body", "x")])
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(h.db.list_pages().await.unwrap().is_empty());

    // Titles that collapse onto a server route are refused.
    let resp = h
        .post("/add-page", &[("page-title", "Log-in"), ("page-body", "x")])
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_string(resp).await,
        "Error: Page name \"login\" is reserved"
    );
    assert!(!h.theme_file("login.html").exists());
    assert!(h.db.list_pages().await.unwrap().is_empty());
    assert_eq!(h.get("/login").await.status(), StatusCode::OK);

    let resp = h
        .post(
            "/add-page",
            &[("page-title", "About Us!"), ("page-body", "<p>About</p>")],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/reload?next=/edit-pages");

    assert_eq!(
        fs::read_to_string(h.theme_file("AboutUs.html")).unwrap(),
        "<p>About</p>"
    );
    let page = h.db.find_page_by_path("AboutUs").await.unwrap().unwrap();
    assert_eq!(page.page_name, "AboutUs");
    assert_eq!(page.template_file, "AboutUs.html");
    assert_eq!(page.title.as_deref(), Some("About Us!"));

    // Not published until the registry is reloaded.
    let resp = h.get("/AboutUs").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = h.get("/reload?next=/edit-pages").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/edit-pages");

    let resp = h.get("/AboutUs").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_string(resp).await, "<p>About</p>");

    // The flash is shown once.
    let html = body_string(h.get("/edit-pages").await).await;
    assert!(html.contains("Your new page "));
    assert!(html.contains("<a href=\"/AboutUs\">AboutUs</a>"));
    assert!(html.contains("href=\"/edit-page/AboutUs\""));
    let html = body_string(h.get("/edit-pages").await).await;
    assert!(!html.contains("Your new page "));

    // Same derived name: nothing is overwritten.
    let resp = h
        .post(
            "/add-page",
            &[("page-title", "About-Us"), ("page-body", "<p>Other</p>")],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(h.db.list_pages().await.unwrap().len(), 1);
    assert_eq!(
        fs::read_to_string(h.theme_file("AboutUs.html")).unwrap(),
        "<p>About</p>"
    );
    let html = body_string(h.get("/edit-pages").await).await;
    assert!(html.contains(" already exists"));

    // Open redirects are refused.
    let resp = h.get("/reload?next=//evil.example").await;
    assert_eq!(location(&resp), "/pages/index");

    h.cleanup();
}

#[tokio::test]
async fn edit_page_rewrites_and_renames() {
    let mut h = Harness::new("edit").await;
    h.login().await;

    h.post(
        "/add-page",
        &[("page-title", "About Us"), ("page-body", "<p>About</p>")],
    )
    .await;
    h.get("/reload?next=/edit-pages").await;
    assert_eq!(h.get("/AboutUs").await.status(), StatusCode::OK);

    let resp = h.get("/edit-page/AboutUs").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_string(resp).await;
    assert!(html.contains("&lt;p&gt;About&lt;/p&gt;"));
    assert!(html.contains("action=\"/edit-page/AboutUs\""));
    // The stored title, not the path.
    assert!(html.contains("value=\"About Us\""));

    // Same name: content replaced in place, no archive.
    let resp = h
        .post(
            "/edit-page/AboutUs",
            &[("page-title", "About Us"), ("page-body", "<p>v2</p>")],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/reload?next=/edit-pages");
    assert_eq!(
        fs::read_to_string(h.theme_file("AboutUs.html")).unwrap(),
        "<p>v2</p>"
    );
    assert!(!h.theme_file("AboutUs.html.old").exists());

    // New name: old file archived, row moved.
    let resp = h
        .post(
            "/edit-page/AboutUs",
            &[("page-title", "Company"), ("page-body", "<p>Company</p>")],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert!(!h.theme_file("AboutUs.html").exists());
    assert_eq!(
        fs::read_to_string(h.theme_file("AboutUs.html.old")).unwrap(),
        "<p>v2</p>"
    );
    assert_eq!(
        fs::read_to_string(h.theme_file("Company.html")).unwrap(),
        "<p>Company</p>"
    );
    assert!(h.db.find_page_by_path("AboutUs").await.unwrap().is_none());
    let page = h.db.find_page_by_path("Company").await.unwrap().unwrap();
    assert_eq!(page.page_name, "Company");
    assert_eq!(page.template_file, "Company.html");
    assert_eq!(page.title.as_deref(), Some("Company"));

    let html = body_string(h.get("/edit-pages").await).await;
    assert!(html.contains("Page edited. <a href=\"/Company\">Company</a>"));

    // The new path is published on reload; the old one is gone.
    assert_eq!(h.get("/Company").await.status(), StatusCode::NOT_FOUND);
    h.get("/reload?next=/edit-pages").await;
    assert_eq!(h.get("/AboutUs").await.status(), StatusCode::NOT_FOUND);
    let resp = h.get("/Company").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_string(resp).await, "<p>Company</p>");

    // Renaming onto a route name is refused and leaves the page alone.
    let resp = h
        .post(
            "/edit-page/Company",
            &[("page-title", "re-load"), ("page-body", "<p>x</p>")],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(!h.theme_file("reload.html").exists());
    assert!(h.db.find_page_by_path("Company").await.unwrap().is_some());

    // Renaming onto another page's path is refused.
    h.post("/add-page", &[("page-title", "Faq"), ("page-body", "<p>Faq</p>")])
        .await;
    let resp = h
        .post(
            "/edit-page/Faq",
            &[("page-title", "Company"), ("page-body", "<p>clobber</p>")],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        fs::read_to_string(h.theme_file("Company.html")).unwrap(),
        "<p>Company</p>"
    );
    assert!(h.db.find_page_by_path("Faq").await.unwrap().is_some());

    // Missing field and unknown page.
    let resp = h
        .post("/edit-page/Company", &[("page-body", "<p>x</p>")])
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_string(resp).await, "Error: Page title is required");

    let resp = h
        .post("/edit-page/Company", &[("page-title", "Company")])
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_string(resp).await, "Error: Page body is required");
    assert_eq!(
        fs::read_to_string(h.theme_file("Company.html")).unwrap(),
        "<p>Company</p>"
    );

    let resp = h.get("/edit-page/AboutUs").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let resp = h.get("/edit-page/..%2F..%2Fetc%2Fpasswd").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    h.cleanup();
}

#[tokio::test]
async fn delete_page_confirms_then_removes_file_and_row() {
    let mut h = Harness::new("delete").await;
    h.login().await;

    h.post("/add-page", &[("page-title", "Faq"), ("page-body", "<p>Faq</p>")])
        .await;
    h.get("/reload?next=/delete-pages").await;

    let html = body_string(h.get("/delete-pages").await).await;
    assert!(html.contains("href=\"/delete-page/Faq?confirm\""));

    let resp = h.get("/delete-page/Faq?confirm").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_string(resp).await.contains("action=\"/delete-page/Faq\""));
    assert!(h.theme_file("Faq.html").exists());

    let resp = h.post("/delete-page/Faq", &[]).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/reload?next=/delete-pages");
    assert!(!h.theme_file("Faq.html").exists());
    assert!(h.db.list_pages().await.unwrap().is_empty());

    let html = body_string(h.get("/reload?next=/delete-pages").await).await;
    assert!(html.is_empty());
    let html = body_string(h.get("/delete-pages").await).await;
    assert!(html.contains("Faq"));
    assert!(html.contains(" deleted."));
    assert_eq!(h.get("/Faq").await.status(), StatusCode::NOT_FOUND);

    // A missing template file does not block deleting the row.
    h.post("/add-page", &[("page-title", "Gone"), ("page-body", "x")])
        .await;
    fs::remove_file(h.theme_file("Gone.html")).unwrap();
    let resp = h.get("/delete-page/Gone").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert!(h.db.find_page_by_path("Gone").await.unwrap().is_none());

    let resp = h.post("/delete-page/Faq", &[]).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // Theme files without a row are not ours to delete.
    fs::write(h.theme_file("index.html"), "<p>theme</p>").unwrap();
    let resp = h.get("/delete-page/index").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let resp = h.post("/delete-page/index", &[]).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        fs::read_to_string(h.theme_file("index.html")).unwrap(),
        "<p>theme</p>"
    );

    let resp = h.get("/delete-page/..%2Fx").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    h.cleanup();
}

#[tokio::test]
async fn unicode_titles_round_trip_through_every_route() {
    let mut h = Harness::new("unicode").await;
    h.login().await;

    let resp = h
        .post(
            "/add-page",
            &[("page-title", "Über uns"), ("page-body", "<p>Hallo</p>")],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        fs::read_to_string(h.theme_file("Überuns.html")).unwrap(),
        "<p>Hallo</p>"
    );
    let page = h.db.find_page_by_path("Überuns").await.unwrap().unwrap();
    assert_eq!(page.template_file, "Überuns.html");
    assert_eq!(page.title.as_deref(), Some("Über uns"));

    h.get("/reload?next=/edit-pages").await;
    let resp = h.get("/%C3%9Cberuns").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_string(resp).await, "<p>Hallo</p>");

    let resp = h.get("/edit-page/%C3%9Cberuns").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_string(resp).await.contains("&lt;p&gt;Hallo&lt;/p&gt;"));

    let resp = h.post("/delete-page/%C3%9Cberuns", &[]).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert!(!h.theme_file("Überuns.html").exists());
    assert!(h.db.list_pages().await.unwrap().is_empty());

    h.cleanup();
}

#[tokio::test]
async fn public_paths_outside_the_registry_are_not_found() {
    let mut h = Harness::new("public").await;
    fs::write(h.theme_file("secret.html"), "<p>secret</p>").unwrap();

    // Files on disk are only served once they are registered pages.
    assert_eq!(h.get("/secret").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(h.get("/a%2Fb").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        h.get("/..%2Fsecret.html").await.status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(h.get("/no/such/page").await.status(), StatusCode::NOT_FOUND);

    h.cleanup();
}
