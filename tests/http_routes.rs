use dashboard_catalog::infrastructure::config::AppConfig;
use dashboard_catalog::{build_router, build_state};
use reqwest::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use reqwest::{redirect, Client, Response, StatusCode};
use serde_json::Value;
use std::path::PathBuf;
use tempfile::TempDir;

struct TestServer {
    base_url: String,
    data_file: PathBuf,
    client: Client,
    _dir: TempDir,
}

async fn spawn_server() -> TestServer {
    let dir = tempfile::tempdir().unwrap();
    let data_file = dir.path().join("dashboards.json");
    let config = AppConfig {
        bind_addr: "127.0.0.1:0".to_string(),
        data_file: data_file.clone(),
        secret_key: "test-secret".to_string(),
    };

    let router = build_router(build_state(&config).unwrap());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    TestServer {
        base_url: format!("http://{}", addr),
        data_file,
        client: Client::builder()
            .redirect(redirect::Policy::none())
            .build()
            .unwrap(),
        _dir: dir,
    }
}

impl TestServer {
    async fn get(&self, path: &str) -> Response {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .unwrap()
    }

    async fn get_with_cookie(&self, path: &str, cookie: &str) -> Response {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .header(COOKIE, cookie)
            .send()
            .await
            .unwrap()
    }

    async fn post_form(&self, path: &str, body: &str) -> Response {
        self.client
            .post(format!("{}{}", self.base_url, path))
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body.to_string())
            .send()
            .await
            .unwrap()
    }

    fn stored(&self) -> Value {
        match std::fs::read_to_string(&self.data_file) {
            Ok(raw) => serde_json::from_str(&raw).unwrap(),
            Err(_) => serde_json::json!({ "dashboards": [] }),
        }
    }
}

/// The `name=value` part of the response's Set-Cookie header.
fn flash_cookie(response: &Response) -> String {
    let header = response.headers()[SET_COOKIE].to_str().unwrap();
    header.split(';').next().unwrap().to_string()
}

fn assert_security_headers(response: &Response) {
    let headers = response.headers();
    assert_eq!(headers["x-frame-options"], "SAMEORIGIN");
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert_eq!(headers["x-xss-protection"], "1; mode=block");
    assert!(headers["content-security-policy"]
        .to_str()
        .unwrap()
        .contains("frame-src 'self' https://*.powerbi.com"));
}

#[tokio::test]
async fn test_home_without_data_file_lists_nothing() {
    let server = spawn_server().await;

    let response = server.get("/").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_security_headers(&response);

    let body = response.text().await.unwrap();
    assert!(body.contains("No dashboards yet"));
    assert!(!server.data_file.exists());
}

#[tokio::test]
async fn test_add_dashboard_then_view_it() {
    let server = spawn_server().await;

    let response = server
        .post_form(
            "/admin/add",
            "name=Sales&slug=sales&embed_url=https%3A%2F%2Fapp.powerbi.com%2Fx",
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[LOCATION], "/");
    assert_security_headers(&response);
    let cookie = flash_cookie(&response);

    let stored = server.stored();
    let dashboards = stored["dashboards"].as_array().unwrap();
    assert_eq!(dashboards.len(), 1);
    assert_eq!(dashboards[0]["id"], 1);
    assert_eq!(dashboards[0]["tags"], serde_json::json!([]));
    assert_eq!(dashboards[0]["description"], Value::Null);

    // Following the redirect shows the notice once and expires the cookie.
    let response = server.get_with_cookie("/", &cookie).await;
    assert!(response.headers()[SET_COOKIE]
        .to_str()
        .unwrap()
        .contains("Max-Age=0"));
    let body = response.text().await.unwrap();
    assert!(body.contains("Dashboard added successfully!"));
    assert!(body.contains("Sales"));

    let response = server.get("/dashboard/sales").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.unwrap();
    assert!(body.contains("<iframe"));
    assert!(body.contains("app.powerbi.com"));
}

#[tokio::test]
async fn test_add_parses_tags_and_increments_ids() {
    let server = spawn_server().await;

    for slug in ["first", "second"] {
        let body = format!("name=N&slug={slug}&embed_url=u&tags=a%2C+b+%2C%2C+c");
        let response = server.post_form("/admin/add", &body).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }

    let stored = server.stored();
    let dashboards = stored["dashboards"].as_array().unwrap();
    assert_eq!(dashboards.len(), 2);
    assert_eq!(dashboards[1]["id"], 2);
    assert_eq!(dashboards[1]["slug"], "second");
    assert_eq!(dashboards[1]["tags"], serde_json::json!(["a", "b", "c"]));
}

#[tokio::test]
async fn test_add_missing_name_rerenders_form() {
    let server = spawn_server().await;

    let response = server
        .post_form("/admin/add", "slug=sales&embed_url=https%3A%2F%2Fapp.powerbi.com%2Fx")
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_security_headers(&response);

    let body = response.text().await.unwrap();
    assert!(body.contains("Please fill in all required fields (name, slug, embed_url)"));
    assert!(body.contains("<form"));
    assert!(!server.data_file.exists());
}

#[tokio::test]
async fn test_unknown_slug_redirects_with_notice() {
    let server = spawn_server().await;

    let response = server.get("/dashboard/unknown-slug").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[LOCATION], "/");
    assert_security_headers(&response);

    let cookie = flash_cookie(&response);
    let body = server.get_with_cookie("/", &cookie).await.text().await.unwrap();
    assert!(body.contains("Dashboard not found"));
}

#[tokio::test]
async fn test_forged_flash_cookie_is_ignored() {
    let server = spawn_server().await;

    let response = server
        .get_with_cookie("/about", "flash=error.Hacked.0000")
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.unwrap();
    assert!(!body.contains("Hacked"));
    assert!(body.contains("About"));
}

#[tokio::test]
async fn test_corrupt_data_file_is_server_error() {
    let server = spawn_server().await;
    std::fs::write(&server.data_file, "{ not json").unwrap();

    let response = server.get("/").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_security_headers(&response);
}

#[tokio::test]
async fn test_unknown_route_still_has_headers() {
    let server = spawn_server().await;

    let response = server.get("/nope").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_security_headers(&response);

    let response = server.get("/admin/add").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.text().await.unwrap().contains("name=\"embed_url\""));
}

#[tokio::test]
async fn test_list_link_reaches_slug_with_reserved_characters() {
    let server = spawn_server().await;

    let response = server
        .post_form("/admin/add", "name=Q1&slug=q1%3Fdraft&embed_url=u")
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let body = server.get("/").await.text().await.unwrap();
    assert!(body.contains(r#"href="/dashboard/q1%3Fdraft""#));

    let response = server.get("/dashboard/q1%3Fdraft").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.text().await.unwrap().contains("Q1"));
}

#[tokio::test]
async fn test_unreadable_add_form_rerenders_with_notice() {
    let server = spawn_server().await;

    let response = server
        .client
        .post(format!("{}/admin/add", server.base_url))
        .body("name=Sales&slug=sales&embed_url=u")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_security_headers(&response);
    let body = response.text().await.unwrap();
    assert!(body.contains("Please fill in all required fields (name, slug, embed_url)"));

    let response = server
        .post_form("/admin/add", "name=a&name=b&slug=s&embed_url=u")
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.unwrap();
    assert!(body.contains("Please fill in all required fields (name, slug, embed_url)"));

    assert!(!server.data_file.exists());
}
