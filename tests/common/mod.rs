use std::net::SocketAddr;

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use tablero::config::Config;

pub const PASSWORD: &str = "password123";

/// A running test server instance with a dedicated test database.
pub struct TestApp {
    pub addr: SocketAddr,
    pub pool: PgPool,
    pub db_name: String,
}

/// One browser context: a client with its own cookie store plus the CSRF
/// token the server issued for its session.
pub struct TestSession {
    pub client: Client,
    pub base: String,
    pub csrf_token: String,
    pub user_id: i64,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Fresh browser context with no session.
    pub fn anonymous(&self) -> TestSession {
        TestSession {
            client: Client::builder()
                .cookie_store(true)
                .redirect(reqwest::redirect::Policy::none())
                .build()
                .unwrap(),
            base: format!("http://{}", self.addr),
            csrf_token: String::new(),
            user_id: 0,
        }
    }

    pub async fn try_register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> (TestSession, Value, StatusCode) {
        let session = self.anonymous();
        let (body, status) = session
            .post_with_token(
                "/api/v1/auth/register",
                &json!({ "name": name, "email": email, "password": password }),
                None,
            )
            .await;
        (session, body, status)
    }

    /// Register a user and return their authenticated session.
    pub async fn register(&self, name: &str, email: &str) -> TestSession {
        let (mut session, body, status) = self.try_register(name, email, PASSWORD).await;
        assert_eq!(status, StatusCode::OK, "register failed: {body}");
        session.adopt(&body);
        session
    }

    pub async fn try_login(&self, email: &str, password: &str) -> (TestSession, Value, StatusCode) {
        let session = self.anonymous();
        let (body, status) = session
            .post_with_token(
                "/api/v1/auth/login",
                &json!({ "email": email, "password": password }),
                None,
            )
            .await;
        (session, body, status)
    }

    pub async fn login(&self, email: &str, password: &str) -> TestSession {
        let (mut session, body, status) = self.try_login(email, password).await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        session.adopt(&body);
        session
    }

    /// Create a team through the admin surface, return its id.
    pub async fn create_team(&self, admin: &TestSession, name: &str) -> i64 {
        let (body, status) = admin
            .post("/api/v1/admin/teams", &json!({ "name": name }))
            .await;
        assert_eq!(status, StatusCode::OK, "create team failed: {body}");
        body["id"].as_i64().unwrap()
    }

    pub async fn assign_team(&self, admin: &TestSession, user_id: i64, team_id: i64) {
        let (body, status) = admin
            .put(
                &format!("/api/v1/admin/users/{user_id}/team"),
                &json!({ "team_id": team_id }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "assign team failed: {body}");
    }

    pub async fn change_role(&self, admin: &TestSession, user_id: i64, role: &str) {
        let (body, status) = admin
            .put(
                &format!("/api/v1/admin/users/{user_id}/role"),
                &json!({ "role": role }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "change role failed: {body}");
    }

    /// Register a user and put them on a team in one step.
    pub async fn register_member(
        &self,
        admin: &TestSession,
        name: &str,
        email: &str,
        team_id: i64,
    ) -> TestSession {
        let session = self.register(name, email).await;
        self.assign_team(admin, session.user_id, team_id).await;
        session
    }
}

impl TestSession {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// Pull the CSRF token and user id out of a login/register response.
    pub fn adopt(&mut self, body: &Value) {
        self.csrf_token = body["csrf_token"].as_str().unwrap().to_string();
        self.user_id = body["user"]["id"].as_i64().unwrap();
    }

    pub async fn get(&self, path: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("get request failed");
        read(resp).await
    }

    /// POST carrying this session's CSRF token.
    pub async fn post(&self, path: &str, body: &Value) -> (Value, StatusCode) {
        self.post_with_token(path, body, Some(self.csrf_token.as_str()))
            .await
    }

    pub async fn post_with_token(
        &self,
        path: &str,
        body: &Value,
        csrf_token: Option<&str>,
    ) -> (Value, StatusCode) {
        let mut req = self.client.post(self.url(path)).json(body);
        if let Some(token) = csrf_token {
            req = req.header("x-csrf-token", token);
        }
        let resp = req.send().await.expect("post request failed");
        read(resp).await
    }

    /// PUT carrying this session's CSRF token.
    pub async fn put(&self, path: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .put(self.url(path))
            .header("x-csrf-token", self.csrf_token.as_str())
            .json(body)
            .send()
            .await
            .expect("put request failed");
        read(resp).await
    }

    /// DELETE carrying this session's CSRF token.
    pub async fn delete(&self, path: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .delete(self.url(path))
            .header("x-csrf-token", self.csrf_token.as_str())
            .send()
            .await
            .expect("delete request failed");
        read(resp).await
    }
}

async fn read(resp: reqwest::Response) -> (Value, StatusCode) {
    let status = resp.status();
    let body: Value = resp.json().await.unwrap_or(json!(null));
    (body, status)
}

/// Value of the session cookie set by a response, if any.
pub fn session_cookie(resp: &reqwest::Response) -> Option<String> {
    resp.headers()
        .get_all(reqwest::header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("tablero_session="))
        .and_then(|v| v.split(';').next())
        .map(|v| v.trim_start_matches("tablero_session=").to_string())
}

/// Spawn a test app with a fresh temporary database.
pub async fn spawn_app() -> TestApp {
    let _ = dotenvy::dotenv();

    let base_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");

    // Create a unique test database
    let db_name = format!(
        "tablero_test_{}",
        Uuid::now_v7().to_string().replace('-', "")
    );

    // Connect to default postgres DB to create test DB
    let admin_url = base_url
        .rsplit_once('/')
        .map(|(base, _)| format!("{base}/postgres"))
        .unwrap_or_else(|| base_url.clone());

    let admin_pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&admin_url)
        .await
        .expect("Failed to connect to postgres for test DB creation");

    sqlx::query(&format!("CREATE DATABASE \"{db_name}\""))
        .execute(&admin_pool)
        .await
        .expect("Failed to create test database");

    admin_pool.close().await;

    // Connect to test DB and run migrations
    let test_url = base_url
        .rsplit_once('/')
        .map(|(base, _)| format!("{base}/{db_name}"))
        .unwrap_or_else(|| base_url.clone());

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&test_url)
        .await
        .expect("Failed to connect to test database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations on test database");

    let config = Config {
        database_url: test_url,
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        base_url: "http://localhost:0".to_string(),
        log_level: "warn".to_string(),
        smtp: None,
    };

    let app = tablero::build_app(pool.clone(), config);

    // Bind to random port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    // Spawn server in background
    tokio::spawn(async move {
        axum::serve(listener, app.into_make_service())
            .await
            .expect("Server failed");
    });

    TestApp {
        addr,
        pool,
        db_name,
    }
}

/// Drop the test database after tests complete.
pub async fn cleanup(app: TestApp) {
    let db_name = app.db_name.clone();
    app.pool.close().await;

    let base_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");
    let admin_url = base_url
        .rsplit_once('/')
        .map(|(base, _)| format!("{base}/postgres"))
        .unwrap_or_else(|| base_url.clone());

    let admin_pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&admin_url)
        .await
        .expect("Failed to connect for cleanup");

    let _ = sqlx::query(&format!("DROP DATABASE IF EXISTS \"{db_name}\" WITH (FORCE)"))
        .execute(&admin_pool)
        .await;

    admin_pool.close().await;
}
