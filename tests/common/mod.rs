#![allow(dead_code)]

use std::net::SocketAddr;

use reqwest::{Client, Response};
use serde_json::Value;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use modqueue::auth::jwt::{Claims, encode_token};
use modqueue::auth::password;
use modqueue::config::Config;
use modqueue::db;
use modqueue::models::{Account, ActionLog, Report, Role, User};

pub const PASSWORD: &str = "password123";
const JWT_SECRET: &str = "test-jwt-secret-that-is-long-enough";

/// A running test server instance with a dedicated test database.
pub struct TestApp {
    pub addr: SocketAddr,
    pub pool: PgPool,
    pub client: Client,
    pub db_name: String,
}

/// An account with a signed-in user behind it.
pub struct TestAccount {
    pub account: Account,
    pub user: User,
    pub token: String,
}

impl TestAccount {
    pub fn id(&self) -> Uuid {
        self.account.id
    }
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Insert an account and user directly and mint an access token for it.
    pub async fn create_account(&self, username: &str, role: Role, discoverable: bool) -> TestAccount {
        let account = db::accounts::create(&self.pool, username, username, discoverable)
            .await
            .expect("create account failed");
        let hash = password::hash(PASSWORD).expect("hash failed");
        let user = db::users::create(
            &self.pool,
            account.id,
            &format!("{username}@test.com"),
            &hash,
            role.as_str(),
        )
        .await
        .expect("create user failed");

        let token = encode_token(&Claims::new(user.id, account.id, role), JWT_SECRET)
            .expect("encode token failed");

        TestAccount {
            account,
            user,
            token,
        }
    }

    pub async fn moderator(&self, username: &str) -> TestAccount {
        self.create_account(username, Role::Moderator, false).await
    }

    /// Insert a report; `resolved_by` marks it resolved by that account now.
    pub async fn create_report(
        &self,
        reporter: Uuid,
        target: Uuid,
        comment: &str,
        resolved_by: Option<Uuid>,
    ) -> Report {
        sqlx::query_as::<_, Report>(
            "INSERT INTO reports (account_id, target_account_id, comment, action_taken_at, action_taken_by_account_id)
             VALUES ($1, $2, $3, CASE WHEN $4::uuid IS NULL THEN NULL ELSE now() END, $4)
             RETURNING *",
        )
        .bind(reporter)
        .bind(target)
        .bind(comment)
        .bind(resolved_by)
        .fetch_one(&self.pool)
        .await
        .expect("create report failed")
    }

    pub async fn reload_report(&self, id: Uuid) -> Report {
        db::reports::find_by_id(&self.pool, id)
            .await
            .expect("reload report failed")
            .expect("report vanished")
    }

    pub async fn last_action_log(&self) -> Option<ActionLog> {
        sqlx::query_as::<_, ActionLog>(
            "SELECT * FROM admin_action_logs ORDER BY created_at DESC, id DESC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await
        .expect("query action log failed")
    }

    pub async fn action_log_count(&self) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM admin_action_logs")
            .fetch_one(&self.pool)
            .await
            .expect("count action logs failed")
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> Response {
        let mut req = self.client.get(self.url(path));
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        req.send().await.expect("get request failed")
    }

    pub async fn put(&self, path: &str, token: &str) -> Response {
        self.client
            .put(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .expect("put request failed")
    }

    pub async fn post_json(&self, path: &str, token: Option<&str>, body: &Value) -> Response {
        let mut req = self.client.post(self.url(path)).json(body);
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        req.send().await.expect("post request failed")
    }

    /// POST a raw urlencoded body, so malformed nesting can be sent as-is.
    pub async fn post_form(&self, path: &str, token: &str, body: &str) -> Response {
        self.client
            .post(self.url(path))
            .bearer_auth(token)
            .header("content-type", "application/x-www-form-urlencoded")
            .body(body.to_string())
            .send()
            .await
            .expect("post form request failed")
    }

    pub async fn delete(&self, path: &str, token: &str) -> Response {
        self.client
            .delete(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .expect("delete request failed")
    }
}

pub fn location(resp: &Response) -> String {
    resp.headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

fn sibling_url(base_url: &str, db_name: &str) -> String {
    base_url
        .rsplit_once('/')
        .map(|(base, _)| format!("{base}/{db_name}"))
        .unwrap_or_else(|| base_url.to_string())
}

/// Spawn a test app with a fresh temporary database.
pub async fn spawn_app() -> TestApp {
    let _ = dotenvy::dotenv();

    let base_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");
    let db_name = format!("modqueue_test_{}", Uuid::now_v7().simple());

    let admin_pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&sibling_url(&base_url, "postgres"))
        .await
        .expect("Failed to connect to postgres for test DB creation");

    sqlx::query(&format!("CREATE DATABASE \"{db_name}\""))
        .execute(&admin_pool)
        .await
        .expect("Failed to create test database");

    admin_pool.close().await;

    let test_url = sibling_url(&base_url, &db_name);
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
        jwt_secret: JWT_SECRET.to_string(),
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        max_body_size: 1_048_576,
        db_max_connections: 5,
        secure_cookies: false,
        log_level: "warn".to_string(),
    };

    let app = modqueue::build_app(pool.clone(), config);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    let client = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    TestApp {
        addr,
        pool,
        client,
        db_name,
    }
}

/// Drop the test database after tests complete.
pub async fn cleanup(app: TestApp) {
    let db_name = app.db_name.clone();
    app.pool.close().await;

    let base_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");
    let admin_pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&sibling_url(&base_url, "postgres"))
        .await
        .expect("Failed to connect for cleanup");

    let _ = sqlx::query(&format!("DROP DATABASE IF EXISTS \"{db_name}\" WITH (FORCE)"))
        .execute(&admin_pool)
        .await;

    admin_pool.close().await;
}
