//! Integration tests for Contact Book.
//!
//! Each test serves the full application (middleware included) on an
//! ephemeral localhost port over a fresh temporary data directory, and
//! drives it with a cookie-store `reqwest` client the way a browser would.
//! No external database is needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p contactbook-integration-tests
//! ```

use reqwest::{Client, StatusCode, header};
use secrecy::SecretString;
use sqlx::SqlitePool;
use tokio::net::TcpListener;

use contactbook_core::Contact;
use contactbook_web::config::AppConfig;
use contactbook_web::db::{ContactRepository, init_database};
use contactbook_web::state::AppState;

const TEST_SECRET: &str = "aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6";

/// A running server over a throwaway data directory.
///
/// Redirects are not followed, so tests can check each `303` and then
/// fetch the target themselves. The client keeps cookies between requests,
/// so a redirect followed by [`TestContext::get`] sees the notice.
pub struct TestContext {
    client: Client,
    base_url: String,
    pool: SqlitePool,
    _data_dir: tempfile::TempDir,
}

/// A response reduced to what the tests inspect.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: String,
}

impl TestContext {
    /// Start the app over a fresh temporary data directory.
    ///
    /// # Panics
    ///
    /// Panics if the data directory, database, listener, or client cannot
    /// be created.
    pub async fn new() -> Self {
        let data_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config = AppConfig::for_data_dir(
            data_dir.path().join("instance"),
            SecretString::from(TEST_SECRET),
        );
        let pool = init_database(&config)
            .await
            .expect("Failed to initialize database");
        let router = contactbook_web::app(AppState::new(config, pool.clone()));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local address");
        tokio::spawn(async move {
            axum::serve(listener, router).await.ok();
        });

        let client = Client::builder()
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: format!("http://{addr}"),
            pool,
            _data_dir: data_dir,
        }
    }

    /// Send a GET request.
    pub async fn get(&self, path: &str) -> TestResponse {
        let resp = self
            .client
            .get(format!("{}{path}", self.base_url))
            .send()
            .await
            .expect("Failed to send request");
        TestResponse::read(resp).await
    }

    /// Send a form-encoded POST request.
    pub async fn post_form(&self, path: &str, fields: &[(&str, &str)]) -> TestResponse {
        let resp = self
            .client
            .post(format!("{}{path}", self.base_url))
            .form(fields)
            .send()
            .await
            .expect("Failed to send request");
        TestResponse::read(resp).await
    }

    /// All stored contacts, read straight from the database.
    pub async fn contacts(&self) -> Vec<Contact> {
        ContactRepository::new(&self.pool)
            .list_all()
            .await
            .expect("Failed to list contacts")
    }
}

impl TestResponse {
    async fn read(resp: reqwest::Response) -> Self {
        let status = resp.status();
        let location = resp
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = resp.text().await.expect("Failed to read body");

        Self {
            status,
            location,
            body,
        }
    }
}
