#![allow(dead_code)]

use clinic_service::config::ClinicConfig;
use clinic_service::services::ClinicDb;
use clinic_service::startup::Application;
use serde_json::Value;
use uuid::Uuid;

pub const TEST_STAFF_ID: &str = "staff_test_001";

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub db: ClinicDb,
    pub db_name: String,
    pub client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn() -> Self {
        std::env::set_var("MONGODB_URI", "mongodb://localhost:27017");

        let db_name = format!("clinic_test_{}", Uuid::new_v4());

        let mut config = ClinicConfig::load().expect("Failed to load configuration");
        config.common.port = 0; // Random port for testing
        config.mongodb.database = db_name.clone();

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let db = app.db().clone();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            db,
            db_name,
            client,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn post(&self, path: &str, body: &Value) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .header("X-User-ID", TEST_STAFF_ID)
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn put(&self, path: &str, body: &Value) -> reqwest::Response {
        self.client
            .put(self.url(path))
            .header("X-User-ID", TEST_STAFF_ID)
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// POST and decode the JSON body, asserting the expected status.
    pub async fn post_ok(&self, path: &str, body: &Value, expected: u16) -> Value {
        let response = self.post(path, body).await;
        let status = response.status().as_u16();
        let body: Value = response.json().await.expect("Failed to parse JSON");
        assert_eq!(status, expected, "unexpected status for POST {}: {}", path, body);
        body
    }

    pub async fn cleanup(&self) {
        let _ = self.db.client().database(&self.db_name).drop(None).await;
    }
}

/// `PREFIX` followed by the current year and month, as used in dated codes.
pub fn dated_prefix(prefix: &str) -> String {
    format!("{}{}", prefix, chrono::Utc::now().format("%Y%m"))
}
