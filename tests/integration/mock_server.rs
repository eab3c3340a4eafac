//! Mock HTTP server setup for integration tests

use ai_service_rust::{ServiceClient, ServiceClientBuilder};
use mockito::{Matcher, Mock, Server, ServerGuard};

pub const VERSION: &str = "2018-05-01";
pub const IAM_PATH: &str = "/identity/token";
pub const API_KEY: &str = "test-api-key";

/// Test fixture that manages a mock server playing both the service and the IAM endpoint
pub struct MockServerFixture {
    pub server: ServerGuard,
    pub base_url: String,
}

impl MockServerFixture {
    pub async fn new() -> Self {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let server = Server::new_async().await;
        let base_url = server.url();
        Self { server, base_url }
    }

    pub fn iam_url(&self) -> String {
        format!("{}{}", self.base_url, IAM_PATH)
    }

    /// Builder pointed at the mock server with the test version set
    pub fn builder(&self) -> ServiceClientBuilder {
        ServiceClient::builder("test_service")
            .url(&self.base_url)
            .version(VERSION)
    }

    pub fn basic_client(&self) -> ServiceClient {
        self.builder()
            .username("user")
            .password("pass")
            .build()
            .expect("basic client")
    }

    pub fn iam_client(&self) -> ServiceClient {
        self.builder()
            .iam_api_key(API_KEY)
            .iam_url(self.iam_url())
            .build()
            .expect("iam client")
    }

    /// IAM token endpoint answering with `token`, valid for `valid_for_secs` from now
    pub async fn mock_iam_token(&mut self, token: &str, valid_for_secs: i64, hits: usize) -> Mock {
        let expiration = chrono::Utc::now().timestamp() + valid_for_secs;
        self.server
            .mock("POST", IAM_PATH)
            .match_header("authorization", "Basic Yng6Yng=")
            .match_header(
                "content-type",
                Matcher::Regex("^application/x-www-form-urlencoded".into()),
            )
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex("grant_type=urn%3Aibm%3Aparams%3Aoauth%3Agrant-type%3Aapikey".into()),
                Matcher::Regex(format!("apikey={}", API_KEY)),
                Matcher::Regex("response_type=cloud_iam".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                serde_json::json!({
                    "access_token": token,
                    "refresh_token": "refresh",
                    "token_type": "Bearer",
                    "expires_in": valid_for_secs,
                    "expiration": expiration,
                })
                .to_string(),
            )
            .expect(hits)
            .create_async()
            .await
    }

    /// Service endpoint answering `status` with a JSON `body`; query string is not matched
    pub async fn mock_json(
        &mut self,
        method: &str,
        path: &str,
        status: usize,
        body: &str,
    ) -> Mock {
        self.server
            .mock(method, path)
            .match_query(Matcher::Any)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await
    }
}
